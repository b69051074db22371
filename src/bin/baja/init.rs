use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Local;

use baja::util::os_helper::get_author;

use crate::{InitArgs, CFG_FILE_NAME};

const CONFIG_SAMPLE: &str = r#"theme = "{{THEME}}"

[site]
title = "{{TITLE}}"
description = ""
base_url = "http://localhost"
author = "{{AUTHOR}}"

# Relative to the project root
[paths]
content_dir = "content"
themes_dir = "themes"
public_dir = "public"

[log]
level = "Info"
log_to_console = true
"#;

const LAYOUT_SAMPLE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{% block title %}{{ meta.title }} - {{ site.title }}{% endblock %}</title>
<link rel="stylesheet" href="{{ "/asset/site.css" | absolute_url }}">
</head>
<body>
<header><a href="{{ "/" | absolute_url }}">{{ site.title }}</a></header>
<main>
{% block content %}
<article>
<h1>{{ meta.title }}</h1>
<time>{{ meta.date_formatted }}</time>
{{ body }}
</article>
{% endblock %}
</main>
<footer>{{ site.author }} {{ now("%Y") }}</footer>
</body>
</html>
"#;

const STYLE_SAMPLE: &str = "body { max-width: 42em; margin: 0 auto; font-family: sans-serif; }\n";

const WELCOME_SAMPLE: &str = r#"+++
title = "Welcome"
date = {{TODAY}}
tags = ["baja"]
+++
This site was generated by `baja init`. Edit `content/` and run `baja build`.
"#;

fn render_sample_cfg(title: &str, theme: &str, author: &str) -> String {
    CONFIG_SAMPLE
        .replace("{{TITLE}}", title)
        .replace("{{THEME}}", theme)
        .replace("{{AUTHOR}}", author)
}

fn render_welcome() -> String {
    let today = Local::now().format("%Y-%m-%d").to_string();
    WELCOME_SAMPLE.replace("{{TODAY}}", &today)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Cannot create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Cannot write {}", path.display()))
}

pub(crate) fn scaffold(out_dir: &Path, theme: &str, author: &str) -> Result<()> {
    if out_dir.exists() && out_dir.read_dir()?.next().is_some() {
        bail!("Output directory is not empty: {}", out_dir.display());
    }

    let title = out_dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "My site".to_string());

    write_file(&out_dir.join(CFG_FILE_NAME), &render_sample_cfg(&title, theme, author))?;

    let theme_dir = out_dir.join("themes").join(theme);
    write_file(&theme_dir.join("layout").join("default.html"), LAYOUT_SAMPLE)?;
    write_file(&theme_dir.join("asset").join("site.css"), STYLE_SAMPLE)?;

    write_file(&out_dir.join("content").join("blog").join("welcome.md"), &render_welcome())?;
    fs::create_dir_all(out_dir.join("public").join("asset"))?;

    Ok(())
}

pub(crate) fn init_cmd(args: InitArgs) -> Result<()> {
    let author = get_author(args.author.as_deref());
    scaffold(&args.name, &args.theme, &author)?;
    println!("Created new site in {}", args.name.display());
    Ok(())
}
