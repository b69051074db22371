use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDateTime};

use baja::content::NodeType;
use baja::site::Site;
use baja::text_utils::slugify;

use crate::config::open_config;
use crate::NewArgs;

fn render_header(title: &str, date: &NaiveDateTime, node_type: NodeType) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "+++");
    let _ = writeln!(&mut buf, "title = {}", toml::Value::String(title.to_string()));
    let _ = writeln!(&mut buf, "date = {}", date.format("%Y-%m-%dT%H:%M:%S"));
    let _ = writeln!(&mut buf, "draft = true");
    let _ = writeln!(&mut buf, "tags = []");
    if node_type == NodeType::Page {
        let _ = writeln!(&mut buf, "type = \"page\"");
    }
    let _ = writeln!(&mut buf, "+++");
    buf
}

fn render_body() -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "This is a body example");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "Set `draft = false` to list it on the index pages.");

    buf
}

fn node_path(content_dir: &Path, section: &str, title: &str) -> Result<PathBuf> {
    let slug = slugify(title);
    if slug.is_empty() {
        bail!("Cannot derive a file name from title {:?}", title);
    }

    let mut path = content_dir.to_path_buf();
    for component in section.split('/').filter(|c| !c.is_empty()) {
        path.push(component);
    }
    path.push(format!("{}.md", slug));
    Ok(path)
}

pub(crate) fn new_cmd(args: NewArgs) -> Result<()> {
    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let site = Site::new(&root, open_config(&root, None)?);

    let path = node_path(&site.content_dir(), &args.section, &args.title)?;
    if path.exists() {
        bail!("Node already exists: {}", path.display());
    }

    let node_type = if args.page { NodeType::Page } else { NodeType::Post };
    let header = render_header(&args.title, &Local::now().naive_local(), node_type);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Cannot create {}", parent.display()))?;
    }
    fs::write(&path, format!("{}{}", header, render_body()))
        .with_context(|| format!("Cannot write {}", path.display()))?;

    println!("Creating file {}", path.display());
    Ok(())
}
