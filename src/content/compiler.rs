use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use minijinja::value::Value;
use minijinja::{context, Environment, UndefinedBehavior};
use serde::Serialize;
use spdlog::{debug, info};

use crate::content::markdown_renderer::render_markdown;
use crate::content::Node;
use crate::error::{FatalError, Outcome, SoftError};
use crate::site::Site;
use crate::template_funcs;

/// The resolved template files of one node, loaded as a single inheritance
/// chain. Each file extends the one before it, so a block defined in a later
/// file replaces the same block of every earlier file.
pub struct TemplateSet {
    env: Environment<'static>,
    entry: String,
}

impl TemplateSet {
    pub fn load(site: &Site, template_paths: &[PathBuf]) -> Result<TemplateSet, FatalError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        template_funcs::register(&mut env, site);

        let mut parent: Option<String> = None;
        for (position, path) in template_paths.iter().enumerate() {
            let source = fs::read_to_string(path)
                .map_err(|e| FatalError::new(path, format!("Cannot load template: {}", e)))?;

            // Named by chain position so a file listed twice never extends
            // itself. The `.html` suffix turns on HTML autoescaping.
            let name = format!("{}.html", position);
            let source = match parent {
                Some(ref parent) => format!("{{% extends \"{}\" %}}{}", parent, source),
                None => source,
            };

            env.add_template_owned(name.clone(), source)
                .map_err(|e| FatalError::new(path, format!("Cannot parse template: {:#}", e)))?;
            parent = Some(name);
        }

        let Some(entry) = parent else {
            return Err(FatalError::new(&site.theme.root, "No template to render with"));
        };

        Ok(TemplateSet { env, entry })
    }

    pub fn render<S: Serialize>(&self, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(&self.entry)?.render(ctx)
    }
}

impl Node {
    /// Renders the node through its template chain and writes
    /// `<public>/<base directory>/<name>/index.html`. Returns the written path.
    pub fn compile(&self, site: &Site) -> Outcome<PathBuf> {
        let Some(ref meta) = self.meta else {
            return Ok(Err(SoftError::new(&self.path, "Node is not parsed")));
        };

        let templates = TemplateSet::load(site, &self.template_paths)?;

        let html = match render_markdown(&self.body) {
            Ok(html) => html,
            Err(e) => return Ok(Err(SoftError::new(&self.path, format!("Cannot convert markdown: {}", e)))),
        };

        let rendered = match templates.render(context! {
            meta => meta,
            body => Value::from_safe_string(html),
            permalink => self.permalink(),
        }) {
            Ok(rendered) => rendered,
            Err(e) => return Ok(Err(SoftError::new(&self.path, format!("Fail to render node: {:#}", e)))),
        };

        let directory = self.output_dir(&site.public_dir());
        info!("Compile {} -> {}", self.path.display(), directory.display());
        Ok(write_index(&directory, &rendered))
    }
}

/// Writes `<directory>/index.html`, creating the directory first.
pub fn write_index(directory: &Path, rendered: &str) -> Result<PathBuf, SoftError> {
    if let Err(e) = fs::create_dir_all(directory) {
        return Err(SoftError::new(directory, format!("Cannot create directory: {}", e)));
    }

    let index_path = directory.join("index.html");
    let file = match File::create(&index_path) {
        Ok(file) => file,
        Err(e) => return Err(SoftError::new(&index_path, format!("Cannot create index file: {}", e))),
    };

    let mut writer = BufWriter::new(file);
    if let Err(e) = writer.write_all(rendered.as_bytes()).and_then(|_| writer.flush()) {
        return Err(SoftError::new(&index_path, format!("Cannot write index file: {}", e)));
    }

    debug!("Write to {}", index_path.display());
    Ok(index_path)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::config::Config;
    use crate::test_data::{DEFAULT_LAYOUT, HELLO_MD};

    use super::*;

    struct Fixture {
        _tmp: TempDir,
        site: Site,
    }

    fn fixture() -> Fixture {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path(), Config::with_theme("baja"));
        fs::create_dir_all(site.theme.root.join("layout")).unwrap();
        fs::write(site.theme.default_layout(), DEFAULT_LAYOUT).unwrap();
        Fixture { _tmp: tmp, site }
    }

    fn parsed_node(site: &Site, relative: &str, source: &str) -> Node {
        let path = site.content_dir().join(relative);
        let mut node = Node::new(site, &path);
        node.parse_source(source.to_string()).unwrap();
        node.find_theme(&site.theme);
        node
    }

    #[test]
    fn test_compile_hello() {
        let f = fixture();
        let node = parsed_node(&f.site, "blog/hello.md", HELLO_MD);

        let written = node.compile(&f.site).unwrap().unwrap();
        assert_eq!(written, f.site.public_dir().join("blog").join("hello").join("index.html"));

        let html = fs::read_to_string(&written).unwrap();
        assert!(html.contains("<title>Hi</title>"));
        assert!(html.contains("<article>"));
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<footer>/blog/hello/</footer>"));
    }

    #[test]
    fn test_later_template_block_wins() {
        let f = fixture();
        let root = &f.site.theme.root;
        fs::create_dir_all(root.join("blog")).unwrap();
        fs::write(root.join("node.html"), "{% block content %}<main>{{ body }}</main>{% endblock %}").unwrap();
        fs::write(root.join("blog").join("node.html"), "{% block content %}<section>{{ meta.category }}|{{ super() }}</section>{% endblock %}").unwrap();

        let node = parsed_node(&f.site, "blog/hello.md", HELLO_MD);
        assert_eq!(node.template_paths.len(), 3);

        let html = fs::read_to_string(node.compile(&f.site).unwrap().unwrap()).unwrap();
        assert!(html.contains("<section>blog|<main>"));
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(!html.contains("<article>"));
        assert!(html.contains("<title>Hi</title>"));
    }

    #[test]
    fn test_theme_override_applied_last() {
        let f = fixture();
        let root = &f.site.theme.root;
        fs::write(root.join("about.html"), "{% block content %}named{% endblock %}").unwrap();
        fs::write(root.join("wide.html"), "{% block content %}wide{% endblock %}").unwrap();

        let node = parsed_node(&f.site, "about.md", "+++\ntheme = \"wide\"\n+++\nabout me");
        let html = fs::read_to_string(node.compile(&f.site).unwrap().unwrap()).unwrap();
        assert!(html.contains("<body>wide<footer>/about/</footer>"));
    }

    #[test]
    fn test_same_template_twice() {
        let f = fixture();
        let root = &f.site.theme.root;
        fs::write(root.join("about.html"), "{% block content %}about{% endblock %}").unwrap();

        let node = parsed_node(&f.site, "about.md", "+++\ntheme = \"about\"\n+++\nabout me");
        assert_eq!(node.template_paths[1], node.template_paths[2]);
        let html = fs::read_to_string(node.compile(&f.site).unwrap().unwrap()).unwrap();
        assert!(html.contains("<body>about<footer>"));
    }

    #[test]
    fn test_chain_under_decomposed_unicode_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cafe\u{301}");
        let site = Site::new(&root, Config::with_theme("baja"));
        fs::create_dir_all(site.theme.root.join("layout")).unwrap();
        fs::write(site.theme.default_layout(), DEFAULT_LAYOUT).unwrap();
        fs::write(site.theme.root.join("node.html"), "{% block content %}<main>{{ body }}</main>{% endblock %}").unwrap();

        let node = parsed_node(&site, "blog/hello.md", HELLO_MD);
        assert_eq!(node.template_paths.len(), 2);
        let html = fs::read_to_string(node.compile(&site).unwrap().unwrap()).unwrap();
        assert!(html.contains("<main>"));
        assert!(html.contains("<h1>Hello</h1>"));
    }

    #[test]
    fn test_syntax_error_names_the_file() {
        let f = fixture();
        let node_template = f.site.theme.root.join("node.html");
        fs::write(&node_template, "{% block content %}{% endblock").unwrap();
        let node = parsed_node(&f.site, "about.md", HELLO_MD);
        let err = node.compile(&f.site).unwrap_err();
        assert_eq!(err.path, node_template);
    }

    #[test]
    fn test_missing_template_is_fatal() {
        let f = fixture();
        let node = parsed_node(&f.site, "about.md", "+++\ntheme = \"missing\"\n+++\nabout me");
        let err = node.compile(&f.site).unwrap_err();
        assert_eq!(err.path, f.site.theme.node_path("missing"));
        assert!(err.reason.starts_with("Cannot load template"));
    }

    #[test]
    fn test_template_syntax_error_is_fatal() {
        let f = fixture();
        fs::write(f.site.theme.root.join("node.html"), "{% block content %}{{ body ").unwrap();
        let node = parsed_node(&f.site, "about.md", HELLO_MD);
        let err = node.compile(&f.site).unwrap_err();
        assert!(err.reason.starts_with("Cannot parse template"));
    }

    #[test]
    fn test_render_failure_is_soft() {
        let f = fixture();
        fs::write(f.site.theme.root.join("node.html"), "{% block content %}{{ meta.author }}{% endblock %}").unwrap();
        let node = parsed_node(&f.site, "about.md", HELLO_MD);

        let err = node.compile(&f.site).unwrap().unwrap_err();
        assert!(err.reason.starts_with("Fail to render node"));
        assert!(!f.site.public_dir().join("about").join("index.html").exists());
    }

    #[test]
    fn test_unparsed_node_is_soft() {
        let f = fixture();
        let node = Node::new(&f.site, &f.site.content_dir().join("about.md"));
        let err = node.compile(&f.site).unwrap().unwrap_err();
        assert_eq!(err.reason, "Node is not parsed");
    }

    #[test]
    fn test_body_is_not_escaped_but_meta_is() {
        let f = fixture();
        let node = parsed_node(&f.site, "x.md", "+++\ntitle = \"<b>\"\n+++\n<em>raw</em>");
        let html = fs::read_to_string(node.compile(&f.site).unwrap().unwrap()).unwrap();
        assert!(html.contains("<title>&lt;b&gt;</title>"));
        assert!(html.contains("<em>raw</em>"));
    }

    #[test]
    fn test_write_index_into_file_path_is_soft() {
        let f = fixture();
        let blocker = f.site.root.join("blocker");
        fs::write(&blocker, "").unwrap();
        let err = write_index(&blocker.join("sub"), "x").unwrap_err();
        assert!(err.reason.starts_with("Cannot create directory"));
    }
}
