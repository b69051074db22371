use std::path::PathBuf;

use spdlog::debug;

use crate::content::Node;
use crate::site::Theme;

const NODE_TEMPLATE: &str = "node.html";

/// Candidate templates for a node, most general first.
///
/// The default layout always comes first, whether or not it exists. Then, for
/// the theme root and each directory below it that mirrors the node's base
/// directory, an existing `node.html` followed by an existing `<name>.html`.
/// A front matter theme override is always last.
pub fn resolve_templates(theme: &Theme, base_directory: &str, name: &str, theme_override: Option<&str>) -> Vec<PathBuf> {
    let mut template_paths = vec![theme.default_layout()];
    let node_file = format!("{}.html", name);

    let mut lookup_path = theme.root.clone();
    let components: Vec<&str> = base_directory.split('/').filter(|c| !c.is_empty()).collect();
    for depth in 0..=components.len() {
        if depth > 0 {
            lookup_path.push(components[depth - 1]);
        }

        let node_template = lookup_path.join(NODE_TEMPLATE);
        if node_template.is_file() {
            template_paths.push(node_template);
        }

        if node_file != NODE_TEMPLATE {
            let named_template = lookup_path.join(&node_file);
            if named_template.is_file() {
                template_paths.push(named_template);
            }
        }
    }

    if let Some(theme_override) = theme_override.filter(|t| !t.is_empty()) {
        template_paths.push(theme.node_path(theme_override));
    }

    template_paths
}

impl Node {
    pub fn find_theme(&mut self, theme: &Theme) {
        let theme_override = self.meta.as_ref().and_then(|meta| meta.theme.as_deref());
        self.template_paths = resolve_templates(theme, &self.base_directory, &self.name, theme_override);
        debug!("Templates for {}: {:?}", self.path.display(), self.template_paths);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use crate::content::NodeMeta;

    use super::*;

    fn theme_in(tmp: &TempDir) -> Theme {
        Theme { name: "baja".to_string(), root: tmp.path().join("themes").join("baja") }
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_default_layout_first_even_if_missing() {
        let tmp = TempDir::new().unwrap();
        let theme = theme_in(&tmp);
        let paths = resolve_templates(&theme, "blog", "hello", None);
        assert_eq!(paths, vec![theme.default_layout()]);
        assert!(!paths[0].exists());
    }

    #[test]
    fn test_cascade_in_depth_order() {
        let tmp = TempDir::new().unwrap();
        let theme = theme_in(&tmp);
        let root = theme.root.clone();
        touch(&root.join("node.html"));
        touch(&root.join("blog").join("node.html"));
        touch(&root.join("blog").join("hello.html"));
        touch(&root.join("blog").join("2019").join("hello.html"));
        // not on the node's path
        touch(&root.join("travel").join("node.html"));

        let paths = resolve_templates(&theme, "blog/2019", "hello", None);
        assert_eq!(paths, vec![
            theme.default_layout(),
            root.join("node.html"),
            root.join("blog").join("node.html"),
            root.join("blog").join("hello.html"),
            root.join("blog").join("2019").join("hello.html"),
        ]);
    }

    #[test]
    fn test_root_level_node() {
        let tmp = TempDir::new().unwrap();
        let theme = theme_in(&tmp);
        touch(&theme.root.join("about.html"));

        let paths = resolve_templates(&theme, "", "about", None);
        assert_eq!(paths, vec![theme.default_layout(), theme.root.join("about.html")]);
    }

    #[test]
    fn test_override_is_last() {
        let tmp = TempDir::new().unwrap();
        let theme = theme_in(&tmp);
        touch(&theme.root.join("node.html"));
        touch(&theme.root.join("blog").join("node.html"));

        let paths = resolve_templates(&theme, "blog", "hello", Some("gallery"));
        assert_eq!(paths.first(), Some(&theme.default_layout()));
        assert_eq!(paths.last(), Some(&theme.node_path("gallery")));
        assert_eq!(paths.len(), 4);
    }

    #[test]
    fn test_empty_override_ignored() {
        let tmp = TempDir::new().unwrap();
        let theme = theme_in(&tmp);
        let paths = resolve_templates(&theme, "", "about", Some(""));
        assert_eq!(paths, vec![theme.default_layout()]);
    }

    #[test]
    fn test_find_theme_uses_meta_override() {
        let tmp = TempDir::new().unwrap();
        let theme = theme_in(&tmp);
        let mut node = Node::with_content_root(Path::new("content"), Path::new("content/blog/hello.md"));
        node.meta = Some(NodeMeta { theme: Some("wide".to_string()), ..NodeMeta::default() });
        node.find_theme(&theme);
        assert_eq!(node.template_paths, vec![theme.default_layout(), theme.node_path("wide")]);
    }
}
