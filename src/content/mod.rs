use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::site::Site;
use crate::util::toml_date::TomlDateTime;

pub mod compiler;
pub mod front_matter;
pub mod markdown_renderer;
pub mod theme_resolver;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Page,
    #[default]
    Post,
}

/// Metadata of a node, decoded from the TOML section between the `+++` markers.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct NodeMeta {
    pub title: String,
    pub draft: bool,
    pub date: Option<TomlDateTime>,
    #[serde(skip_deserializing)]
    pub date_formatted: String,
    pub tags: Vec<String>,
    /// Always the base directory of the node, never read from the front matter.
    #[serde(skip_deserializing)]
    pub category: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// A custom template file inside the theme directory, without extension
    pub theme: Option<String>,
}

/// One source document and everything derived from it while building.
#[derive(Debug, Clone)]
pub struct Node {
    pub meta: Option<NodeMeta>,
    pub body: String, // markdown after the front matter

    pub raw: String,            // raw text content
    pub path: PathBuf,          // path of the source file
    pub base_directory: String, // directory relative to the content root, `/` separated
    pub name: String,           // the filename without extension

    pub template_paths: Vec<PathBuf>,
}

impl Node {
    pub fn new(site: &Site, path: &Path) -> Node {
        Self::with_content_root(&site.content_dir(), path)
    }

    pub fn with_content_root(content_root: &Path, path: &Path) -> Node {
        let relative = path.strip_prefix(content_root).unwrap_or(path);
        let base_directory = match relative.parent() {
            Some(parent) => to_base_directory(parent),
            None => String::new(),
        };

        let name = path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Node {
            meta: None,
            body: String::new(),
            raw: String::new(),
            path: path.to_path_buf(),
            base_directory,
            name,
            template_paths: vec![],
        }
    }

    pub fn is_page(&self) -> bool {
        self.meta.as_ref().is_some_and(|meta| meta.node_type == NodeType::Page)
    }

    pub fn permalink(&self) -> String {
        if self.base_directory.is_empty() {
            format!("/{}/", self.name)
        } else {
            format!("/{}/{}/", self.base_directory, self.name)
        }
    }

    /// `<public>/<base directory>/<name>`, the directory holding the node's `index.html`.
    pub fn output_dir(&self, public_dir: &Path) -> PathBuf {
        let mut dir = public_dir.to_path_buf();
        for component in self.base_directory.split('/').filter(|c| !c.is_empty()) {
            dir.push(component);
        }
        dir.push(&self.name);
        dir
    }
}

/// Relative directory path as a `/` joined string, `""` for the content root itself.
pub fn to_base_directory(relative: &Path) -> String {
    relative.components()
        .filter_map(|c| match c {
            std::path::Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
