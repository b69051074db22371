use std::path::{Path, PathBuf};

use crate::config::Config;

/// Template locations of the active theme.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub root: PathBuf,
}

impl Theme {
    pub fn default_layout(&self) -> PathBuf {
        self.root.join("layout").join("default.html")
    }

    pub fn list_layout(&self) -> PathBuf {
        self.root.join("layout").join("list.html")
    }

    pub fn asset_dir(&self) -> PathBuf {
        self.root.join("asset")
    }

    /// Template for a front matter `theme = "<name>"` override.
    pub fn node_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.html", name))
    }
}

/// A project on disk: its root directory and the configuration read from it.
#[derive(Debug, Clone)]
pub struct Site {
    pub root: PathBuf,
    pub config: Config,
    pub theme: Theme,
}

impl Site {
    pub fn new(root: &Path, config: Config) -> Site {
        let theme = Theme {
            name: config.theme.clone(),
            root: root.join(&config.paths.themes_dir).join(&config.theme),
        };

        Site {
            root: root.to_path_buf(),
            config,
            theme,
        }
    }

    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.content_dir)
    }

    pub fn public_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.public_dir)
    }
}
