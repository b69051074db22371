use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SiteMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub author: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Paths {
    pub content_dir: PathBuf,
    pub themes_dir: PathBuf,
    pub public_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            content_dir: PathBuf::from("content"),
            themes_dir: PathBuf::from("themes"),
            public_dir: PathBuf::from("public"),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    pub level: LogLevel,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub theme: String,
    #[serde(default)]
    pub site: SiteMeta,
    #[serde(default)]
    pub paths: Paths,
    pub log: Option<Log>,
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn with_theme(theme: &str) -> Config {
        Config {
            theme: theme.to_string(),
            site: SiteMeta::default(),
            paths: Paths::default(),
            log: None,
        }
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => Ok(cfg),
        Err(e) => Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    }
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
