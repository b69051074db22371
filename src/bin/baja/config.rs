use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use baja::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path(root: &Path) -> Option<PathBuf> {
    if root.join(CFG_FILE_NAME).exists() {
        return Some(root.join(CFG_FILE_NAME));
    }

    let cfg_path = dirs::config_dir()?.join("baja").join(CFG_FILE_NAME);
    if cfg_path.exists() {
        return Some(cfg_path);
    }

    None
}

pub(crate) fn open_config(root: &Path, cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path.or_else(|| get_config_path(root)) {
        Some(path) => path,
        None => return Err(anyhow!("Could not find {} in {}. Please run baja --help", CFG_FILE_NAME, root.display())),
    };

    println!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path)?;
    resolve_log_location(root, &mut config);
    Ok(config)
}

// Relative log files live under the project root, not the working directory.
fn resolve_log_location(root: &Path, config: &mut Config) {
    let Some(ref mut log) = config.log else {
        println!("Log disabled. Using stdout");
        return;
    };

    if let Some(location) = log.location.take() {
        let location = if location.is_relative() { root.join(location) } else { location };
        println!("Log enabled. Files will be written in {}", location.display());
        log.location = Some(location);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use baja::config::parse_config;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_config_in_root() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CFG_FILE_NAME), "theme = \"baja\"\n").unwrap();
        let config = open_config(tmp.path(), None).unwrap();
        assert_eq!(config.theme, "baja");
    }

    #[test]
    fn test_explicit_config_wins() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CFG_FILE_NAME), "theme = \"baja\"\n").unwrap();
        let other = tmp.path().join("other.toml");
        fs::write(&other, "theme = \"minimal\"\n").unwrap();

        let config = open_config(tmp.path(), Some(other)).unwrap();
        assert_eq!(config.theme, "minimal");
    }

    #[test]
    fn test_relative_log_location() {
        let mut config = parse_config("theme = \"baja\"\n[log]\nlevel = \"Info\"\nlocation = \"logs/baja.log\"\n").unwrap();
        resolve_log_location(Path::new("/srv/site"), &mut config);
        assert_eq!(config.log.unwrap().location, Some(PathBuf::from("/srv/site/logs/baja.log")));
    }
}
