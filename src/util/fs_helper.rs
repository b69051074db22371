use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use spdlog::debug;
use walkdir::WalkDir;

/// Recursively copies `source` into `dest`, creating directories as needed and
/// overwriting files that already exist. Returns the number of copied files.
pub fn copy_dir(source: &Path, dest: &Path) -> io::Result<usize> {
    if !source.is_dir() {
        return Err(io::Error::new(ErrorKind::NotFound, format!("Source is not a directory: {}", source.display())));
    }

    let mut copied = 0;
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let relative = match entry.path().strip_prefix(source) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            debug!("Copy {} to {}", entry.path().display(), target.display());
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_copy_nested() -> io::Result<()> {
        let tmp = TempDir::new()?;
        let source = tmp.path().join("asset");
        fs::create_dir_all(source.join("css"))?;
        fs::write(source.join("logo.svg"), "<svg/>")?;
        fs::write(source.join("css").join("site.css"), "body {}")?;

        let dest = tmp.path().join("public").join("asset");
        let copied = copy_dir(&source, &dest)?;

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dest.join("css").join("site.css"))?, "body {}");
        assert_eq!(fs::read_to_string(dest.join("logo.svg"))?, "<svg/>");
        Ok(())
    }

    #[test]
    fn test_missing_source() {
        let tmp = TempDir::new().unwrap();
        let err = copy_dir(&tmp.path().join("nope"), &tmp.path().join("out")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
