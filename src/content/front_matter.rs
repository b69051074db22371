use std::fs;

use spdlog::debug;

use crate::content::{Node, NodeMeta};
use crate::error::{FatalError, Outcome, SoftError};
use crate::text_utils::format_date;

pub const DELIMITER: &str = "+++";

/// Splits `<ignored>+++<front matter>+++<body>` into front matter and body.
/// Everything after the second delimiter is body, delimiters included.
pub fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let mut parts = raw.splitn(3, DELIMITER);
    let _ignored = parts.next()?;
    let front_matter = parts.next()?;
    let body = parts.next()?;
    Some((front_matter, body))
}

impl Node {
    /// Reads the source file and fills `meta` and `body`.
    ///
    /// An unreadable file only skips this node and leaves `meta` as `None`.
    /// A file without front matter, or with front matter that does not decode,
    /// stops the build.
    pub fn parse(&mut self) -> Outcome {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => return Ok(Err(SoftError::new(&self.path, format!("Cannot read node: {}", e)))),
        };

        self.parse_source(raw)?;
        Ok(Ok(()))
    }

    pub fn parse_source(&mut self, raw: String) -> Result<(), FatalError> {
        let Some((front_matter, body)) = split_front_matter(&raw) else {
            return Err(FatalError::new(&self.path, "Not enough header/body"));
        };

        let mut meta: NodeMeta = toml::from_str(front_matter)
            .map_err(|e| FatalError::new(&self.path, format!("Invalid front matter: {}", e)))?;

        meta.date_formatted = meta.date.map(|date| format_date(&date.0)).unwrap_or_default();
        meta.category = self.base_directory.clone();
        debug!("Parsed {} title={:?} category={:?}", self.path.display(), meta.title, meta.category);

        self.body = body.to_string();
        self.meta = Some(meta);
        self.raw = raw;

        Ok(())
    }
}
