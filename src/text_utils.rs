use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;

/// Human readable publish date, e.g. `2019 Jan 02`.
pub fn format_date(date_time: &NaiveDateTime) -> String {
    date_time.format("%Y %b %d").to_string()
}

pub fn slugify(title: &str) -> String {
    lazy_static! {
        static ref SEPARATORS: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    }

    let ascii = unidecode::unidecode(title).to_lowercase();
    let slug = SEPARATORS.replace_all(&ascii, "-");
    slug.trim_matches('-').to_string()
}

/// Joins a base url and a site relative path with exactly one slash.
pub fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}
