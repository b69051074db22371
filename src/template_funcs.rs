use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDateTime, Utc};
use minijinja::value::Value;
use minijinja::{Environment, Error, ErrorKind};

use crate::site::Site;
use crate::text_utils::{join_url, slugify};
use crate::util::toml_date::TomlDateTime;

/// Registers the helpers every node template can use, plus the `site` global.
pub fn register(env: &mut Environment<'static>, site: &Site) {
    env.add_global("site", Value::from_serialize(&site.config.site));

    let base_url = site.config.site.base_url.clone();
    env.add_filter("absolute_url", move |path: &str| join_url(&base_url, path));
    env.add_filter("date", date);
    env.add_filter("slugify", |value: &str| slugify(value));
    env.add_function("now", now);
}

fn date(value: &str, fmt: &str) -> Result<String, Error> {
    let date_time = TomlDateTime::from_str(value).map_err(|e| Error::new(
        ErrorKind::InvalidOperation,
        format!("`date` cannot parse {:?}: {}", value, e),
    ))?;

    format_checked(&date_time.0, fmt)
}

fn now(fmt: Option<String>) -> Result<String, Error> {
    format_checked(&Utc::now().naive_utc(), fmt.as_deref().unwrap_or("%Y-%m-%d"))
}

// chrono panics while displaying an invalid format string, so check it first.
fn format_checked(date_time: &NaiveDateTime, fmt: &str) -> Result<String, Error> {
    let items: Vec<Item> = StrftimeItems::new(fmt).collect();
    if items.contains(&Item::Error) {
        return Err(Error::new(ErrorKind::InvalidOperation, format!("invalid date format {:?}", fmt)));
    }

    Ok(date_time.format_with_items(items.into_iter()).to_string())
}
