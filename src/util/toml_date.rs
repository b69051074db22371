use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, ParseError};
use serde::{Deserialize, Serialize, Serializer};

// Code adapted from https://www.seachess.net/notes/toml-dates/
// Offset date-times keep the wall clock time of their own offset.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TomlDateTime(pub NaiveDateTime);

impl<'de> Deserialize<'de> for TomlDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        let value = toml::value::Datetime::deserialize(deserializer)?;
        let date = TomlDateTime::from_str(&value.to_string()).map_err(Error::custom)?;
        Ok(date)
    }
}

impl Serialize for TomlDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
    {
        serializer.collect_str(&self.0.format("%Y-%m-%dT%H:%M:%S"))
    }
}

impl FromStr for TomlDateTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(with_offset.naive_local()));
        }
        if let Ok(naive) = NaiveDateTime::from_str(s) {
            return Ok(Self(naive));
        }
        let naive = NaiveDate::from_str(s)?;
        Ok(Self(naive.and_time(NaiveTime::MIN)))
    }
}
