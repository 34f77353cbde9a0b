use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const KEY_FORMAT: &str = "%Y-%m-%d";

/// Calendar-absolute key for one day's mood, persisted as `YYYY-MM-DD`.
///
/// Keys never repeat across weeks, so the log keeps growing instead of
/// overwriting last week's Monday with this week's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TemporalKey(NaiveDate);

impl TemporalKey {
    pub fn for_date(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

/// Derive the log key for a date.
pub fn temporal_key(date: NaiveDate) -> TemporalKey {
    TemporalKey::for_date(date)
}

impl fmt::Display for TemporalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

impl FromStr for TemporalKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, KEY_FORMAT).map(Self)
    }
}

impl TryFrom<String> for TemporalKey {
    type Error = chrono::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TemporalKey> for String {
    fn from(key: TemporalKey) -> Self {
        key.to_string()
    }
}
