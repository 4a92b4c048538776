use chrono::{DateTime, NaiveDate};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;

/// Date formats accepted from the source export, tried in order.
///
/// Day-first comes before month-first: ambiguous numeric dates resolve the way
/// the export writes them.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];

/// A customer's signup date, or the sentinel for a missing/unparseable one.
///
/// `Unknown` orders after every known date, so sorting by signup never has to
/// special-case bad input. Canonical serialization is ISO `%Y-%m-%d` or null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SignupDate {
    Known(NaiveDate),
    #[default]
    Unknown,
}

impl SignupDate {
    /// Parse a source date string, tolerating the formats the export has been
    /// seen to use. Anything unrecognized becomes `Unknown`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Unknown;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::Known(dt.date_naive());
        }
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Self::Known(date);
            }
        }
        Self::Unknown
    }

    /// The parsed date, if one is known.
    #[must_use]
    pub const fn as_date(self) -> Option<NaiveDate> {
        match self {
            Self::Known(date) => Some(date),
            Self::Unknown => None,
        }
    }

    /// Returns `true` for the missing-date sentinel.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for SignupDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Unknown => f.write_str("-"),
        }
    }
}

impl Serialize for SignupDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(date) => {
                serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
            }
            Self::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for SignupDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map_or(Self::Unknown, |s| Self::parse(&s)))
    }
}

/// One canonical customer record.
///
/// Produced by [`crate::normalize::normalize_record`]; fields are plain
/// pass-through strings except `zone` (trimmed) and `signup` (parsed).
/// Serialization uses the canonical snake_case keys, which the normalizer also
/// accepts, so a canonical record re-normalizes to itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Customer {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "customer_group")]
    pub group: String,
    pub zone: String,
    #[serde(rename = "signup_date")]
    pub signup: SignupDate,
}
