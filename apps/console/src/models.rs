use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{serde_as, DefaultOnNull};
use time::macros::format_description;
use time::Date;

/// Server-assigned identifier. The backend emits numbers, but the client only
/// compares ids and splices them into URLs, so string ids are accepted too.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActivityId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for ActivityId {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub category: String,
    /// ISO `YYYY-MM-DD`; compared as a string everywhere.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub duration_minutes: u32,
}

/// The backend does not constrain the column, so one bad row must not fail
/// the whole list: null and non-positive values count as 0, fractions are
/// truncated.
fn lenient_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(match raw {
        Some(value) if value.is_finite() && value >= 1.0 => {
            value.min(f64::from(u32::MAX)).trunc() as u32
        }
        _ => 0,
    })
}

impl Activity {
    pub fn from_input(id: ActivityId, input: ActivityInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            category: input.category,
            date: input.date,
            duration_minutes: input.duration_minutes,
        }
    }

    pub fn to_input(&self) -> ActivityInput {
        ActivityInput {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            date: self.date.clone(),
            duration_minutes: self.duration_minutes,
        }
    }

    pub fn minutes(&self) -> u64 {
        u64::from(self.duration_minutes)
    }

    /// `Jan 15, 2024` style label, falling back to the raw value.
    pub fn display_date(&self) -> String {
        format_display_date(&self.date)
    }
}

/// Payload for create and update. `description` goes over the wire as `null`
/// when absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityInput {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub date: String,
    pub duration_minutes: u32,
}

pub fn parse_iso_date(value: &str) -> Option<Date> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).ok()
}

pub fn format_display_date(value: &str) -> String {
    parse_iso_date(value)
        .and_then(|date| {
            date.format(format_description!(
                "[month repr:short] [day padding:none], [year]"
            ))
            .ok()
        })
        .unwrap_or_else(|| value.to_string())
}

/// `95` becomes `1h 35m`, `40` stays `40m`.
pub fn format_minutes(minutes: u64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, rest) => format!("{rest}m"),
        (hours, 0) => format!("{hours}h"),
        (hours, rest) => format!("{hours}h {rest}m"),
    }
}
