//! Journey records: the data each achievement star carries.
//!
//! Field names follow the JSON served at `/api/journey-data`
//! (note the camelCase `twitterPostLink`).

use crate::{color::Rgb, error::LoadError};
use serde::{de, Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayRecord {
    pub day: i64,
    pub color: Rgb,
    pub problems: Vec<ProblemRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRecord {
    pub name: String,
    pub link: String,
    pub twitter_post_link: String,
    pub emojis: Vec<String>,
    pub difficulty: Difficulty,
}

/// Serialized as `Easy`/`Medium`/`Hard`; any casing is accepted on input.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Case-normalized class name for badge styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| de::Error::unknown_variant(&raw, &["Easy", "Medium", "Hard"]))
    }
}

/// Decode and validate a journey document.
///
/// The document must be a JSON array of day records. Any schema
/// mismatch (wrong type, missing field, unknown difficulty, bad color)
/// is reported as `LoadError::Malformed`.
pub fn parse_journey(body: &str) -> Result<Vec<DayRecord>, LoadError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| LoadError::Malformed(format!("not JSON: {e}")))?;
    let entries = value
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected a top-level array".into()))?;

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            DayRecord::deserialize(entry)
                .map_err(|e| LoadError::Malformed(format!("record {i}: {e}")))
        })
        .collect()
}

/// Serialize a journey back into the wire format.
pub fn to_journey_json(records: &[DayRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(records)
}
