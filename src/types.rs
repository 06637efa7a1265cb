use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A player row from a rankings page, in rank order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub profile_url: String,
}

/// Canonical bio labels extracted from a profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BioLabel {
    Position,
    Height,
    Weight,
    HighSchool,
    City,
    Class,
    CompositeRating,
    SiteRating,
}

impl BioLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BioLabel::Position => "Position",
            BioLabel::Height => "Height",
            BioLabel::Weight => "Weight",
            BioLabel::HighSchool => "High School",
            BioLabel::City => "City",
            BioLabel::Class => "Class",
            BioLabel::CompositeRating => "Composite Rating",
            BioLabel::SiteRating => "247Sports Rating",
        }
    }

    /// Maps the site's label text (any case) onto a canonical label.
    pub fn from_synonym(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "pos" | "position" => Some(BioLabel::Position),
            "ht" | "height" => Some(BioLabel::Height),
            "wt" | "weight" => Some(BioLabel::Weight),
            "hs" | "high school" | "school" => Some(BioLabel::HighSchool),
            "city" | "hometown" => Some(BioLabel::City),
            "class" | "grad year" => Some(BioLabel::Class),
            _ => None,
        }
    }
}

impl std::fmt::Display for BioLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw label -> text mapping. The first non-empty value written for a label wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBio {
    fields: BTreeMap<BioLabel, String>,
}

impl RawBio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` unless it is blank or the label already holds a value.
    /// Returns whether the value was stored.
    pub fn set_if_absent(&mut self, label: BioLabel, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.trim().is_empty() || self.fields.contains_key(&label) {
            return false;
        }
        self.fields.insert(label, value);
        true
    }

    pub fn get(&self, label: BioLabel) -> Option<&str> {
        self.fields.get(&label).map(String::as_str)
    }

    pub fn contains(&self, label: BioLabel) -> bool {
        self.fields.contains_key(&label)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BioLabel, &str)> {
        self.fields.iter().map(|(label, value)| (*label, value.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Height {
    pub feet: u32,
    pub inches: u32,
}

/// Typed player record as written to the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedPlayer {
    pub name: String,
    pub profile_url: String,
    #[serde(rename = "Position")]
    pub position: Option<String>,
    #[serde(rename = "Height")]
    pub height: Option<Height>,
    #[serde(rename = "Weight")]
    pub weight: Option<u32>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "High School")]
    pub high_school: Option<String>,
    #[serde(rename = "Class")]
    pub class: Option<i32>,
    #[serde(rename = "Composite Rating")]
    pub composite_rating: Option<f64>,
    #[serde(rename = "247Sports Rating")]
    pub site_rating: Option<f64>,
    #[serde(rename = "Class Year")]
    pub class_year: i32,
}

/// A player whose profile could not be scraped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub name: String,
    pub year: i32,
    pub error: String,
}
