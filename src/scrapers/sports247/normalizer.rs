//! Turns raw profile text into typed fields. Nothing here fails: text that
//! cannot be read becomes `None`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{BioLabel, CleanedPlayer, Height, RankingEntry, RawBio};

static POSITION_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)pos(?:ition)?[:\s-]*").unwrap());
static HEIGHT_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)height[:\s-]*").unwrap());
static WEIGHT_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)weight[:\s-]*").unwrap());
static CLASS_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)class[:\s-]*").unwrap());
static CITY_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)city[:\s-]*").unwrap());
static HIGH_SCHOOL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)high school[:\s-]*").unwrap());

static POSITION_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]{1,4}(?:/[A-Za-z]{1,4})*").unwrap());
static FEET_INCHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<feet>\d+)\s*[-']\s*(?P<inches>\d+(?:\.\d+)?)").unwrap());
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());
static NOT_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.]").unwrap());

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.is_empty())
}

/// Position code such as `WR` or `OT/DT`.
pub fn parse_position(raw: Option<&str>) -> Option<String> {
    let text = POSITION_PREFIX.replace(non_empty(raw)?.trim(), "");
    POSITION_CODE
        .find(text.trim())
        .map(|m| m.as_str().to_string())
}

/// `6-3`, `6'3`, `6-2.5` (rounded half to even). Anything after a `/` is ignored.
pub fn parse_height(raw: Option<&str>) -> Option<Height> {
    let text = HEIGHT_PREFIX.replace(non_empty(raw)?, "");
    let text = text.split('/').next().unwrap_or_default();
    let caps = FEET_INCHES.captures(text)?;

    let feet: u32 = caps["feet"].parse().ok()?;
    let inches: f64 = caps["inches"].parse::<f64>().ok()?.round_ties_even();
    if inches > u32::MAX as f64 {
        return None;
    }
    Some(Height {
        feet,
        inches: inches as u32,
    })
}

/// Pounds; thousands separators are ignored.
pub fn parse_weight(raw: Option<&str>) -> Option<u32> {
    let text = WEIGHT_PREFIX.replace(non_empty(raw)?, "").replace(',', "");
    DIGITS.find(&text)?.as_str().parse().ok()
}

/// Rating score. Falls back to dropping everything except digits and dots.
pub fn parse_rating(raw: Option<&str>) -> Option<f64> {
    let raw = non_empty(raw)?;
    raw.trim()
        .parse::<f64>()
        .ok()
        .or_else(|| NOT_NUMERIC.replace_all(raw, "").parse::<f64>().ok())
}

/// Graduation year from text like `Class: 2026`.
pub fn parse_class(raw: Option<&str>) -> Option<i32> {
    let text = CLASS_PREFIX.replace(non_empty(raw)?, "");
    YEAR.find(&text)?.as_str().parse().ok()
}

pub fn clean_city(raw: Option<&str>) -> Option<String> {
    strip_label(&CITY_PREFIX, raw)
}

pub fn clean_high_school(raw: Option<&str>) -> Option<String> {
    strip_label(&HIGH_SCHOOL_PREFIX, raw)
}

fn strip_label(prefix: &Regex, raw: Option<&str>) -> Option<String> {
    let cleaned = prefix.replace(non_empty(raw)?, "");
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Builds the report record for one player. `class_year` is the rankings
/// year the player was listed under.
pub fn normalize(entry: &RankingEntry, raw: &RawBio, class_year: i32) -> CleanedPlayer {
    CleanedPlayer {
        name: entry.name.clone(),
        profile_url: entry.profile_url.clone(),
        position: parse_position(raw.get(BioLabel::Position)),
        height: parse_height(raw.get(BioLabel::Height)),
        weight: parse_weight(raw.get(BioLabel::Weight)),
        city: clean_city(raw.get(BioLabel::City)),
        high_school: clean_high_school(raw.get(BioLabel::HighSchool)),
        class: parse_class(raw.get(BioLabel::Class)),
        composite_rating: parse_rating(raw.get(BioLabel::CompositeRating)),
        site_rating: parse_rating(raw.get(BioLabel::SiteRating)),
        class_year,
    }
}
