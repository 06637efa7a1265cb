use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::app::ports::HttpClientPort;
use crate::error::Result;
use crate::fetcher::Fetcher;
use crate::scrapers::sports247::text::joined_text;
use crate::types::{BioLabel, RawBio};

static BIO_ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("ul.player-bio__list li").unwrap());
static BIO_LABEL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".player-bio__label").unwrap());
static BIO_VALUE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".player-bio__value").unwrap());
static HEADER_LIST_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#page-content section header div ul").unwrap());
static LI_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());
static RANK_BLOCK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#page-content .rank-block").unwrap());

static COMPOSITE_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)247sports composite").unwrap());
static SITE_RATING_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)247sports player rating|247sports rating").unwrap());

// Header lists are read by position; the site does not label them.
const FIRST_HEADER_LABELS: [BioLabel; 3] = [BioLabel::Position, BioLabel::Height, BioLabel::Weight];
const THIRD_HEADER_LABELS: [BioLabel; 3] = [BioLabel::HighSchool, BioLabel::City, BioLabel::Class];

/// One way of pulling bio fields out of a profile page. Strategies only fill
/// labels that are still missing.
pub trait BioStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, document: &Html, bio: RawBio) -> RawBio;
}

/// Labelled `ul.player-bio__list` entries.
pub struct StructuredListStrategy;

impl BioStrategy for StructuredListStrategy {
    fn name(&self) -> &'static str {
        "structured_list"
    }

    fn apply(&self, document: &Html, mut bio: RawBio) -> RawBio {
        for item in document.select(&BIO_ITEM_SELECTOR) {
            let label = item.select(&BIO_LABEL_SELECTOR).next();
            let value = item.select(&BIO_VALUE_SELECTOR).next();
            if let (Some(label), Some(value)) = (label, value) {
                if let Some(label) = BioLabel::from_synonym(&joined_text(label, "")) {
                    bio.set_if_absent(label, joined_text(value, ""));
                }
            }
        }
        bio
    }
}

/// Unlabelled header lists: the first maps to position/height/weight, the
/// third to high school/city/class.
pub struct HeaderListStrategy;

impl HeaderListStrategy {
    fn fill_by_position(list: ElementRef<'_>, labels: &[BioLabel], bio: &mut RawBio) {
        for (label, item) in labels.iter().zip(list.select(&LI_SELECTOR)) {
            bio.set_if_absent(*label, joined_text(item, " "));
        }
    }
}

impl BioStrategy for HeaderListStrategy {
    fn name(&self) -> &'static str {
        "header_lists"
    }

    fn apply(&self, document: &Html, mut bio: RawBio) -> RawBio {
        let lists: Vec<ElementRef<'_>> = document.select(&HEADER_LIST_SELECTOR).collect();
        if let Some(first) = lists.first() {
            Self::fill_by_position(*first, &FIRST_HEADER_LABELS, &mut bio);
        }
        if let Some(third) = lists.get(2) {
            Self::fill_by_position(*third, &THIRD_HEADER_LABELS, &mut bio);
        }
        bio
    }
}

/// Composite and 247Sports ratings. The first two non-empty rank blocks are
/// taken in that order; with fewer than two, each rating is searched for by
/// its label text.
pub struct RatingStrategy;

impl BioStrategy for RatingStrategy {
    fn name(&self) -> &'static str {
        "ratings"
    }

    fn apply(&self, document: &Html, mut bio: RawBio) -> RawBio {
        let blocks: Vec<String> = document
            .select(&RANK_BLOCK_SELECTOR)
            .map(|block| joined_text(block, ""))
            .filter(|text| !text.is_empty())
            .collect();

        let (composite, site_rating) = if blocks.len() >= 2 {
            (Some(blocks[0].clone()), Some(blocks[1].clone()))
        } else {
            (
                value_after_label(document, &COMPOSITE_LABEL),
                value_after_label(document, &SITE_RATING_LABEL),
            )
        };

        if let Some(value) = composite {
            bio.set_if_absent(BioLabel::CompositeRating, value);
        }
        if let Some(value) = site_rating {
            bio.set_if_absent(BioLabel::SiteRating, value);
        }
        bio
    }
}

/// Strategies in priority order.
pub fn default_strategies() -> Vec<Box<dyn BioStrategy>> {
    vec![
        Box::new(StructuredListStrategy),
        Box::new(HeaderListStrategy),
        Box::new(RatingStrategy),
    ]
}

/// Runs every strategy over the page, earlier strategies taking precedence.
pub fn extract_bio(document: &Html) -> RawBio {
    default_strategies()
        .iter()
        .fold(RawBio::new(), |bio, strategy| {
            let before = bio.len();
            let bio = strategy.apply(document, bio);
            debug!("{} filled {} field(s)", strategy.name(), bio.len() - before);
            bio
        })
}

/// Fetches a profile page and extracts its raw bio. Only fetch failures are errors.
pub async fn extract_player_bio<C: HttpClientPort>(
    fetcher: &Fetcher<C>,
    profile_url: &str,
) -> Result<RawBio> {
    let document = fetcher.fetch(profile_url).await?;
    Ok(extract_bio(&document))
}

/// First text node after the one matching `label` that contains a digit.
fn value_after_label(document: &Html, label: &Regex) -> Option<String> {
    let mut texts = document
        .tree
        .root()
        .descendants()
        .filter_map(|node| node.value().as_text().map(|text| &**text));

    texts.by_ref().find(|text| label.is_match(text))?;
    texts
        .find(|text| text.chars().any(|c| c.is_ascii_digit()))
        .map(|text| text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{body}</body></html>"))
    }

    #[test]
    fn test_structured_list_maps_synonyms_and_drops_unknown() {
        let page = doc(r#"
            <ul class="player-bio__list">
                <li><span class="player-bio__label">Pos</span><span class="player-bio__value">QB</span></li>
                <li><span class="player-bio__label">HT</span><span class="player-bio__value">6-4</span></li>
                <li><span class="player-bio__label">Hometown</span><span class="player-bio__value"> Houston, TX </span></li>
                <li><span class="player-bio__label">Wingspan</span><span class="player-bio__value">80</span></li>
                <li><span class="player-bio__label">Class</span></li>
            </ul>
        "#);
        let bio = StructuredListStrategy.apply(&page, RawBio::new());
        assert_eq!(bio.get(BioLabel::Position), Some("QB"));
        assert_eq!(bio.get(BioLabel::Height), Some("6-4"));
        assert_eq!(bio.get(BioLabel::City), Some("Houston, TX"));
        assert!(!bio.contains(BioLabel::Class));
        assert_eq!(bio.len(), 3);
    }

    #[test]
    fn test_header_lists_map_by_position() {
        let page = doc(r#"
            <div id="page-content"><section><header><div>
                <ul><li><span>Pos</span> <span>WR</span></li><li><span>Height</span> <span>6-1</span></li><li><span>Weight</span> <span>180</span></li></ul>
                <ul><li>ignored</li></ul>
                <ul><li>Mater Dei</li><li>Santa Ana, CA</li><li>Class 2026</li></ul>
            </div></header></section></div>
        "#);
        let bio = HeaderListStrategy.apply(&page, RawBio::new());
        assert_eq!(bio.get(BioLabel::Position), Some("Pos WR"));
        assert_eq!(bio.get(BioLabel::Height), Some("Height 6-1"));
        assert_eq!(bio.get(BioLabel::Weight), Some("Weight 180"));
        assert_eq!(bio.get(BioLabel::HighSchool), Some("Mater Dei"));
        assert_eq!(bio.get(BioLabel::City), Some("Santa Ana, CA"));
        assert_eq!(bio.get(BioLabel::Class), Some("Class 2026"));
    }

    #[test]
    fn test_header_lists_do_not_overwrite_structured_values() {
        let page = doc(r#"
            <ul class="player-bio__list">
                <li><span class="player-bio__label">Position</span><span class="player-bio__value">OT</span></li>
            </ul>
            <div id="page-content"><section><header><div>
                <ul><li>DT</li><li>6-5</li></ul>
            </div></header></section></div>
        "#);
        let bio = extract_bio(&page);
        assert_eq!(bio.get(BioLabel::Position), Some("OT"));
        assert_eq!(bio.get(BioLabel::Height), Some("6-5"));
    }

    #[test]
    fn test_rank_blocks_are_read_by_position() {
        let page = doc(r#"
            <div id="page-content">
                <div class="rank-block"> </div>
                <div class="rank-block"><span>0.9991</span></div>
                <div class="rank-block"><span>100</span></div>
                <div class="rank-block">98</div>
            </div>
        "#);
        let bio = RatingStrategy.apply(&page, RawBio::new());
        assert_eq!(bio.get(BioLabel::CompositeRating), Some("0.9991"));
        assert_eq!(bio.get(BioLabel::SiteRating), Some("100"));
    }

    #[test]
    fn test_rating_text_search_takes_following_digit_text() {
        let page = doc(r#"
            <div id="page-content"><div class="rank-block">0.95</div></div>
            <section>
                <h3>247Sports Composite®</h3><ul><li><span>five star</span></li><li><b>0.9876</b></li></ul>
                <h3>247SPORTS PLAYER RATING</h3><p></p><div>97</div>
            </section>
        "#);
        let bio = RatingStrategy.apply(&page, RawBio::new());
        assert_eq!(bio.get(BioLabel::CompositeRating), Some("0.9876"));
        assert_eq!(bio.get(BioLabel::SiteRating), Some("97"));
    }

    #[test]
    fn test_missing_fields_yield_empty_bio() {
        let bio = extract_bio(&doc("<p>Nothing here</p>"));
        assert!(bio.is_empty());
    }
}
