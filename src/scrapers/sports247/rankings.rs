use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{info, warn};
use url::Url;

use crate::app::ports::HttpClientPort;
use crate::error::Result;
use crate::fetcher::Fetcher;
use crate::scrapers::sports247::text::collapsed_text;
use crate::types::RankingEntry;

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li.rankings-page__list-item").unwrap());
static NAME_LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.rankings-page__name-link").unwrap());

/// Fetches a rankings page and returns its players in rank order.
pub async fn list_top_players<C: HttpClientPort>(
    fetcher: &Fetcher<C>,
    rankings_url: &str,
    base_url: &Url,
    limit: Option<usize>,
) -> Result<Vec<RankingEntry>> {
    let document = fetcher.fetch(rankings_url).await?;
    let players = parse_rankings(&document, base_url, limit);
    info!("Found {} players on rankings page", players.len());
    Ok(players)
}

/// Reads ranking rows in document order. `limit` truncates the rows before
/// rows without a name link are skipped.
pub fn parse_rankings(document: &Html, base_url: &Url, limit: Option<usize>) -> Vec<RankingEntry> {
    let rows = document
        .select(&ROW_SELECTOR)
        .take(limit.unwrap_or(usize::MAX));

    let mut players = Vec::new();
    for row in rows {
        let Some(link) = row.select(&NAME_LINK_SELECTOR).next() else {
            continue;
        };

        let name = collapsed_text(link);
        let Some(href) = link.value().attr("href") else {
            warn!("Ranking row for '{}' has no profile link", name);
            continue;
        };

        match base_url.join(href.trim()) {
            Ok(profile_url) => players.push(RankingEntry {
                name,
                profile_url: profile_url.to_string(),
            }),
            Err(e) => warn!("Skipping '{}': cannot resolve '{}': {}", name, href, e),
        }
    }
    players
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://247sports.com").unwrap()
    }

    const PAGE: &str = r#"
        <ul class="rankings-page__list">
            <li class="rankings-page__list-item">
                <a class="rankings-page__name-link" href="/player/keisean-henderson-46144755/"> Keisean Henderson </a>
            </li>
            <li class="rankings-page__list-item">
                <span class="rankings-page__name">Unlinked Player</span>
            </li>
            <li class="rankings-page__list-item">
                <a class="rankings-page__name-link" href="https://247sports.com/player/tyran-stokes-46147741/">Tyran Stokes</a>
            </li>
        </ul>
    "#;

    #[test]
    fn test_rows_without_name_link_are_skipped() {
        let doc = Html::parse_document(PAGE);
        let players = parse_rankings(&doc, &base(), None);
        assert_eq!(
            players,
            vec![
                RankingEntry {
                    name: "Keisean Henderson".to_string(),
                    profile_url: "https://247sports.com/player/keisean-henderson-46144755/".to_string(),
                },
                RankingEntry {
                    name: "Tyran Stokes".to_string(),
                    profile_url: "https://247sports.com/player/tyran-stokes-46147741/".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_limit_counts_rows_not_players() {
        let doc = Html::parse_document(PAGE);
        let players = parse_rankings(&doc, &base(), Some(2));
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Keisean Henderson");
    }

    #[test]
    fn test_name_whitespace_is_collapsed() {
        let doc = Html::parse_document(
            r#"<li class="rankings-page__list-item"><a class="rankings-page__name-link" href="/player/k-1/">
                Keisean
                <span>Henderson</span>
            </a></li>"#,
        );
        let players = parse_rankings(&doc, &base(), None);
        assert_eq!(players[0].name, "Keisean Henderson");
    }

    #[test]
    fn test_empty_page_yields_no_players() {
        let doc = Html::parse_document("<html><body><p>Access denied</p></body></html>");
        assert!(parse_rankings(&doc, &base(), None).is_empty());
    }
}
