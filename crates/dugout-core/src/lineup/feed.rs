// HTML extraction for the lineup page.
//
// The page repeats one `ul.schedule-list` per slate; inside it, game headers and
// lineup grids appear as sibling sequences that are zipped pairwise.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::parse::{parse_header, parse_lineup_rows, place_pending, PENDING_MARKER};
use super::LineupAnnouncement;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

struct Selectors {
    schedule: Selector,
    header: Selector,
    grid: Selector,
    match_teams: Selector,
    team: Selector,
    lineup_list: Selector,
    player: Selector,
    away: Selector,
    home: Selector,
}

fn selector(css: &str) -> Result<Selector, FeedError> {
    Selector::parse(css).map_err(|e| FeedError::InvalidSelector {
        selector: css.to_string(),
        message: format!("{e:?}"),
    })
}

impl Selectors {
    fn new() -> Result<Self, FeedError> {
        Ok(Selectors {
            schedule: selector("ul.schedule-list")?,
            header: selector("header")?,
            grid: selector("div.grid-3-3")?,
            match_teams: selector("div.match-teams")?,
            team: selector("div.team")?,
            lineup_list: selector("ul.lineup-list")?,
            player: selector("li.player")?,
            away: selector("div.away")?,
            home: selector("div.home")?,
        })
    }
}

/// Text of an element with its text nodes separated by spaces.
fn spaced_text(el: ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join(" ")
}

/// First non-empty line of an element's text.
fn first_line(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::lines)
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn is_pending(grid: ElementRef<'_>, side: &Selector) -> bool {
    grid.select(side)
        .next()
        .is_some_and(|el| el.text().collect::<String>().contains(PENDING_MARKER))
}

fn parse_game(
    sel: &Selectors,
    header: ElementRef<'_>,
    grid: ElementRef<'_>,
) -> Option<LineupAnnouncement> {
    let header_text = header
        .select(&sel.match_teams)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();
    let pitchers = parse_header(&header_text);

    let teams: Vec<String> = grid.select(&sel.team).map(first_line).collect();

    let lists: Vec<_> = grid
        .select(&sel.lineup_list)
        .map(|list| {
            let rows: Vec<String> = list.select(&sel.player).map(spaced_text).collect();
            parse_lineup_rows(rows.iter().map(String::as_str))
        })
        .collect();
    let lists = place_pending(
        lists,
        is_pending(grid, &sel.away),
        is_pending(grid, &sel.home),
    );

    let (Ok(pitchers), Ok(teams), Ok(lineups)) = (
        <[_; 2]>::try_from(pitchers),
        <[_; 2]>::try_from(teams),
        <[_; 2]>::try_from(lists),
    ) else {
        warn!("skipping game block '{}': expected two pitchers, teams and lineups", header_text.trim());
        return None;
    };

    Some(LineupAnnouncement {
        teams,
        pitchers,
        lineups,
    })
}

/// Extract every game announcement from a lineup page.
pub fn parse_lineup_page(html: &str) -> Result<Vec<LineupAnnouncement>, FeedError> {
    let sel = Selectors::new()?;
    let document = Html::parse_document(html);

    let mut games = Vec::new();
    for schedule in document.select(&sel.schedule) {
        let headers = schedule.select(&sel.header);
        let grids = schedule.select(&sel.grid);
        games.extend(
            headers
                .zip(grids)
                .filter_map(|(header, grid)| parse_game(&sel, header, grid)),
        );
    }
    debug!("lineup page yielded {} games", games.len());
    Ok(games)
}
