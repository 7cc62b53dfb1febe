// Daily lineup feed: announcement records, text parsing, HTML extraction, and
// application of an announcement to the stats repository.

pub mod apply;
pub mod feed;
pub mod parse;

use serde::{Deserialize, Serialize};

use crate::stats::types::Hand;

/// Index of the away side in every two-element announcement array.
pub const AWAY: usize = 0;
/// Index of the home side in every two-element announcement array.
pub const HOME: usize = 1;

/// A starting pitcher as printed in a game header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitcherLine {
    /// Lowercase display name, e.g. "felix hernandez".
    pub name: String,
    /// `None` when the header only carried a bare name.
    pub hand: Option<Hand>,
    pub salary: Option<f64>,
}

/// One row of a batting lineup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatterLine {
    /// Batting-order slot as printed (1-9).
    pub order: u8,
    pub name: String,
    /// `None` for a hand code the feed does not define.
    pub hand: Option<Hand>,
    pub salary: f64,
    /// Lowercase position token, e.g. "ss" or "cf".
    pub position: String,
}

/// One game from the lineup page. Every array is indexed `[AWAY, HOME]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupAnnouncement {
    /// Full franchise names as the feed prints them.
    pub teams: [String; 2],
    pub pitchers: [PitcherLine; 2],
    /// An unannounced side ("Check Back Soon") is an empty list.
    pub lineups: [Vec<BatterLine>; 2],
}

pub use apply::{apply_all, apply_announcement, ApplyReport};
pub use feed::{parse_lineup_page, FeedError};
pub use parse::{convert_salary, parse_header, parse_lineup_row};
