// Text-level parsing of the lineup feed: game headers, lineup rows and salaries.

use tracing::trace;

use super::{BatterLine, PitcherLine};
use crate::error::StatsError;
use crate::stats::types::Hand;

/// Marker the feed prints in place of a lineup that has not been announced yet.
pub const PENDING_MARKER: &str = "Check Back Soon";

/// Convert a salary token to dollars.
///
/// Everything except digits and `.` is discarded; a leading `0` keeps an all-symbol
/// token parseable. A trailing `K` (thousands shorthand) multiplies by 1000.
pub fn convert_salary(raw: &str) -> f64 {
    let thousands = raw.trim().to_ascii_lowercase().ends_with('k');
    let digits: String = std::iter::once('0')
        .chain(raw.chars().filter(|c| c.is_ascii_digit() || *c == '.'))
        .collect();
    // "0" + "9.0.1" style garbage falls back to the integer prefix.
    let value = digits.parse::<f64>().unwrap_or_else(|_| {
        digits
            .split('.')
            .next()
            .and_then(|whole| whole.parse::<f64>().ok())
            .unwrap_or(0.0)
    });
    if thousands {
        value * 1000.0
    } else {
        value
    }
}

fn pitcher_hand(code: &str) -> Hand {
    if code.trim().eq_ignore_ascii_case("r") {
        Hand::Right
    } else {
        Hand::Left
    }
}

fn batter_hand(code: &str) -> Option<Hand> {
    match code {
        "r" => Some(Hand::Right),
        "l" => Some(Hand::Left),
        "s" => Some(Hand::Switch),
        _ => None,
    }
}

fn squash(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Parse a game header `"A Name (R) $9,000 @ B Name (L) $8,500"` into its two pitchers,
/// away first.
pub fn parse_header(text: &str) -> Vec<PitcherLine> {
    text.split('@')
        .map(|side| {
            let side = side.replace(['(', ')'], "\t");
            let parts: Vec<&str> = side.trim().split('\t').collect();
            match parts.as_slice() {
                [name] => PitcherLine {
                    name: squash(name),
                    hand: None,
                    salary: None,
                },
                [name, hand, rest @ ..] => PitcherLine {
                    name: squash(name),
                    hand: Some(pitcher_hand(hand)),
                    salary: Some(convert_salary(&rest.concat())),
                },
                [] => PitcherLine {
                    name: String::new(),
                    hand: None,
                    salary: None,
                },
            }
        })
        .collect()
}

/// Parse one lineup row, e.g. `"1 Mike Trout (R) $4.5K CF"`.
///
/// Rows are lowercased, stripped of parentheses and must tokenize into 6 or 7 tokens:
/// order, a name of one or more tokens, a one-letter hand code, salary, position.
pub fn parse_lineup_row(text: &str) -> Result<BatterLine, StatsError> {
    let malformed = || StatsError::MalformedLineupRow {
        row: text.trim().to_string(),
    };
    let cleaned = text.to_lowercase().replace(['(', ')'], "");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    if !(6..=7).contains(&tokens.len()) {
        return Err(malformed());
    }

    let order: u8 = tokens[0].parse().map_err(|_| malformed())?;
    let mut idx = 2;
    while tokens.get(idx).is_some_and(|t| t.chars().count() > 1) {
        idx += 1;
    }
    // The hand token must be followed by salary and position.
    if idx + 2 >= tokens.len() {
        return Err(malformed());
    }
    let name = tokens[1..idx].join(" ");
    let hand = batter_hand(tokens[idx]);
    let salary = convert_salary(tokens[idx + 1]);
    let position = tokens[idx + 2].to_string();

    Ok(BatterLine {
        order,
        name,
        hand,
        salary,
        position,
    })
}

/// Parse every row of one lineup list, dropping malformed rows.
pub fn parse_lineup_rows<'a, I>(rows: I) -> Vec<BatterLine>
where
    I: IntoIterator<Item = &'a str>,
{
    rows.into_iter()
        .filter_map(|row| match parse_lineup_row(row) {
            Ok(line) => Some(line),
            Err(e) => {
                trace!("{}", e);
                None
            }
        })
        .collect()
}

/// Insert empty lists for unannounced sides so that index 0 is away and index 1 is home.
pub fn place_pending(
    mut lists: Vec<Vec<BatterLine>>,
    away_pending: bool,
    home_pending: bool,
) -> Vec<Vec<BatterLine>> {
    if away_pending {
        lists.insert(0, Vec::new());
    }
    if home_pending {
        lists.push(Vec::new());
    }
    lists
}
