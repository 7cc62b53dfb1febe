// Franchise table: full names and mascots as they appear in the lineup feed and the
// stat files, mapped to the 2-3 letter codes used as team keys.

/// One franchise row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Franchise {
    pub code: &'static str,
    pub full_name: &'static str,
    pub mascot: &'static str,
}

/// Number of teams in the league; league totals are divided by this for per-team averages.
pub const TEAM_COUNT: usize = 30;

pub const FRANCHISES: [Franchise; TEAM_COUNT] = [
    Franchise { code: "ARI", full_name: "Arizona Diamondbacks", mascot: "Diamondbacks" },
    Franchise { code: "ATL", full_name: "Atlanta Braves", mascot: "Braves" },
    Franchise { code: "BAL", full_name: "Baltimore Orioles", mascot: "Orioles" },
    Franchise { code: "BOS", full_name: "Boston Red Sox", mascot: "Red Sox" },
    Franchise { code: "CHC", full_name: "Chicago Cubs", mascot: "Cubs" },
    Franchise { code: "CWS", full_name: "Chicago White Sox", mascot: "White Sox" },
    Franchise { code: "CIN", full_name: "Cincinnati Reds", mascot: "Reds" },
    Franchise { code: "CLE", full_name: "Cleveland Indians", mascot: "Indians" },
    Franchise { code: "COL", full_name: "Colorado Rockies", mascot: "Rockies" },
    Franchise { code: "DET", full_name: "Detroit Tigers", mascot: "Tigers" },
    Franchise { code: "HOU", full_name: "Houston Astros", mascot: "Astros" },
    Franchise { code: "KAN", full_name: "Kansas City Royals", mascot: "Royals" },
    Franchise { code: "LAA", full_name: "Los Angeles Angels", mascot: "Angels" },
    Franchise { code: "LOS", full_name: "Los Angeles Dodgers", mascot: "Dodgers" },
    Franchise { code: "MIA", full_name: "Miami Marlins", mascot: "Marlins" },
    Franchise { code: "MIL", full_name: "Milwaukee Brewers", mascot: "Brewers" },
    Franchise { code: "MIN", full_name: "Minnesota Twins", mascot: "Twins" },
    Franchise { code: "NYM", full_name: "New York Mets", mascot: "Mets" },
    Franchise { code: "NYY", full_name: "New York Yankees", mascot: "Yankees" },
    Franchise { code: "OAK", full_name: "Oakland Athletics", mascot: "Athletics" },
    Franchise { code: "PHI", full_name: "Philadelphia Phillies", mascot: "Phillies" },
    Franchise { code: "PIT", full_name: "Pittsburgh Pirates", mascot: "Pirates" },
    Franchise { code: "SDP", full_name: "San Diego Padres", mascot: "Padres" },
    Franchise { code: "SFG", full_name: "San Francisco Giants", mascot: "Giants" },
    Franchise { code: "SEA", full_name: "Seattle Mariners", mascot: "Mariners" },
    Franchise { code: "STL", full_name: "St. Louis Cardinals", mascot: "Cardinals" },
    Franchise { code: "TAM", full_name: "Tampa Bay Rays", mascot: "Rays" },
    Franchise { code: "TEX", full_name: "Texas Rangers", mascot: "Rangers" },
    Franchise { code: "TOR", full_name: "Toronto Blue Jays", mascot: "Blue Jays" },
    Franchise { code: "WAS", full_name: "Washington Nationals", mascot: "Nationals" },
];

/// Code for a full franchise name exactly as the lineup feed prints it.
pub fn code_for_full_name(name: &str) -> Option<&'static str> {
    let name = name.trim();
    FRANCHISES
        .iter()
        .find(|f| f.full_name == name)
        .map(|f| f.code)
}

/// Code for a mascot as the stat files print it (e.g. "Red Sox").
pub fn code_for_mascot(mascot: &str) -> Option<&'static str> {
    let mascot = mascot.trim();
    FRANCHISES
        .iter()
        .find(|f| f.mascot.eq_ignore_ascii_case(mascot))
        .map(|f| f.code)
}

/// Normalize any of the accepted spellings (code, full name, mascot) to a team code.
///
/// Returns `None` for placeholders such as FanGraphs' `- - -` (player traded mid-season).
pub fn normalize_team(raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    FRANCHISES
        .iter()
        .find(|f| f.code.eq_ignore_ascii_case(raw))
        .map(|f| f.code)
        .or_else(|| code_for_full_name(raw))
        .or_else(|| code_for_mascot(raw))
}

/// Whether `code` is one of the 30 franchise codes.
pub fn is_team_code(code: &str) -> bool {
    FRANCHISES.iter().any(|f| f.code == code)
}
