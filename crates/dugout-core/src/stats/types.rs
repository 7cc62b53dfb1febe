// Fixed-shape stat records and the small enums that index their split dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Split dimensions
// ---------------------------------------------------------------------------

/// Batting or throwing hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
    /// Switch hitter. Never a throwing hand.
    Switch,
}

impl Hand {
    /// The side used for split lookups. Switch hitters are looked up as right-handed.
    pub fn matchup_side(self) -> Hand {
        match self {
            Hand::Switch => Hand::Right,
            other => other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Hand::Left => "left",
            Hand::Right => "right",
            Hand::Switch => "switch",
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Home or away for today's game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    pub fn opposite(self) -> Venue {
        match self {
            Venue::Home => Venue::Away,
            Venue::Away => Venue::Home,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Venue::Home => "home",
            Venue::Away => "away",
        }
    }
}

/// Daily-fantasy fielding position classes, ordered as a roster lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldingPosition {
    #[serde(rename = "P")]
    Pitcher,
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "SS")]
    ShortStop,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "OF")]
    Outfield,
}

impl FieldingPosition {
    pub const ALL: [FieldingPosition; 7] = [
        FieldingPosition::Pitcher,
        FieldingPosition::Catcher,
        FieldingPosition::FirstBase,
        FieldingPosition::SecondBase,
        FieldingPosition::ShortStop,
        FieldingPosition::ThirdBase,
        FieldingPosition::Outfield,
    ];

    /// Parse a feed position token. Case-insensitive; corner outfield spots
    /// (LF/CF/RF) collapse into the single `OF` class.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "P" | "SP" => Some(FieldingPosition::Pitcher),
            "C" => Some(FieldingPosition::Catcher),
            "1B" => Some(FieldingPosition::FirstBase),
            "2B" => Some(FieldingPosition::SecondBase),
            "SS" => Some(FieldingPosition::ShortStop),
            "3B" => Some(FieldingPosition::ThirdBase),
            "OF" | "LF" | "CF" | "RF" => Some(FieldingPosition::Outfield),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            FieldingPosition::Pitcher => "P",
            FieldingPosition::Catcher => "C",
            FieldingPosition::FirstBase => "1B",
            FieldingPosition::SecondBase => "2B",
            FieldingPosition::ShortStop => "SS",
            FieldingPosition::ThirdBase => "3B",
            FieldingPosition::Outfield => "OF",
        }
    }

    pub fn is_pitcher(self) -> bool {
        self == FieldingPosition::Pitcher
    }
}

impl fmt::Display for FieldingPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A value split by the opposing player's hand. Switch lookups resolve to the right side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandSplit<T> {
    pub vs_left: Option<T>,
    pub vs_right: Option<T>,
}

impl<T: Default> HandSplit<T> {
    pub fn get(&self, hand: Hand) -> Option<&T> {
        match hand.matchup_side() {
            Hand::Left => self.vs_left.as_ref(),
            _ => self.vs_right.as_ref(),
        }
    }

    pub fn slot(&mut self, hand: Hand) -> &mut Option<T> {
        match hand.matchup_side() {
            Hand::Left => &mut self.vs_left,
            _ => &mut self.vs_right,
        }
    }

    pub fn get_or_default(&mut self, hand: Hand) -> &mut T {
        self.slot(hand).get_or_insert_with(T::default)
    }
}

// ---------------------------------------------------------------------------
// Batting totals
// ---------------------------------------------------------------------------

/// Season batting totals. Guaranteed-total category: unwritten fields read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BattingTotals {
    pub singles: f64,
    pub doubles: f64,
    pub triples: f64,
    pub hits: f64,
    pub walks: f64,
    /// Walk rate as a fraction (the file stores a percentage).
    pub walk_pct: f64,
    pub home_runs: f64,
    pub at_bats: f64,
    pub plate_appearances: f64,
    pub batting_average: f64,
    pub games: f64,
    pub stolen_bases: f64,
    pub caught_stealing: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattingStat {
    Singles,
    Doubles,
    Triples,
    Hits,
    Walks,
    WalkPct,
    HomeRuns,
    AtBats,
    PlateAppearances,
    BattingAverage,
    Games,
    StolenBases,
    CaughtStealing,
}

impl BattingTotals {
    pub fn get(&self, stat: BattingStat) -> f64 {
        match stat {
            BattingStat::Singles => self.singles,
            BattingStat::Doubles => self.doubles,
            BattingStat::Triples => self.triples,
            BattingStat::Hits => self.hits,
            BattingStat::Walks => self.walks,
            BattingStat::WalkPct => self.walk_pct,
            BattingStat::HomeRuns => self.home_runs,
            BattingStat::AtBats => self.at_bats,
            BattingStat::PlateAppearances => self.plate_appearances,
            BattingStat::BattingAverage => self.batting_average,
            BattingStat::Games => self.games,
            BattingStat::StolenBases => self.stolen_bases,
            BattingStat::CaughtStealing => self.caught_stealing,
        }
    }

    pub fn set(&mut self, stat: BattingStat, value: f64) {
        let slot = match stat {
            BattingStat::Singles => &mut self.singles,
            BattingStat::Doubles => &mut self.doubles,
            BattingStat::Triples => &mut self.triples,
            BattingStat::Hits => &mut self.hits,
            BattingStat::Walks => &mut self.walks,
            BattingStat::WalkPct => &mut self.walk_pct,
            BattingStat::HomeRuns => &mut self.home_runs,
            BattingStat::AtBats => &mut self.at_bats,
            BattingStat::PlateAppearances => &mut self.plate_appearances,
            BattingStat::BattingAverage => &mut self.batting_average,
            BattingStat::Games => &mut self.games,
            BattingStat::StolenBases => &mut self.stolen_bases,
            BattingStat::CaughtStealing => &mut self.caught_stealing,
        };
        *slot = value;
    }
}

// ---------------------------------------------------------------------------
// Pitching totals
// ---------------------------------------------------------------------------

/// Season pitching totals. Guaranteed-total category: unwritten fields read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PitchingTotals {
    pub games_started: f64,
    pub strikeouts: f64,
    pub innings_pitched: f64,
    pub games: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchingStat {
    GamesStarted,
    Strikeouts,
    InningsPitched,
    Games,
}

impl PitchingTotals {
    pub fn get(&self, stat: PitchingStat) -> f64 {
        match stat {
            PitchingStat::GamesStarted => self.games_started,
            PitchingStat::Strikeouts => self.strikeouts,
            PitchingStat::InningsPitched => self.innings_pitched,
            PitchingStat::Games => self.games,
        }
    }

    pub fn set(&mut self, stat: PitchingStat, value: f64) {
        let slot = match stat {
            PitchingStat::GamesStarted => &mut self.games_started,
            PitchingStat::Strikeouts => &mut self.strikeouts,
            PitchingStat::InningsPitched => &mut self.innings_pitched,
            PitchingStat::Games => &mut self.games,
        };
        *slot = value;
    }
}

// ---------------------------------------------------------------------------
// Handedness splits
// ---------------------------------------------------------------------------

/// What a pitcher allowed against batters of one hand.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PitcherSplit {
    pub home_runs: f64,
    pub walks: f64,
    pub batters_faced: f64,
    pub woba: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitcherSplitStat {
    HomeRuns,
    Walks,
    BattersFaced,
    Woba,
}

impl PitcherSplit {
    pub fn get(&self, stat: PitcherSplitStat) -> f64 {
        match stat {
            PitcherSplitStat::HomeRuns => self.home_runs,
            PitcherSplitStat::Walks => self.walks,
            PitcherSplitStat::BattersFaced => self.batters_faced,
            PitcherSplitStat::Woba => self.woba,
        }
    }

    pub fn set(&mut self, stat: PitcherSplitStat, value: f64) {
        let slot = match stat {
            PitcherSplitStat::HomeRuns => &mut self.home_runs,
            PitcherSplitStat::Walks => &mut self.walks,
            PitcherSplitStat::BattersFaced => &mut self.batters_faced,
            PitcherSplitStat::Woba => &mut self.woba,
        };
        *slot = value;
    }
}

/// What a batter produced against pitchers of one hand.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatterSplit {
    pub plate_appearances: f64,
    pub home_runs: f64,
    pub strikeouts: f64,
    pub woba: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatterSplitStat {
    PlateAppearances,
    HomeRuns,
    Strikeouts,
    Woba,
}

impl BatterSplit {
    pub fn get(&self, stat: BatterSplitStat) -> f64 {
        match stat {
            BatterSplitStat::PlateAppearances => self.plate_appearances,
            BatterSplitStat::HomeRuns => self.home_runs,
            BatterSplitStat::Strikeouts => self.strikeouts,
            BatterSplitStat::Woba => self.woba,
        }
    }

    pub fn set(&mut self, stat: BatterSplitStat, value: f64) {
        let slot = match stat {
            BatterSplitStat::PlateAppearances => &mut self.plate_appearances,
            BatterSplitStat::HomeRuns => &mut self.home_runs,
            BatterSplitStat::Strikeouts => &mut self.strikeouts,
            BatterSplitStat::Woba => &mut self.woba,
        };
        *slot = value;
    }
}

/// A team's offense against pitchers of one hand.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TeamSplit {
    pub strikeouts: f64,
    pub plate_appearances: f64,
    pub woba: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamSplitStat {
    Strikeouts,
    PlateAppearances,
    Woba,
}

impl TeamSplit {
    pub fn get(&self, stat: TeamSplitStat) -> f64 {
        match stat {
            TeamSplitStat::Strikeouts => self.strikeouts,
            TeamSplitStat::PlateAppearances => self.plate_appearances,
            TeamSplitStat::Woba => self.woba,
        }
    }

    pub fn set(&mut self, stat: TeamSplitStat, value: f64) {
        let slot = match stat {
            TeamSplitStat::Strikeouts => &mut self.strikeouts,
            TeamSplitStat::PlateAppearances => &mut self.plate_appearances,
            TeamSplitStat::Woba => &mut self.woba,
        };
        *slot = value;
    }
}

// ---------------------------------------------------------------------------
// Fielding, rolling window, league, ballpark
// ---------------------------------------------------------------------------

/// Stolen bases allowed and runners caught stealing (catcher rows, or a team's sum).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CatcherFielding {
    pub stolen_bases: f64,
    pub caught_stealing: f64,
}

impl CatcherFielding {
    pub fn attempts(&self) -> f64 {
        self.stolen_bases + self.caught_stealing
    }
}

/// Batter totals over the trailing 7-day window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RollingBatting {
    pub at_bats: f64,
    pub hits: f64,
    pub singles: f64,
    pub doubles: f64,
    pub triples: f64,
    pub home_runs: f64,
    pub games: f64,
    pub plate_appearances: f64,
    pub walk_pct: f64,
    pub batting_average: f64,
    pub woba: f64,
}

/// League-wide season aggregates used as normalization denominators.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LeagueTotals {
    pub walks: f64,
    pub plate_appearances: f64,
    pub home_runs: f64,
    /// Strikeout rate as a fraction.
    pub strikeout_pct: f64,
    pub woba: f64,
    pub stolen_bases: f64,
    pub caught_stealing: f64,
    pub runs: f64,
}

impl LeagueTotals {
    pub fn walk_rate(&self) -> f64 {
        per(self.walks, self.plate_appearances)
    }

    pub fn home_run_rate(&self) -> f64 {
        per(self.home_runs, self.plate_appearances)
    }

    pub fn steal_success_rate(&self) -> f64 {
        per(self.stolen_bases, self.stolen_bases + self.caught_stealing)
    }

    pub fn steal_attempts_per_team(&self, teams: usize) -> f64 {
        per(self.stolen_bases + self.caught_stealing, teams as f64)
    }

    pub fn runs_per_team(&self, teams: usize) -> f64 {
        per(self.runs, teams as f64)
    }
}

/// Park factors for one ballpark. Values are multipliers centered at 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParkFactors {
    pub overall: f64,
    pub ba_vs_left: f64,
    pub ba_vs_right: f64,
    pub hr_vs_left: f64,
    pub hr_vs_right: f64,
}

impl Default for ParkFactors {
    /// A neutral park.
    fn default() -> Self {
        ParkFactors {
            overall: 1.0,
            ba_vs_left: 1.0,
            ba_vs_right: 1.0,
            hr_vs_left: 1.0,
            hr_vs_right: 1.0,
        }
    }
}

impl ParkFactors {
    pub fn batting_average(&self, batter: Hand) -> f64 {
        match batter.matchup_side() {
            Hand::Left => self.ba_vs_left,
            _ => self.ba_vs_right,
        }
    }

    pub fn home_run(&self, batter: Hand) -> f64 {
        match batter.matchup_side() {
            Hand::Left => self.hr_vs_left,
            _ => self.hr_vs_right,
        }
    }
}

/// `num / den`, or 0.0 when the denominator is not positive.
pub fn per(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_hitters_collapse_to_right() {
        assert_eq!(Hand::Switch.matchup_side(), Hand::Right);
        assert_eq!(Hand::Left.matchup_side(), Hand::Left);
    }

    #[test]
    fn hand_split_switch_reads_right_side() {
        let split = HandSplit {
            vs_left: Some(1.0),
            vs_right: Some(2.0),
        };
        assert_eq!(split.get(Hand::Switch), Some(&2.0));
        assert_eq!(split.get(Hand::Left), Some(&1.0));
    }

    #[test]
    fn hand_split_get_or_default_creates_once() {
        let mut split: HandSplit<PitcherSplit> = HandSplit::default();
        split.get_or_default(Hand::Left).walks = 12.0;
        split.get_or_default(Hand::Left).batters_faced = 150.0;
        let left = split.get(Hand::Left).unwrap();
        assert_eq!(left.walks, 12.0);
        assert_eq!(left.batters_faced, 150.0);
        assert!(split.vs_right.is_none());
    }

    #[test]
    fn fielding_position_codes() {
        assert_eq!(FieldingPosition::from_code("ss"), Some(FieldingPosition::ShortStop));
        assert_eq!(FieldingPosition::from_code("CF"), Some(FieldingPosition::Outfield));
        assert_eq!(FieldingPosition::from_code("DH"), None);
        for pos in FieldingPosition::ALL {
            assert_eq!(FieldingPosition::from_code(pos.code()), Some(pos));
        }
    }

    #[test]
    fn batting_totals_get_set_by_key() {
        let mut totals = BattingTotals::default();
        totals.set(BattingStat::WalkPct, 0.123);
        totals.set(BattingStat::AtBats, 512.0);
        assert_eq!(totals.get(BattingStat::WalkPct), 0.123);
        assert_eq!(totals.get(BattingStat::AtBats), 512.0);
        assert_eq!(totals.get(BattingStat::Hits), 0.0);
    }

    #[test]
    fn league_rates_guard_zero_denominators() {
        let empty = LeagueTotals::default();
        assert_eq!(empty.walk_rate(), 0.0);
        assert_eq!(empty.steal_success_rate(), 0.0);

        let league = LeagueTotals {
            walks: 100.0,
            plate_appearances: 1000.0,
            stolen_bases: 30.0,
            caught_stealing: 10.0,
            runs: 600.0,
            ..Default::default()
        };
        assert!((league.walk_rate() - 0.1).abs() < 1e-12);
        assert!((league.steal_success_rate() - 0.75).abs() < 1e-12);
        assert!((league.runs_per_team(30) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn neutral_park_is_all_ones() {
        let park = ParkFactors::default();
        assert_eq!(park.batting_average(Hand::Left), 1.0);
        assert_eq!(park.home_run(Hand::Switch), 1.0);
    }
}
