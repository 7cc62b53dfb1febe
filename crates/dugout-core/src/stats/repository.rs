// In-memory stats repository.
//
// Players live in an arena (`Vec<PlayerEntry>` plus a name index) so that daily
// references such as a team's starting pitcher are stable `PlayerId`s. Every
// (entity, year) pair holds a fixed-shape record; reads never create keys.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, StatsError};
use crate::stats::types::{
    BatterSplit, BatterSplitStat, BattingStat, BattingTotals, CatcherFielding,
    FieldingPosition, Hand, HandSplit, LeagueTotals, ParkFactors, PitcherSplit,
    PitcherSplitStat, PitchingStat, PitchingTotals, RollingBatting, TeamSplit, TeamSplitStat,
    Venue,
};

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Stable handle to a player in the repository arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(usize);

impl PlayerId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Address of a numeric player leaf within one season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerStat {
    Batting(BattingStat),
    Pitching(PitchingStat),
    Xfip(Venue),
    PitcherVs(Hand, PitcherSplitStat),
    BatterVs(Hand, BatterSplitStat),
    CatcherStolenBases,
    CatcherCaughtStealing,
}

impl PlayerStat {
    /// Batting and pitching totals are populated for every player by ingestion,
    /// so an unwritten leaf reads as zero instead of failing.
    pub fn is_guaranteed_total(self) -> bool {
        matches!(self, PlayerStat::Batting(_) | PlayerStat::Pitching(_))
    }
}

/// Address of a numeric team leaf within one season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamStat {
    Runs,
    VsHand(Hand, TeamSplitStat),
    StolenBasesAllowed,
    CaughtStealing,
}

/// Canonical repository key for a player name: trimmed, lowercase, single-spaced.
pub fn canonical_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(|t| t.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Player records
// ---------------------------------------------------------------------------

/// One season of historical player data.
#[derive(Debug, Clone, Default)]
pub struct PlayerSeason {
    pub team: Option<String>,
    pub batting: Option<BattingTotals>,
    pub pitching: Option<PitchingTotals>,
    pub xfip_home: Option<f64>,
    pub xfip_away: Option<f64>,
    pub pitcher_vs: HandSplit<PitcherSplit>,
    pub batter_vs: HandSplit<BatterSplit>,
    pub catching: Option<CatcherFielding>,
}

impl PlayerSeason {
    pub fn xfip(&self, venue: Venue) -> Option<f64> {
        match venue {
            Venue::Home => self.xfip_home,
            Venue::Away => self.xfip_away,
        }
    }

    pub fn xfip_slot(&mut self, venue: Venue) -> &mut Option<f64> {
        match venue {
            Venue::Home => &mut self.xfip_home,
            Venue::Away => &mut self.xfip_away,
        }
    }

    fn read(&self, stat: PlayerStat) -> Option<f64> {
        match stat {
            PlayerStat::Batting(s) => Some(self.batting.unwrap_or_default().get(s)),
            PlayerStat::Pitching(s) => Some(self.pitching.unwrap_or_default().get(s)),
            PlayerStat::Xfip(venue) => self.xfip(venue),
            PlayerStat::PitcherVs(hand, s) => self.pitcher_vs.get(hand).map(|v| v.get(s)),
            PlayerStat::BatterVs(hand, s) => self.batter_vs.get(hand).map(|v| v.get(s)),
            PlayerStat::CatcherStolenBases => self.catching.map(|c| c.stolen_bases),
            PlayerStat::CatcherCaughtStealing => self.catching.map(|c| c.caught_stealing),
        }
    }

    fn write(&mut self, stat: PlayerStat, value: f64) {
        match stat {
            PlayerStat::Batting(s) => self.batting.get_or_insert_with(Default::default).set(s, value),
            PlayerStat::Pitching(s) => {
                self.pitching.get_or_insert_with(Default::default).set(s, value)
            }
            PlayerStat::Xfip(venue) => *self.xfip_slot(venue) = Some(value),
            PlayerStat::PitcherVs(hand, s) => self.pitcher_vs.get_or_default(hand).set(s, value),
            PlayerStat::BatterVs(hand, s) => self.batter_vs.get_or_default(hand).set(s, value),
            PlayerStat::CatcherStolenBases => {
                self.catching.get_or_insert_with(Default::default).stolen_bases = value
            }
            PlayerStat::CatcherCaughtStealing => {
                self.catching.get_or_insert_with(Default::default).caught_stealing = value
            }
        }
    }
}

/// Today's attributes, written by the lineup step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyAttributes {
    pub team: Option<String>,
    pub salary: Option<u32>,
    pub position: Option<FieldingPosition>,
    pub batting_order: Option<u8>,
    pub bats: Option<Hand>,
    pub throws: Option<Hand>,
    pub active: bool,
}

/// Everything known about one player.
#[derive(Debug, Clone)]
pub struct PlayerEntry {
    name: String,
    seasons: BTreeMap<u16, PlayerSeason>,
    seven_day: Option<RollingBatting>,
    pub daily: DailyAttributes,
}

impl PlayerEntry {
    fn new(name: String) -> Self {
        PlayerEntry {
            name,
            seasons: BTreeMap::new(),
            seven_day: None,
            daily: DailyAttributes::default(),
        }
    }

    /// Canonical lowercase full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn season(&self, year: u16) -> Option<&PlayerSeason> {
        self.seasons.get(&year)
    }

    pub fn season_mut(&mut self, year: u16) -> &mut PlayerSeason {
        self.seasons.entry(year).or_default()
    }

    pub fn years(&self) -> impl Iterator<Item = u16> + '_ {
        self.seasons.keys().copied()
    }

    /// Batting totals for `year`; zero when never written.
    pub fn batting(&self, year: u16) -> BattingTotals {
        self.season(year)
            .and_then(|s| s.batting)
            .unwrap_or_default()
    }

    /// Pitching totals for `year`; zero when never written.
    pub fn pitching(&self, year: u16) -> PitchingTotals {
        self.season(year)
            .and_then(|s| s.pitching)
            .unwrap_or_default()
    }

    /// Today's team if the lineup step set one, otherwise the team on record for `season`.
    pub fn team(&self, season: u16) -> Option<&str> {
        self.daily
            .team
            .as_deref()
            .or_else(|| self.season_team(season))
    }

    /// Team on record in the stat files for `season`.
    pub fn season_team(&self, season: u16) -> Option<&str> {
        self.season(season).and_then(|s| s.team.as_deref())
    }

    /// Throwing hand, right when unknown.
    pub fn throws(&self) -> Hand {
        self.daily.throws.unwrap_or(Hand::Right)
    }

    pub fn seven_day(&self) -> Option<&RollingBatting> {
        self.seven_day.as_ref()
    }

    pub fn set_seven_day(&mut self, window: RollingBatting) {
        self.seven_day = Some(window);
    }

    pub fn is_active(&self) -> bool {
        self.daily.active
    }
}

// ---------------------------------------------------------------------------
// Team records
// ---------------------------------------------------------------------------

/// One season of team data.
#[derive(Debug, Clone, Default)]
pub struct TeamSeason {
    pub runs: Option<f64>,
    pub vs_hand: HandSplit<TeamSplit>,
    /// Sum of the team's catcher rows.
    pub fielding: Option<CatcherFielding>,
}

/// Today's opponent and venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    pub opponent: String,
    pub venue: Venue,
}

#[derive(Debug, Clone)]
pub struct TeamEntry {
    code: String,
    seasons: BTreeMap<u16, TeamSeason>,
    matchup: Option<Matchup>,
    starting_pitcher: Option<PlayerId>,
}

impl TeamEntry {
    fn new(code: String) -> Self {
        TeamEntry {
            code,
            seasons: BTreeMap::new(),
            matchup: None,
            starting_pitcher: None,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn season(&self, year: u16) -> Option<&TeamSeason> {
        self.seasons.get(&year)
    }

    pub fn season_mut(&mut self, year: u16) -> &mut TeamSeason {
        self.seasons.entry(year).or_default()
    }

    pub fn matchup(&self) -> Option<&Matchup> {
        self.matchup.as_ref()
    }

    pub fn starting_pitcher(&self) -> Option<PlayerId> {
        self.starting_pitcher
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct StatsRepository {
    players: Vec<PlayerEntry>,
    index: HashMap<String, PlayerId>,
    teams: BTreeMap<String, TeamEntry>,
    leagues: BTreeMap<u16, LeagueTotals>,
    parks: HashMap<String, ParkFactors>,
}

impl StatsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // -- players --

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player_id(&self, name: &str) -> Option<PlayerId> {
        self.index.get(&canonical_name(name)).copied()
    }

    /// Look up a player, creating an empty entry on first mention.
    pub fn ensure_player(&mut self, name: &str) -> PlayerId {
        let key = canonical_name(name);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = PlayerId(self.players.len());
        self.players.push(PlayerEntry::new(key.clone()));
        self.index.insert(key, id);
        id
    }

    pub fn player(&self, id: PlayerId) -> &PlayerEntry {
        &self.players[id.0]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerEntry {
        &mut self.players[id.0]
    }

    pub fn player_by_name(&self, name: &str) -> Result<&PlayerEntry> {
        self.player_id(name)
            .map(|id| self.player(id))
            .ok_or_else(|| StatsError::missing(canonical_name(name), "player"))
    }

    /// All players in insertion order.
    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &PlayerEntry)> {
        self.players
            .iter()
            .enumerate()
            .map(|(i, p)| (PlayerId(i), p))
    }

    /// Players marked active by today's lineup, in insertion order.
    pub fn active_players(&self) -> Vec<PlayerId> {
        self.players()
            .filter(|(_, p)| p.is_active())
            .map(|(id, _)| id)
            .collect()
    }

    /// Write one numeric leaf, creating the player and season as needed.
    pub fn set_player_stat(
        &mut self,
        name: &str,
        year: u16,
        stat: PlayerStat,
        value: f64,
    ) -> PlayerId {
        let id = self.ensure_player(name);
        self.player_mut(id).season_mut(year).write(stat, value);
        id
    }

    /// Read one numeric leaf.
    ///
    /// Guaranteed totals read as zero for any known player; everything else fails
    /// with `MissingKey` when it was never written.
    pub fn player_stat(&self, name: &str, year: u16, stat: PlayerStat) -> Result<f64> {
        let player = self.player_by_name(name)?;
        let missing = || StatsError::missing(player.name(), format!("{year}/{stat:?}"));
        match player.season(year) {
            Some(season) => season.read(stat).ok_or_else(missing),
            None if stat.is_guaranteed_total() => Ok(0.0),
            None => Err(missing()),
        }
    }

    /// Give every player that has totals in any season a (zero) totals record for
    /// `season`, so current-season ratios never meet an absent record.
    pub fn fill_missing_totals(&mut self, season: u16) -> usize {
        let mut filled = 0;
        for player in &mut self.players {
            let has_batting = player.seasons.values().any(|s| s.batting.is_some());
            let has_pitching = player.seasons.values().any(|s| s.pitching.is_some());
            if !has_batting && !has_pitching {
                continue;
            }
            let current = player.season_mut(season);
            if has_batting && current.batting.is_none() {
                current.batting = Some(BattingTotals::default());
                filled += 1;
            }
            if has_pitching && current.pitching.is_none() {
                current.pitching = Some(PitchingTotals::default());
                filled += 1;
            }
        }
        filled
    }

    // -- teams --

    pub fn teams(&self) -> impl Iterator<Item = &TeamEntry> {
        self.teams.values()
    }

    pub fn team(&self, code: &str) -> Result<&TeamEntry> {
        self.teams
            .get(code)
            .ok_or_else(|| StatsError::missing(code, "team"))
    }

    /// Look up a team, creating an empty entry on first mention.
    pub fn team_mut(&mut self, code: &str) -> &mut TeamEntry {
        self.teams
            .entry(code.to_string())
            .or_insert_with(|| TeamEntry::new(code.to_string()))
    }

    pub fn set_team_stat(&mut self, code: &str, year: u16, stat: TeamStat, value: f64) {
        let season = self.team_mut(code).season_mut(year);
        match stat {
            TeamStat::Runs => season.runs = Some(value),
            TeamStat::VsHand(hand, s) => season.vs_hand.get_or_default(hand).set(s, value),
            TeamStat::StolenBasesAllowed => {
                season.fielding.get_or_insert_with(Default::default).stolen_bases = value
            }
            TeamStat::CaughtStealing => {
                season.fielding.get_or_insert_with(Default::default).caught_stealing = value
            }
        }
    }

    pub fn team_stat(&self, code: &str, year: u16, stat: TeamStat) -> Result<f64> {
        let missing = || StatsError::missing(code, format!("{year}/{stat:?}"));
        let season = self.team(code)?.season(year).ok_or_else(missing)?;
        let value = match stat {
            TeamStat::Runs => season.runs,
            TeamStat::VsHand(hand, s) => season.vs_hand.get(hand).map(|v| v.get(s)),
            TeamStat::StolenBasesAllowed => season.fielding.map(|f| f.stolen_bases),
            TeamStat::CaughtStealing => season.fielding.map(|f| f.caught_stealing),
        };
        value.ok_or_else(missing)
    }

    /// Add a catcher's fielding line to the team's season sum.
    pub fn add_team_fielding(&mut self, code: &str, year: u16, line: CatcherFielding) {
        let sum = self
            .team_mut(code)
            .season_mut(year)
            .fielding
            .get_or_insert_with(Default::default);
        sum.stolen_bases += line.stolen_bases;
        sum.caught_stealing += line.caught_stealing;
    }

    /// Record today's game between `away` and `home`. Sets both sides at once so the
    /// opponent relation stays symmetric; a team can only be scheduled once per day.
    pub fn set_matchup(&mut self, away: &str, home: &str) -> Result<()> {
        for code in [away, home] {
            if let Some(existing) = self.teams.get(code).and_then(|t| t.matchup.as_ref()) {
                return Err(StatsError::MatchupAlreadySet {
                    team: code.to_string(),
                    opponent: existing.opponent.clone(),
                });
            }
        }
        self.team_mut(away).matchup = Some(Matchup {
            opponent: home.to_string(),
            venue: Venue::Away,
        });
        self.team_mut(home).matchup = Some(Matchup {
            opponent: away.to_string(),
            venue: Venue::Home,
        });
        Ok(())
    }

    fn matchup(&self, code: &str) -> Result<&Matchup> {
        self.team(code)?
            .matchup
            .as_ref()
            .ok_or_else(|| StatsError::missing(code, "matchup"))
    }

    pub fn opponent(&self, code: &str) -> Result<&str> {
        self.matchup(code).map(|m| m.opponent.as_str())
    }

    pub fn venue(&self, code: &str) -> Result<Venue> {
        self.matchup(code).map(|m| m.venue)
    }

    pub fn set_starting_pitcher(&mut self, code: &str, pitcher: PlayerId) {
        self.team_mut(code).starting_pitcher = Some(pitcher);
    }

    pub fn starting_pitcher(&self, code: &str) -> Option<PlayerId> {
        self.teams.get(code).and_then(|t| t.starting_pitcher)
    }

    // -- league & parks --

    pub fn set_league(&mut self, year: u16, totals: LeagueTotals) {
        self.leagues.insert(year, totals);
    }

    pub fn league(&self, year: u16) -> Result<&LeagueTotals> {
        self.leagues
            .get(&year)
            .ok_or_else(|| StatsError::missing("league", year.to_string()))
    }

    pub fn set_park(&mut self, code: &str, factors: ParkFactors) {
        self.parks.insert(code.to_string(), factors);
    }

    /// Park factors for the park of `code`; neutral when the park has no row.
    pub fn park(&self, code: &str) -> ParkFactors {
        self.parks.get(code).copied().unwrap_or_default()
    }

    pub fn park_count(&self) -> usize {
        self.parks.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
