// Historical stat file ingestion.
//
// Reads FanGraphs-style CSV exports (header row, one entity per row) for the prior and
// current season and writes them into a fresh `StatsRepository`. Percent columns are
// stored as fractions.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use tracing::{debug, info, warn};

use crate::stats::repository::{canonical_name, PlayerSeason, StatsRepository, TeamStat};
use crate::stats::types::{
    BatterSplit, BattingTotals, CatcherFielding, Hand, LeagueTotals, ParkFactors, PitcherSplit,
    PitchingTotals, RollingBatting, TeamSplitStat, Venue,
};
use crate::teams::normalize_team;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

/// Spellings that differ between the stat files and the lineup feed.
const NAME_ALIASES: &[(&str, &str)] = &[
    ("tom milone", "tommy milone"),
    ("michael bolsinger", "mike bolsinger"),
];

/// Repository key for a stat-file name: canonical form, then the alias table.
pub fn player_key(raw: &str) -> String {
    let name = canonical_name(raw);
    NAME_ALIASES
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| to.to_string())
        .unwrap_or(name)
}

// ---------------------------------------------------------------------------
// File layout
// ---------------------------------------------------------------------------

fn side_label(hand: Hand) -> &'static str {
    match hand.matchup_side() {
        Hand::Left => "L",
        _ => "R",
    }
}

pub fn batter_totals_path(dir: &Path, year: u16) -> PathBuf {
    dir.join(format!("Batter/{year}/{year} Total Batter Stats.csv"))
}

/// `pitcher_hand` is the hand of the pitchers the batter faced.
pub fn batter_split_path(dir: &Path, year: u16, pitcher_hand: Hand) -> PathBuf {
    let side = side_label(pitcher_hand);
    dir.join(format!("Batter/{year}/{year} Batter Stats vs {side}HP.csv"))
}

pub fn seven_day_path(dir: &Path, season: u16) -> PathBuf {
    dir.join(format!("Batter/{season}/7_day Batter Total Stats.csv"))
}

pub fn pitcher_totals_path(dir: &Path, year: u16) -> PathBuf {
    dir.join(format!("Pitcher/{year}/{year} Total Pitcher Stats.csv"))
}

pub fn pitcher_xfip_path(dir: &Path, year: u16, venue: Venue) -> PathBuf {
    let label = match venue {
        Venue::Home => "Home",
        Venue::Away => "Away",
    };
    dir.join(format!("Pitcher/{year}/{year} {label} Pitcher Stats.csv"))
}

/// `batter_hand` is the hand of the batters the pitcher faced.
pub fn pitcher_split_path(dir: &Path, year: u16, batter_hand: Hand) -> PathBuf {
    let side = side_label(batter_hand);
    dir.join(format!("Pitcher/{year}/{year} Pitcher Stats vs {side}HB.csv"))
}

pub fn catcher_path(dir: &Path, year: u16) -> PathBuf {
    dir.join(format!("Catcher/{year} Catcher Stats.csv"))
}

pub fn team_runs_path(dir: &Path, year: u16) -> PathBuf {
    dir.join(format!("Team/{year} Team Stats.csv"))
}

/// `pitcher_hand` is the hand of the pitchers the team faced.
pub fn team_split_path(dir: &Path, year: u16, pitcher_hand: Hand) -> PathBuf {
    let side = side_label(pitcher_hand);
    dir.join(format!("Team/{year} Team Stats vs {side}HP.csv"))
}

pub fn league_path(dir: &Path, year: u16) -> PathBuf {
    dir.join(format!("League/{year} League Stats.csv"))
}

pub fn park_factors_path(dir: &Path) -> PathBuf {
    dir.join("Ballpark/Park Factors.csv")
}

// ---------------------------------------------------------------------------
// Raw CSV serde structs (private)
// ---------------------------------------------------------------------------

/// Percent column ("8.5", "8.5 %" or "8.5%") as a fraction.
fn de_percent<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let raw = String::deserialize(d)?;
    let trimmed = raw.trim().trim_end_matches('%').trim();
    trimmed
        .parse::<f64>()
        .map(|v| v / 100.0)
        .map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize)]
struct RawXfip {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Team", default)]
    team: String,
    #[serde(rename = "xFIP")]
    xfip: f64,
}

#[derive(Debug, Deserialize)]
struct RawPitcherSplit {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Team", default)]
    team: String,
    #[serde(rename = "HR")]
    home_runs: f64,
    #[serde(rename = "BB")]
    walks: f64,
    #[serde(rename = "TBF")]
    batters_faced: f64,
    #[serde(rename = "wOBA")]
    woba: f64,
}

#[derive(Debug, Deserialize)]
struct RawPitcherTotals {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Team", default)]
    team: String,
    #[serde(rename = "GS")]
    games_started: f64,
    #[serde(rename = "K", alias = "SO")]
    strikeouts: f64,
    #[serde(rename = "IP")]
    innings_pitched: f64,
    #[serde(rename = "G")]
    games: f64,
}

#[derive(Debug, Deserialize)]
struct RawCatcher {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Team", default)]
    team: String,
    #[serde(rename = "SB")]
    stolen_bases: f64,
    #[serde(rename = "CS")]
    caught_stealing: f64,
}

#[derive(Debug, Deserialize)]
struct RawBatterSplit {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Team", default)]
    team: String,
    #[serde(rename = "PA")]
    plate_appearances: f64,
    #[serde(rename = "HR")]
    home_runs: f64,
    #[serde(rename = "K", alias = "SO")]
    strikeouts: f64,
    #[serde(rename = "wOBA")]
    woba: f64,
}

#[derive(Debug, Deserialize)]
struct RawBatterTotals {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Team", default)]
    team: String,
    #[serde(rename = "1B")]
    singles: f64,
    #[serde(rename = "2B")]
    doubles: f64,
    #[serde(rename = "3B")]
    triples: f64,
    #[serde(rename = "H")]
    hits: f64,
    #[serde(rename = "BB")]
    walks: f64,
    #[serde(rename = "BB%", deserialize_with = "de_percent")]
    walk_pct: f64,
    #[serde(rename = "HR")]
    home_runs: f64,
    #[serde(rename = "AB")]
    at_bats: f64,
    #[serde(rename = "PA")]
    plate_appearances: f64,
    #[serde(rename = "AVG")]
    batting_average: f64,
    #[serde(rename = "G")]
    games: f64,
    #[serde(rename = "SB")]
    stolen_bases: f64,
    #[serde(rename = "CS")]
    caught_stealing: f64,
}

#[derive(Debug, Deserialize)]
struct RawSevenDay {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Team", default)]
    team: String,
    #[serde(rename = "AB")]
    at_bats: f64,
    #[serde(rename = "H")]
    hits: f64,
    #[serde(rename = "1B")]
    singles: f64,
    #[serde(rename = "2B")]
    doubles: f64,
    #[serde(rename = "3B")]
    triples: f64,
    #[serde(rename = "HR")]
    home_runs: f64,
    #[serde(rename = "G")]
    games: f64,
    #[serde(rename = "PA")]
    plate_appearances: f64,
    #[serde(rename = "BB%", deserialize_with = "de_percent")]
    walk_pct: f64,
    #[serde(rename = "AVG")]
    batting_average: f64,
    #[serde(rename = "wOBA")]
    woba: f64,
}

#[derive(Debug, Deserialize)]
struct RawTeamRuns {
    #[serde(rename = "Team")]
    team: String,
    #[serde(rename = "R")]
    runs: f64,
}

#[derive(Debug, Deserialize)]
struct RawTeamSplit {
    #[serde(rename = "Team")]
    team: String,
    #[serde(rename = "SO", alias = "K")]
    strikeouts: f64,
    #[serde(rename = "PA")]
    plate_appearances: f64,
    #[serde(rename = "wOBA")]
    woba: f64,
}

#[derive(Debug, Deserialize)]
struct RawLeague {
    #[serde(rename = "BB")]
    walks: f64,
    #[serde(rename = "PA")]
    plate_appearances: f64,
    #[serde(rename = "HR")]
    home_runs: f64,
    #[serde(rename = "K%", deserialize_with = "de_percent")]
    strikeout_pct: f64,
    #[serde(rename = "wOBA")]
    woba: f64,
    #[serde(rename = "SB")]
    stolen_bases: f64,
    #[serde(rename = "CS")]
    caught_stealing: f64,
    #[serde(rename = "R")]
    runs: f64,
}

#[derive(Debug, Deserialize)]
struct RawPark {
    #[serde(rename = "Team")]
    team: String,
    #[serde(rename = "Overall")]
    overall: f64,
    #[serde(rename = "BA vs LHB")]
    ba_vs_left: f64,
    #[serde(rename = "BA vs RHB")]
    ba_vs_right: f64,
    #[serde(rename = "HR vs LHB")]
    hr_vs_left: f64,
    #[serde(rename = "HR vs RHB")]
    hr_vs_right: f64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn csv_reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr)
}

/// The player's season record for `year`, creating the player on first mention and
/// recording the season team when the row names a known franchise.
fn player_season<'a>(
    repo: &'a mut StatsRepository,
    name: &str,
    team: &str,
    year: u16,
) -> &'a mut PlayerSeason {
    let id = repo.ensure_player(&player_key(name));
    let season = repo.player_mut(id).season_mut(year);
    if season.team.is_none() {
        season.team = normalize_team(team).map(str::to_string);
    }
    season
}

fn team_code(raw: &str, file: &str) -> Option<&'static str> {
    let code = normalize_team(raw);
    if code.is_none() {
        warn!("skipping {} row: unknown team '{}'", file, raw);
    }
    code
}

// ---------------------------------------------------------------------------
// Reader-based loaders (private, enable testing without temp files)
// ---------------------------------------------------------------------------

fn load_batter_totals_from_reader<R: Read>(
    rdr: R,
    repo: &mut StatsRepository,
    year: u16,
) -> Result<usize, csv::Error> {
    let mut reader = csv_reader(rdr);
    let mut rows = 0;
    for result in reader.deserialize::<RawBatterTotals>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed batter totals row: {}", e);
                continue;
            }
        };
        let season = player_season(repo, &raw.name, &raw.team, year);
        if season.batting.is_some() {
            warn!("duplicate {} batting totals for '{}', keeping first", year, raw.name);
            continue;
        }
        season.batting = Some(BattingTotals {
            singles: raw.singles,
            doubles: raw.doubles,
            triples: raw.triples,
            hits: raw.hits,
            walks: raw.walks,
            walk_pct: raw.walk_pct,
            home_runs: raw.home_runs,
            at_bats: raw.at_bats,
            plate_appearances: raw.plate_appearances,
            batting_average: raw.batting_average,
            games: raw.games,
            stolen_bases: raw.stolen_bases,
            caught_stealing: raw.caught_stealing,
        });
        rows += 1;
    }
    Ok(rows)
}

fn load_pitcher_totals_from_reader<R: Read>(
    rdr: R,
    repo: &mut StatsRepository,
    year: u16,
) -> Result<usize, csv::Error> {
    let mut reader = csv_reader(rdr);
    let mut rows = 0;
    for result in reader.deserialize::<RawPitcherTotals>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed pitcher totals row: {}", e);
                continue;
            }
        };
        let season = player_season(repo, &raw.name, &raw.team, year);
        if season.pitching.is_some() {
            warn!("duplicate {} pitching totals for '{}', keeping first", year, raw.name);
            continue;
        }
        season.pitching = Some(PitchingTotals {
            games_started: raw.games_started,
            strikeouts: raw.strikeouts,
            innings_pitched: raw.innings_pitched,
            games: raw.games,
        });
        rows += 1;
    }
    Ok(rows)
}

fn load_xfip_from_reader<R: Read>(
    rdr: R,
    repo: &mut StatsRepository,
    year: u16,
    venue: Venue,
) -> Result<usize, csv::Error> {
    let mut reader = csv_reader(rdr);
    let mut rows = 0;
    for result in reader.deserialize::<RawXfip>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed {} xFIP row: {}", venue.label(), e);
                continue;
            }
        };
        let slot = player_season(repo, &raw.name, &raw.team, year).xfip_slot(venue);
        if slot.is_some() {
            warn!("duplicate {} {} xFIP for '{}', keeping first", year, venue.label(), raw.name);
            continue;
        }
        *slot = Some(raw.xfip);
        rows += 1;
    }
    Ok(rows)
}

fn load_pitcher_split_from_reader<R: Read>(
    rdr: R,
    repo: &mut StatsRepository,
    year: u16,
    batter_hand: Hand,
) -> Result<usize, csv::Error> {
    let mut reader = csv_reader(rdr);
    let mut rows = 0;
    for result in reader.deserialize::<RawPitcherSplit>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed pitcher split row: {}", e);
                continue;
            }
        };
        let slot = player_season(repo, &raw.name, &raw.team, year)
            .pitcher_vs
            .slot(batter_hand);
        if slot.is_some() {
            warn!(
                "duplicate {} pitcher split vs {} for '{}', keeping first",
                year, batter_hand, raw.name
            );
            continue;
        }
        *slot = Some(PitcherSplit {
            home_runs: raw.home_runs,
            walks: raw.walks,
            batters_faced: raw.batters_faced,
            woba: raw.woba,
        });
        rows += 1;
    }
    Ok(rows)
}

fn load_catchers_from_reader<R: Read>(
    rdr: R,
    repo: &mut StatsRepository,
    year: u16,
) -> Result<usize, csv::Error> {
    let mut reader = csv_reader(rdr);
    let mut rows = 0;
    for result in reader.deserialize::<RawCatcher>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed catcher row: {}", e);
                continue;
            }
        };
        let line = CatcherFielding {
            stolen_bases: raw.stolen_bases,
            caught_stealing: raw.caught_stealing,
        };
        let season = player_season(repo, &raw.name, &raw.team, year);
        if season.catching.is_some() {
            warn!("duplicate {} catcher line for '{}', keeping first", year, raw.name);
            continue;
        }
        season.catching = Some(line);
        // Traded catchers ("- - -") still count on their own line but not toward a team.
        if let Some(code) = normalize_team(&raw.team) {
            repo.add_team_fielding(code, year, line);
        }
        rows += 1;
    }
    Ok(rows)
}

fn load_batter_split_from_reader<R: Read>(
    rdr: R,
    repo: &mut StatsRepository,
    year: u16,
    pitcher_hand: Hand,
) -> Result<usize, csv::Error> {
    let mut reader = csv_reader(rdr);
    let mut rows = 0;
    for result in reader.deserialize::<RawBatterSplit>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed batter split row: {}", e);
                continue;
            }
        };
        let slot = player_season(repo, &raw.name, &raw.team, year)
            .batter_vs
            .slot(pitcher_hand);
        if slot.is_some() {
            warn!(
                "duplicate {} batter split vs {} for '{}', keeping first",
                year, pitcher_hand, raw.name
            );
            continue;
        }
        *slot = Some(BatterSplit {
            plate_appearances: raw.plate_appearances,
            home_runs: raw.home_runs,
            strikeouts: raw.strikeouts,
            woba: raw.woba,
        });
        rows += 1;
    }
    Ok(rows)
}

fn load_seven_day_from_reader<R: Read>(
    rdr: R,
    repo: &mut StatsRepository,
) -> Result<usize, csv::Error> {
    let mut reader = csv_reader(rdr);
    let mut rows = 0;
    for result in reader.deserialize::<RawSevenDay>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed 7-day row: {}", e);
                continue;
            }
        };
        let id = repo.ensure_player(&player_key(&raw.name));
        let player = repo.player_mut(id);
        if player.seven_day().is_some() {
            warn!("duplicate 7-day line for '{}' ({}), keeping first", raw.name, raw.team);
            continue;
        }
        player.set_seven_day(RollingBatting {
            at_bats: raw.at_bats,
            hits: raw.hits,
            singles: raw.singles,
            doubles: raw.doubles,
            triples: raw.triples,
            home_runs: raw.home_runs,
            games: raw.games,
            plate_appearances: raw.plate_appearances,
            walk_pct: raw.walk_pct,
            batting_average: raw.batting_average,
            woba: raw.woba,
        });
        rows += 1;
    }
    Ok(rows)
}

fn load_team_runs_from_reader<R: Read>(
    rdr: R,
    repo: &mut StatsRepository,
    year: u16,
) -> Result<usize, csv::Error> {
    let mut reader = csv_reader(rdr);
    let mut rows = 0;
    for result in reader.deserialize::<RawTeamRuns>() {
        match result {
            Ok(raw) => {
                let Some(code) = team_code(&raw.team, "team runs") else {
                    continue;
                };
                repo.set_team_stat(code, year, TeamStat::Runs, raw.runs);
                rows += 1;
            }
            Err(e) => {
                warn!("skipping malformed team runs row: {}", e);
            }
        }
    }
    Ok(rows)
}

fn load_team_split_from_reader<R: Read>(
    rdr: R,
    repo: &mut StatsRepository,
    year: u16,
    pitcher_hand: Hand,
) -> Result<usize, csv::Error> {
    let mut reader = csv_reader(rdr);
    let mut rows = 0;
    for result in reader.deserialize::<RawTeamSplit>() {
        match result {
            Ok(raw) => {
                let Some(code) = team_code(&raw.team, "team split") else {
                    continue;
                };
                let stats = [
                    (TeamSplitStat::Strikeouts, raw.strikeouts),
                    (TeamSplitStat::PlateAppearances, raw.plate_appearances),
                    (TeamSplitStat::Woba, raw.woba),
                ];
                for (stat, value) in stats {
                    repo.set_team_stat(code, year, TeamStat::VsHand(pitcher_hand, stat), value);
                }
                rows += 1;
            }
            Err(e) => {
                warn!("skipping malformed team split row: {}", e);
            }
        }
    }
    Ok(rows)
}

fn load_league_from_reader<R: Read>(
    rdr: R,
    repo: &mut StatsRepository,
    year: u16,
) -> Result<usize, csv::Error> {
    let mut reader = csv_reader(rdr);
    let mut rows = 0;
    for result in reader.deserialize::<RawLeague>() {
        match result {
            Ok(raw) => {
                if rows > 0 {
                    warn!("extra row in {} league stats ignored", year);
                    continue;
                }
                repo.set_league(
                    year,
                    LeagueTotals {
                        walks: raw.walks,
                        plate_appearances: raw.plate_appearances,
                        home_runs: raw.home_runs,
                        strikeout_pct: raw.strikeout_pct,
                        woba: raw.woba,
                        stolen_bases: raw.stolen_bases,
                        caught_stealing: raw.caught_stealing,
                        runs: raw.runs,
                    },
                );
                rows += 1;
            }
            Err(e) => {
                warn!("skipping malformed league row: {}", e);
            }
        }
    }
    Ok(rows)
}

fn load_parks_from_reader<R: Read>(rdr: R, repo: &mut StatsRepository) -> Result<usize, csv::Error> {
    let mut reader = csv_reader(rdr);
    let mut rows = 0;
    for result in reader.deserialize::<RawPark>() {
        match result {
            Ok(raw) => {
                let Some(code) = team_code(&raw.team, "park factor") else {
                    continue;
                };
                repo.set_park(
                    code,
                    ParkFactors {
                        overall: raw.overall,
                        ba_vs_left: raw.ba_vs_left,
                        ba_vs_right: raw.ba_vs_right,
                        hr_vs_left: raw.hr_vs_left,
                        hr_vs_right: raw.hr_vs_right,
                    },
                );
                rows += 1;
            }
            Err(e) => {
                warn!("skipping malformed park factor row: {}", e);
            }
        }
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Public path-based loading
// ---------------------------------------------------------------------------

/// Open `path` and feed it to a reader-based loader, mapping failures to `IngestError`.
fn ingest_file<F>(path: &Path, load: F) -> Result<usize, IngestError>
where
    F: FnOnce(std::fs::File) -> Result<usize, csv::Error>,
{
    let file = std::fs::File::open(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let rows = load(file).map_err(|e| IngestError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    debug!("ingested {} rows from {}", rows, path.display());
    Ok(rows)
}

/// Ingest one year of season files.
pub fn load_year(
    repo: &mut StatsRepository,
    dir: &Path,
    year: u16,
) -> Result<usize, IngestError> {
    let mut rows = 0;
    rows += ingest_file(&batter_totals_path(dir, year), |f| {
        load_batter_totals_from_reader(f, repo, year)
    })?;
    rows += ingest_file(&pitcher_totals_path(dir, year), |f| {
        load_pitcher_totals_from_reader(f, repo, year)
    })?;
    for venue in [Venue::Home, Venue::Away] {
        rows += ingest_file(&pitcher_xfip_path(dir, year, venue), |f| {
            load_xfip_from_reader(f, repo, year, venue)
        })?;
    }
    for hand in [Hand::Right, Hand::Left] {
        rows += ingest_file(&pitcher_split_path(dir, year, hand), |f| {
            load_pitcher_split_from_reader(f, repo, year, hand)
        })?;
    }
    rows += ingest_file(&catcher_path(dir, year), |f| {
        load_catchers_from_reader(f, repo, year)
    })?;
    for hand in [Hand::Right, Hand::Left] {
        rows += ingest_file(&batter_split_path(dir, year, hand), |f| {
            load_batter_split_from_reader(f, repo, year, hand)
        })?;
    }
    rows += ingest_file(&team_runs_path(dir, year), |f| {
        load_team_runs_from_reader(f, repo, year)
    })?;
    for hand in [Hand::Right, Hand::Left] {
        rows += ingest_file(&team_split_path(dir, year, hand), |f| {
            load_team_split_from_reader(f, repo, year, hand)
        })?;
    }
    let league_rows = ingest_file(&league_path(dir, year), |f| {
        load_league_from_reader(f, repo, year)
    })?;
    if league_rows == 0 {
        return Err(IngestError::Validation(format!(
            "league stats for {year} have no valid rows"
        )));
    }
    Ok(rows + league_rows)
}

/// Build the repository from the prior and current season files, the current 7-day
/// window and the park factors.
pub fn load_all(stats_dir: &Path, season: u16) -> Result<StatsRepository, IngestError> {
    let mut repo = StatsRepository::new();
    let prior = season.checked_sub(1).ok_or_else(|| {
        IngestError::Validation(format!("season {season} has no prior year"))
    })?;

    let mut rows = 0;
    for year in [prior, season] {
        rows += load_year(&mut repo, stats_dir, year)?;
    }
    rows += ingest_file(&seven_day_path(stats_dir, season), |f| {
        load_seven_day_from_reader(f, &mut repo)
    })?;
    rows += ingest_file(&park_factors_path(stats_dir), |f| {
        load_parks_from_reader(f, &mut repo)
    })?;

    if repo.player_count() == 0 {
        return Err(IngestError::Validation(
            "stat files produced zero players".into(),
        ));
    }

    let filled = repo.fill_missing_totals(season);
    info!(
        "ingested {} rows: {} players, {} teams, {} parks ({} zero-filled {} totals)",
        rows,
        repo.player_count(),
        repo.teams().count(),
        repo.park_count(),
        filled,
        season
    );
    Ok(repo)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::repository::PlayerStat;
    use crate::stats::types::{BattingStat, PitcherSplitStat};

    #[test]
    fn aliases_reconcile_feed_spellings() {
        assert_eq!(player_key("Tom Milone"), "tommy milone");
        assert_eq!(player_key(" Michael  Bolsinger "), "mike bolsinger");
        assert_eq!(player_key("Mike Trout"), "mike trout");
    }

    #[test]
    fn file_paths_follow_layout() {
        let dir = Path::new("stats");
        assert_eq!(
            pitcher_split_path(dir, 2014, Hand::Left),
            Path::new("stats/Pitcher/2014/2014 Pitcher Stats vs LHB.csv")
        );
        assert_eq!(
            batter_split_path(dir, 2013, Hand::Switch),
            Path::new("stats/Batter/2013/2013 Batter Stats vs RHP.csv")
        );
        assert_eq!(
            pitcher_xfip_path(dir, 2014, Venue::Away),
            Path::new("stats/Pitcher/2014/2014 Away Pitcher Stats.csv")
        );
        assert_eq!(
            seven_day_path(dir, 2014),
            Path::new("stats/Batter/2014/7_day Batter Total Stats.csv")
        );
    }

    #[test]
    fn batter_totals_parse_percent_and_team() {
        let csv_data = "\
Name,Team,1B,2B,3B,H,BB,BB%,HR,AB,PA,AVG,G,SB,CS
Mike Trout,Angels,89,39,9,173,83,11.8 %,36,602,705,.287,157,16,2
Nelson Cruz,- - -,90,32,1,166,55,8.5%,40,613,678,.271,159,4,1";
        let mut repo = StatsRepository::new();
        let rows = load_batter_totals_from_reader(csv_data.as_bytes(), &mut repo, 2014).unwrap();
        assert_eq!(rows, 2);

        let trout = repo.player_by_name("mike trout").unwrap();
        let totals = trout.batting(2014);
        assert_eq!(totals.home_runs, 36.0);
        assert!((totals.walk_pct - 0.118).abs() < 1e-12);
        assert_eq!(trout.season_team(2014), Some("LAA"));

        let cruz = repo.player_by_name("nelson cruz").unwrap();
        assert!((cruz.batting(2014).walk_pct - 0.085).abs() < 1e-12);
        assert_eq!(cruz.season_team(2014), None);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let csv_data = "\
Name,Team,GS,K,IP,G
Felix Hernandez,Mariners,34,248,236,34
Broken Row,Mariners,abc,1,1,1
Chris Sale,White Sox,26,208,174,26";
        let mut repo = StatsRepository::new();
        let rows = load_pitcher_totals_from_reader(csv_data.as_bytes(), &mut repo, 2014).unwrap();
        assert_eq!(rows, 2);
        assert!(repo.player_id("broken row").is_none());
        assert_eq!(
            repo.player_by_name("chris sale").unwrap().pitching(2014).innings_pitched,
            174.0
        );
    }

    #[test]
    fn duplicate_split_rows_keep_first() {
        let csv_data = "\
Name,Team,HR,BB,TBF,wOBA
Cliff Lee,Phillies,5,10,300,.290
Cliff Lee,Phillies,9,20,400,.350";
        let mut repo = StatsRepository::new();
        let rows =
            load_pitcher_split_from_reader(csv_data.as_bytes(), &mut repo, 2014, Hand::Left)
                .unwrap();
        assert_eq!(rows, 1);
        let woba = repo.player_stat(
            "cliff lee",
            2014,
            PlayerStat::PitcherVs(Hand::Left, PitcherSplitStat::Woba),
        );
        assert_eq!(woba, Ok(0.290));
    }

    #[test]
    fn xfip_fills_requested_venue_only() {
        let csv_data = "Name,Team,xFIP\nJon Lester,Athletics,3.10\n";
        let mut repo = StatsRepository::new();
        load_xfip_from_reader(csv_data.as_bytes(), &mut repo, 2014, Venue::Home).unwrap();
        let season = repo.player_by_name("jon lester").unwrap().season(2014).unwrap();
        assert_eq!(season.xfip(Venue::Home), Some(3.10));
        assert_eq!(season.xfip(Venue::Away), None);
    }

    #[test]
    fn catcher_lines_sum_into_team_fielding() {
        let csv_data = "\
Name,Team,SB,CS
Salvador Perez,Royals,40,20
Erik Kratz,Royals,5,3
Traded Guy,- - -,7,1";
        let mut repo = StatsRepository::new();
        let rows = load_catchers_from_reader(csv_data.as_bytes(), &mut repo, 2014).unwrap();
        assert_eq!(rows, 3);
        assert_eq!(repo.team_stat("KAN", 2014, TeamStat::StolenBasesAllowed), Ok(45.0));
        assert_eq!(repo.team_stat("KAN", 2014, TeamStat::CaughtStealing), Ok(23.0));
        assert_eq!(
            repo.player_stat("traded guy", 2014, PlayerStat::CatcherStolenBases),
            Ok(7.0)
        );
    }

    #[test]
    fn team_files_normalize_mascots_and_skip_unknown() {
        let runs = "Team,R\nRed Sox,634\nExpos,500\n";
        let splits = "Team,SO,PA,wOBA\nRed Sox,300,1500,.300\n";
        let mut repo = StatsRepository::new();
        assert_eq!(load_team_runs_from_reader(runs.as_bytes(), &mut repo, 2014).unwrap(), 1);
        load_team_split_from_reader(splits.as_bytes(), &mut repo, 2014, Hand::Left).unwrap();
        assert_eq!(repo.team_stat("BOS", 2014, TeamStat::Runs), Ok(634.0));
        assert_eq!(
            repo.team_stat(
                "BOS",
                2014,
                TeamStat::VsHand(Hand::Left, TeamSplitStat::PlateAppearances)
            ),
            Ok(1500.0)
        );
    }

    #[test]
    fn league_row_reads_strikeout_percent() {
        let csv_data = "BB,PA,HR,K%,wOBA,SB,CS,R\n14000,184000,4200,20.4 %,.310,2760,1000,19700\n";
        let mut repo = StatsRepository::new();
        load_league_from_reader(csv_data.as_bytes(), &mut repo, 2014).unwrap();
        let league = repo.league(2014).unwrap();
        assert!((league.strikeout_pct - 0.204).abs() < 1e-12);
        assert_eq!(league.runs, 19700.0);
    }

    #[test]
    fn park_rows_keyed_by_team_code() {
        let csv_data = "\
Team,Overall,BA vs LHB,BA vs RHB,HR vs LHB,HR vs RHB
Rockies,1.15,1.10,1.12,1.20,1.18";
        let mut repo = StatsRepository::new();
        load_parks_from_reader(csv_data.as_bytes(), &mut repo).unwrap();
        assert_eq!(repo.park("COL").hr_vs_left, 1.20);
        assert_eq!(repo.park("SEA"), ParkFactors::default());
    }

    #[test]
    fn seven_day_uses_aliases() {
        let csv_data = "\
Name,Team,AB,H,1B,2B,3B,HR,G,PA,BB%,AVG,wOBA
Tom Milone,Twins,3,1,1,0,0,0,1,3,0.0 %,.333,.300";
        let mut repo = StatsRepository::new();
        load_seven_day_from_reader(csv_data.as_bytes(), &mut repo).unwrap();
        let window = repo.player_by_name("tommy milone").unwrap().seven_day().copied();
        assert_eq!(window.map(|w| w.hits), Some(1.0));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = std::env::temp_dir().join("dugout_ingest_missing");
        let _ = std::fs::remove_dir_all(&dir);
        let err = load_all(&dir, 2014).unwrap_err();
        match &err {
            IngestError::Io { path, .. } => assert!(path.contains("Total Batter Stats")),
            other => panic!("expected Io error, got: {other:?}"),
        }
    }

    #[test]
    fn totals_read_back_through_generic_accessor() {
        let csv_data = "\
Name,Team,1B,2B,3B,H,BB,BB%,HR,AB,PA,AVG,G,SB,CS
Jose Altuve,Astros,184,47,3,225,36,5.3,7,660,707,.341,158,56,9";
        let mut repo = StatsRepository::new();
        load_batter_totals_from_reader(csv_data.as_bytes(), &mut repo, 2014).unwrap();
        assert_eq!(
            repo.player_stat("jose altuve", 2014, PlayerStat::Batting(BattingStat::StolenBases)),
            Ok(56.0)
        );
    }
}
