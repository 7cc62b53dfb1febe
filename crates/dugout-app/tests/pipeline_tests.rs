// Integration tests for the dugout pipeline.
//
// These run the full batch over the fixture stat tree (2013 + 2014 seasons) and a
// saved lineup page with two games: LAA @ SEA with both lineups posted, and
// BAL @ PHI with the home lineup still pending.

use std::fs;
use std::path::{Path, PathBuf};

use dugout_app::config::{Config, ContestConfig, DataConfig, LoggingConfig};
use dugout_app::pipeline::{self, OutputDocument};
use dugout_app::source::LineupSource;
use dugout_core::lineup::ApplyReport;
use dugout_core::optimizer::{RosterRequirements, DEFAULT_SALARY_CAP};
use dugout_core::stats::types::{FieldingPosition, Hand, Venue};
use dugout_core::{ScoreBreakdown, StatsError};

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory path (relative to the crate root, which is the cwd for
/// `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn fixtures() -> PathBuf {
    Path::new(FIXTURES).to_path_buf()
}

fn test_config(output: PathBuf) -> Config {
    Config {
        season: 2014,
        data: DataConfig {
            stats_dir: fixtures().join("stats"),
            output,
        },
        lineups: LineupSource::File(fixtures().join("lineups.html")),
        contest: ContestConfig {
            salary_cap: DEFAULT_SALARY_CAP,
            roster: RosterRequirements::default(),
        },
        logging: LoggingConfig::default(),
    }
}

fn lineup_html() -> String {
    fs::read_to_string(fixtures().join("lineups.html")).unwrap()
}

fn slate() -> pipeline::Slate {
    let config = test_config(PathBuf::from("unused.json"));
    pipeline::load_slate(&config, &lineup_html()).unwrap()
}

// ===========================================================================
// Phases 1-3: ingestion and lineup application
// ===========================================================================

#[test]
fn lineups_apply_both_games() {
    let slate = slate();
    assert_eq!(
        slate.report,
        ApplyReport {
            games: 2,
            games_skipped: 0,
            batters: 7,
            pitchers: 4,
            players_skipped: 1,
        }
    );
}

#[test]
fn matchups_are_symmetric() {
    let repo = slate().repo;
    assert_eq!(repo.opponent("LAA"), Ok("SEA"));
    assert_eq!(repo.opponent("SEA"), Ok("LAA"));
    assert_eq!(repo.venue("LAA"), Ok(Venue::Away));
    assert_eq!(repo.venue("SEA"), Ok(Venue::Home));
    assert_eq!(repo.opponent("PHI"), Ok("BAL"));
    assert_eq!(repo.venue("PHI"), Ok(Venue::Home));
}

#[test]
fn batters_carry_todays_attributes() {
    let repo = slate().repo;
    let trout = repo.player_by_name("mike trout").unwrap();
    assert!(trout.is_active());
    assert_eq!(trout.daily.salary, Some(4_500));
    assert_eq!(trout.daily.batting_order, Some(2));
    assert_eq!(trout.daily.position, Some(FieldingPosition::Outfield));
    assert_eq!(trout.daily.bats, Some(Hand::Right));
    assert_eq!(trout.team(2014), Some("LAA"));

    let zunino = repo.player_by_name("mike zunino").unwrap();
    assert_eq!(zunino.daily.position, Some(FieldingPosition::Catcher));
}

#[test]
fn starters_are_recorded_per_team() {
    let repo = slate().repo;
    let felix = repo.player_id("felix hernandez").unwrap();
    assert_eq!(repo.starting_pitcher("SEA"), Some(felix));

    let lee = repo.player_by_name("cliff lee").unwrap();
    assert_eq!(lee.throws(), Hand::Left);
    assert_eq!(lee.daily.salary, Some(9_000));
    assert_eq!(lee.daily.position, Some(FieldingPosition::Pitcher));
}

#[test]
fn players_missing_from_the_feed_stay_inactive() {
    let repo = slate().repo;

    let jones = repo.player_by_name("adam jones").unwrap();
    assert!(!jones.is_active());
    assert_eq!(jones.daily.salary, None);
    assert_eq!(jones.daily.position, None);

    // PHI's lineup is still pending, so Revere never appears in the feed.
    let revere = repo.player_by_name("ben revere").unwrap();
    assert!(!revere.is_active());
}

#[test]
fn unresolved_feed_names_are_not_created() {
    let repo = slate().repo;
    assert!(matches!(
        repo.player_by_name("ghost player"),
        Err(StatsError::MissingKey { .. })
    ));
}

#[test]
fn prior_season_only_player_resolves_with_zero_totals() {
    let repo = slate().repo;
    let hamilton = repo.player_by_name("josh hamilton").unwrap();
    assert!(hamilton.is_active());
    assert_eq!(hamilton.batting(2014).at_bats, 0.0);
    assert_eq!(hamilton.batting(2013).at_bats, 576.0);
}

#[test]
fn seven_day_window_and_parks_are_loaded() {
    let repo = slate().repo;
    let cano = repo.player_by_name("robinson cano").unwrap();
    assert_eq!(cano.seven_day().map(|r| r.at_bats), Some(27.0));
    assert_eq!(repo.park_count(), 4);
    assert!((repo.park("BAL").overall - 1.03).abs() < 1e-9);
}

// ===========================================================================
// Phase 4: projection and the optimizer input
// ===========================================================================

#[test]
fn every_active_player_is_projected_and_sorted() {
    let slate = slate();
    let config = test_config(PathBuf::from("unused.json"));
    let input = pipeline::optimizer_input(&config, &slate.repo);

    assert_eq!(input.candidates.len(), slate.repo.active_players().len());
    assert_eq!(input.candidates.len(), 11);
    assert!(input
        .candidates
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
    assert_eq!(input.candidates[0].name, "felix hernandez");
    assert_eq!(input.salary_cap, DEFAULT_SALARY_CAP);
}

#[test]
fn zero_at_bat_batter_scores_nothing() {
    let slate = slate();
    let config = test_config(PathBuf::from("unused.json"));
    let input = pipeline::optimizer_input(&config, &slate.repo);

    let hamilton = input
        .candidates
        .iter()
        .find(|c| c.name == "josh hamilton")
        .unwrap();
    assert!(hamilton.score.abs() < 1e-12);
    match hamilton.breakdown {
        ScoreBreakdown::Batter {
            hits,
            home_runs,
            walks,
            ..
        } => {
            assert_eq!(hits, 0.0);
            assert_eq!(home_runs, 0.0);
            assert_eq!(walks, 0.0);
        }
        other => panic!("expected batter breakdown, got {other:?}"),
    }
}

#[test]
fn pitcher_breakdown_charges_earned_runs() {
    let slate = slate();
    let config = test_config(PathBuf::from("unused.json"));
    let input = pipeline::optimizer_input(&config, &slate.repo);

    let felix = &input.candidates[0];
    assert_eq!(felix.position, FieldingPosition::Pitcher);
    assert_eq!(felix.salary, 10_500);
    assert_eq!(felix.team.as_deref(), Some("SEA"));
    match felix.breakdown {
        ScoreBreakdown::Pitcher {
            expected_ip,
            earned_runs,
            strikeouts,
            win,
        } => {
            assert!((expected_ip - 236.0 / 34.0).abs() < 1e-9);
            assert!(earned_runs < 0.0);
            assert!(strikeouts > 0.0);
            assert_eq!(win, 2.0);
        }
        other => panic!("expected pitcher breakdown, got {other:?}"),
    }
}

// ===========================================================================
// Full run
// ===========================================================================

#[tokio::test]
async fn run_writes_optimizer_document() {
    let tmp = std::env::temp_dir().join("dugout_pipeline_test_run");
    let _ = fs::remove_dir_all(&tmp);
    let output = tmp.join("out/candidates.json");

    let config = test_config(output.clone());
    let summary = pipeline::run(&config).await.unwrap();

    assert_eq!(summary.season, 2014);
    assert_eq!(summary.candidates, 11);
    assert_eq!(summary.active, 11);
    assert_eq!(summary.report.players_skipped, 1);
    assert!(summary.to_string().contains("projected 11 of 11 active players"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert!(json["generated_at"].is_string());
    assert_eq!(json["season"], 2014);
    assert_eq!(json["salary_cap"], 35_000);
    assert_eq!(json["roster"]["OF"], 3);
    let candidates = json["candidates"].as_array().unwrap();
    assert_eq!(candidates.len(), 11);
    assert_eq!(candidates[0]["name"], "felix hernandez");
    assert_eq!(candidates[0]["position"], "P");
    assert_eq!(candidates[0]["breakdown"]["kind"], "pitcher");

    let _ = fs::remove_dir_all(&tmp);
}

#[tokio::test]
async fn run_fails_when_stat_tree_is_missing() {
    let tmp = std::env::temp_dir().join("dugout_pipeline_test_missing_stats");
    let _ = fs::remove_dir_all(&tmp);

    let mut config = test_config(tmp.join("candidates.json"));
    config.data.stats_dir = tmp.join("no-such-dir");

    let err = pipeline::run(&config).await.unwrap_err();
    assert!(err.to_string().contains("failed to load stat files"));
    assert!(!tmp.join("candidates.json").exists());
}

#[test]
fn output_document_flattens_input() {
    let slate = slate();
    let config = test_config(PathBuf::from("unused.json"));
    let doc = OutputDocument {
        generated_at: chrono::Utc::now(),
        input: pipeline::optimizer_input(&config, &slate.repo),
    };

    let tmp = std::env::temp_dir().join("dugout_pipeline_test_write");
    let _ = fs::remove_dir_all(&tmp);
    let path = tmp.join("nested/dir/out.json");
    pipeline::write_output(&path, &doc).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(json.get("input").is_none());
    assert!(json["candidates"].is_array());

    let _ = fs::remove_dir_all(&tmp);
}
