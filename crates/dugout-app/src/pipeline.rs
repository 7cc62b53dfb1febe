// Batch pipeline: ingest stat files, apply today's lineups, project every active
// player and write the optimizer input document.
//
// The repository is only mutated before projection starts; `ProjectionEngine`
// borrows it read-only afterwards.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use dugout_core::ingest;
use dugout_core::lineup::{apply_all, parse_lineup_page, ApplyReport};
use dugout_core::optimizer::OptimizerInput;
use dugout_core::{ProjectionEngine, StatsRepository};

use crate::config::Config;

/// Repository state after phases 1-3, ready for projection.
#[derive(Debug)]
pub struct Slate {
    pub repo: StatsRepository,
    pub report: ApplyReport,
}

/// The JSON document handed to the lineup optimizer.
#[derive(Debug, Serialize)]
pub struct OutputDocument {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub input: OptimizerInput,
}

/// Counts printed at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub season: u16,
    pub players: usize,
    pub report: ApplyReport,
    pub active: usize,
    pub candidates: usize,
    pub output: PathBuf,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.report;
        writeln!(f, "season {}: {} players loaded", self.season, self.players)?;
        writeln!(
            f,
            "lineups: {} games applied, {} skipped; {} batters, {} pitchers, {} players unresolved",
            r.games, r.games_skipped, r.batters, r.pitchers, r.players_skipped
        )?;
        write!(
            f,
            "projected {} of {} active players -> {}",
            self.candidates,
            self.active,
            self.output.display()
        )
    }
}

/// Phases 1-3: build the repository from the stat tree and apply the lineup page.
pub fn load_slate(config: &Config, html: &str) -> anyhow::Result<Slate> {
    let mut repo = ingest::load_all(&config.data.stats_dir, config.season).with_context(|| {
        format!(
            "failed to load stat files from {}",
            config.data.stats_dir.display()
        )
    })?;

    let games = parse_lineup_page(html).context("failed to parse lineup page")?;
    let report = apply_all(&mut repo, &games, config.season, config.contest.salary_cap);
    info!(
        "applied {} of {} games ({} batters, {} pitchers, {} players skipped)",
        report.games,
        games.len(),
        report.batters,
        report.pitchers,
        report.players_skipped
    );

    Ok(Slate { repo, report })
}

/// Phase 4: score every active player and assemble the optimizer input.
pub fn optimizer_input(config: &Config, repo: &StatsRepository) -> OptimizerInput {
    let projections = ProjectionEngine::new(repo, config.season).project_active();
    OptimizerInput::new(
        config.season,
        config.contest.salary_cap,
        config.contest.roster.clone(),
        projections,
    )
}

/// Write `doc` as pretty JSON, creating parent directories as needed.
pub fn write_output(path: &Path, doc: &OutputDocument) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(doc).context("failed to serialize optimizer input")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    info!(
        "wrote {} candidates to {}",
        doc.input.candidates.len(),
        path.display()
    );
    Ok(())
}

/// Run every phase against the configured sources and write the output document.
pub async fn run(config: &Config) -> anyhow::Result<RunSummary> {
    let http = reqwest::Client::new();
    let html = config
        .lineups
        .fetch(&http)
        .await
        .with_context(|| format!("failed to load lineups from {}", config.lineups))?;

    let slate = load_slate(config, &html)?;
    let input = optimizer_input(config, &slate.repo);

    let summary = RunSummary {
        season: config.season,
        players: slate.repo.player_count(),
        report: slate.report,
        active: slate.repo.active_players().len(),
        candidates: input.candidates.len(),
        output: config.data.output.clone(),
    };

    let doc = OutputDocument {
        generated_at: Utc::now(),
        input,
    };
    write_output(&config.data.output, &doc)?;

    Ok(summary)
}
