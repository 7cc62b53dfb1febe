// Projection engine: expected fantasy points per category and per player.
//
// Every formula is `factor × expected opportunity × matchup multiplier`, where the
// multiplier is a weighted average of ratios centered at 1.0. The engine borrows the
// repository read-only; all writes happen before projection starts.

mod batter;
mod pitcher;
pub mod tables;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Result, StatsError};
use crate::stats::repository::{PlayerId, StatsRepository};
use crate::stats::types::{FieldingPosition, LeagueTotals};

/// Per-category expected points for one player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreBreakdown {
    Pitcher {
        expected_ip: f64,
        earned_runs: f64,
        strikeouts: f64,
        win: f64,
    },
    Batter {
        runs: f64,
        hits: f64,
        rbi: f64,
        home_runs: f64,
        stolen_bases: f64,
        walks: f64,
    },
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        match *self {
            ScoreBreakdown::Pitcher {
                expected_ip,
                earned_runs,
                strikeouts,
                win,
            } => expected_ip + earned_runs + strikeouts + win,
            ScoreBreakdown::Batter {
                runs,
                hits,
                rbi,
                home_runs,
                stolen_bases,
                walks,
            } => runs + hits + rbi + home_runs + stolen_bases + walks,
        }
    }
}

/// A scored active player, ready to hand to the lineup optimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProjection {
    pub id: PlayerId,
    pub name: String,
    pub position: FieldingPosition,
    pub team: Option<String>,
    pub salary: u32,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Read-only scoring context for one season.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionEngine<'a> {
    repo: &'a StatsRepository,
    season: u16,
}

impl<'a> ProjectionEngine<'a> {
    pub fn new(repo: &'a StatsRepository, season: u16) -> Self {
        ProjectionEngine { repo, season }
    }

    pub fn season(&self) -> u16 {
        self.season
    }

    fn league(&self) -> Result<&'a LeagueTotals> {
        self.repo.league(self.season)
    }

    fn position_of(&self, id: PlayerId) -> Result<FieldingPosition> {
        let player = self.repo.player(id);
        player
            .daily
            .position
            .ok_or_else(|| StatsError::missing(player.name(), "position"))
    }

    /// Category components of a player's score, by today's fielding position.
    pub fn score_breakdown(&self, id: PlayerId) -> Result<ScoreBreakdown> {
        if self.position_of(id)?.is_pitcher() {
            Ok(ScoreBreakdown::Pitcher {
                expected_ip: self.pitcher_expected_ip(id),
                earned_runs: self.pitcher_points_expected_for_er(id)?,
                strikeouts: self.pitcher_points_expected_for_k(id)?,
                win: self.pitcher_points_expected_for_win(id),
            })
        } else {
            Ok(ScoreBreakdown::Batter {
                runs: self.batter_points_expected_for_runs(id)?,
                hits: self.batter_points_expected_for_hits(id)?,
                rbi: self.batter_points_expected_for_rbi(id)?,
                home_runs: self.batter_points_expected_for_hr(id)?,
                stolen_bases: self.batter_points_expected_for_sb(id)?,
                walks: self.batter_points_expected_for_walks(id)?,
            })
        }
    }

    /// Expected fantasy points for today.
    pub fn get_score(&self, id: PlayerId) -> Result<f64> {
        self.score_breakdown(id).map(|b| b.total())
    }

    /// Score every active player in repository order. Players whose score cannot be
    /// computed are logged and left out.
    pub fn project_active(&self) -> Vec<PlayerProjection> {
        let active = self.repo.active_players();
        let mut projections = Vec::with_capacity(active.len());
        for &id in &active {
            let player = self.repo.player(id);
            let scored = self
                .position_of(id)
                .and_then(|position| self.score_breakdown(id).map(|b| (position, b)));
            match scored {
                Ok((position, breakdown)) => projections.push(PlayerProjection {
                    id,
                    name: player.name().to_string(),
                    position,
                    team: player.team(self.season).map(str::to_string),
                    salary: player.daily.salary.unwrap_or(0),
                    score: breakdown.total(),
                    breakdown,
                }),
                Err(e) => warn!("couldn't score '{}': {}", player.name(), e),
            }
        }
        info!(
            "projected {} of {} active players",
            projections.len(),
            active.len()
        );
        projections
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
