// Input document for the downstream lineup optimizer.
//
// The optimizer itself lives outside this workspace; it consumes scored candidates plus
// a salary cap and a per-position roster quota.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::projection::{PlayerProjection, ScoreBreakdown};
use crate::stats::types::FieldingPosition;

/// Contest salary cap used when none is configured.
pub const DEFAULT_SALARY_CAP: u32 = 35_000;

/// Roster slots per position class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RosterRequirements {
    pub slots: BTreeMap<FieldingPosition, u32>,
}

impl Default for RosterRequirements {
    /// One of each infield position and pitcher, three outfielders.
    fn default() -> Self {
        let slots = FieldingPosition::ALL
            .into_iter()
            .map(|pos| {
                let count = if pos == FieldingPosition::Outfield { 3 } else { 1 };
                (pos, count)
            })
            .collect();
        RosterRequirements { slots }
    }
}

impl RosterRequirements {
    pub fn total(&self) -> u32 {
        self.slots.values().sum()
    }

    pub fn count(&self, position: FieldingPosition) -> u32 {
        self.slots.get(&position).copied().unwrap_or(0)
    }

    /// Position classes with fewer candidates than roster slots, as
    /// `(position, required, available)`.
    pub fn shortfalls(&self, candidates: &[OptimizerCandidate]) -> Vec<(FieldingPosition, u32, u32)> {
        self.slots
            .iter()
            .filter_map(|(&position, &required)| {
                let available = candidates.iter().filter(|c| c.position == position).count() as u32;
                (available < required).then_some((position, required, available))
            })
            .collect()
    }
}

/// One `(name, position, score, salary)` tuple plus context for reviewing the slate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizerCandidate {
    pub name: String,
    pub position: FieldingPosition,
    pub score: f64,
    pub salary: u32,
    pub team: Option<String>,
    pub breakdown: ScoreBreakdown,
}

impl From<PlayerProjection> for OptimizerCandidate {
    fn from(p: PlayerProjection) -> Self {
        OptimizerCandidate {
            name: p.name,
            position: p.position,
            score: p.score,
            salary: p.salary,
            team: p.team,
            breakdown: p.breakdown,
        }
    }
}

/// Everything the optimizer needs for one slate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizerInput {
    pub season: u16,
    pub salary_cap: u32,
    pub roster: RosterRequirements,
    /// Sorted by score, best first.
    pub candidates: Vec<OptimizerCandidate>,
}

impl OptimizerInput {
    pub fn new(
        season: u16,
        salary_cap: u32,
        roster: RosterRequirements,
        projections: Vec<PlayerProjection>,
    ) -> Self {
        let mut candidates: Vec<OptimizerCandidate> =
            projections.into_iter().map(OptimizerCandidate::from).collect();
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

        for (position, required, available) in roster.shortfalls(&candidates) {
            warn!(
                "only {} {} candidates for {} roster slots",
                available, position, required
            );
        }

        OptimizerInput {
            season,
            salary_cap,
            roster,
            candidates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::repository::StatsRepository;

    fn projection(repo: &mut StatsRepository, name: &str, position: FieldingPosition, score: f64) -> PlayerProjection {
        PlayerProjection {
            id: repo.ensure_player(name),
            name: name.into(),
            position,
            team: Some("SEA".into()),
            salary: 4_000,
            score,
            breakdown: ScoreBreakdown::Pitcher {
                expected_ip: score,
                earned_runs: 0.0,
                strikeouts: 0.0,
                win: 0.0,
            },
        }
    }

    #[test]
    fn default_roster_is_nine_slots() {
        let roster = RosterRequirements::default();
        assert_eq!(roster.total(), 9);
        assert_eq!(roster.count(FieldingPosition::Outfield), 3);
        assert_eq!(roster.count(FieldingPosition::Pitcher), 1);
    }

    #[test]
    fn candidates_sorted_best_first() {
        let mut repo = StatsRepository::new();
        let projections = vec![
            projection(&mut repo, "a", FieldingPosition::Pitcher, 3.0),
            projection(&mut repo, "b", FieldingPosition::Pitcher, 9.5),
            projection(&mut repo, "c", FieldingPosition::Pitcher, -1.0),
        ];
        let input = OptimizerInput::new(2014, 35_000, RosterRequirements::default(), projections);
        let names: Vec<&str> = input.candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn shortfalls_report_unfillable_positions() {
        let mut repo = StatsRepository::new();
        let input = OptimizerInput::new(
            2014,
            35_000,
            RosterRequirements::default(),
            vec![projection(&mut repo, "a", FieldingPosition::Outfield, 1.0)],
        );
        let shortfalls = input.roster.shortfalls(&input.candidates);
        assert!(shortfalls.contains(&(FieldingPosition::Outfield, 3, 1)));
        assert!(shortfalls.contains(&(FieldingPosition::Catcher, 1, 0)));
    }

    #[test]
    fn serializes_roster_as_position_map() {
        let roster = RosterRequirements::default();
        let json = serde_json::to_value(&roster).unwrap();
        assert_eq!(json["OF"], 3);
        assert_eq!(json["1B"], 1);
    }
}
