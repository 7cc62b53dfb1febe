// Writing today's lineup facts into the repository.

use tracing::{debug, info, warn};

use super::{BatterLine, LineupAnnouncement, PitcherLine, AWAY, HOME};
use crate::error::{Result, StatsError};
use crate::identity::resolve_feed_name;
use crate::stats::repository::StatsRepository;
use crate::stats::types::{FieldingPosition, Hand};
use crate::teams::code_for_full_name;

/// Counts from applying a day's announcements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub games: usize,
    pub games_skipped: usize,
    pub batters: usize,
    pub pitchers: usize,
    pub players_skipped: usize,
}

fn salary_dollars(salary: f64) -> u32 {
    // Saturating float-to-int cast; negative and NaN become 0.
    salary.round() as u32
}

fn apply_batter(
    repo: &mut StatsRepository,
    line: &BatterLine,
    team: &str,
    season: u16,
) -> std::result::Result<(), String> {
    let id = resolve_feed_name(repo, &line.name, team, season).map_err(|e| e.to_string())?;
    let hand = line
        .hand
        .ok_or_else(|| "unknown batting hand".to_string())?;
    let position = FieldingPosition::from_code(&line.position.to_uppercase())
        .ok_or_else(|| format!("unknown position '{}'", line.position))?;

    let daily = &mut repo.player_mut(id).daily;
    daily.bats = Some(hand);
    daily.batting_order = Some(line.order);
    daily.salary = Some(salary_dollars(line.salary));
    daily.position = Some(position);
    daily.team = Some(team.to_string());
    daily.active = true;
    Ok(())
}

fn apply_pitcher(
    repo: &mut StatsRepository,
    line: &PitcherLine,
    team: &str,
    season: u16,
    salary_cap: u32,
) -> Result<()> {
    let id = resolve_feed_name(repo, &line.name, team, season)?;
    let daily = &mut repo.player_mut(id).daily;
    match line.hand {
        Some(hand) => {
            daily.throws = Some(hand);
            daily.salary = Some(line.salary.map(salary_dollars).unwrap_or(0));
        }
        None => {
            // Unconfirmed starter: priced at the cap so it never fits a roster.
            daily.throws = Some(Hand::Right);
            daily.salary = Some(salary_cap);
        }
    }
    daily.position = Some(FieldingPosition::Pitcher);
    daily.team = Some(team.to_string());
    daily.active = true;
    repo.set_starting_pitcher(team, id);
    Ok(())
}

/// Apply one game: record the matchup, then activate every resolvable batter and
/// pitcher with today's attributes.
///
/// Game-level failures (`UnknownTeam`, `MatchupAlreadySet`) leave the repository
/// unchanged and are returned. Player-level failures are logged and counted in `report`.
pub fn apply_announcement(
    repo: &mut StatsRepository,
    game: &LineupAnnouncement,
    season: u16,
    salary_cap: u32,
    report: &mut ApplyReport,
) -> Result<()> {
    let code = |name: &str| {
        code_for_full_name(name).ok_or_else(|| StatsError::UnknownTeam {
            name: name.to_string(),
        })
    };
    let teams = [code(&game.teams[AWAY])?, code(&game.teams[HOME])?];
    repo.set_matchup(teams[AWAY], teams[HOME])?;
    debug!("matchup {} @ {}", teams[AWAY], teams[HOME]);

    for (lineup, team) in game.lineups.iter().zip(teams) {
        for line in lineup {
            match apply_batter(repo, line, team, season) {
                Ok(()) => report.batters += 1,
                Err(reason) => {
                    warn!("skipping batter '{}' ({}): {}", line.name, team, reason);
                    report.players_skipped += 1;
                }
            }
        }
    }

    for (line, team) in game.pitchers.iter().zip(teams) {
        match apply_pitcher(repo, line, team, season, salary_cap) {
            Ok(()) => report.pitchers += 1,
            Err(e) => {
                warn!("skipping pitcher '{}' ({}): {}", line.name, team, e);
                report.players_skipped += 1;
            }
        }
    }

    report.games += 1;
    Ok(())
}

/// Apply a day's announcements in page order, skipping games that cannot be recorded.
pub fn apply_all(
    repo: &mut StatsRepository,
    games: &[LineupAnnouncement],
    season: u16,
    salary_cap: u32,
) -> ApplyReport {
    let mut report = ApplyReport::default();
    for game in games {
        if let Err(e) = apply_announcement(repo, game, season, salary_cap, &mut report) {
            warn!(
                "skipping game {} @ {}: {}",
                game.teams[AWAY], game.teams[HOME], e
            );
            report.games_skipped += 1;
        }
    }
    info!(
        "applied {} games ({} skipped): {} batters, {} pitchers active, {} players skipped",
        report.games, report.games_skipped, report.batters, report.pitchers, report.players_skipped
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::types::Venue;

    fn seeded_repo() -> StatsRepository {
        let mut repo = StatsRepository::new();
        for (name, team) in [
            ("mike trout", "LAA"),
            ("kole calhoun", "LAA"),
            ("jered weaver", "LAA"),
            ("felix hernandez", "SEA"),
            ("robinson cano", "SEA"),
            ("bench warmer", "SEA"),
        ] {
            let id = repo.ensure_player(name);
            repo.player_mut(id).season_mut(2014).team = Some(team.into());
        }
        repo
    }

    fn batter(order: u8, name: &str, hand: Option<Hand>, position: &str) -> BatterLine {
        BatterLine {
            order,
            name: name.into(),
            hand,
            salary: 3000.0,
            position: position.into(),
        }
    }

    fn game() -> LineupAnnouncement {
        LineupAnnouncement {
            teams: ["Los Angeles Angels".into(), "Seattle Mariners".into()],
            pitchers: [
                PitcherLine {
                    name: "jered weaver".into(),
                    hand: Some(Hand::Right),
                    salary: Some(8200.0),
                },
                PitcherLine {
                    name: "felix hernandez".into(),
                    hand: None,
                    salary: None,
                },
            ],
            lineups: [
                vec![
                    batter(1, "kole calhoun", Some(Hand::Left), "rf"),
                    batter(2, "mike trout", Some(Hand::Right), "cf"),
                    batter(3, "nobody known", Some(Hand::Right), "1b"),
                ],
                vec![batter(3, "robinson cano", None, "2b")],
            ],
        }
    }

    #[test]
    fn applies_batters_pitchers_and_matchup() {
        let mut repo = seeded_repo();
        let report = apply_all(&mut repo, &[game()], 2014, 35_000);
        assert_eq!(report.games, 1);
        assert_eq!(report.batters, 2);
        assert_eq!(report.pitchers, 2);
        assert_eq!(report.players_skipped, 2);

        assert_eq!(repo.opponent("LAA"), Ok("SEA"));
        assert_eq!(repo.venue("SEA"), Ok(Venue::Home));

        let trout = repo.player_by_name("mike trout").unwrap();
        assert!(trout.is_active());
        assert_eq!(trout.daily.batting_order, Some(2));
        assert_eq!(trout.daily.position, Some(FieldingPosition::Outfield));
        assert_eq!(trout.daily.salary, Some(3000));
        assert_eq!(trout.daily.team.as_deref(), Some("LAA"));
    }

    #[test]
    fn unknown_hand_pitcher_priced_at_cap() {
        let mut repo = seeded_repo();
        apply_all(&mut repo, &[game()], 2014, 35_000);
        let felix_id = repo.player_id("felix hernandez").unwrap();
        let felix = repo.player(felix_id);
        assert_eq!(felix.throws(), Hand::Right);
        assert_eq!(felix.daily.salary, Some(35_000));
        assert_eq!(felix.daily.position, Some(FieldingPosition::Pitcher));
        assert_eq!(repo.starting_pitcher("SEA"), Some(felix_id));

        let weaver = repo.player_by_name("jered weaver").unwrap();
        assert_eq!(weaver.daily.salary, Some(8200));
    }

    #[test]
    fn unresolved_and_unknown_hand_stay_inactive() {
        let mut repo = seeded_repo();
        let bench = repo.player_id("bench warmer").unwrap();
        repo.player_mut(bench).daily.salary = Some(1234);
        apply_all(&mut repo, &[game()], 2014, 35_000);

        let cano = repo.player_by_name("robinson cano").unwrap();
        assert!(!cano.is_active());
        assert_eq!(cano.daily.salary, None);

        let bench = repo.player(bench);
        assert!(!bench.is_active());
        assert_eq!(bench.daily.salary, Some(1234));
        assert_eq!(bench.daily.position, None);
        assert!(repo.player_id("nobody known").is_none());
    }

    #[test]
    fn unknown_team_skips_game_without_side_effects() {
        let mut repo = seeded_repo();
        let mut bad = game();
        bad.teams[HOME] = "Montreal Expos".into();
        let report = apply_all(&mut repo, &[bad], 2014, 35_000);
        assert_eq!(report.games_skipped, 1);
        assert!(repo.opponent("LAA").is_err());
        assert!(!repo.player_by_name("mike trout").unwrap().is_active());
    }

    #[test]
    fn second_matchup_for_team_is_skipped() {
        let mut repo = seeded_repo();
        let first = game();
        let mut second = game();
        second.teams = ["Los Angeles Angels".into(), "Texas Rangers".into()];
        let report = apply_all(&mut repo, &[first, second], 2014, 35_000);
        assert_eq!(report.games, 1);
        assert_eq!(report.games_skipped, 1);
        assert_eq!(repo.opponent("LAA"), Ok("SEA"));
    }
}
