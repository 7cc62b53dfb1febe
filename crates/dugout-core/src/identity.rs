// Identity resolution between the lineup feed ("first initial + last name + team") and
// the repository's canonical full names.

use crate::error::{Result, StatsError};
use crate::stats::repository::{PlayerId, StatsRepository};

fn matches_name(full_name: &str, initial: char, last_name: &str) -> bool {
    let first_matches = full_name
        .chars()
        .next()
        .is_some_and(|c| c.to_lowercase().eq(initial.to_lowercase()));
    first_matches
        && full_name
            .split_whitespace()
            .last()
            .is_some_and(|last| last.eq_ignore_ascii_case(last_name))
}

/// Find the repository entry for a feed player.
///
/// Scans players in insertion order. The first pass also requires the player's
/// `season` team to equal `team`; the fallback pass drops that constraint and returns
/// the first name match, which is ambiguous for players sharing an initial and last
/// name.
pub fn resolve(
    repo: &StatsRepository,
    initial: char,
    last_name: &str,
    team: &str,
    season: u16,
) -> Result<PlayerId> {
    let candidates = move || {
        repo.players()
            .filter(move |(_, p)| matches_name(p.name(), initial, last_name))
    };
    candidates()
        .find(|(_, p)| p.season_team(season) == Some(team))
        .or_else(|| candidates().next())
        .map(|(id, _)| id)
        .ok_or_else(|| StatsError::PlayerNotFound {
            token: format!("{initial} {last_name} ({team})"),
        })
}

/// Resolve a feed display name such as `"mike trout"` by its first character and last
/// token.
pub fn resolve_feed_name(
    repo: &StatsRepository,
    feed_name: &str,
    team: &str,
    season: u16,
) -> Result<PlayerId> {
    let not_found = || StatsError::PlayerNotFound {
        token: format!("{} ({team})", feed_name.trim()),
    };
    let initial = feed_name.trim().chars().next().ok_or_else(not_found)?;
    let last_name = feed_name.split_whitespace().last().ok_or_else(not_found)?;
    resolve(repo, initial, last_name, team, season)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_with(players: &[(&str, Option<&str>)]) -> StatsRepository {
        let mut repo = StatsRepository::new();
        for (name, team) in players {
            let id = repo.ensure_player(name);
            repo.player_mut(id).season_mut(2014).team = team.map(str::to_string);
        }
        repo
    }

    #[test]
    fn team_qualified_match_wins_over_store_order() {
        let repo = repo_with(&[
            ("chris young", Some("NYY")),
            ("chris young", Some("NYY")),
            ("carlos young", Some("SEA")),
        ]);
        let id = resolve(&repo, 'C', "Young", "SEA", 2014).unwrap();
        assert_eq!(repo.player(id).name(), "carlos young");
    }

    #[test]
    fn fallback_returns_first_in_store_order() {
        let repo = repo_with(&[("chris young", Some("NYY")), ("carlos young", Some("SEA"))]);
        let id = resolve(&repo, 'c', "young", "BOS", 2014).unwrap();
        assert_eq!(repo.player(id).name(), "chris young");
    }

    #[test]
    fn fallback_covers_traded_players_without_team() {
        let repo = repo_with(&[("nelson cruz", None)]);
        let id = resolve_feed_name(&repo, "nelson cruz", "BAL", 2014).unwrap();
        assert_eq!(repo.player(id).name(), "nelson cruz");
    }

    #[test]
    fn last_name_must_match_whole_token() {
        let repo = repo_with(&[("jose abreu", Some("CWS"))]);
        assert!(resolve(&repo, 'j', "abre", "CWS", 2014).is_err());
        assert!(resolve(&repo, 't', "abreu", "CWS", 2014).is_err());
    }

    #[test]
    fn not_found_names_the_token() {
        let repo = repo_with(&[]);
        let err = resolve_feed_name(&repo, "ghost player", "NYY", 2014).unwrap_err();
        assert_eq!(
            err,
            StatsError::PlayerNotFound {
                token: "g player (NYY)".into()
            }
        );
        assert!(resolve_feed_name(&repo, "   ", "NYY", 2014).is_err());
    }
}
