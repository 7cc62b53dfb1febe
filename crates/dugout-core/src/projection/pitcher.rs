// Pitcher categories: innings, strikeouts, earned runs, win.

use super::tables::{rate, ratio, weighted, WIN_POINTS};
use super::ProjectionEngine;
use crate::error::{Result, StatsError};
use crate::stats::repository::{PlayerId, PlayerStat, TeamStat};
use crate::stats::types::{per, Hand, TeamSplitStat, Venue};

impl<'a> ProjectionEngine<'a> {
    /// Innings per start this season; 0 for a pitcher without a start.
    pub fn pitcher_expected_ip(&self, id: PlayerId) -> f64 {
        let totals = self.repo.player(id).pitching(self.season);
        per(totals.innings_pitched, totals.games_started)
    }

    fn has_started(&self, id: PlayerId) -> bool {
        self.repo.player(id).pitching(self.season).games_started > 0.0
    }

    /// Strikeouts per inning times expected innings, scaled by how often today's
    /// opponent strikes out against the pitcher's throwing hand.
    pub fn pitcher_points_expected_for_k(&self, id: PlayerId) -> Result<f64> {
        if !self.has_started(id) {
            return Ok(0.0);
        }
        let player = self.repo.player(id);
        let totals = player.pitching(self.season);
        let team = self.team_of(id)?;
        let opponent = self.repo.opponent(team)?;
        let league = self.league()?;

        let throws = player.throws();
        let opp_k_rate = self.team_split_rate(opponent, throws, TeamSplitStat::Strikeouts);
        let multiplier = ratio(opp_k_rate, league.strikeout_pct);

        let k_per_ip = per(totals.strikeouts, totals.innings_pitched);
        Ok(k_per_ip * self.pitcher_expected_ip(id) * multiplier)
    }

    /// Negative points for expected earned runs: home/away xFIP over expected innings,
    /// scaled by the park and the opponent's wOBA against the pitcher's hand.
    pub fn pitcher_points_expected_for_er(&self, id: PlayerId) -> Result<f64> {
        if !self.has_started(id) {
            return Ok(0.0);
        }
        let player = self.repo.player(id);
        let team = self.team_of(id)?;
        let opponent = self.repo.opponent(team)?;
        let venue = self.repo.venue(team)?;
        let league = self.league()?;
        let xfip = self
            .repo
            .player_stat(player.name(), self.season, PlayerStat::Xfip(venue))?;

        let home = if venue == Venue::Home { team } else { opponent };
        let park = self.repo.park(home).overall;
        let opp_woba = self
            .repo
            .team_stat(
                opponent,
                self.season,
                TeamStat::VsHand(player.throws(), TeamSplitStat::Woba),
            )
            .ok();
        let multiplier = weighted(&[(1.0, park), (2.0, ratio(opp_woba, league.woba))]);

        Ok(-xfip * (self.pitcher_expected_ip(id) / 9.0) * multiplier)
    }

    /// Flat win credit pending an odds feed.
    pub fn pitcher_points_expected_for_win(&self, _id: PlayerId) -> f64 {
        WIN_POINTS
    }

    /// `stat / plate appearances` for a team against pitchers of `hand`.
    fn team_split_rate(
        &self,
        team: &str,
        hand: Hand,
        stat: TeamSplitStat,
    ) -> Option<f64> {
        let get = |s| {
            self.repo
                .team_stat(team, self.season, TeamStat::VsHand(hand, s))
                .ok()
        };
        let value = get(stat)?;
        let pa = get(TeamSplitStat::PlateAppearances)?;
        rate(value, pa)
    }

    pub(super) fn team_of(&self, id: PlayerId) -> Result<&'a str> {
        let player = self.repo.player(id);
        player
            .team(self.season)
            .ok_or_else(|| StatsError::missing(player.name(), "team"))
    }
}
