// Batter categories: hits, walks, home runs, stolen bases, runs, RBI.

use super::tables::{
    expected_pa, rate, ratio, rbi_multiplier, runs_multiplier, weighted, HOME_RUN_RATIO_CAP,
};
use super::ProjectionEngine;
use crate::error::Result;
use crate::stats::repository::{PlayerEntry, PlayerId, PlayerSeason, TeamStat};
use crate::stats::types::{
    per, BattingTotals, Hand, LeagueTotals, ParkFactors, PitcherSplit, Venue,
};
use crate::teams::TEAM_COUNT;

/// Everything a batter formula needs to know about today's game.
struct Matchup<'a> {
    batter: &'a PlayerEntry,
    totals: BattingTotals,
    team: &'a str,
    opponent: &'a str,
    /// Batting side for split lookups.
    bats: Hand,
    park: ParkFactors,
    /// Opposing starter's season, `None` when unknown or without an inning pitched.
    pitcher: Option<&'a PlayerSeason>,
    /// Opposing starter's throwing hand, right when unknown.
    pitcher_hand: Hand,
    league: &'a LeagueTotals,
}

impl<'a> Matchup<'a> {
    fn pitcher_split(&self) -> Option<&'a PitcherSplit> {
        self.pitcher.and_then(|s| s.pitcher_vs.get(self.bats))
    }

    fn batter_season(&self, season: u16) -> Option<&'a PlayerSeason> {
        self.batter.season(season)
    }

    fn slot(&self) -> Option<u8> {
        self.batter.daily.batting_order
    }

    /// Opposing starter's wOBA allowed to this batter's side, against the league.
    fn pitcher_woba_ratio(&self) -> f64 {
        ratio(self.pitcher_split().map(|s| s.woba), self.league.woba)
    }

    /// Batter's wOBA against the starter's hand, against the league.
    fn batter_woba_ratio(&self, season: u16) -> f64 {
        let woba = self
            .batter_season(season)
            .and_then(|s| s.batter_vs.get(self.pitcher_hand))
            .map(|s| s.woba);
        ratio(woba, self.league.woba)
    }
}

impl<'a> ProjectionEngine<'a> {
    fn matchup(&self, id: PlayerId) -> Result<Matchup<'a>> {
        let repo = self.repo;
        let batter = repo.player(id);
        let team = self.team_of(id)?;
        let opponent = repo.opponent(team)?;
        let home = match repo.venue(team)? {
            Venue::Home => team,
            Venue::Away => opponent,
        };
        let league = self.league()?;

        let starter = repo
            .starting_pitcher(opponent)
            .map(|pid| repo.player(pid))
            .filter(|p| p.pitching(self.season).innings_pitched > 0.0);

        Ok(Matchup {
            batter,
            totals: batter.batting(self.season),
            team,
            opponent,
            bats: batter.daily.bats.unwrap_or(Hand::Right).matchup_side(),
            park: repo.park(home),
            pitcher: starter.and_then(|p| p.season(self.season)),
            pitcher_hand: starter.map_or(Hand::Right, |p| p.throws()),
            league,
        })
    }

    /// Non-home-run hits from an adjusted slugging rate over expected at-bats.
    pub fn batter_points_expected_for_hits(&self, id: PlayerId) -> Result<f64> {
        let m = self.matchup(id)?;
        let t = m.totals;
        if t.at_bats <= 0.0 {
            return Ok(0.0);
        }
        let outs = t.at_bats - t.hits;
        let adj_slg = per(
            t.singles + 2.0 * t.doubles + 3.0 * t.triples - 0.25 * outs,
            t.at_bats - t.home_runs,
        );
        let walks_per_game = per(t.walks, t.games);
        let expected_ab = (expected_pa(m.slot()) - walks_per_game).max(0.0);
        let multiplier = weighted(&[
            (1.5, m.pitcher_woba_ratio()),
            (1.5, m.batter_woba_ratio(self.season)),
            (1.0, m.park.batting_average(m.bats)),
        ]);
        Ok(adj_slg * expected_ab * multiplier)
    }

    pub fn batter_points_expected_for_walks(&self, id: PlayerId) -> Result<f64> {
        let m = self.matchup(id)?;
        let t = m.totals;
        if t.at_bats <= 0.0 {
            return Ok(0.0);
        }
        let league_rate = m.league.walk_rate();
        let pitcher_rate = m
            .pitcher_split()
            .and_then(|s| rate(s.walks, s.batters_faced));
        let multiplier = weighted(&[
            (1.0, ratio(pitcher_rate, league_rate)),
            (1.0, ratio(Some(t.walk_pct), league_rate)),
        ]);
        Ok(t.walk_pct * expected_pa(m.slot()) * multiplier)
    }

    pub fn batter_points_expected_for_hr(&self, id: PlayerId) -> Result<f64> {
        let m = self.matchup(id)?;
        let t = m.totals;
        if t.at_bats <= 0.0 {
            return Ok(0.0);
        }
        let league_rate = m.league.home_run_rate();
        let pitcher_rate = m
            .pitcher_split()
            .and_then(|s| rate(s.home_runs, s.batters_faced));
        let batter_rate = m
            .batter_season(self.season)
            .and_then(|s| s.batter_vs.get(m.pitcher_hand))
            .and_then(|s| rate(s.home_runs, s.plate_appearances));
        let multiplier = weighted(&[
            (1.5, ratio(pitcher_rate, league_rate).min(HOME_RUN_RATIO_CAP)),
            (1.5, ratio(batter_rate, league_rate).min(HOME_RUN_RATIO_CAP)),
            (1.0, m.park.home_run(m.bats)),
        ]);
        let factor = 4.0 * per(t.home_runs, t.plate_appearances);
        Ok(factor * expected_pa(m.slot()) * multiplier)
    }

    /// Steals per game, scaled by how freely the opposing catchers allow steals.
    pub fn batter_points_expected_for_sb(&self, id: PlayerId) -> Result<f64> {
        let m = self.matchup(id)?;
        let t = m.totals;
        let fielding = |stat| {
            self.repo
                .team_stat(m.opponent, self.season, stat)
                .ok()
        };
        let allowed = fielding(TeamStat::StolenBasesAllowed);
        let caught = fielding(TeamStat::CaughtStealing);
        let (success, attempts) = match (allowed, caught) {
            (Some(sb), Some(cs)) => (rate(sb, sb + cs), Some(sb + cs)),
            _ => (None, None),
        };
        let multiplier = weighted(&[
            (1.0, ratio(success, m.league.steal_success_rate())),
            (1.0, ratio(attempts, m.league.steal_attempts_per_team(TEAM_COUNT))),
        ]);
        Ok(2.0 * per(t.stolen_bases, t.games) * multiplier)
    }

    /// Run-value line `0.330×BA + 0.187×BB% + 0.560×HR/PA`.
    fn run_value_per_pa(t: &BattingTotals) -> f64 {
        0.330 * t.batting_average + 0.187 * t.walk_pct + 0.560 * per(t.home_runs, t.plate_appearances)
    }

    fn run_environment(&self, m: &Matchup<'_>) -> f64 {
        let team_runs = self
            .repo
            .team_stat(m.team, self.season, TeamStat::Runs)
            .ok();
        weighted(&[
            (1.5, m.pitcher_woba_ratio()),
            (1.5, m.batter_woba_ratio(self.season)),
            (1.0, m.park.overall),
            (1.0, ratio(team_runs, m.league.runs_per_team(TEAM_COUNT))),
        ])
    }

    pub fn batter_points_expected_for_runs(&self, id: PlayerId) -> Result<f64> {
        let m = self.matchup(id)?;
        let line = Self::run_value_per_pa(&m.totals) * runs_multiplier(m.slot());
        Ok(line * expected_pa(m.slot()) * self.run_environment(&m))
    }

    pub fn batter_points_expected_for_rbi(&self, id: PlayerId) -> Result<f64> {
        let m = self.matchup(id)?;
        let line = Self::run_value_per_pa(&m.totals) * rbi_multiplier(m.slot());
        Ok(line * expected_pa(m.slot()) * self.run_environment(&m))
    }
}
