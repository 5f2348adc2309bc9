use serde::Serialize;

use crate::models::{Match, Statistics};
use crate::utils::average;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TournamentSummary {
    pub total_matches: usize,
    pub total_teams: usize,
    pub total_goals: u32,
    pub average_goals_per_match: f64,
    pub total_ties: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundStats<'a> {
    pub round: String,
    pub matches: usize,
    pub total_goals: u32,
    pub average_goals: f64,
    pub highest_scoring_match: Option<&'a Match>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CountryPerformance {
    pub country: String,
    pub teams: u32,
    pub total_matches: u32,
    pub total_wins: u32,
    pub total_goals_for: u32,
    pub total_goals_against: u32,
}

/// Read-only aggregate queries over a loaded `Statistics`.
pub struct Analyzer<'a> {
    stats: &'a Statistics,
}

impl<'a> Analyzer<'a> {
    pub fn new(stats: &'a Statistics) -> Self {
        Self { stats }
    }

    pub fn tournament_summary(&self) -> TournamentSummary {
        let total_matches = self.stats.matches.len();
        let total_goals = self.stats.total_goals();

        TournamentSummary {
            total_matches,
            total_teams: self.stats.teams.len(),
            total_goals,
            average_goals_per_match: average(total_goals, total_matches),
            total_ties: self.stats.ties.len(),
        }
    }

    /// One entry per round label, in the order each label first appears.
    pub fn round_statistics(&self) -> Vec<RoundStats<'a>> {
        let stats: &'a Statistics = self.stats;
        let mut rounds: Vec<RoundStats<'a>> = Vec::new();

        for m in &stats.matches {
            let idx = match rounds.iter().position(|r| r.round == m.round) {
                Some(idx) => idx,
                None => {
                    rounds.push(RoundStats {
                        round: m.round.clone(),
                        matches: 0,
                        total_goals: 0,
                        average_goals: 0.0,
                        highest_scoring_match: None,
                    });
                    rounds.len() - 1
                }
            };

            let entry = &mut rounds[idx];
            entry.matches += 1;
            entry.total_goals += m.total_goals();

            // Earliest match wins on equal totals
            let replace = entry
                .highest_scoring_match
                .map_or(true, |best| m.total_goals() > best.total_goals());
            if replace {
                entry.highest_scoring_match = Some(m);
            }
        }

        for entry in &mut rounds {
            entry.average_goals = average(entry.total_goals, entry.matches);
        }

        tracing::debug!("Computed statistics for {} rounds", rounds.len());
        rounds
    }

    /// Per-team figures folded into one bucket per country, in team order.
    pub fn country_performance(&self) -> Vec<CountryPerformance> {
        let mut countries: Vec<CountryPerformance> = Vec::new();

        for team in &self.stats.teams {
            let team_stats = self.stats.team_stats(team);

            let idx = match countries.iter().position(|c| c.country == team.country) {
                Some(idx) => idx,
                None => {
                    countries.push(CountryPerformance {
                        country: team.country.clone(),
                        ..Default::default()
                    });
                    countries.len() - 1
                }
            };

            let entry = &mut countries[idx];
            entry.teams += 1;
            entry.total_matches += team_stats.matches_played;
            entry.total_wins += team_stats.wins;
            entry.total_goals_for += team_stats.goals_for;
            entry.total_goals_against += team_stats.goals_against;
        }

        countries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::{date, fixture, sample_statistics};
    use crate::models::{Leg, Team};

    fn three_match_statistics() -> Statistics {
        let teams = vec![
            Team::new("A", "X", None),
            Team::new("B", "X", None),
            Team::new("C", "Y", None),
        ];
        let matches = vec![
            fixture("A", "B", 2, 0, date(2023, 7, 11), "Q1", Leg::First),
            fixture("B", "A", 1, 2, date(2023, 7, 18), "Q1", Leg::Second),
            fixture("C", "A", 3, 1, date(2023, 8, 1), "Q2", Leg::First),
        ];
        Statistics::new(matches, Vec::new(), teams)
    }

    #[test]
    fn test_tournament_summary() {
        let stats = three_match_statistics();
        let summary = Analyzer::new(&stats).tournament_summary();

        assert_eq!(summary.total_goals, 9);
        assert_eq!(summary.total_matches, 3);
        assert_eq!(summary.average_goals_per_match, 3.0);
        assert_eq!(summary.total_teams, 3);
        assert_eq!(summary.total_ties, 0);

        let goals: u32 = stats.matches.iter().map(|m| m.total_goals()).sum();
        assert_eq!(summary.total_goals, goals);
    }

    #[test]
    fn test_empty_statistics_average_is_zero() {
        let stats = Statistics::default();
        let summary = Analyzer::new(&stats).tournament_summary();

        assert_eq!(summary.total_matches, 0);
        assert_eq!(summary.average_goals_per_match, 0.0);
        assert!(Analyzer::new(&stats).round_statistics().is_empty());
        assert!(Analyzer::new(&stats).country_performance().is_empty());
    }

    #[test]
    fn test_round_statistics_keep_first_seen_order() {
        let teams = vec![Team::new("A", "X", None), Team::new("B", "Y", None)];
        let matches = vec![
            fixture("A", "B", 1, 1, date(2023, 7, 4), "Zeta Round", Leg::First),
            fixture("A", "B", 0, 0, date(2023, 7, 5), "Alpha Round", Leg::First),
            fixture("B", "A", 3, 0, date(2023, 7, 11), "Zeta Round", Leg::Second),
        ];
        let stats = Statistics::new(matches, Vec::new(), teams);

        let rounds = Analyzer::new(&stats).round_statistics();
        let labels: Vec<&str> = rounds.iter().map(|r| r.round.as_str()).collect();
        assert_eq!(labels, vec!["Zeta Round", "Alpha Round"]);

        assert_eq!(rounds[0].matches, 2);
        assert_eq!(rounds[0].total_goals, 5);
        assert_eq!(rounds[0].average_goals, 2.5);
        assert_eq!(rounds[0].highest_scoring_match.unwrap().to_string(), "B 3-0 A");
        assert_eq!(rounds[1].average_goals, 0.0);
    }

    #[test]
    fn test_highest_scoring_match_prefers_earliest() {
        let stats = sample_statistics();
        let rounds = Analyzer::new(&stats).round_statistics();

        // Second Qualifying Round: 2-0 then 1-2, so the second match wins outright
        assert_eq!(rounds[0].highest_scoring_match.unwrap().to_string(), "Malmö FF 1-2 Celtic");
        // Third Qualifying Round: 1-3 then 2-1
        assert_eq!(rounds[1].highest_scoring_match.unwrap().to_string(), "Ajax 1-3 Juventus");

        let teams = vec![Team::new("A", "X", None), Team::new("B", "Y", None)];
        let matches = vec![
            fixture("A", "B", 2, 1, date(2023, 7, 4), "R", Leg::First),
            fixture("B", "A", 1, 2, date(2023, 7, 11), "R", Leg::Second),
        ];
        let stats = Statistics::new(matches, Vec::new(), teams);
        let rounds = Analyzer::new(&stats).round_statistics();
        assert_eq!(rounds[0].highest_scoring_match.unwrap().to_string(), "A 2-1 B");
    }

    #[test]
    fn test_country_performance() {
        let stats = three_match_statistics();
        let countries = Analyzer::new(&stats).country_performance();

        assert_eq!(countries.len(), 2);

        let x = &countries[0];
        assert_eq!(x.country, "X");
        assert_eq!(x.teams, 2);
        // A played 3, B played 2
        assert_eq!(x.total_matches, 5);
        assert_eq!(x.total_wins, 2);
        assert_eq!(x.total_goals_for, 6);
        assert_eq!(x.total_goals_against, 8);

        let y = &countries[1];
        assert_eq!(y.country, "Y");
        assert_eq!(y.total_wins, 1);
        assert_eq!(y.total_goals_for, 3);
    }
}
