use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod question;

pub use question::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uefa_coefficient: Option<f64>,
}

impl Team {
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        uefa_coefficient: Option<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            uefa_coefficient,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.country)
    }
}

/// Which half of a two-legged tie a match belongs to.
///
/// Scraped data is not always clean, so labels other than the two standard
/// ones are kept verbatim instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Leg {
    First,
    Second,
    Other(String),
}

impl From<String> for Leg {
    fn from(label: String) -> Self {
        match label.trim() {
            "First Leg" => Leg::First,
            "Second Leg" => Leg::Second,
            _ => Leg::Other(label),
        }
    }
}

impl From<Leg> for String {
    fn from(leg: Leg) -> Self {
        leg.to_string()
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leg::First => f.write_str("First Leg"),
            Leg::Second => f.write_str("Second Leg"),
            Leg::Other(label) => f.write_str(label),
        }
    }
}

/// A single fixture. Teams are referenced by name; the `Team` values
/// themselves are owned by the enclosing `Statistics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub date: NaiveDate,
    pub round: String, // e.g. "Second Qualifying Round"
    pub leg: Leg,
}

impl Match {
    /// Name of the team with the strictly higher score, `None` on a draw
    pub fn winner(&self) -> Option<&str> {
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => Some(&self.home_team),
            std::cmp::Ordering::Less => Some(&self.away_team),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn total_goals(&self) -> u32 {
        self.home_score + self.away_score
    }

    pub fn involves(&self, team_name: &str) -> bool {
        self.home_team == team_name || self.away_team == team_name
    }

    /// Goals scored and conceded by `team_name`, or `None` if it did not play
    pub fn goals_for_and_against(&self, team_name: &str) -> Option<(u32, u32)> {
        if self.home_team == team_name {
            Some((self.home_score, self.away_score))
        } else if self.away_team == team_name {
            Some((self.away_score, self.home_score))
        } else {
            None
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{} {}",
            self.home_team, self.home_score, self.away_score, self.away_team
        )
    }
}

/// Result of a two-legged tie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TieOutcome {
    Decided(String),
    /// Equal on aggregate and not separated by the chosen tiebreak.
    Level,
}

/// How to separate a tie that finishes level on aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    #[default]
    None,
    AwayGoals,
}

/// Two legs of the same pairing, played home and away.
///
/// The legs are stored by value: matches never change after load, so a copy
/// is indistinguishable from a reference into `Statistics::matches`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tie {
    pub first_leg: Match,
    pub second_leg: Match,
    pub round: String,
}

impl Tie {
    pub fn new(first_leg: Match, second_leg: Match, round: impl Into<String>) -> Self {
        Self {
            first_leg,
            second_leg,
            round: round.into(),
        }
    }

    /// The team that was at home in the first leg
    pub fn home_team(&self) -> &str {
        &self.first_leg.home_team
    }

    pub fn away_team(&self) -> &str {
        &self.first_leg.away_team
    }

    /// Goals scored across both legs by the first-leg home team
    pub fn aggregate_home_score(&self) -> u32 {
        self.first_leg.home_score + self.second_leg.away_score
    }

    /// Goals scored across both legs by the first-leg away team
    pub fn aggregate_away_score(&self) -> u32 {
        self.first_leg.away_score + self.second_leg.home_score
    }

    /// Outcome on aggregate alone. A level aggregate is reported as such
    /// rather than being awarded to either side.
    pub fn outcome(&self) -> TieOutcome {
        self.outcome_with(TieBreak::None)
    }

    pub fn outcome_with(&self, tiebreak: TieBreak) -> TieOutcome {
        let home = self.aggregate_home_score();
        let away = self.aggregate_away_score();

        if home != away {
            return self.decided_by(home, away);
        }

        match tiebreak {
            TieBreak::None => TieOutcome::Level,
            TieBreak::AwayGoals => {
                // First-leg home team played away in the second leg
                let home_away_goals = self.second_leg.away_score;
                let away_away_goals = self.first_leg.away_score;
                if home_away_goals == away_away_goals {
                    TieOutcome::Level
                } else {
                    self.decided_by(home_away_goals, away_away_goals)
                }
            }
        }
    }

    fn decided_by(&self, home: u32, away: u32) -> TieOutcome {
        if home > away {
            TieOutcome::Decided(self.home_team().to_string())
        } else {
            TieOutcome::Decided(self.away_team().to_string())
        }
    }
}

impl fmt::Display for Tie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vs {} ({}-{} agg.)",
            self.home_team(),
            self.away_team(),
            self.aggregate_home_score(),
            self.aggregate_away_score()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TeamStats {
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamRecord<'a> {
    pub team: &'a Team,
    #[serde(flatten)]
    pub stats: TeamStats,
}

/// Aggregate root for one loaded competition.
///
/// Per-team figures are derived from `matches` on every call rather than cached.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub matches: Vec<Match>,
    pub ties: Vec<Tie>,
    pub teams: Vec<Team>,
}

impl Statistics {
    pub fn new(matches: Vec<Match>, ties: Vec<Tie>, teams: Vec<Team>) -> Self {
        Self { matches, ties, teams }
    }

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name == name)
    }

    pub fn team_stats(&self, team: &Team) -> TeamStats {
        let mut stats = TeamStats::default();

        for m in self.matches.iter().filter(|m| m.involves(&team.name)) {
            let Some((scored, conceded)) = m.goals_for_and_against(&team.name) else {
                continue;
            };

            stats.matches_played += 1;
            stats.goals_for += scored;
            stats.goals_against += conceded;

            match m.winner() {
                Some(winner) if winner == team.name => stats.wins += 1,
                Some(_) => stats.losses += 1,
                None => stats.draws += 1,
            }
        }

        stats.goal_difference = stats.goals_for as i64 - stats.goals_against as i64;
        stats
    }

    /// Teams ordered by goals scored, highest first. Equal tallies keep team order.
    pub fn top_scorers(&self, limit: usize) -> Vec<TeamRecord<'_>> {
        let mut records: Vec<TeamRecord<'_>> = self
            .teams
            .iter()
            .map(|team| TeamRecord {
                team,
                stats: self.team_stats(team),
            })
            .collect();

        records.sort_by(|a, b| b.stats.goals_for.cmp(&a.stats.goals_for));
        records.truncate(limit);
        records
    }

    /// Matches ordered by total goals, highest first. Equal totals keep load order.
    pub fn highest_scoring_matches(&self, limit: usize) -> Vec<&Match> {
        let mut matches: Vec<&Match> = self.matches.iter().collect();
        matches.sort_by(|a, b| b.total_goals().cmp(&a.total_goals()));
        matches.truncate(limit);
        matches
    }

    pub fn total_goals(&self) -> u32 {
        self.matches.iter().map(Match::total_goals).sum()
    }
}
