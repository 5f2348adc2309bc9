use super::{MatchEntry, StructuredData, TeamEntry, TieEntry};

pub const SAMPLE_FILE_NAME: &str = "sample_clq_data.json";

fn team(name: &str, country: &str, coefficient: f64) -> TeamEntry {
    TeamEntry {
        name: name.to_string(),
        country: country.to_string(),
        uefa_coefficient: Some(coefficient),
    }
}

fn fixture(
    home: &str,
    away: &str,
    home_score: u32,
    away_score: u32,
    date: &str,
    round: &str,
    leg: &str,
) -> MatchEntry {
    MatchEntry {
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_score,
        away_score,
        date: date.to_string(),
        round: round.to_string(),
        leg: leg.to_string(),
    }
}

fn tie(first_leg_date: &str, second_leg_date: &str, round: &str) -> TieEntry {
    TieEntry {
        first_leg_date: first_leg_date.to_string(),
        second_leg_date: second_leg_date.to_string(),
        round: round.to_string(),
    }
}

/// Fixed example dataset for smoke-testing `analyze` and `quiz`
pub fn sample_data() -> StructuredData {
    const Q2: &str = "Second Qualifying Round";
    const Q3: &str = "Third Qualifying Round";

    StructuredData {
        teams: vec![
            team("Real Madrid", "Spain", 134.0),
            team("Manchester City", "England", 125.0),
            team("Bayern Munich", "Germany", 120.0),
            team("PSG", "France", 112.0),
            team("Juventus", "Italy", 89.0),
            team("Ajax", "Netherlands", 68.0),
            team("Celtic", "Scotland", 32.0),
            team("Malmö FF", "Sweden", 28.0),
        ],
        matches: vec![
            fixture("Celtic", "Malmö FF", 2, 0, "2023-07-19", Q2, "First Leg"),
            fixture("Malmö FF", "Celtic", 1, 2, "2023-07-26", Q2, "Second Leg"),
            fixture("Ajax", "Juventus", 1, 3, "2023-08-02", Q3, "First Leg"),
            fixture("Juventus", "Ajax", 2, 1, "2023-08-09", Q3, "Second Leg"),
        ],
        ties: vec![
            tie("2023-07-19", "2023-07-26", Q2),
            tie("2023-08-02", "2023-08-09", Q3),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_from_structured;
    use crate::models::TieOutcome;

    #[test]
    fn test_sample_data_loads() {
        let stats = load_from_structured(sample_data()).unwrap();

        assert_eq!(stats.teams.len(), 8);
        assert_eq!(stats.matches.len(), 4);
        assert_eq!(stats.ties.len(), 2);
        assert_eq!(stats.ties[0].outcome(), TieOutcome::Decided("Celtic".to_string()));
        assert_eq!(stats.ties[1].outcome(), TieOutcome::Decided("Juventus".to_string()));
    }
}
