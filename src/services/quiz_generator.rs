use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};

use crate::models::{
    Difficulty, MultipleChoiceQuestion, Question, ShortAnswerQuestion, Statistics, TrueFalseQuestion,
};
use crate::services::Analyzer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum QuizType {
    #[default]
    Mixed,
    #[value(name = "multiple_choice")]
    MultipleChoice,
    #[value(name = "true_false")]
    TrueFalse,
    #[value(name = "short_answer")]
    ShortAnswer,
}

/// Builds question/answer pairs from facts in a `Statistics` snapshot.
///
/// All randomness (option order, quiz order, the team picked for the
/// participation question) comes from the injected `rng`, so a seeded
/// generator always produces the same quiz for the same data.
pub struct QuizGenerator<'a, R: Rng> {
    stats: &'a Statistics,
    analyzer: Analyzer<'a>,
    rng: R,
}

impl<'a> QuizGenerator<'a, StdRng> {
    pub fn seeded(stats: &'a Statistics, seed: u64) -> Self {
        Self::new(stats, StdRng::seed_from_u64(seed))
    }
}

impl<'a, R: Rng> QuizGenerator<'a, R> {
    pub fn new(stats: &'a Statistics, rng: R) -> Self {
        Self {
            stats,
            analyzer: Analyzer::new(stats),
            rng,
        }
    }

    pub fn generate(&mut self, quiz_type: QuizType, count: usize) -> Vec<Question> {
        match quiz_type {
            QuizType::Mixed => self.generate_mixed(count),
            QuizType::MultipleChoice => self.generate_multiple_choice(count),
            QuizType::TrueFalse => self.generate_true_false(count),
            QuizType::ShortAnswer => self.generate_short_answer(count),
        }
    }

    /// Up to three multiple-choice questions; templates the data cannot
    /// support are skipped.
    pub fn generate_multiple_choice(&mut self, count: usize) -> Vec<Question> {
        let mut questions: Vec<Question> = Vec::new();

        // Top scorer
        let top = self.stats.top_scorers(4);
        if top.len() >= 4 && top[0].stats.goals_for > top[1].stats.goals_for {
            let wrong = top[1..4].iter().map(|r| r.team.name.clone()).collect();
            questions.push(
                MultipleChoiceQuestion::new(
                    "Which team scored the most goals in Champions League qualifying?",
                    top[0].team.name.clone(),
                    wrong,
                    &mut self.rng,
                )
                .into(),
            );
        } else {
            tracing::debug!("Skipping top scorer question: need four teams and a clear leader");
        }

        // Highest-scoring match
        if let Some(m) = self.stats.highest_scoring_matches(1).first() {
            let total = m.total_goals();
            questions.push(
                MultipleChoiceQuestion::new(
                    format!("How many total goals were scored in the highest-scoring match ({})?", m),
                    total.to_string(),
                    goal_distractors(total),
                    &mut self.rng,
                )
                .with_difficulty(Difficulty::Hard)
                .into(),
            );
        }

        // Country representation
        if let Some(question) = self.country_question() {
            questions.push(question.into());
        }

        questions.truncate(count);
        questions
    }

    fn country_question(&mut self) -> Option<MultipleChoiceQuestion> {
        let mut countries: Vec<(&str, usize)> = Vec::new();
        for team in &self.stats.teams {
            match countries.iter_mut().find(|(c, _)| *c == team.country) {
                Some((_, n)) => *n += 1,
                None => countries.push((team.country.as_str(), 1)),
            }
        }

        if countries.len() < 4 {
            tracing::debug!("Skipping country question: only {} countries", countries.len());
            return None;
        }

        countries.shuffle(&mut self.rng);
        let (correct, team_count) = countries[0];

        // A distractor with the same team count would also be a right answer
        let wrong: Vec<String> = countries[1..]
            .iter()
            .filter(|(_, n)| *n != team_count)
            .take(3)
            .map(|(c, _)| c.to_string())
            .collect();

        if wrong.len() < 3 {
            tracing::debug!("Skipping country question: no unambiguous distractors for {}", correct);
            return None;
        }

        Some(MultipleChoiceQuestion::new(
            format!("Which country had {} teams in the qualifying rounds?", team_count),
            correct,
            wrong,
            &mut self.rng,
        ))
    }

    /// Three true/false questions when the data has teams, two otherwise.
    pub fn generate_true_false(&mut self, count: usize) -> Vec<Question> {
        let summary = self.analyzer.tournament_summary();
        let mut questions: Vec<Question> = vec![
            TrueFalseQuestion::new(
                "The average goals per match in the qualifying rounds was above 2.0",
                summary.average_goals_per_match > 2.0,
            )
            .into(),
            TrueFalseQuestion::new(
                "More than 50 matches were played in the qualifying rounds",
                summary.total_matches > 50,
            )
            .into(),
        ];

        if let Some(team) = self.stats.teams.choose(&mut self.rng) {
            let played = self.stats.team_stats(team).matches_played;
            questions.push(
                TrueFalseQuestion::new(
                    format!("{} played more than 2 matches in the qualifying rounds", team.name),
                    played > 2,
                )
                .into(),
            );
        }

        questions.truncate(count);
        questions
    }

    pub fn generate_short_answer(&mut self, count: usize) -> Vec<Question> {
        let mut questions: Vec<Question> = Vec::new();

        let top = self.stats.top_scorers(self.stats.teams.len());
        if let Some(leader) = top.first() {
            let goals = leader.stats.goals_for;
            let name = &leader.team.name;

            // Teams level with the leader are equally correct
            let co_leaders = top[1..]
                .iter()
                .take_while(|r| r.stats.goals_for == goals)
                .map(|r| r.team.name.clone());

            questions.push(
                ShortAnswerQuestion::new(
                    format!("Which team scored the most goals ({}) in the qualifying rounds?", goals),
                    name.clone(),
                )
                .with_aliases([name.to_lowercase(), name.to_uppercase()])
                .with_aliases(co_leaders)
                .into(),
            );
        }

        let summary = self.analyzer.tournament_summary();
        questions.push(
            ShortAnswerQuestion::new(
                "How many teams participated in the Champions League qualifying rounds?",
                summary.total_teams.to_string(),
            )
            .with_difficulty(Difficulty::Easy)
            .into(),
        );
        questions.push(
            ShortAnswerQuestion::new(
                "How many total goals were scored across all qualifying matches?",
                summary.total_goals.to_string(),
            )
            .into(),
        );

        questions.truncate(count);
        questions
    }

    /// Roughly a third of each kind, shuffled together. Categories that
    /// cannot fill their share are not topped up from the others.
    pub fn generate_mixed(&mut self, total: usize) -> Vec<Question> {
        let mc_count = total / 3;
        let tf_count = total / 3;
        let sa_count = total - mc_count - tf_count;

        let mut questions = self.generate_multiple_choice(mc_count);
        questions.extend(self.generate_true_false(tf_count));
        questions.extend(self.generate_short_answer(sa_count));
        questions.shuffle(&mut self.rng);

        if questions.len() < total {
            tracing::info!("Generated {} of {} requested questions", questions.len(), total);
        }

        questions
    }
}

/// Three distinct, non-negative wrong totals near `correct`
fn goal_distractors(correct: u32) -> Vec<String> {
    let correct = correct as i64;

    [-1, 1, -2]
        .into_iter()
        .chain(2..)
        .map(|offset: i64| correct + offset)
        .filter(|value| *value >= 0)
        .take(3)
        .map(|value| value.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::{date, fixture, sample_statistics};
    use crate::models::{FormattedQuestion, Leg, QuestionKind, Team};
    use std::collections::HashSet;

    fn kinds(questions: &[Question]) -> HashSet<QuestionKind> {
        questions.iter().map(Question::kind).collect()
    }

    /// Ten teams spread over four countries with different team counts.
    fn uneven_countries() -> Statistics {
        let countries = ["X", "Y", "Y", "Z", "Z", "Z", "W", "W", "W", "W"];
        let teams: Vec<Team> = countries
            .iter()
            .enumerate()
            .map(|(i, c)| Team::new(format!("Team {}", i), *c, None))
            .collect();
        let matches = vec![
            fixture("Team 0", "Team 1", 4, 0, date(2023, 7, 11), "Q1", Leg::First),
            fixture("Team 2", "Team 3", 2, 1, date(2023, 7, 11), "Q1", Leg::First),
            fixture("Team 4", "Team 5", 1, 1, date(2023, 7, 12), "Q1", Leg::First),
        ];
        Statistics::new(matches, Vec::new(), teams)
    }

    #[test]
    fn test_goal_distractors() {
        assert_eq!(goal_distractors(0), vec!["1", "2", "3"]);
        assert_eq!(goal_distractors(1), vec!["0", "2", "3"]);
        assert_eq!(goal_distractors(2), vec!["1", "3", "0"]);
        assert_eq!(goal_distractors(5), vec!["4", "6", "3"]);
    }

    #[test]
    fn test_generate_multiple_choice_questions() {
        let stats = sample_statistics();
        let mut generator = QuizGenerator::seeded(&stats, 11);
        let questions = generator.generate_multiple_choice(3);

        // One team per country, so the country template has no valid distractors
        assert_eq!(questions.len(), 2);

        let Question::MultipleChoice(top) = &questions[0] else {
            panic!("expected multiple choice");
        };
        assert_eq!(top.correct_answer, "Juventus");
        assert_eq!(top.options.len(), 4);
        assert!(top.check_answer(&top.correct_index.to_string()));

        let Question::MultipleChoice(goals) = &questions[1] else {
            panic!("expected multiple choice");
        };
        assert_eq!(goals.correct_answer, "4");
        assert!(goals.question_text.contains("Ajax 1-3 Juventus"));
        assert_eq!(goals.difficulty, Difficulty::Hard);
        let mut options = goals.options.clone();
        options.sort();
        assert_eq!(options, vec!["2", "3", "4", "5"]);

        assert_eq!(generator.generate_multiple_choice(1).len(), 1);
    }

    #[test]
    fn test_country_question_is_unambiguous() {
        let stats = uneven_countries();

        for seed in 0..10 {
            let mut generator = QuizGenerator::seeded(&stats, seed);
            let questions = generator.generate_multiple_choice(3);
            assert_eq!(questions.len(), 3);

            let Question::MultipleChoice(q) = &questions[2] else {
                panic!("expected multiple choice");
            };
            let stated = stats.teams.iter().filter(|t| t.country == q.correct_answer).count();
            assert!(q.question_text.contains(&format!("had {} teams", stated)));

            for option in &q.options {
                let n = stats.teams.iter().filter(|t| &t.country == option).count();
                assert_eq!(n == stated, *option == q.correct_answer);
            }
        }
    }

    #[test]
    fn test_small_dataset_skips_templates() {
        let teams = vec![Team::new("A", "X", None), Team::new("B", "Y", None)];
        let matches = vec![fixture("A", "B", 1, 0, date(2023, 7, 11), "Q1", Leg::First)];
        let stats = Statistics::new(matches, Vec::new(), teams);

        let mut generator = QuizGenerator::seeded(&stats, 5);
        let questions = generator.generate_multiple_choice(3);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].kind(), QuestionKind::MultipleChoice);

        let empty = Statistics::default();
        let mut generator = QuizGenerator::seeded(&empty, 5);
        assert!(generator.generate_multiple_choice(3).is_empty());
        assert_eq!(generator.generate_true_false(5).len(), 2);
        assert_eq!(generator.generate_short_answer(5).len(), 2);
    }

    #[test]
    fn test_generate_true_false_questions() {
        let stats = sample_statistics();
        let mut generator = QuizGenerator::seeded(&stats, 3);

        let questions = generator.generate_true_false(5);
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(|q| q.kind() == QuestionKind::TrueFalse));

        // 12 goals in 4 matches
        assert!(questions[0].check_answer("true"));
        assert!(questions[1].check_answer("false"));
        // Every team played exactly two matches
        assert!(questions[2].check_answer("no"));

        assert_eq!(generator.generate_true_false(2).len(), 2);
    }

    #[test]
    fn test_generate_short_answer_questions() {
        let stats = sample_statistics();
        let mut generator = QuizGenerator::seeded(&stats, 3);
        let questions = generator.generate_short_answer(3);

        assert_eq!(questions.len(), 3);
        assert!(questions[0].check_answer("JUVENTUS"));
        assert!(questions[0].check_answer("juventus"));
        assert!(!questions[0].check_answer("Celtic"));
        assert!(questions[1].check_answer("4"));
        assert!(questions[2].check_answer("12"));

        match questions[0].format() {
            FormattedQuestion::ShortAnswer { correct_answer, .. } => assert_eq!(correct_answer, "Juventus"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_short_answer_accepts_co_leaders() {
        let teams = vec![
            Team::new("A", "X", None),
            Team::new("B", "Y", None),
            Team::new("C", "Z", None),
        ];
        let matches = vec![
            fixture("A", "B", 2, 2, date(2023, 7, 11), "Q1", Leg::First),
            fixture("C", "A", 0, 0, date(2023, 7, 12), "Q1", Leg::First),
        ];
        let stats = Statistics::new(matches, Vec::new(), teams);

        let questions = QuizGenerator::seeded(&stats, 1).generate_short_answer(1);
        assert!(questions[0].check_answer("a"));
        assert!(questions[0].check_answer("b"));
        assert!(!questions[0].check_answer("c"));
    }

    #[test]
    fn test_generate_mixed_quiz() {
        let stats = sample_statistics();
        let questions = QuizGenerator::seeded(&stats, 9).generate_mixed(9);

        assert!(questions.len() <= 9);
        assert_eq!(questions.len(), 8);
        assert!(kinds(&questions).len() >= 2);

        let stats = uneven_countries();
        let questions = QuizGenerator::seeded(&stats, 9).generate(QuizType::Mixed, 9);
        assert_eq!(questions.len(), 9);
        assert_eq!(kinds(&questions).len(), 3);
    }

    #[test]
    fn test_same_seed_same_quiz() {
        let stats = uneven_countries();

        let first: Vec<FormattedQuestion> = QuizGenerator::seeded(&stats, 2024)
            .generate_mixed(12)
            .iter()
            .map(Question::format)
            .collect();
        let second: Vec<FormattedQuestion> = QuizGenerator::seeded(&stats, 2024)
            .generate_mixed(12)
            .iter()
            .map(Question::format)
            .collect();

        assert_eq!(first, second);
    }
}
