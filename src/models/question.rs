use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::utils::parse_truthy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::TrueFalse => "true_false",
            QuestionKind::ShortAnswer => "short_answer",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultipleChoiceQuestion {
    pub question_text: String,
    pub correct_answer: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub difficulty: Difficulty,
}

impl MultipleChoiceQuestion {
    /// Builds the option list from the correct answer plus distractors and
    /// shuffles it. Distractors that repeat the correct answer or each other
    /// are dropped, so exactly one option is ever correct.
    pub fn new<R: Rng + ?Sized>(
        question_text: impl Into<String>,
        correct_answer: impl Into<String>,
        wrong_answers: Vec<String>,
        rng: &mut R,
    ) -> Self {
        let correct_answer = correct_answer.into();

        let mut options = vec![correct_answer.clone()];
        let mut seen = vec![correct_answer.to_lowercase()];
        for wrong in wrong_answers {
            let folded = wrong.to_lowercase();
            if !seen.contains(&folded) {
                seen.push(folded);
                options.push(wrong);
            }
        }
        options.shuffle(rng);

        let correct_index = options
            .iter()
            .position(|o| *o == correct_answer)
            .unwrap_or_default();

        Self {
            question_text: question_text.into(),
            correct_answer,
            options,
            correct_index,
            difficulty: Difficulty::default(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Accepts either the option index ("0", "1", ...) or the option text.
    pub fn check_answer(&self, answer: &str) -> bool {
        match answer.trim().parse::<i64>() {
            Ok(index) => index == self.correct_index as i64,
            Err(_) => answer.trim().to_lowercase() == self.correct_answer.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrueFalseQuestion {
    pub question_text: String,
    pub is_true: bool,
    pub difficulty: Difficulty,
}

impl TrueFalseQuestion {
    pub fn new(question_text: impl Into<String>, is_true: bool) -> Self {
        Self {
            question_text: question_text.into(),
            is_true,
            difficulty: Difficulty::default(),
        }
    }

    pub fn check_answer(&self, answer: &str) -> bool {
        parse_truthy(answer) == Some(self.is_true)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShortAnswerQuestion {
    pub question_text: String,
    pub correct_answer: String,
    pub acceptable_answers: Vec<String>,
    pub difficulty: Difficulty,
}

impl ShortAnswerQuestion {
    pub fn new(question_text: impl Into<String>, correct_answer: impl Into<String>) -> Self {
        let correct_answer = correct_answer.into();
        Self {
            question_text: question_text.into(),
            acceptable_answers: vec![correct_answer.clone()],
            correct_answer,
            difficulty: Difficulty::default(),
        }
    }

    pub fn with_aliases(mut self, aliases: impl IntoIterator<Item = String>) -> Self {
        for alias in aliases {
            if !self.acceptable_answers.contains(&alias) {
                self.acceptable_answers.push(alias);
            }
        }
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn check_answer(&self, answer: &str) -> bool {
        let answer = answer.trim().to_lowercase();
        self.acceptable_answers
            .iter()
            .any(|acceptable| acceptable.to_lowercase() == answer)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Question {
    MultipleChoice(MultipleChoiceQuestion),
    TrueFalse(TrueFalseQuestion),
    ShortAnswer(ShortAnswerQuestion),
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::MultipleChoice(_) => QuestionKind::MultipleChoice,
            Question::TrueFalse(_) => QuestionKind::TrueFalse,
            Question::ShortAnswer(_) => QuestionKind::ShortAnswer,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Question::MultipleChoice(q) => &q.question_text,
            Question::TrueFalse(q) => &q.question_text,
            Question::ShortAnswer(q) => &q.question_text,
        }
    }

    pub fn format(&self) -> FormattedQuestion {
        match self {
            Question::MultipleChoice(q) => FormattedQuestion::MultipleChoice {
                question: q.question_text.clone(),
                options: q.options.clone(),
                correct_index: q.correct_index,
                difficulty: q.difficulty,
            },
            Question::TrueFalse(q) => FormattedQuestion::TrueFalse {
                question: q.question_text.clone(),
                correct_answer: q.is_true,
                difficulty: q.difficulty,
            },
            Question::ShortAnswer(q) => FormattedQuestion::ShortAnswer {
                question: q.question_text.clone(),
                correct_answer: q.correct_answer.clone(),
                difficulty: q.difficulty,
            },
        }
    }

    pub fn check_answer(&self, answer: &str) -> bool {
        match self {
            Question::MultipleChoice(q) => q.check_answer(answer),
            Question::TrueFalse(q) => q.check_answer(answer),
            Question::ShortAnswer(q) => q.check_answer(answer),
        }
    }
}

impl From<MultipleChoiceQuestion> for Question {
    fn from(q: MultipleChoiceQuestion) -> Self {
        Question::MultipleChoice(q)
    }
}

impl From<TrueFalseQuestion> for Question {
    fn from(q: TrueFalseQuestion) -> Self {
        Question::TrueFalse(q)
    }
}

impl From<ShortAnswerQuestion> for Question {
    fn from(q: ShortAnswerQuestion) -> Self {
        Question::ShortAnswer(q)
    }
}

/// Serializable view of a question, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormattedQuestion {
    MultipleChoice {
        question: String,
        options: Vec<String>,
        correct_index: usize,
        difficulty: Difficulty,
    },
    TrueFalse {
        question: String,
        correct_answer: bool,
        difficulty: Difficulty,
    },
    ShortAnswer {
        question: String,
        correct_answer: String,
        difficulty: Difficulty,
    },
}
