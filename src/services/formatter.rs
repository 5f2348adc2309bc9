use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::{FormattedQuestion, Question};
use crate::utils::{escape_html, option_letter};

pub const QUIZ_TITLE: &str = "UEFA Champions League Qualifying Quiz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

/// Structured rendering of a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDocument {
    pub quiz_type: String,
    pub total_questions: usize,
    pub questions: Vec<FormattedQuestion>,
}

pub struct QuizFormatter;

impl QuizFormatter {
    pub fn render(questions: &[Question], format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(&Self::format_as_json(questions)),
            OutputFormat::Text => Ok(Self::format_as_text(questions)),
            OutputFormat::Html => Ok(Self::format_as_html(questions)),
        }
    }

    pub fn format_as_json(questions: &[Question]) -> QuizDocument {
        QuizDocument {
            quiz_type: "Champions League Qualifying Quiz".to_string(),
            total_questions: questions.len(),
            questions: questions.iter().map(Question::format).collect(),
        }
    }

    pub fn format_as_text(questions: &[Question]) -> String {
        let mut lines = vec![QUIZ_TITLE.to_string(), "=".repeat(40), String::new()];

        for (i, question) in questions.iter().enumerate() {
            let formatted = question.format();
            lines.push(format!("Question {}: {}", i + 1, question.text()));

            match formatted {
                FormattedQuestion::MultipleChoice { options, .. } => {
                    for (j, option) in options.iter().enumerate() {
                        lines.push(format!("  {}. {}", option_letter(j), option));
                    }
                }
                FormattedQuestion::TrueFalse { .. } => lines.push("  True / False".to_string()),
                FormattedQuestion::ShortAnswer { .. } => lines.push("  Answer: ____________".to_string()),
            }

            lines.push(String::new());
        }

        lines.join("\n")
    }

    pub fn format_as_html(questions: &[Question]) -> String {
        let mut html = String::from(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Champions League Qualifying Quiz</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; }
        .question { margin-bottom: 20px; }
        .options { margin-left: 20px; }
        .option { margin-bottom: 5px; }
    </style>
</head>
<body>
"#,
        );
        html.push_str(&format!("    <h1>{}</h1>\n", QUIZ_TITLE));

        for (i, question) in questions.iter().enumerate() {
            let n = i + 1;
            html.push_str("    <div class=\"question\">\n");
            html.push_str(&format!(
                "        <h3>Question {}: {}</h3>\n",
                n,
                escape_html(question.text())
            ));

            match question.format() {
                FormattedQuestion::MultipleChoice { options, .. } => {
                    html.push_str("        <div class=\"options\">\n");
                    for (j, option) in options.iter().enumerate() {
                        html.push_str(&format!(
                            "            <div class=\"option\"><label><input type=\"radio\" name=\"q{}\" value=\"{}\"> {}. {}</label></div>\n",
                            n,
                            j,
                            option_letter(j),
                            escape_html(option)
                        ));
                    }
                    html.push_str("        </div>\n");
                }
                FormattedQuestion::TrueFalse { .. } => {
                    html.push_str("        <div class=\"options\">\n");
                    for (value, label) in [("true", "True"), ("false", "False")] {
                        html.push_str(&format!(
                            "            <div class=\"option\"><label><input type=\"radio\" name=\"q{}\" value=\"{}\"> {}</label></div>\n",
                            n, value, label
                        ));
                    }
                    html.push_str("        </div>\n");
                }
                FormattedQuestion::ShortAnswer { .. } => {
                    html.push_str(&format!(
                        "        <input type=\"text\" name=\"q{}\" placeholder=\"Your answer...\">\n",
                        n
                    ));
                }
            }

            html.push_str("    </div>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}
