use std::path::PathBuf;

use thiserror::Error;

/// Failures while building `Statistics` from an external source.
///
/// A load either succeeds completely or returns one of these; partial
/// data is never handed back.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("match references unknown team '{name}'{}", did_you_mean(.suggestion))]
    MissingTeam {
        name: String,
        suggestion: Option<String>,
    },

    #[error("tie in '{round}' references leg date {date} but no match was played on that date")]
    MissingLeg { date: String, round: String },

    #[error(
        "cannot save tie leg '{leg}' in '{round}': an earlier match was played on {date}, \
         so the leg would not be found again on reload"
    )]
    AmbiguousLeg {
        date: String,
        round: String,
        leg: String,
    },

    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("team '{0}' is declared more than once")]
    DuplicateTeam(String),

    #[error("invalid team record: {0}")]
    InvalidTeam(String),
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map_or(String::new(), |s| format!(" (did you mean '{}'?)", s))
}
