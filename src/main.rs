mod cli;
mod data;
mod models;
mod services;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::data::DataFormat;
use crate::services::{OutputFormat, QuizType};

#[derive(Parser)]
#[command(name = "clq")]
#[command(version)]
#[command(about = "UEFA Champions League qualifying statistics and quiz generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze qualifying statistics from a data file
    Analyze {
        data_file: PathBuf,
        /// Format of the input data file
        #[arg(long, value_enum, default_value_t = DataFormat::Json)]
        format: DataFormat,
        /// Separate teams file for CSV input
        #[arg(long)]
        teams_file: Option<PathBuf>,
    },
    /// Generate a quiz from qualifying statistics
    Quiz {
        data_file: PathBuf,
        #[arg(long, value_enum, default_value_t = DataFormat::Json)]
        format: DataFormat,
        #[arg(long)]
        teams_file: Option<PathBuf>,
        /// Number of questions to generate
        #[arg(long, default_value = "15")]
        questions: usize,
        #[arg(long, value_enum, default_value_t = QuizType::Mixed)]
        quiz_type: QuizType,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output_format: OutputFormat,
        /// File to save the quiz to (prints to stdout when omitted)
        #[arg(long)]
        output_file: Option<PathBuf>,
        /// Seed for reproducible quizzes (falls back to CLQ_SEED)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Create sample qualifying data for testing
    CreateSampleData {
        /// Directory to create sample data in (falls back to CLQ_DATA_DIR, then ./data)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Load a data file and save it in the structured JSON format
    Convert {
        data_file: PathBuf,
        #[arg(long, value_enum, default_value_t = DataFormat::Csv)]
        format: DataFormat,
        #[arg(long)]
        teams_file: Option<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { data_file, format, teams_file } => {
            tracing::info!("Analyzing {}", data_file.display());
            cli::analyze(&data_file, format, teams_file.as_deref())?;
        }
        Commands::Quiz {
            data_file,
            format,
            teams_file,
            questions,
            quiz_type,
            output_format,
            output_file,
            seed,
        } => {
            tracing::info!("Generating quiz from {}", data_file.display());
            cli::quiz(&cli::QuizOptions {
                data_file,
                format,
                teams_file,
                questions,
                quiz_type,
                output_format,
                output_file,
                seed,
            })?;
        }
        Commands::CreateSampleData { output_dir } => {
            cli::create_sample_data(output_dir)?;
        }
        Commands::Convert { data_file, format, teams_file, output } => {
            tracing::info!("Converting {} to structured JSON", data_file.display());
            cli::convert(&data_file, format, teams_file.as_deref(), &output)?;
        }
    }

    Ok(())
}
