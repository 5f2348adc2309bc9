use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::{self, seed::SAMPLE_FILE_NAME, DataFormat};
use crate::models::{Statistics, TieOutcome};
use crate::services::{Analyzer, OutputFormat, QuizFormatter, QuizGenerator, QuizType};

pub struct QuizOptions {
    pub data_file: PathBuf,
    pub format: DataFormat,
    pub teams_file: Option<PathBuf>,
    pub questions: usize,
    pub quiz_type: QuizType,
    pub output_format: OutputFormat,
    pub output_file: Option<PathBuf>,
    pub seed: Option<u64>,
}

fn load_statistics(
    data_file: &Path,
    format: DataFormat,
    teams_file: Option<&Path>,
) -> Result<Statistics> {
    let stats = data::load(data_file, format, teams_file)
        .with_context(|| format!("failed to load {}", data_file.display()))?;
    Ok(stats)
}

pub fn analyze(data_file: &Path, format: DataFormat, teams_file: Option<&Path>) -> Result<()> {
    let stats = load_statistics(data_file, format, teams_file).context("Error analyzing data")?;
    let analyzer = Analyzer::new(&stats);

    let summary = analyzer.tournament_summary();
    println!("\n📊 Tournament Summary");
    println!("{}", "=".repeat(40));
    println!("Total Teams: {}", summary.total_teams);
    println!("Total Matches: {}", summary.total_matches);
    println!("Total Goals: {}", summary.total_goals);
    println!("Average Goals per Match: {}", summary.average_goals_per_match);
    println!("Total Ties: {}", summary.total_ties);

    println!("\n🏆 Top Scoring Teams");
    println!("{}", "=".repeat(40));
    for (i, record) in stats.top_scorers(5).iter().enumerate() {
        println!("{}. {} - {} goals", i + 1, record.team, record.stats.goals_for);
    }

    println!("\n📈 Round Statistics");
    println!("{}", "=".repeat(40));
    for round in analyzer.round_statistics() {
        println!(
            "{}: {} matches, {} goals (avg: {})",
            round.round, round.matches, round.total_goals, round.average_goals
        );
        if let Some(m) = round.highest_scoring_match {
            println!("   Highest scoring: {} ({})", m, m.date.format("%Y-%m-%d"));
        }
    }

    println!("\n🌍 Country Performance");
    println!("{}", "=".repeat(40));
    for country in analyzer.country_performance() {
        println!(
            "{}: {} team(s), {} matches, {} wins, {}-{} goals",
            country.country,
            country.teams,
            country.total_matches,
            country.total_wins,
            country.total_goals_for,
            country.total_goals_against
        );
    }

    if !stats.ties.is_empty() {
        println!("\n⚔️  Ties");
        println!("{}", "=".repeat(40));
        for tie in &stats.ties {
            match tie.outcome() {
                TieOutcome::Decided(winner) => {
                    println!("{} ({}) - {} go through", tie, tie.round, winner)
                }
                TieOutcome::Level => println!("{} ({}) - level on aggregate", tie, tie.round),
            }
        }
    }

    Ok(())
}

pub fn quiz(options: &QuizOptions) -> Result<()> {
    let stats = load_statistics(&options.data_file, options.format, options.teams_file.as_deref())
        .context("Error generating quiz")?;

    let seed = resolve_seed(options.seed);
    let mut generator = QuizGenerator::seeded(&stats, seed);
    let questions = generator.generate(options.quiz_type, options.questions);

    tracing::info!(
        "Generated {} {:?} questions (seed {})",
        questions.len(),
        options.quiz_type,
        seed
    );

    let content = QuizFormatter::render(&questions, options.output_format)
        .context("Error generating quiz")?;

    match &options.output_file {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("failed to write quiz to {}", path.display()))?;
            println!("✅ Quiz saved to {}", path.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}

pub fn create_sample_data(output_dir: Option<PathBuf>) -> Result<()> {
    let output_dir = output_dir.unwrap_or_else(default_data_dir);
    let output_file = output_dir.join(SAMPLE_FILE_NAME);

    data::write_structured(&data::sample_data(), &output_file)
        .with_context(|| format!("failed to create sample data in {}", output_dir.display()))?;

    println!("✅ Sample data created at {}", output_file.display());
    println!("💡 You can now run: clq analyze {}", output_file.display());
    println!("💡 Or generate a quiz: clq quiz {}", output_file.display());

    Ok(())
}

pub fn convert(
    data_file: &Path,
    format: DataFormat,
    teams_file: Option<&Path>,
    output: &Path,
) -> Result<()> {
    let stats = load_statistics(data_file, format, teams_file).context("Error converting data")?;

    data::save_to_json(&stats, output)
        .with_context(|| format!("failed to save {}", output.display()))?;

    println!(
        "✅ Saved {} teams, {} matches, {} ties to {}",
        stats.teams.len(),
        stats.matches.len(),
        stats.ties.len(),
        output.display()
    );

    Ok(())
}

fn default_data_dir() -> PathBuf {
    env::var("CLQ_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data"))
}

/// Explicit seed, else `CLQ_SEED`, else a fresh random one
fn resolve_seed(explicit: Option<u64>) -> u64 {
    if let Some(seed) = explicit {
        return seed;
    }

    if let Ok(value) = env::var("CLQ_SEED") {
        match value.trim().parse() {
            Ok(seed) => return seed,
            Err(_) => tracing::warn!("Ignoring CLQ_SEED={:?}: not an unsigned integer", value),
        }
    }

    let seed = rand::random::<u64>();
    tracing::info!("No seed given, using {} (pass --seed {} to reproduce)", seed, seed);
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("clq_cli_{}", name));
        let _ = fs::remove_dir_all(&p);
        fs::create_dir_all(&p).unwrap();
        p
    }

    #[test]
    fn test_explicit_seed_wins() {
        assert_eq!(resolve_seed(Some(17)), 17);
    }

    #[test]
    fn test_sample_data_round_trip_through_commands() {
        let dir = tmp_dir("sample");
        create_sample_data(Some(dir.clone())).unwrap();

        let sample = dir.join(SAMPLE_FILE_NAME);
        analyze(&sample, DataFormat::Json, None).unwrap();

        let quiz_file = dir.join("quiz.json");
        quiz(&QuizOptions {
            data_file: sample.clone(),
            format: DataFormat::Json,
            teams_file: None,
            questions: 9,
            quiz_type: QuizType::Mixed,
            output_format: OutputFormat::Json,
            output_file: Some(quiz_file.clone()),
            seed: Some(1),
        })
        .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&quiz_file).unwrap()).unwrap();
        let total = value["total_questions"].as_u64().unwrap();
        assert!(total > 0 && total <= 9);
        assert_eq!(value["questions"].as_array().unwrap().len() as u64, total);

        let converted = dir.join("converted.json");
        convert(&sample, DataFormat::Json, None, &converted).unwrap();
        let reloaded = data::load_from_json(&converted).unwrap();
        assert_eq!(reloaded.ties.len(), 2);
    }

    #[test]
    fn test_load_failure_is_an_error() {
        let dir = tmp_dir("bad");
        let path = dir.join("bad.json");
        fs::write(
            &path,
            r#"{"teams": [], "matches": [{"home_team": "A", "away_team": "B", "home_score": 1,
                "away_score": 0, "date": "2023-07-11", "round": "R", "leg": "First Leg"}]}"#,
        )
        .unwrap();

        let err = analyze(&path, DataFormat::Json, None).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown team 'A'"));
    }

    #[test]
    fn test_convert_refuses_ties_it_cannot_rebuild() {
        let dir = tmp_dir("convert_shared_dates");
        let csv = dir.join("matches.csv");
        fs::write(
            &csv,
            "home_team,away_team,home_score,away_score,date,round,leg\n\
             A,B,1,0,2023-07-11,R1,First Leg\n\
             C,D,3,3,2023-07-11,R1,First Leg\n\
             B,A,0,0,2023-07-18,R1,Second Leg\n\
             D,C,2,0,2023-07-18,R1,Second Leg\n",
        )
        .unwrap();

        let output = dir.join("converted.json");
        let err = convert(&csv, DataFormat::Csv, None, &output).unwrap_err();
        assert!(format!("{:#}", err).contains("cannot save tie leg 'C 3-3 D'"));
        assert!(!output.exists());
    }
}
