pub mod error;
pub mod seed;

pub use error::LoadError;
pub use seed::sample_data;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::models::{Leg, Match, Statistics, Team, Tie};
use crate::utils::{closest_name, validate_team_name};

/// Country assigned to teams synthesized from a match table
pub const UNKNOWN_COUNTRY: &str = "Unknown";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DataFormat {
    #[default]
    Json,
    Csv,
}

// ── External record shapes ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uefa_coefficient: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEntry {
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub date: String,
    pub round: String,
    pub leg: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieEntry {
    pub first_leg_date: String,
    pub second_leg_date: String,
    pub round: String,
}

/// The structured (JSON) encoding: every collection is optional on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredData {
    #[serde(default)]
    pub teams: Vec<TeamEntry>,
    #[serde(default)]
    pub matches: Vec<MatchEntry>,
    #[serde(default)]
    pub ties: Vec<TieEntry>,
}

impl TryFrom<TeamEntry> for Team {
    type Error = LoadError;

    fn try_from(entry: TeamEntry) -> Result<Self, Self::Error> {
        if !validate_team_name(&entry.name) {
            return Err(LoadError::InvalidTeam(format!("bad team name '{}'", entry.name)));
        }
        if entry.country.trim().is_empty() {
            return Err(LoadError::InvalidTeam(format!("team '{}' has no country", entry.name)));
        }
        Ok(Team::new(entry.name.trim(), entry.country.trim(), entry.uefa_coefficient))
    }
}

impl From<&Team> for TeamEntry {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            country: team.country.clone(),
            uefa_coefficient: team.uefa_coefficient,
        }
    }
}

impl From<&Match> for MatchEntry {
    fn from(m: &Match) -> Self {
        Self {
            home_team: m.home_team.clone(),
            away_team: m.away_team.clone(),
            home_score: m.home_score,
            away_score: m.away_score,
            date: m.date.format(DATE_FORMAT).to_string(),
            round: m.round.clone(),
            leg: m.leg.to_string(),
        }
    }
}

impl From<&Statistics> for StructuredData {
    fn from(stats: &Statistics) -> Self {
        Self {
            teams: stats.teams.iter().map(TeamEntry::from).collect(),
            matches: stats.matches.iter().map(MatchEntry::from).collect(),
            ties: stats
                .ties
                .iter()
                .map(|t| TieEntry {
                    first_leg_date: t.first_leg.date.format(DATE_FORMAT).to_string(),
                    second_leg_date: t.second_leg.date.format(DATE_FORMAT).to_string(),
                    round: t.round.clone(),
                })
                .collect(),
        }
    }
}

// ── Loading ──────────────────────────────────────────────────────────────────

/// Load from a file in the given format. `teams_file` only applies to CSV.
pub fn load(
    path: &Path,
    format: DataFormat,
    teams_file: Option<&Path>,
) -> Result<Statistics, LoadError> {
    match format {
        DataFormat::Json => {
            if teams_file.is_some() {
                tracing::warn!("--teams-file is ignored for JSON input");
            }
            load_from_json(path)
        }
        DataFormat::Csv => load_from_csv(path, teams_file),
    }
}

pub fn load_from_json(path: &Path) -> Result<Statistics, LoadError> {
    let text = read_file(path)?;
    load_from_json_str(&text)
}

pub fn load_from_json_str(text: &str) -> Result<Statistics, LoadError> {
    let data: StructuredData = serde_json::from_str(text)?;
    load_from_structured(data)
}

/// Build `Statistics` from the structured encoding.
///
/// Team names in matches are resolved against `teams`; tie legs are resolved
/// by date against the parsed matches, taking the first match on that date.
pub fn load_from_structured(data: StructuredData) -> Result<Statistics, LoadError> {
    let teams = build_teams(data.teams)?;
    let names: HashSet<&str> = teams.iter().map(|t| t.name.as_str()).collect();

    let mut matches = Vec::with_capacity(data.matches.len());
    for entry in data.matches {
        matches.push(build_match(entry, &names, &teams)?);
    }

    let mut ties = Vec::with_capacity(data.ties.len());
    for entry in data.ties {
        let first_leg = find_leg(&matches, &entry.first_leg_date, &entry.round)?;
        let second_leg = find_leg(&matches, &entry.second_leg_date, &entry.round)?;
        ties.push(Tie::new(first_leg.clone(), second_leg.clone(), entry.round));
    }

    tracing::info!(
        "Loaded {} teams, {} matches, {} ties from structured data",
        teams.len(),
        matches.len(),
        ties.len()
    );

    Ok(Statistics::new(matches, ties, teams))
}

pub fn load_from_csv(
    matches_path: &Path,
    teams_path: Option<&Path>,
) -> Result<Statistics, LoadError> {
    let matches_file = open_file(matches_path)?;
    match teams_path {
        Some(path) => load_from_tabular(matches_file, Some(open_file(path)?)),
        None => load_from_tabular(matches_file, None::<fs::File>),
    }
}

/// Build `Statistics` from a match table and an optional team table.
///
/// Without a team table, teams are synthesized from the names in the match
/// table with country `Unknown`. Matches between the same pair of teams in the
/// same round are grouped; a group of exactly two becomes a tie with the
/// earlier match as first leg. Other groups stay in `matches` only.
pub fn load_from_tabular<M: Read, T: Read>(
    matches: M,
    teams: Option<T>,
) -> Result<Statistics, LoadError> {
    let entries: Vec<MatchEntry> = csv_reader(matches)
        .deserialize()
        .collect::<Result<_, csv::Error>>()?;

    let teams = match teams {
        Some(reader) => {
            let team_entries: Vec<TeamEntry> = csv_reader(reader)
                .deserialize()
                .collect::<Result<_, csv::Error>>()?;
            build_teams(team_entries)?
        }
        None => synthesize_teams(&entries),
    };
    let names: HashSet<&str> = teams.iter().map(|t| t.name.as_str()).collect();

    let mut parsed = Vec::with_capacity(entries.len());
    for entry in entries {
        parsed.push(build_match(entry, &names, &teams)?);
    }

    let ties = group_ties(&parsed);

    tracing::info!(
        "Loaded {} teams, {} matches, {} ties from tabular data",
        teams.len(),
        parsed.len(),
        ties.len()
    );

    Ok(Statistics::new(parsed, ties, teams))
}

// ── Saving ───────────────────────────────────────────────────────────────────

/// Write `stats` to `path` in the structured encoding.
///
/// Ties are stored by leg date and resolved to the first match on that date
/// when loaded, so a tie whose leg is not the first match on its date is
/// rejected with [`LoadError::AmbiguousLeg`] instead of being saved.
pub fn save_to_json(stats: &Statistics, path: &Path) -> Result<(), LoadError> {
    check_legs_resolvable(stats)?;
    write_structured(&StructuredData::from(stats), path)
}

fn check_legs_resolvable(stats: &Statistics) -> Result<(), LoadError> {
    for tie in &stats.ties {
        for leg in [&tie.first_leg, &tie.second_leg] {
            let first_on_date = stats.matches.iter().find(|m| m.date == leg.date);
            if first_on_date != Some(leg) {
                return Err(LoadError::AmbiguousLeg {
                    date: leg.date.format(DATE_FORMAT).to_string(),
                    round: tie.round.clone(),
                    leg: leg.to_string(),
                });
            }
        }
    }
    Ok(())
}

pub fn write_structured(data: &StructuredData, path: &Path) -> Result<(), LoadError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| LoadError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Wrote structured data to {}", path.display());
    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn open_file(path: &Path) -> Result<fs::File, LoadError> {
    fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader)
}

fn parse_date(value: &str) -> Result<NaiveDate, LoadError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| LoadError::InvalidDate {
        value: value.to_string(),
    })
}

fn build_teams(entries: Vec<TeamEntry>) -> Result<Vec<Team>, LoadError> {
    let mut seen = HashSet::new();
    let mut teams = Vec::with_capacity(entries.len());

    for entry in entries {
        let team = Team::try_from(entry)?;
        if !seen.insert(team.name.clone()) {
            return Err(LoadError::DuplicateTeam(team.name));
        }
        teams.push(team);
    }

    Ok(teams)
}

fn synthesize_teams(entries: &[MatchEntry]) -> Vec<Team> {
    let mut seen = HashSet::new();
    let mut teams = Vec::new();

    for entry in entries {
        for name in [entry.home_team.trim(), entry.away_team.trim()] {
            if seen.insert(name.to_string()) {
                teams.push(Team::new(name, UNKNOWN_COUNTRY, None));
            }
        }
    }

    tracing::debug!("Synthesized {} teams from match table", teams.len());
    teams
}

fn resolve_team(name: &str, names: &HashSet<&str>, teams: &[Team]) -> Result<String, LoadError> {
    let name = name.trim();
    if names.contains(name) {
        return Ok(name.to_string());
    }

    Err(LoadError::MissingTeam {
        name: name.to_string(),
        suggestion: closest_name(name, teams.iter().map(|t| t.name.as_str())),
    })
}

fn build_match(
    entry: MatchEntry,
    names: &HashSet<&str>,
    teams: &[Team],
) -> Result<Match, LoadError> {
    Ok(Match {
        home_team: resolve_team(&entry.home_team, names, teams)?,
        away_team: resolve_team(&entry.away_team, names, teams)?,
        home_score: entry.home_score,
        away_score: entry.away_score,
        date: parse_date(&entry.date)?,
        round: entry.round,
        leg: Leg::from(entry.leg),
    })
}

fn find_leg<'a>(matches: &'a [Match], date: &str, round: &str) -> Result<&'a Match, LoadError> {
    let wanted = parse_date(date)?;
    let mut on_date = matches.iter().filter(|m| m.date == wanted);

    let leg = on_date.next().ok_or_else(|| LoadError::MissingLeg {
        date: date.to_string(),
        round: round.to_string(),
    })?;

    let others = on_date.count();
    if others > 0 {
        tracing::warn!(
            "{} matches were played on {}; using '{}' as a leg of the '{}' tie",
            others + 1,
            wanted,
            leg,
            round
        );
    }

    Ok(leg)
}

fn group_ties(matches: &[Match]) -> Vec<Tie> {
    let mut order: Vec<(String, String, String)> = Vec::new();
    let mut groups: HashMap<(String, String, String), Vec<&Match>> = HashMap::new();

    for m in matches {
        // Legs are played home and away, so the pairing is unordered
        let (a, b) = if m.home_team <= m.away_team {
            (m.home_team.clone(), m.away_team.clone())
        } else {
            (m.away_team.clone(), m.home_team.clone())
        };
        let key = (a, b, m.round.clone());

        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(m);
    }

    let mut ties = Vec::new();
    for key in order {
        let Some(mut group) = groups.remove(&key) else {
            continue;
        };

        if group.len() != 2 {
            tracing::warn!(
                "{} vs {} in '{}' has {} matches; not treated as a two-legged tie",
                key.0,
                key.1,
                key.2,
                group.len()
            );
            continue;
        }

        group.sort_by_key(|m| m.date);
        if group[0].home_team != group[1].away_team {
            tracing::warn!(
                "{} hosted both matches against {} in '{}'; not treated as a two-legged tie",
                group[0].home_team,
                group[0].away_team,
                key.2
            );
            continue;
        }
        ties.push(Tie::new(group[0].clone(), group[1].clone(), group[0].round.clone()));
    }

    ties
}
