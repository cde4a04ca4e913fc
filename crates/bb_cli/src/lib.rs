//! bb_cli support library
//!
//! Roster and config loading (JSON or YAML by extension) and the plain-text renderings
//! the command line prints.

use anyhow::{Context, Result};
use bb_core::models::{GameResult, Team, TeamSide};
use bb_core::EngineConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref(),
        Some("yaml" | "yml")
    )
}

fn load_document<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} file {}", path.display()))?;
    if is_yaml(path) {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {what} YAML {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {what} JSON {}", path.display()))
    }
}

/// Load a roster from a `.json`, `.yaml` or `.yml` file and validate it.
pub fn load_team(path: &Path) -> Result<Team> {
    let team: Team = load_document(path, "roster")?;
    team.validate()
        .with_context(|| format!("Invalid roster in {}", path.display()))?;
    Ok(team)
}

pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let config: EngineConfig = load_document(path, "engine config")?;
    config
        .validate()
        .with_context(|| format!("Invalid engine config in {}", path.display()))?;
    Ok(config)
}

/// Linescore with R/H/E columns.
pub fn format_linescore(result: &GameResult) -> String {
    let innings = result.linescore.innings();
    let width = result.away_team.len().max(result.home_team.len()).max(4);
    let mut out = String::new();

    let header: Vec<String> = (1..=innings).map(|i| format!("{i:>3}")).collect();
    let _ = writeln!(out, "{:width$} {}    R   H   E", "", header.join(""));

    for side in [TeamSide::Away, TeamSide::Home] {
        let (name, cells): (&str, Vec<String>) = match side {
            TeamSide::Away => (
                &result.away_team,
                result.linescore.away.iter().map(|r| format!("{r:>3}")).collect(),
            ),
            TeamSide::Home => (
                &result.home_team,
                result
                    .linescore
                    .home
                    .iter()
                    .map(|r| r.map_or_else(|| format!("{:>3}", "X"), |r| format!("{r:>3}")))
                    .collect(),
            ),
        };
        let totals = result.totals(side);
        let _ = writeln!(
            out,
            "{name:width$} {} {:>4}{:>4}{:>4}",
            cells.join(""),
            totals.runs,
            totals.hits,
            totals.errors
        );
    }
    out
}

fn format_team_box(out: &mut String, result: &GameResult, team: &Team, pitchers_used: &[bb_core::PlayerId]) {
    let _ = writeln!(out, "\n{}", team.name);
    let _ = writeln!(out, "{:<24} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3}", "Batting", "AB", "R", "H", "RBI", "BB", "SO", "HR");
    for player in &team.lineup {
        let Some(stats) = result.stats_for(&player.id) else { continue };
        let b = &stats.batting;
        let _ = writeln!(
            out,
            "{:<24} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3}",
            format!("{} {}", player.name, player.position),
            b.at_bats,
            b.runs,
            b.hits,
            b.rbi,
            b.walks,
            b.strikeouts,
            b.home_runs
        );
    }

    let _ = writeln!(out, "{:<24} {:>5} {:>3} {:>3} {:>3} {:>3} {:>3}", "Pitching", "IP", "H", "R", "BB", "SO", "NP");
    for id in pitchers_used {
        let (Some(player), Some(stats)) = (team.player(id), result.stats_for(id)) else { continue };
        let p = &stats.pitching;
        let _ = writeln!(
            out,
            "{:<24} {:>5} {:>3} {:>3} {:>3} {:>3} {:>3}",
            player.name,
            p.innings_pitched(),
            p.hits,
            p.runs,
            p.walks,
            p.strikeouts,
            p.pitches
        );
    }
}

/// Linescore plus batting and pitching lines for both clubs.
pub fn format_box_score(result: &GameResult, home: &Team, away: &Team) -> String {
    let mut out = format_linescore(result);
    format_team_box(&mut out, result, away, &result.away_pitchers_used);
    format_team_box(&mut out, result, home, &result.home_pitchers_used);
    let _ = writeln!(out, "\nFinal: {:?} after {} innings (seed {})", result.end, result.innings_played, result.seed);
    out
}

/// One line per at-bat.
pub fn format_play_by_play(result: &GameResult) -> String {
    let mut out = String::new();
    for play in &result.plays {
        let _ = writeln!(
            out,
            "{} {:>2} | {} outs | {:<8} {:<22} {:<10} | {}-{}",
            play.half.label(),
            play.inning,
            play.before.outs,
            play.batter,
            play.outcome.label(),
            play.notation,
            play.after.score.away,
            play.after.score.home
        );
    }
    out
}

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct BatchSummary {
    pub games: usize,
    pub home_wins: usize,
    pub away_wins: usize,
    pub ties: usize,
    pub extra_innings: usize,
    pub avg_home_runs_scored: f64,
    pub avg_away_runs_scored: f64,
    pub avg_plays: f64,
}

impl BatchSummary {
    pub fn from_results(results: &[GameResult]) -> Self {
        let mut summary = Self { games: results.len(), ..Self::default() };
        if results.is_empty() {
            return summary;
        }
        let (mut home_runs, mut away_runs, mut plays) = (0u64, 0u64, 0usize);
        for result in results {
            match result.winner() {
                Some(TeamSide::Home) => summary.home_wins += 1,
                Some(TeamSide::Away) => summary.away_wins += 1,
                None => summary.ties += 1,
            }
            if result.innings_played > 9 {
                summary.extra_innings += 1;
            }
            home_runs += result.final_score.home as u64;
            away_runs += result.final_score.away as u64;
            plays += result.plays.len();
        }
        let n = results.len() as f64;
        summary.avg_home_runs_scored = home_runs as f64 / n;
        summary.avg_away_runs_scored = away_runs as f64 / n;
        summary.avg_plays = plays as f64 / n;
        summary
    }
}
