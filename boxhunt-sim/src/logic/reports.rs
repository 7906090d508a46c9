use anyhow::Result;
use boxhunt_game::{Strategy, reference_win_probability};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use super::RunSummary;

/// Serializable view of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub games: u64,
    pub master_seed: u64,
    pub participants: usize,
    pub max_opens: usize,
    pub max_in_flight: usize,
    pub peak_in_flight: usize,
    #[serde(with = "duration_serde")]
    pub elapsed: Duration,
    pub strategies: Vec<StrategyResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyResult {
    pub strategy: Strategy,
    pub wins: u64,
    pub win_probability: f64,
    pub reference_probability: f64,
}

impl From<&RunSummary> for RunReport {
    fn from(summary: &RunSummary) -> Self {
        let strategies = Strategy::ALL
            .iter()
            .map(|&strategy| StrategyResult {
                strategy,
                wins: summary.wins(strategy),
                win_probability: summary.win_probability(strategy),
                reference_probability: reference_win_probability(strategy, summary.plan.game),
            })
            .collect();
        Self {
            games: summary.plan.games,
            master_seed: summary.plan.master_seed,
            participants: summary.plan.game.participants,
            max_opens: summary.plan.game.max_opens,
            max_in_flight: summary.plan.max_in_flight,
            peak_in_flight: summary.peak_in_flight,
            elapsed: summary.elapsed,
            strategies,
        }
    }
}

/// Plain per-strategy win counts and probabilities, then the elapsed time.
///
/// With `verbose`, each strategy also gets its exact reference probability
/// and the run's observed peak concurrency is listed.
pub fn generate_console_report<W: Write + ?Sized>(
    writer: &mut W,
    summary: &RunSummary,
    verbose: bool,
) -> Result<()> {
    for strategy in Strategy::ALL {
        let label = strategy.contract_label();
        writeln!(writer, "wins with {label}: {}", summary.wins(strategy))?;
        writeln!(
            writer,
            "probability of win with {label}: {:.6}",
            summary.win_probability(strategy)
        )?;
        if verbose {
            let reference = reference_win_probability(strategy, summary.plan.game);
            writeln!(
                writer,
                "   {} {reference:.6}",
                "reference probability:".dimmed()
            )?;
        }
    }

    if verbose {
        writeln!(
            writer,
            "peak trials in flight: {}/{}",
            summary.peak_in_flight.to_string().cyan(),
            summary.plan.max_in_flight
        )?;
    }
    writeln!(writer, "takes time: {:?}", summary.elapsed)?;
    Ok(())
}

pub fn generate_json_report<W: Write + ?Sized>(writer: &mut W, summary: &RunSummary) -> Result<()> {
    let report = RunReport::from(summary);
    let json_output = serde_json::to_string_pretty(&report)?;
    writeln!(writer, "{json_output}")?;
    Ok(())
}

mod duration_serde {
    use serde::{Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::RunPlan;

    fn sample_summary() -> RunSummary {
        RunSummary {
            plan: RunPlan::new(1_000, 100, 1337),
            independent_wins: 0,
            cycle_wins: 317,
            peak_in_flight: 42,
            elapsed: Duration::from_millis(12),
        }
    }

    fn render_console(verbose: bool) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        generate_console_report(&mut out, &sample_summary(), verbose).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn console_report_prints_counts_probabilities_and_time() {
        let text = render_console(false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "wins with NO contract: 0",
                "probability of win with NO contract: 0.000000",
                "wins with contract: 317",
                "probability of win with contract: 0.317000",
                "takes time: 12ms",
            ]
        );
    }

    #[test]
    fn verbose_console_report_adds_reference_and_peak() {
        let text = render_console(true);
        assert!(text.contains("reference probability: 0.316753"));
        assert!(text.contains("peak trials in flight: 42/100"));
    }

    #[test]
    fn json_report_lists_both_strategies() {
        let mut out = Vec::new();
        generate_json_report(&mut out, &sample_summary()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["games"], 1_000);
        assert_eq!(value["elapsed"], 12);
        assert_eq!(value["strategies"][0]["strategy"], "independent_search");
        assert_eq!(value["strategies"][1]["wins"], 317);
        let probability = value["strategies"][1]["win_probability"].as_f64().unwrap();
        assert!((probability - 0.317).abs() < 1e-12);
    }
}
