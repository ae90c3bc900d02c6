use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use statrs::statistics::Statistics;
use thiserror::Error;

use crate::runner::{GameOutcome, GameResult};

const CONFIDENCE_LEVEL: f64 = 0.95;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("no games were recorded")]
    Empty,
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("statistics failure: {0}")]
    Statistics(String),
}

/// Accumulates per-game outcomes into run-level statistics.
#[derive(Default)]
pub struct AnalyticsCollector {
    results: Vec<GameResult>,
    turns: Vec<f64>,
    dials: Vec<f64>,
    double_detector_uses: u32,
    total_latency_ms: f64,
    total_decisions: u64,
    strategies: BTreeMap<String, u32>,
}

impl AnalyticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_game(&mut self, outcome: &GameOutcome) {
        self.results.push(outcome.result);
        self.turns.push(outcome.turns as f64);
        self.dials.push(f64::from(outcome.detonator_dial));
        self.double_detector_uses += outcome.double_detector_uses;
        self.total_latency_ms += outcome.metrics.total_ms;
        self.total_decisions += u64::from(outcome.metrics.decisions);
        for (strategy, count) in &outcome.strategies {
            *self.strategies.entry(strategy.clone()).or_default() += count;
        }
    }

    pub fn finalize(self) -> Result<AnalyticsSummary, AnalyticsError> {
        let games = self.results.len();
        if games == 0 {
            return Err(AnalyticsError::Empty);
        }

        let count = |wanted: GameResult| self.results.iter().filter(|r| **r == wanted).count();
        let defused = count(GameResult::Defused);
        let exploded = count(GameResult::Exploded);
        let stalled = count(GameResult::Stalled);
        let defuse_rate = defused as f64 / games as f64;
        let defuse_ci95 = wilson_interval(defused, games)?;

        let turns_std_dev = if games > 1 {
            self.turns.iter().std_dev()
        } else {
            0.0
        };

        let average_ms_per_decision = if self.total_decisions == 0 {
            0.0
        } else {
            self.total_latency_ms / self.total_decisions as f64
        };

        Ok(AnalyticsSummary {
            games,
            defused,
            exploded,
            stalled,
            defuse_rate,
            defuse_ci95,
            turns_mean: self.turns.iter().mean(),
            turns_std_dev,
            dial_mean: self.dials.iter().mean(),
            double_detector_uses: self.double_detector_uses,
            average_ms_per_decision,
            strategies: self.strategies,
        })
    }
}

/// Wilson score interval for a success proportion.
fn wilson_interval(successes: usize, trials: usize) -> Result<(f64, f64), AnalyticsError> {
    if trials == 0 {
        return Ok((0.0, 0.0));
    }
    let normal =
        Normal::new(0.0, 1.0).map_err(|err| AnalyticsError::Statistics(err.to_string()))?;
    let z = normal.inverse_cdf(1.0 - (1.0 - CONFIDENCE_LEVEL) / 2.0);
    let n = trials as f64;
    let p = successes as f64 / n;
    let z2 = z * z;
    let centre = (p + z2 / (2.0 * n)) / (1.0 + z2 / n);
    let margin = z / (1.0 + z2 / n) * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt();
    Ok(((centre - margin).max(0.0), (centre + margin).min(1.0)))
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub games: usize,
    pub defused: usize,
    pub exploded: usize,
    pub stalled: usize,
    pub defuse_rate: f64,
    pub defuse_ci95: (f64, f64),
    pub turns_mean: f64,
    pub turns_std_dev: f64,
    pub dial_mean: f64,
    pub double_detector_uses: u32,
    pub average_ms_per_decision: f64,
    pub strategies: BTreeMap<String, u32>,
}

impl AnalyticsSummary {
    pub fn write_markdown(&self, run_id: &str, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        let mut rows = String::new();
        rows.push_str(&format!("# Self-play Summary: {run_id}\n\n"));
        rows.push_str("| Games | Defused | Exploded | Stalled | Defuse % | 95% CI | Avg turns | Turn σ | Avg dial | Avg ms/decision |\n");
        rows.push_str("|-------|---------|----------|---------|----------|--------|-----------|--------|----------|------------------|\n");
        rows.push_str(&format!(
            "| {games} | {defused} | {exploded} | {stalled} | {rate:.1}% | [{ci_low:.3}, {ci_high:.3}] | {turns:.2} | {sigma:.2} | {dial:.2} | {latency:.2} |\n",
            games = self.games,
            defused = self.defused,
            exploded = self.exploded,
            stalled = self.stalled,
            rate = self.defuse_rate * 100.0,
            ci_low = self.defuse_ci95.0,
            ci_high = self.defuse_ci95.1,
            turns = self.turns_mean,
            sigma = self.turns_std_dev,
            dial = self.dial_mean,
            latency = self.average_ms_per_decision,
        ));

        rows.push_str("\n## Strategies\n\n| Strategy | Plays | Share |\n|----------|-------|-------|\n");
        let total: u32 = self.strategies.values().sum();
        for (strategy, count) in &self.strategies {
            let share = if total == 0 {
                0.0
            } else {
                f64::from(*count) / f64::from(total)
            };
            rows.push_str(&format!(
                "| {strategy} | {count} | {share:.1}% |\n",
                share = share * 100.0
            ));
        }
        rows.push_str(&format!(
            "\nDouble detector used {} times.\n",
            self.double_detector_uses
        ));

        fs::write(path.as_ref(), rows).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })?;
        Ok(())
    }
}
