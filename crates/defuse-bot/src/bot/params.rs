use defuse_core::belief::MonteCarloConfig;
use std::time::Duration;

/// Tunable constants for the heuristic planners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotParams {
    /// Monte Carlo trials per probabilistic decision.
    pub mc_iterations: usize,
    pub mc_time_cap: Option<Duration>,
    /// Minimum absolute gain a double-detector pair needs over the best single target.
    pub dd_min_gain: f64,
    /// Single-target probability at which the double detector is not considered.
    pub certainty: f64,
    /// A target is skipped when its red probability exceeds this share of its match probability.
    pub red_guard_ratio: f64,
    /// Per-slot cap when scoring hand uncertainty for info-token picks.
    pub uncertainty_cap: usize,
}

impl Default for BotParams {
    fn default() -> Self {
        Self {
            mc_iterations: 1000,
            mc_time_cap: None,
            dd_min_gain: 0.15,
            certainty: 0.9,
            red_guard_ratio: 0.1,
            uncertainty_cap: 4,
        }
    }
}

impl BotParams {
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub fn monte_carlo(&self) -> MonteCarloConfig {
        MonteCarloConfig {
            iterations: self.mc_iterations,
            time_cap: self.mc_time_cap,
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.mc_iterations = iterations;
        self
    }

    pub(crate) fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let mc_iterations = read("DEFUSE_MC_ITERATIONS")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(defaults.mc_iterations);

        let mc_time_cap = read("DEFUSE_MC_TIME_CAP_MS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(Duration::from_millis);

        let dd_min_gain = read("DEFUSE_DD_MIN_GAIN")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite() && (0.0..=1.0).contains(value))
            .unwrap_or(defaults.dd_min_gain);

        let red_guard_ratio = read("DEFUSE_RED_GUARD_RATIO")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite() && *value >= 0.0)
            .unwrap_or(defaults.red_guard_ratio);

        Self {
            mc_iterations,
            mc_time_cap,
            dd_min_gain,
            red_guard_ratio,
            ..defaults
        }
    }
}
