use std::time::Duration;

#[derive(Debug, Default)]
pub(crate) struct DecisionMetrics {
    total: Duration,
    decisions: u32,
}

impl DecisionMetrics {
    pub(crate) fn record(&mut self, duration: Duration) -> f64 {
        self.total += duration;
        self.decisions += 1;
        duration.as_secs_f64() * 1000.0
    }

    pub(crate) fn finalize(self) -> DecisionSummary {
        let avg_ms = if self.decisions == 0 {
            0.0
        } else {
            self.total.as_secs_f64() * 1000.0 / f64::from(self.decisions)
        };

        DecisionSummary {
            decisions: self.decisions,
            avg_ms_per_decision: avg_ms,
            total_ms: self.total.as_secs_f64() * 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionSummary {
    pub decisions: u32,
    pub avg_ms_per_decision: f64,
    pub total_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_over_recorded_decisions() {
        let mut metrics = DecisionMetrics::default();
        metrics.record(Duration::from_millis(4));
        metrics.record(Duration::from_millis(2));
        let summary = metrics.finalize();
        assert_eq!(summary.decisions, 2);
        assert!((summary.avg_ms_per_decision - 3.0).abs() < 1e-9);
        assert!((summary.total_ms - 6.0).abs() < 1e-9);
    }

    #[test]
    fn empty_metrics_average_to_zero() {
        let summary = DecisionMetrics::default().finalize();
        assert_eq!(summary.decisions, 0);
        assert_eq!(summary.avg_ms_per_decision, 0.0);
    }
}
