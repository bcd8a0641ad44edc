use drift_montecarlo::{MonteCarloOutput, TrackedPose};
use std::fmt;

/// Terminal-position statistics of every tracked pose, rendered as a table.
pub struct Summary<'a> {
    name: &'a str,
    output: &'a MonteCarloOutput,
}

impl<'a> Summary<'a> {
    pub fn new(name: &'a str, output: &'a MonteCarloOutput) -> Self {
        Summary { name, output }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ({} runs)", self.name, self.output.len())?;
        writeln!(
            f,
            "{:<20} {:>10} {:>10} {:>10} {:>10} {:>12}",
            "pose", "mean x", "mean y", "std x", "std y", "mean error"
        )?;

        for source in self.output.sources() {
            let Some(stats) = self.output.result_set(source).and_then(|set| set.stats()) else {
                continue;
            };
            let (sx, sy) = stats.std_dev();
            let error = match source {
                TrackedPose::Truth => String::from("-"),
                TrackedPose::Estimate(strategy) => self
                    .output
                    .mean_position_error(strategy)
                    .map(|e| format!("{:.4}", e))
                    .unwrap_or_else(|| String::from("-")),
            };
            writeln!(
                f,
                "{:<20} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>12}",
                source.to_string(),
                stats.mean_x,
                stats.mean_y,
                sx,
                sy,
                error
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_montecarlo::{MonteCarloEngine, SimulationConfig};

    #[test]
    fn test_summary_lists_every_pose() {
        let config = SimulationConfig::circular_correction().with_runs(4).with_seed(1);
        let output = MonteCarloEngine::new(&config).unwrap().run();
        let table = Summary::new("circle", &output).to_string();

        assert!(table.starts_with("== circle (4 runs)"));
        for label in ["true", "no-correction", "perfect-correction", "noisy-correction"] {
            assert!(table.lines().any(|l| l.starts_with(label)), "missing {}", label);
        }
    }

    #[test]
    fn test_summary_writes_into_formatter() {
        use std::fmt::Write;

        let config = SimulationConfig::straight_line_clean().with_runs(2).with_seed(3);
        let output = MonteCarloEngine::new(&config).unwrap().run();

        let mut buf = String::new();
        write!(buf, "{}", Summary::new("line", &output)).unwrap();
        assert_eq!(buf.lines().count(), 2 + output.sources().count());
        assert_eq!(buf, Summary::new("line", &output).to_string());
    }
}
