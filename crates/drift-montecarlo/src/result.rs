//! Terminal poses collected from a simulation.

use drift_kinematics::Pose;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::stats::PositionStats;
use crate::strategy::{OdometryStrategy, TrackedPose};

/// Terminal poses of one run: the true pose and every tracked estimate.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunResult {
    index: usize,
    steps: usize,
    truth: Pose,
    estimates: [Option<Pose>; 3],
}

impl RunResult {
    pub(crate) fn new(index: usize, steps: usize, truth: Pose, estimates: [Option<Pose>; 3]) -> Self {
        Self {
            index,
            steps,
            truth,
            estimates,
        }
    }

    /// Index of the run within its simulation.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of integration steps the run performed.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Terminal true pose.
    pub fn truth(&self) -> Pose {
        self.truth
    }

    /// Terminal estimate of `strategy`, if it was tracked.
    pub fn estimate(&self, strategy: OdometryStrategy) -> Option<Pose> {
        self.estimates[strategy.index()]
    }

    /// Terminal pose of `tracked`, if it was tracked.
    pub fn pose(&self, tracked: TrackedPose) -> Option<Pose> {
        match tracked {
            TrackedPose::Truth => Some(self.truth),
            TrackedPose::Estimate(strategy) => self.estimate(strategy),
        }
    }
}

/// Terminal `(x, y)` positions of one tracked pose, ordered by run index.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    source: TrackedPose,
    points: Vec<(f64, f64)>,
}

impl ResultSet {
    /// Which pose these positions were taken from.
    pub fn source(&self) -> TrackedPose {
        self.source
    }

    /// Number of positions, equal to the number of runs.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the set holds no positions.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The positions as a slice.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Iterates over the positions.
    pub fn iter(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.points.iter()
    }

    /// Sample statistics of the positions, `None` if the set is empty.
    pub fn stats(&self) -> Option<PositionStats> {
        PositionStats::from_points(&self.points)
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a (f64, f64);
    type IntoIter = std::slice::Iter<'a, (f64, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Everything a simulation produced, one [`RunResult`] per run in run order.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloOutput {
    strategies: Vec<OdometryStrategy>,
    runs: Vec<RunResult>,
}

impl MonteCarloOutput {
    pub(crate) fn new(strategies: Vec<OdometryStrategy>, runs: Vec<RunResult>) -> Self {
        Self { strategies, runs }
    }

    /// Per-run results, ordered by run index.
    pub fn runs(&self) -> &[RunResult] {
        &self.runs
    }

    /// Number of runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Returns `true` if no run was recorded.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Strategies whose estimates were tracked, in configuration order.
    pub fn tracked(&self) -> &[OdometryStrategy] {
        &self.strategies
    }

    /// Every tracked pose: the truth first, then each estimate.
    pub fn sources(&self) -> impl Iterator<Item = TrackedPose> + '_ {
        std::iter::once(TrackedPose::Truth).chain(self.strategies.iter().map(|s| TrackedPose::Estimate(*s)))
    }

    /// Terminal positions of `tracked`, or `None` if it was not tracked.
    pub fn result_set(&self, tracked: TrackedPose) -> Option<ResultSet> {
        if let TrackedPose::Estimate(strategy) = tracked {
            if !self.strategies.contains(&strategy) {
                return None;
            }
        }
        let points = self
            .runs
            .iter()
            .filter_map(|run| run.pose(tracked))
            .map(|pose| pose.position())
            .collect();
        Some(ResultSet { source: tracked, points })
    }

    /// Terminal true positions.
    pub fn truth(&self) -> ResultSet {
        let points = self.runs.iter().map(|run| run.truth.position()).collect();
        ResultSet {
            source: TrackedPose::Truth,
            points,
        }
    }

    /// Terminal positions estimated by `strategy`, `None` if it was not tracked.
    pub fn estimate(&self, strategy: OdometryStrategy) -> Option<ResultSet> {
        self.result_set(TrackedPose::Estimate(strategy))
    }

    /// `(x, y, x_est, y_est)` per run for `strategy`, `None` if it was not tracked.
    pub fn paired(&self, strategy: OdometryStrategy) -> Option<Vec<(f64, f64, f64, f64)>> {
        if !self.strategies.contains(&strategy) {
            return None;
        }
        self.runs
            .iter()
            .map(|run| {
                let estimate = run.estimate(strategy)?;
                Some((run.truth.x, run.truth.y, estimate.x, estimate.y))
            })
            .collect()
    }

    /// Mean Euclidean distance between the estimate of `strategy` and the true
    /// terminal position, `None` if it was not tracked or no run was recorded.
    pub fn mean_position_error(&self, strategy: OdometryStrategy) -> Option<f64> {
        if self.runs.is_empty() {
            return None;
        }
        let paired = self.paired(strategy)?;
        let total: f64 = paired
            .iter()
            .map(|&(x, y, x_est, y_est)| ((x - x_est).powi(2) + (y - y_est).powi(2)).sqrt())
            .sum();
        Some(total / paired.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output() -> MonteCarloOutput {
        let runs = (0..3)
            .map(|i| {
                let i = i as f64;
                let mut estimates = [None; 3];
                estimates[OdometryStrategy::PerfectCorrection.index()] = Some(Pose::new(i, 0.0, 0.0));
                RunResult::new(i as usize, 10, Pose::new(i, 1.0, 0.5), estimates)
            })
            .collect();
        MonteCarloOutput::new(vec![OdometryStrategy::PerfectCorrection], runs)
    }

    #[test]
    fn test_truth_and_estimate_sets() {
        let output = output();
        assert_eq!(output.len(), 3);
        assert_eq!(output.truth().points(), &[(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)]);

        let estimate = output.estimate(OdometryStrategy::PerfectCorrection).unwrap();
        assert_eq!(estimate.len(), 3);
        assert_eq!(estimate.source(), TrackedPose::Estimate(OdometryStrategy::PerfectCorrection));
        assert!(output.estimate(OdometryStrategy::NoCorrection).is_none());
    }

    #[test]
    fn test_paired_and_error() {
        let output = output();
        let paired = output.paired(OdometryStrategy::PerfectCorrection).unwrap();
        assert_eq!(paired[2], (2.0, 1.0, 2.0, 0.0));
        assert!(output.paired(OdometryStrategy::NoisyCorrection).is_none());

        let error = output.mean_position_error(OdometryStrategy::PerfectCorrection).unwrap();
        assert!((error - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sources() {
        let sources: Vec<TrackedPose> = output().sources().collect();
        assert_eq!(
            sources,
            vec![TrackedPose::Truth, TrackedPose::Estimate(OdometryStrategy::PerfectCorrection)]
        );
    }

    #[test]
    fn test_result_set_stats() {
        let stats = output().truth().stats().unwrap();
        assert_eq!(stats.count, 3);
        assert!((stats.mean_x - 1.0).abs() < 1e-12);
        assert_eq!(stats.var_y, 0.0);
    }
}
