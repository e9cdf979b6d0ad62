//! Discovery model: elapsed session time to per-tick success probability.
//!
//! This is a deliberately simple non-stationary Bernoulli process. Each
//! tick draws once; draws are independent and the only memory is the
//! elapsed time itself. It is not a calibrated model.

use crate::rng::SessionRng;

const MS_PER_MINUTE: f64 = 60_000.0;

/// Lower bound of each band in minutes, with its probability.
const BANDS: [(f64, f64); 5] = [
    (0.0, 0.0005),
    (2.0, 0.001),
    (5.0, 0.002),
    (10.0, 0.005),
    (20.0, 0.01),
];

/// Maps session progress to a success probability for one tick.
pub trait ProbabilityModel: Send {
    /// `elapsed_ms` since the session clock started; `attempt` is the
    /// 1-based tick number since the last reset.
    fn probability(&self, elapsed_ms: u64, attempt: u64) -> f64;
}

/// The production step curve.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepCurve;

impl StepCurve {
    pub fn probability_at_minutes(minutes: f64) -> f64 {
        BANDS
            .iter()
            .rev()
            .find(|(from, _)| minutes >= *from)
            .map(|(_, p)| *p)
            .unwrap_or(BANDS[0].1)
    }
}

impl ProbabilityModel for StepCurve {
    fn probability(&self, elapsed_ms: u64, _attempt: u64) -> f64 {
        Self::probability_at_minutes(elapsed_ms as f64 / MS_PER_MINUTE)
    }
}

impl<F> ProbabilityModel for F
where
    F: Fn(u64, u64) -> f64 + Send,
{
    fn probability(&self, elapsed_ms: u64, attempt: u64) -> f64 {
        self(elapsed_ms, attempt)
    }
}

/// Draw once and compare against `p`.
pub fn decide(rng: &mut SessionRng, p: f64) -> bool {
    rng.unit() < p
}
