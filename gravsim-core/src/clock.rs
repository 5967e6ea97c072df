//! Time grid and run lifecycle

use crate::config::Parameters;

/// Largest number of ticks a single run may take
pub const MAX_TICKS: usize = 10_000_000;

/// Lifecycle of a domain run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Completed,
    /// A tick failed; trajectories stop at the last completed tick
    Aborted,
}

/// Evenly spaced tick boundaries from 0 to `t_end`
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    points: Vec<f64>,
}

impl TimeGrid {
    /// `ceil(t_end / dt) + 1` points spanning `[0, t_end]`.
    /// Returns `None` unless both values are finite and positive and the
    /// grid has at most [`MAX_TICKS`] ticks.
    pub fn new(params: &Parameters) -> Option<Self> {
        let n = tick_count(params)? + 1;
        let t_end = params.t_end;
        let spacing = t_end / (n - 1) as f64;
        let mut points: Vec<f64> = (0..n).map(|i| i as f64 * spacing).collect();
        // pin the endpoint so rounding in the spacing never overshoots
        points[n - 1] = t_end;

        Some(Self { points })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of ticks, one per consecutive pair of points
    pub fn ticks(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// `dt` of each tick, in order
    pub fn intervals(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.windows(2).map(|w| w[1] - w[0])
    }

    pub fn t_end(&self) -> f64 {
        self.points.last().copied().unwrap_or(0.0)
    }
}

/// Ticks a grid built from `params` would have, `None` when the parameters
/// are degenerate or the count exceeds [`MAX_TICKS`]
pub fn tick_count(params: &Parameters) -> Option<usize> {
    let Parameters { dt, t_end, .. } = *params;
    if !(dt.is_finite() && t_end.is_finite() && dt > 0.0 && t_end > 0.0) {
        return None;
    }

    let ticks = (t_end / dt).ceil();
    if !ticks.is_finite() || ticks > MAX_TICKS as f64 {
        return None;
    }
    Some(ticks as usize)
}
