//! Probability-vs-time curve generation.
//!
//! A curve is the aggregator evaluated across an evenly spaced time grid
//! with fixed age/sex covariates: the caller gets one `(t, mean, lo, hi)`
//! point per grid value, sorted ascending in `t`, ready for band plotting.

use crate::aggregate::{PredictError, aggregate};
use crate::bundle::PosteriorBundle;
use crate::covariates::{BaseInput, standardize};
use crate::params::ParameterIndex;

/// One point of a probability-vs-time curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// Time in minutes, in `[0, cap_minutes]`.
    pub t: f64,
    pub mean: f64,
    pub lo: f64,
    pub hi: f64,
}

/// An inclusive, evenly spaced grid of `point_count` values over `[0, cap]`.
///
/// A single-point grid is `{0}`; a zero-point grid is empty.
fn time_grid(cap: f64, point_count: usize) -> Vec<f64> {
    match point_count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (point_count - 1) as f64;
            (0..point_count)
                .map(|i| (cap * i as f64 / last).clamp(0.0, cap))
                .collect()
        }
    }
}

/// Evaluates the time-dependent branch across a time grid.
///
/// Age and sex are standardized once; only the time slot varies across the
/// grid. Each point carries the same summary the pointwise entry point
/// would produce for that time.
pub fn curve(
    bundle: &PosteriorBundle,
    index: &ParameterIndex,
    base: &BaseInput,
    point_count: usize,
) -> Result<Vec<CurvePoint>, PredictError> {
    if bundle.n_draws() == 0 {
        return Err(PredictError::InsufficientDraws);
    }

    let std = standardize(bundle, &base.at_time(0.0));
    let mut points = Vec::with_capacity(point_count);
    for t in time_grid(bundle.cap_minutes, point_count) {
        let result = aggregate(bundle, index, &std.with_time(t), true, false)?;
        points.push(CurvePoint {
            t,
            mean: result.mean,
            lo: result.lo,
            hi: result.hi,
        });
    }
    Ok(points)
}
