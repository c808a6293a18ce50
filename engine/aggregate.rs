//! Posterior aggregation: per-draw probabilities into mean and interval.
//!
//! Every draw is evaluated independently, so the sweep over the draw matrix
//! runs under rayon with no synchronization beyond the final collect. The
//! summary is the arithmetic mean plus the central 95% credible interval
//! from linear-interpolated quantiles.

use crate::bundle::PosteriorBundle;
use crate::covariates::StdCovariates;
use crate::evaluate::evaluate_draw;
use crate::params::{ParameterIndex, ResolveError};
use ndarray::Axis;
use ndarray::parallel::prelude::*;
use thiserror::Error;

/// Lower bound of the central 95% credible interval.
const LO_QUANTILE: f64 = 0.025;
/// Upper bound of the central 95% credible interval.
const HI_QUANTILE: f64 = 0.975;

/// The posterior-predictive summary for one input.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Arithmetic mean of the per-draw probabilities.
    pub mean: f64,
    /// 2.5th percentile of the per-draw probabilities.
    pub lo: f64,
    /// 97.5th percentile of the per-draw probabilities.
    pub hi: f64,
    /// The per-draw probabilities themselves, sorted ascending, when the
    /// caller asked to keep them.
    pub samples: Option<Vec<f64>>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("The bundle contains no posterior draws, so no prediction can be formed.")]
    InsufficientDraws,
}

/// Quantile of pre-sorted samples by linear interpolation (Type 7 in R).
///
/// `quantile(sorted, 0.0)` is the minimum, `quantile(sorted, 1.0)` the
/// maximum, and the estimator is monotonic non-decreasing in `q`.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    debug_assert!(n > 0, "quantile of an empty sample set");
    let pos = (q * (n as f64 - 1.0)).clamp(0.0, n as f64 - 1.0);
    let base = pos.floor() as usize;
    let frac = pos - base as f64;
    if base + 1 < n {
        sorted[base] * (1.0 - frac) + sorted[base + 1] * frac
    } else {
        sorted[base]
    }
}

/// Runs the evaluator over every draw and summarizes the result.
///
/// `keep_samples` retains the sorted per-draw probabilities in the result;
/// the summary itself is identical either way.
pub fn aggregate(
    bundle: &PosteriorBundle,
    index: &ParameterIndex,
    std: &StdCovariates,
    use_time: bool,
    keep_samples: bool,
) -> Result<PredictionResult, PredictError> {
    if bundle.draws.nrows() == 0 {
        return Err(PredictError::InsufficientDraws);
    }

    let mut samples: Vec<f64> = bundle
        .draws
        .axis_iter(Axis(0))
        .into_par_iter()
        .map(|draw| evaluate_draw(draw, index, std, use_time))
        .collect();
    samples.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    let lo = quantile(&samples, LO_QUANTILE);
    let hi = quantile(&samples, HI_QUANTILE);

    Ok(PredictionResult {
        mean,
        lo,
        hi,
        samples: keep_samples.then_some(samples),
    })
}
