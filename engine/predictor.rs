//! The authoritative prediction engine.
//!
//! `Predictor` binds one immutable bundle to its once-resolved parameter
//! index; every caller (CLI, tests, benchmarks, any future UI) goes through
//! the same evaluation path, so the pointwise and curve entry points cannot
//! drift apart. The free functions mirror the bundle-plus-input signatures
//! of the surrounding system for callers that hold a bare bundle.

use crate::aggregate::{PredictError, PredictionResult, aggregate};
use crate::bundle::PosteriorBundle;
use crate::covariates::{BaseInput, PredictionInput, standardize};
use crate::curve::CurvePoint;
use crate::params::{ParameterIndex, ResolveError};

/// A bundle paired with its resolved parameter index.
#[derive(Debug, Clone)]
pub struct Predictor {
    bundle: PosteriorBundle,
    index: ParameterIndex,
}

impl Predictor {
    /// Resolves the parameter index once and pins it to the bundle.
    pub fn new(bundle: PosteriorBundle) -> Result<Self, ResolveError> {
        let index = ParameterIndex::resolve(&bundle.param_names)?;
        log::info!(
            "Prediction engine ready: {} draws, age coefficient {}, sex coefficient {}",
            bundle.n_draws(),
            if index.beta_age.is_some() { "present" } else { "absent" },
            if index.beta_sex.is_some() { "present" } else { "absent" },
        );
        Ok(Self { bundle, index })
    }

    pub fn bundle(&self) -> &PosteriorBundle {
        &self.bundle
    }

    /// Posterior-predictive summary for one input.
    pub fn predict(&self, input: &PredictionInput) -> Result<PredictionResult, PredictError> {
        let std = standardize(&self.bundle, input);
        aggregate(&self.bundle, &self.index, &std, input.use_time, false)
    }

    /// Like [`predict`](Self::predict), but retains the sorted per-draw
    /// probabilities in the result.
    pub fn predict_with_samples(
        &self,
        input: &PredictionInput,
    ) -> Result<PredictionResult, PredictError> {
        let std = standardize(&self.bundle, input);
        aggregate(&self.bundle, &self.index, &std, input.use_time, true)
    }

    /// Probability-vs-time curve for fixed age/sex covariates.
    pub fn curve(
        &self,
        base: &BaseInput,
        point_count: usize,
    ) -> Result<Vec<CurvePoint>, PredictError> {
        crate::curve::curve(&self.bundle, &self.index, base, point_count)
    }
}

/// One-shot prediction against a bare bundle; resolves the index per call.
pub fn predict(
    bundle: &PosteriorBundle,
    input: &PredictionInput,
) -> Result<PredictionResult, PredictError> {
    let index = ParameterIndex::resolve(&bundle.param_names)?;
    let std = standardize(bundle, input);
    aggregate(bundle, &index, &std, input.use_time, false)
}

/// One-shot curve against a bare bundle; resolves the index per call.
pub fn curve(
    bundle: &PosteriorBundle,
    base: &BaseInput,
    point_count: usize,
) -> Result<Vec<CurvePoint>, PredictError> {
    let index = ParameterIndex::resolve(&bundle.param_names)?;
    crate::curve::curve(bundle, &index, base, point_count)
}
