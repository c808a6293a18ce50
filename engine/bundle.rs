//! # Bundle Loading and Validation Module
//!
//! This module is the exclusive entry point for the posterior parameter
//! bundle. Its responsibility is to read the JSON artifact produced by the
//! model-fitting pipeline, validate it against a strict structural schema,
//! and transform it into the clean `ndarray` structure required by the
//! evaluation core.
//!
//! - Strict Schema: Field names are not configurable. The bundle must carry
//!   `CAP`, `age_mean`, `age_std`, `param_names` and `draws`, exactly as the
//!   fitting pipeline writes them.
//! - Validation Up Front: Every structural guarantee the evaluation core
//!   relies on (finite cap, unique parameter names, rectangular non-empty
//!   draw matrix) is checked here, once, at load time. A bundle that passes
//!   this module never makes the core fail structurally.
//! - User-Centric Errors: Failures are assumed to be artifact or transport
//!   errors. The `BundleError` enum names the offending field or row.

use ndarray::Array2;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use thiserror::Error;

/// The posterior parameter bundle: everything the evaluation core needs from
/// one fitted model, loaded once and treated as immutable thereafter.
#[derive(Debug, Clone)]
pub struct PosteriorBundle {
    /// Upper bound of the modeled time axis, in minutes. All time inputs are
    /// clamped into `[0, cap_minutes]`.
    pub cap_minutes: f64,
    /// Mean of the age covariate in the training data.
    pub age_mean: f64,
    /// Standard deviation of the age covariate in the training data.
    pub age_std: f64,
    /// Column names of the draw matrix, in column order.
    pub param_names: Vec<String>,
    /// Posterior draws, one sampled parameter vector per row.
    /// Shape: [n_draws, len(param_names)].
    pub draws: Array2<f64>,
}

/// A comprehensive error type for all bundle loading and validation failures.
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error from the underlying JSON parser: {0}")]
    Json(#[from] serde_json::Error),
    #[error("The time cap 'CAP' must be a finite, non-negative number. (Found: {0})")]
    InvalidCap(f64),
    #[error(
        "The age summary statistics must be finite numbers. (Found: age_mean = {age_mean}, age_std = {age_std})"
    )]
    NonFiniteAgeStats { age_mean: f64, age_std: f64 },
    #[error("The parameter name '{0}' appears more than once in 'param_names'.")]
    DuplicateParameter(String),
    #[error("The bundle contains no posterior draws. At least one sampled parameter vector is required.")]
    EmptyDraws,
    #[error(
        "Draw row {row} has {found} values, but 'param_names' declares {expected} parameters. Every row must match the parameter count exactly."
    )]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl PosteriorBundle {
    /// Reads and validates a bundle from a JSON file on disk.
    pub fn load(path: &str) -> Result<Self, BundleError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Parses and validates a bundle from an in-memory JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, BundleError> {
        let raw: internal::RawBundle = serde_json::from_str(json)?;
        internal::validate(raw)
    }

    /// Number of posterior draws in the bundle.
    pub fn n_draws(&self) -> usize {
        self.draws.nrows()
    }
}

/// Internal module separating the raw wire schema from the validated form.
mod internal {
    use super::*;

    /// The bundle exactly as it appears on the wire, before validation.
    #[derive(Deserialize)]
    pub(super) struct RawBundle {
        #[serde(rename = "CAP")]
        pub cap_minutes: f64,
        pub age_mean: f64,
        pub age_std: f64,
        pub param_names: Vec<String>,
        pub draws: Vec<Vec<f64>>,
    }

    pub(super) fn validate(raw: RawBundle) -> Result<PosteriorBundle, BundleError> {
        if !raw.cap_minutes.is_finite() || raw.cap_minutes < 0.0 {
            return Err(BundleError::InvalidCap(raw.cap_minutes));
        }
        if !raw.age_mean.is_finite() || !raw.age_std.is_finite() {
            return Err(BundleError::NonFiniteAgeStats {
                age_mean: raw.age_mean,
                age_std: raw.age_std,
            });
        }

        let mut seen = HashSet::with_capacity(raw.param_names.len());
        for name in &raw.param_names {
            if !seen.insert(name.as_str()) {
                return Err(BundleError::DuplicateParameter(name.clone()));
            }
        }

        if raw.draws.is_empty() {
            return Err(BundleError::EmptyDraws);
        }
        let n_params = raw.param_names.len();
        for (row, values) in raw.draws.iter().enumerate() {
            if values.len() != n_params {
                return Err(BundleError::RowLengthMismatch {
                    row,
                    expected: n_params,
                    found: values.len(),
                });
            }
        }

        let n_draws = raw.draws.len();
        let flat: Vec<f64> = raw.draws.into_iter().flatten().collect();
        let draws = Array2::from_shape_vec((n_draws, n_params), flat)
            .expect("row lengths were validated against the parameter count");

        log::info!(
            "Loaded posterior bundle: {} draws x {} parameters, time cap {} minutes",
            n_draws,
            n_params,
            raw.cap_minutes
        );

        Ok(PosteriorBundle {
            cap_minutes: raw.cap_minutes,
            age_mean: raw.age_mean,
            age_std: raw.age_std,
            param_names: raw.param_names,
            draws,
        })
    }
}
