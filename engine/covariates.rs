//! Covariate standardization.
//!
//! Raw user inputs (age in years, a 0/1 sex indicator, elapsed time in
//! minutes) are mapped to the model's internal representation: a z-scored
//! age with a missingness indicator, the sex indicator with its (currently
//! inert) missingness slot, and a time value clamped into the modeled range.

use crate::bundle::PosteriorBundle;

/// One prediction request, as it arrives from the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionInput {
    /// Age in years; `None` activates the model's age-missing indicator.
    pub age: Option<f64>,
    /// Binary sex indicator, using the encoding the model was fitted with
    /// (0.0 or 1.0).
    pub sex: f64,
    /// Elapsed time in minutes. Clamped into `[0, cap_minutes]`; `None` is
    /// treated as 0.
    pub time_minutes: Option<f64>,
    /// Selects the time-dependent mixture branch. When false, the no-time
    /// branch is evaluated and `time_minutes` is ignored.
    pub use_time: bool,
}

/// Time-free covariates, the fixed part of a curve request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseInput {
    pub age: Option<f64>,
    pub sex: f64,
}

impl BaseInput {
    /// Expands into a full time-dependent input at one time point.
    pub fn at_time(&self, time_minutes: f64) -> PredictionInput {
        PredictionInput {
            age: self.age,
            sex: self.sex,
            time_minutes: Some(time_minutes),
            use_time: true,
        }
    }
}

/// Covariates in the model's internal representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StdCovariates {
    pub age_z: f64,
    pub age_missing: f64,
    pub sex: f64,
    pub sex_missing: f64,
    /// Clamped time, guaranteed in `[0, cap_minutes]`.
    pub t: f64,
}

impl StdCovariates {
    /// The same covariates at a different (already in-range) time point.
    pub fn with_time(self, t: f64) -> Self {
        Self { t, ..self }
    }
}

/// Converts a raw input into the model's internal representation.
///
/// Age is z-scored against the training-data statistics carried by the
/// bundle. A non-positive `age_std` falls back to a divisor of 1 so a
/// degenerate training distribution can never produce a division by zero.
pub fn standardize(bundle: &PosteriorBundle, input: &PredictionInput) -> StdCovariates {
    let (age_z, age_missing) = match input.age {
        Some(age) => {
            let effective_age_std = if bundle.age_std > 0.0 {
                bundle.age_std
            } else {
                log::warn!(
                    "Bundle carries non-positive age_std ({}); falling back to 1 for standardization.",
                    bundle.age_std
                );
                1.0
            };
            ((age - bundle.age_mean) / effective_age_std, 0.0)
        }
        None => (0.0, 1.0),
    };

    // Sex is mandatory upstream; the missingness slot stays zero until a
    // bundle actually fits a beta_sex_miss coefficient.
    let t = input
        .time_minutes
        .unwrap_or(0.0)
        .clamp(0.0, bundle.cap_minutes);

    StdCovariates {
        age_z,
        age_missing,
        sex: input.sex,
        sex_missing: 0.0,
        t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::Array2;

    fn bundle(age_mean: f64, age_std: f64, cap: f64) -> PosteriorBundle {
        PosteriorBundle {
            cap_minutes: cap,
            age_mean,
            age_std,
            param_names: vec![],
            draws: Array2::zeros((1, 0)),
        }
    }

    #[test]
    fn present_age_is_z_scored() {
        let b = bundle(60.0, 15.0, 240.0);
        let std = standardize(
            &b,
            &PredictionInput {
                age: Some(75.0),
                sex: 1.0,
                time_minutes: Some(30.0),
                use_time: true,
            },
        );
        assert_abs_diff_eq!(std.age_z, 1.0, epsilon = 1e-12);
        assert_eq!(std.age_missing, 0.0);
        assert_eq!(std.sex, 1.0);
        assert_eq!(std.sex_missing, 0.0);
        assert_eq!(std.t, 30.0);
    }

    #[test]
    fn absent_age_sets_indicator_and_zero_z() {
        let b = bundle(60.0, 15.0, 240.0);
        let std = standardize(
            &b,
            &PredictionInput {
                age: None,
                sex: 0.0,
                time_minutes: None,
                use_time: false,
            },
        );
        assert_eq!(std.age_z, 0.0);
        assert_eq!(std.age_missing, 1.0);
        assert_eq!(std.t, 0.0);
    }

    #[test]
    fn non_positive_age_std_falls_back_to_unit_divisor() {
        for degenerate in [0.0, -3.0] {
            let b = bundle(60.0, degenerate, 240.0);
            let std = standardize(
                &b,
                &PredictionInput {
                    age: Some(63.0),
                    sex: 0.0,
                    time_minutes: None,
                    use_time: false,
                },
            );
            assert_abs_diff_eq!(std.age_z, 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn time_is_clamped_even_when_unused() {
        let b = bundle(60.0, 15.0, 240.0);
        let below = standardize(
            &b,
            &PredictionInput {
                age: None,
                sex: 0.0,
                time_minutes: Some(-10.0),
                use_time: false,
            },
        );
        assert_eq!(below.t, 0.0);
        let above = standardize(
            &b,
            &PredictionInput {
                age: None,
                sex: 0.0,
                time_minutes: Some(1e6),
                use_time: false,
            },
        );
        assert_eq!(above.t, 240.0);
    }

    #[test]
    fn base_input_expands_to_time_dependent_request() {
        let input = BaseInput {
            age: Some(50.0),
            sex: 1.0,
        }
        .at_time(42.0);
        assert!(input.use_time);
        assert_eq!(input.time_minutes, Some(42.0));
        assert_eq!(input.age, Some(50.0));
    }
}
