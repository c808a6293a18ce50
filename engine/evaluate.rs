//! Per-draw evaluation of the mixture logit.
//!
//! One posterior draw plus one standardized input yields one probability.
//! All arithmetic stays in the log domain until the final sigmoid:
//! the mixture weights enter as `ln(rho1) - ln(rho0)` and the time
//! component as a difference of log normal densities, so intermediate
//! values never overflow or collapse to zero before they are combined.
//!
//! Degenerate draw values are not errors. Mixture weights are clipped into
//! the open unit interval and scales are floored before use, so every draw
//! maps to a probability strictly inside (0, 1).

use crate::covariates::StdCovariates;
use crate::params::ParameterIndex;
use ndarray::ArrayView1;

/// ln(2π), the normalization constant of the Gaussian log-density.
const LN_2PI: f64 = 1.8378770664093453;

/// Clip bound keeping mixture weights inside the open unit interval.
const RHO_CLIP: f64 = 1e-12;

/// Lower bound applied to the mixture component scales.
const SIGMA_FLOOR: f64 = 1e-12;

/// Gaussian log-density with a pre-floored scale.
fn ln_normal_pdf(x: f64, mu: f64, sigma: f64) -> f64 {
    let z = (x - mu) / sigma;
    -0.5 * LN_2PI - sigma.ln() - 0.5 * z * z
}

/// Numerically stable sigmoid, branching on the sign of the logit so that
/// `exp` is only ever taken of a non-positive argument.
pub fn sigmoid(logit: f64) -> f64 {
    if logit >= 0.0 {
        1.0 / (1.0 + (-logit).exp())
    } else {
        let e = logit.exp();
        e / (1.0 + e)
    }
}

/// Evaluates one posterior draw at one standardized input.
///
/// With `use_time` set, the logit is the time-dependent mixture contrast
/// `ln(rho1) - ln(rho0) + lnN(t; mu1, sigma1) - lnN(t; mu0, sigma0)` plus
/// the linear covariate term; otherwise it is the no-time contrast
/// `ln(1 - rho1) - ln(1 - rho0)` plus the same linear term.
pub fn evaluate_draw(
    draw: ArrayView1<'_, f64>,
    index: &ParameterIndex,
    std: &StdCovariates,
    use_time: bool,
) -> f64 {
    let rho0 = draw[index.rho0].clamp(RHO_CLIP, 1.0 - RHO_CLIP);
    let rho1 = draw[index.rho1].clamp(RHO_CLIP, 1.0 - RHO_CLIP);

    let coefficient = |slot: Option<usize>| slot.map_or(0.0, |i| draw[i]);
    let linear = coefficient(index.beta_age) * std.age_z
        + coefficient(index.beta_age_miss) * std.age_missing
        + coefficient(index.beta_sex) * std.sex
        + coefficient(index.beta_sex_miss) * std.sex_missing;

    let logit = if use_time {
        let mu0 = draw[index.mu0];
        let mu1 = draw[index.mu1];
        let sigma0 = draw[index.sigma0].max(SIGMA_FLOOR);
        let sigma1 = draw[index.sigma1].max(SIGMA_FLOOR);
        rho1.ln() - rho0.ln() + ln_normal_pdf(std.t, mu1, sigma1)
            - ln_normal_pdf(std.t, mu0, sigma0)
            + linear
    } else {
        (1.0 - rho1).ln() - (1.0 - rho0).ln() + linear
    };

    sigmoid(logit)
}
