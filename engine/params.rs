//! Resolution of logical parameter names to draw-matrix column positions.
//!
//! The fitting pipeline is free to reorder columns and to omit covariate
//! coefficients it did not include in the model. The resolver pins every
//! logical name to a column exactly once per bundle; downstream code never
//! re-derives positions per draw.

use thiserror::Error;

/// Column positions for one bundle's draw matrix.
///
/// The six mixture parameters are required; the covariate coefficients are
/// optional. An absent optional coefficient behaves exactly as if the column
/// existed with value 0 in every draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterIndex {
    pub rho0: usize,
    pub rho1: usize,
    pub mu0: usize,
    pub mu1: usize,
    pub sigma0: usize,
    pub sigma1: usize,
    pub beta_age: Option<usize>,
    pub beta_age_miss: Option<usize>,
    pub beta_sex: Option<usize>,
    pub beta_sex_miss: Option<usize>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(
        "The required model parameter '{0}' was not found in the bundle's parameter names. The bundle cannot be used for prediction."
    )]
    MissingParameter(String),
}

impl ParameterIndex {
    /// Resolves every logical parameter name against `param_names`.
    ///
    /// Fails on the first missing required parameter; the whole bundle is
    /// unusable in that case, no partial resolution is returned.
    pub fn resolve(param_names: &[String]) -> Result<Self, ResolveError> {
        let position = |name: &str| param_names.iter().position(|n| n == name);
        let required = |name: &'static str| {
            position(name).ok_or_else(|| ResolveError::MissingParameter(name.to_string()))
        };

        let index = Self {
            rho0: required("rho0")?,
            rho1: required("rho1")?,
            mu0: required("mu0")?,
            mu1: required("mu1")?,
            sigma0: required("sigma0")?,
            sigma1: required("sigma1")?,
            beta_age: position("beta_age"),
            beta_age_miss: position("beta_age_miss"),
            beta_sex: position("beta_sex"),
            beta_sex_miss: position("beta_sex_miss"),
        };

        for (name, slot) in [
            ("beta_age", index.beta_age),
            ("beta_age_miss", index.beta_age_miss),
            ("beta_sex", index.beta_sex),
            ("beta_sex_miss", index.beta_sex_miss),
        ] {
            if slot.is_none() {
                log::debug!("Optional coefficient '{name}' absent from bundle; treated as zero.");
            }
        }

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_full_parameter_set() {
        let index = ParameterIndex::resolve(&names(&[
            "rho0",
            "rho1",
            "mu0",
            "mu1",
            "sigma0",
            "sigma1",
            "beta_age",
            "beta_age_miss",
            "beta_sex",
            "beta_sex_miss",
        ]))
        .unwrap();
        assert_eq!(index.rho0, 0);
        assert_eq!(index.sigma1, 5);
        assert_eq!(index.beta_age, Some(6));
        assert_eq!(index.beta_sex_miss, Some(9));
    }

    #[test]
    fn resolution_is_order_independent() {
        let index = ParameterIndex::resolve(&names(&[
            "beta_sex", "sigma1", "rho1", "mu0", "sigma0", "mu1", "rho0",
        ]))
        .unwrap();
        assert_eq!(index.rho0, 6);
        assert_eq!(index.rho1, 2);
        assert_eq!(index.mu0, 3);
        assert_eq!(index.mu1, 5);
        assert_eq!(index.sigma0, 4);
        assert_eq!(index.sigma1, 1);
        assert_eq!(index.beta_sex, Some(0));
        assert_eq!(index.beta_age, None);
    }

    #[test]
    fn missing_required_parameter_names_the_culprit() {
        let err = ParameterIndex::resolve(&names(&["rho0", "rho1", "mu0", "mu1", "sigma0"]))
            .unwrap_err();
        assert_eq!(err, ResolveError::MissingParameter("sigma1".to_string()));
    }

    #[test]
    fn optional_parameters_may_all_be_absent() {
        let index =
            ParameterIndex::resolve(&names(&["rho0", "rho1", "mu0", "mu1", "sigma0", "sigma1"]))
                .unwrap();
        assert_eq!(index.beta_age, None);
        assert_eq!(index.beta_age_miss, None);
        assert_eq!(index.beta_sex, None);
        assert_eq!(index.beta_sex_miss, None);
    }
}
