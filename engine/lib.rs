#![deny(dead_code)]
#![deny(unused_imports)]

pub mod aggregate;
pub mod bundle;
pub mod covariates;
pub mod curve;
pub mod evaluate;
pub mod params;
pub mod predictor;
