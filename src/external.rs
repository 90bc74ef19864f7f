//! Flat functions exported through the foreign-function interface.
//!
//! Strata cross the boundary as a single label column; composite keys are
//! expected to be joined by the caller.

use crate::errors::PostStratError;
use crate::helper::Strata;
use crate::{capply, estimates, jackknife};

pub fn wtd_mean(x: Vec<f64>, w: Vec<f64>) -> Result<f64, PostStratError> {
    estimates::wtd_mean(&x, &w)
}

pub fn lin_comb(x: Vec<f64>, w: Vec<f64>) -> Result<f64, PostStratError> {
    estimates::lin_comb(&x, &w)
}

pub fn std_weights(x: Vec<f64>, div: Option<f64>) -> Result<Vec<f64>, PostStratError> {
    estimates::std_weights(&x, div)
}

pub fn stratum_sizes(by: Vec<String>) -> Vec<u64> {
    capply::stratum_sizes(&Strata::from_labels(&by)).into_iter().map(|n| n as u64).collect()
}

pub fn jk_wtd_means(x: Vec<f64>, by: Option<Vec<String>>, w: Option<Vec<f64>>, check: bool) -> Result<Vec<f64>, PostStratError> {
    let strata = by.map(|labels| Strata::from_labels(&labels));

    jackknife::jk_wtd_means(&x, strata.as_ref(), w.as_deref(), check, &estimates::WeightedMean)
}

pub fn jk_wtd_mean_se(x: Vec<f64>, by: Option<Vec<String>>, w: Option<Vec<f64>>, check: bool) -> Result<f64, PostStratError> {
    let strata = by.map(|labels| Strata::from_labels(&labels));

    jackknife::jk_wtd_mean_se(&x, strata.as_ref(), w.as_deref(), check)
}

pub fn jk_lin_comb_se(x: Vec<f64>, by: Option<Vec<String>>, w: Option<Vec<f64>>, check: bool) -> Result<f64, PostStratError> {
    let strata = by.map(|labels| Strata::from_labels(&labels));

    jackknife::jk_lin_comb_se(&x, strata.as_ref(), w.as_deref(), check)
}
