//! Delete-one jackknife for post-stratified weighted estimates.
//!
//! Weights are expected to be constant within each stratum. When an
//! observation is dropped, the remaining members of its stratum are scaled by
//! `n_s / (n_s - 1)` so that the stratum keeps its total weight; all other
//! strata pass through unchanged.

use std::borrow::Cow;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::capply::stratum_sizes;
use crate::errors::{PostStratError, Result};
use crate::estimates::{cycle_weights, Estimator, LinearCombination, WeightedMean};
use crate::helper::Strata;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JackknifeEstimate {
    estimator: String,
    estimate: f64,
    standard_error: f64,
    leave_one_out: Vec<f64>,
    stratum_sizes: Vec<usize>,
}

impl JackknifeEstimate {
    pub fn estimator(&self) -> &str {
        &self.estimator
    }

    /// Full-sample point estimate.
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    pub fn standard_error(&self) -> f64 {
        self.standard_error
    }

    /// One estimate per observation, computed without that observation.
    pub fn leave_one_out(&self) -> &Vec<f64> {
        &self.leave_one_out
    }

    pub fn stratum_sizes(&self) -> &Vec<usize> {
        &self.stratum_sizes
    }
}

/// Fails unless `w` takes a single value within every stratum of `by`.
pub fn check_constant_within_strata(by: &Strata, w: &[f64]) -> Result<()> {
    by.ensure_len(w.len(), "by")?;

    for level in 0..by.n_strata() {
        let members = by.members(level);
        let first = w[members[0]];

        if members.iter().any(|&r| w[r] != first) {
            return Err(PostStratError::configuration("w must be constant within strata"));
        }
    }

    Ok(())
}

fn prepare<'a>(x: &[f64], by: Option<&'a Strata>, w: Option<&[f64]>, check: bool) -> Result<(Cow<'a, Strata>, Vec<f64>)> {
    if x.is_empty() {
        return Err(PostStratError::configuration("x is empty"));
    }

    let strata = match by {
        Some(strata) => Cow::Borrowed(strata),
        None => Cow::Owned(Strata::single(x.len())),
    };
    strata.ensure_len(x.len(), "by")?;

    let wgt = match w {
        Some(w) => cycle_weights(w, x.len())?,
        None => vec![1.0; x.len()],
    };
    if wgt.iter().any(|v| v.is_nan()) {
        return Err(PostStratError::configuration("w contains NaN"));
    }

    if check {
        check_constant_within_strata(&strata, &wgt)?;
    }

    for (level, size) in strata.sizes().into_iter().enumerate() {
        if size < 2 {
            return Err(PostStratError::Configuration(format!(
                "stratum {:?} has a single observation, its weights cannot be adjusted after deletion",
                strata.levels()[level]
            )));
        }
    }

    Ok((strata, wgt))
}

fn leave_one_out<E: Estimator + ?Sized>(x: &[f64], strata: &Strata, w: &[f64], estimator: &E) -> Result<Vec<f64>> {
    match estimator.weighted_sums_form() {
        Some(form) => {
            debug!(n = x.len(), strata = strata.n_strata(), estimator = estimator.name(), "jackknife from stratum sums");
            leave_one_out_from_sums(x, strata, w, form)
        }
        None => {
            debug!(n = x.len(), strata = strata.n_strata(), estimator = estimator.name(), "jackknife by re-estimation");
            leave_one_out_by_reestimation(x, strata, w, estimator)
        }
    }
}

/// Evaluates the estimator on every reduced sample; the two buffers are reused
/// across deletions.
fn leave_one_out_by_reestimation<E: Estimator + ?Sized>(x: &[f64], strata: &Strata, w: &[f64], estimator: &E) -> Result<Vec<f64>> {
    let ns = stratum_sizes(strata);
    let codes = strata.codes();

    let mut x_drop = Vec::with_capacity(x.len() - 1);
    let mut w_drop = Vec::with_capacity(x.len() - 1);
    let mut estimates = Vec::with_capacity(x.len());

    for i in 0..x.len() {
        x_drop.clear();
        w_drop.clear();

        for j in (0..x.len()).filter(|&j| j != i) {
            let ns_drop = if codes[j] == codes[i] { ns[j] - 1 } else { ns[j] };

            x_drop.push(x[j]);
            w_drop.push(w[j] * ns[j] as f64 / ns_drop as f64);
        }

        estimates.push(estimator.estimate(&x_drop, &w_drop)?);
    }

    Ok(estimates)
}

/// Same result as [`leave_one_out_by_reestimation`] for estimators of the form
/// `f(sum(x * w), sum(w))`, in linear time.
fn leave_one_out_from_sums(x: &[f64], strata: &Strata, w: &[f64], form: fn(f64, f64) -> Result<f64>) -> Result<Vec<f64>> {
    let sizes = strata.sizes();
    let codes = strata.codes();

    let mut sum_xw = vec![0.0; strata.n_strata()];
    let mut sum_w = vec![0.0; strata.n_strata()];

    for (r, &code) in codes.iter().enumerate() {
        sum_xw[code] += x[r] * w[r];
        sum_w[code] += w[r];
    }

    let total_xw: f64 = sum_xw.iter().sum();
    let total_w: f64 = sum_w.iter().sum();

    codes.iter().enumerate().map(|(i, &code)| {
        let factor = sizes[code] as f64 / (sizes[code] - 1) as f64;

        let xw_drop = total_xw - sum_xw[code] + (sum_xw[code] - x[i] * w[i]) * factor;
        let w_drop = total_w - sum_w[code] + (sum_w[code] - w[i]) * factor;

        form(xw_drop, w_drop)
    }).collect()
}

/// Leave-one-out estimates of `estimator`, index-aligned with `x`.
///
/// `by` defaults to a single stratum and `w` to unit weights; a shorter `w` is
/// cycled. With `check`, weights that vary within a stratum are rejected.
pub fn jk_wtd_means<E: Estimator + ?Sized>(x: &[f64], by: Option<&Strata>, w: Option<&[f64]>, check: bool, estimator: &E) -> Result<Vec<f64>> {
    let (strata, wgt) = prepare(x, by, w, check)?;

    leave_one_out(x, &strata, &wgt, estimator)
}

/// Point estimate, leave-one-out estimates and the stratified jackknife
/// standard error `sqrt(sum((theta_i - theta)^2 * (n_s - 1) / n_s))`.
pub fn jackknife<E: Estimator + ?Sized>(x: &[f64], by: Option<&Strata>, w: Option<&[f64]>, check: bool, estimator: &E) -> Result<JackknifeEstimate> {
    let (strata, wgt) = prepare(x, by, w, check)?;

    let estimate = estimator.estimate(x, &wgt)?;
    let leave_one_out = leave_one_out(x, &strata, &wgt, estimator)?;
    let ns = stratum_sizes(&strata);

    let variance: f64 = leave_one_out.iter().zip(ns.iter())
        .map(|(theta_i, &n_s)| (theta_i - estimate).powi(2) * (n_s - 1) as f64 / n_s as f64)
        .sum();

    Ok(JackknifeEstimate {
        estimator: estimator.name().to_string(),
        estimate,
        standard_error: variance.sqrt(),
        leave_one_out,
        stratum_sizes: ns,
    })
}

pub fn jk_se<E: Estimator + ?Sized>(x: &[f64], by: Option<&Strata>, w: Option<&[f64]>, check: bool, estimator: &E) -> Result<f64> {
    Ok(jackknife(x, by, w, check, estimator)?.standard_error)
}

pub fn jk_wtd_mean_se(x: &[f64], by: Option<&Strata>, w: Option<&[f64]>, check: bool) -> Result<f64> {
    jk_se(x, by, w, check, &WeightedMean)
}

pub fn jk_lin_comb_se(x: &[f64], by: Option<&Strata>, w: Option<&[f64]>, check: bool) -> Result<f64> {
    jk_se(x, by, w, check, &LinearCombination)
}
