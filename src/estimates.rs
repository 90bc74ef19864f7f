use nalgebra::DVector;
use crate::errors::{PostStratError, Result};

/// A statistic of a sample `x` under weights `w`, pluggable into the jackknife.
///
/// Estimators that are a function of the two weighted sums `sum(x * w)` and
/// `sum(w)` return that function from [`Estimator::weighted_sums_form`], which
/// lets the jackknife skip materializing every leave-one-out sample.
pub trait Estimator {
    fn name(&self) -> &str {
        "custom"
    }

    fn estimate(&self, x: &[f64], w: &[f64]) -> Result<f64>;

    fn weighted_sums_form(&self) -> Option<fn(f64, f64) -> Result<f64>> {
        None
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WeightedMean;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LinearCombination;

impl Estimator for WeightedMean {
    fn name(&self) -> &str {
        "mean"
    }

    fn estimate(&self, x: &[f64], w: &[f64]) -> Result<f64> {
        wtd_mean(x, w)
    }

    fn weighted_sums_form(&self) -> Option<fn(f64, f64) -> Result<f64>> {
        Some(ratio_of_sums)
    }
}

impl Estimator for LinearCombination {
    fn name(&self) -> &str {
        "linear combination"
    }

    fn estimate(&self, x: &[f64], w: &[f64]) -> Result<f64> {
        lin_comb(x, w)
    }

    fn weighted_sums_form(&self) -> Option<fn(f64, f64) -> Result<f64>> {
        Some(|sum_xw, _| Ok(sum_xw))
    }
}

impl<F> Estimator for F
where
    F: Fn(&[f64], &[f64]) -> Result<f64>,
{
    fn estimate(&self, x: &[f64], w: &[f64]) -> Result<f64> {
        self(x, w)
    }
}

/// Repeats `w` until it has length `n`; the last cycle may be cut short.
pub fn cycle_weights(w: &[f64], n: usize) -> Result<Vec<f64>> {
    if w.is_empty() {
        return Err(PostStratError::configuration("w is empty"));
    }
    if w.len() > n {
        return Err(PostStratError::Configuration(format!("w has {} entries, more than the {} observations", w.len(), n)));
    }

    Ok(w.iter().cycle().take(n).cloned().collect())
}

macro_rules! ensure_validity_of_data_and_weights {
    ( $x: expr, $w: expr, $estimate_name: expr ) => {{
        if $x.is_empty() {
            return Err(PostStratError::Configuration(format!("x is empty in {}", $estimate_name)));
        }
        let w = cycle_weights($w, $x.len())?;
        if w.iter().any(|e| e.is_nan()) {
            return Err(PostStratError::Configuration(format!("w contains NaN in {}", $estimate_name)));
        }
        DVector::from_vec(w)
    }};
}

fn ratio_of_sums(sum_xw: f64, sum_w: f64) -> Result<f64> {
    if sum_w == 0.0 || !sum_w.is_finite() {
        return Err(PostStratError::ArithmeticIndeterminate(format!("sum of weights is {}", sum_w)));
    }

    Ok(sum_xw / sum_w)
}

/// `sum(x * w) / sum(w)`, with `w` cycled to the length of `x`.
pub fn wtd_mean(x: &[f64], w: &[f64]) -> Result<f64> {
    let wgt = ensure_validity_of_data_and_weights!(x, w, "wtd_mean");

    let x = DVector::from_column_slice(x);
    ratio_of_sums(x.dot(&wgt), wgt.sum())
}

/// `sum(x * w)`, with `w` cycled to the length of `x`.
pub fn lin_comb(x: &[f64], w: &[f64]) -> Result<f64> {
    let wgt = ensure_validity_of_data_and_weights!(x, w, "lin_comb");

    let x = DVector::from_column_slice(x);
    Ok(x.dot(&wgt))
}

/// Divides every element of `x` by `div`, which defaults to the total of `x`.
pub fn std_weights(x: &[f64], div: Option<f64>) -> Result<Vec<f64>> {
    let div = div.unwrap_or_else(|| x.iter().sum());

    if div == 0.0 || !div.is_finite() {
        return Err(PostStratError::ArithmeticIndeterminate(format!("cannot standardize by {}", div)));
    }

    Ok(x.iter().map(|v| v / div).collect())
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq_iter_f64;
    use super::*;

    #[test]
    fn test_wtd_mean() {
        let x = vec![2.1, 2.9, 1.9, 1.6, 1.4, 2.7];
        let w = vec![1.1, 1.5, 1.3, 1.7, 1.7, 1.0];

        let result = wtd_mean(&x, &w).unwrap();

        assert!((result - 16.93 / 8.3).abs() < 1e-12);
    }

    #[test]
    fn test_wtd_mean_unit_weights_is_mean() {
        let x = vec![537.0, 499.1, 611.0, 534.7, 456.2];
        let mean = x.iter().sum::<f64>() / x.len() as f64;

        assert!((wtd_mean(&x, &[1.0; 5]).unwrap() - mean).abs() < 1e-10);
        assert!((wtd_mean(&x, &[1.0]).unwrap() - mean).abs() < 1e-10);
    }

    #[test]
    fn test_wtd_mean_cycles_weights() {
        let result = wtd_mean(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0]).unwrap();

        assert!((result - wtd_mean(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 1.0, 2.0]).unwrap()).abs() < 1e-15);
        assert!((result - 16.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_wtd_mean_zero_weights() {
        let result = wtd_mean(&[1.0, 2.0], &[1.0, -1.0]);

        assert_eq!(Err(PostStratError::indeterminate("sum of weights is 0")), result);
    }

    #[test]
    fn test_wtd_mean_empty() {
        assert!(matches!(wtd_mean(&[], &[1.0]), Err(PostStratError::Configuration(_))));
        assert!(matches!(wtd_mean(&[1.0], &[]), Err(PostStratError::Configuration(_))));
    }

    #[test]
    fn test_wtd_mean_weights_containing_nan() {
        let result = wtd_mean(&[1.0, 2.0], &[1.0, f64::NAN]);

        assert_eq!(Err(PostStratError::configuration("w contains NaN in wtd_mean")), result);
    }

    #[test]
    fn test_lin_comb() {
        let result = lin_comb(&[1.0, 2.0, 3.0, 4.0, 5.0], &[0.5, 2.0]).unwrap();

        assert!((result - (0.5 + 4.0 + 1.5 + 8.0 + 2.5)).abs() < 1e-12);
    }

    #[test]
    fn test_lin_comb_weights_too_long() {
        let result = lin_comb(&[1.0, 2.0], &[1.0, 1.0, 1.0]);

        assert!(matches!(result, Err(PostStratError::Configuration(_))));
    }

    #[test]
    fn test_lin_comb_with_unit_sum_weights_is_wtd_mean() {
        let x = vec![21.5, 18.0, 25.25, 30.0, 27.5];
        let w = vec![10.0, 10.0, 10.0, 15.0, 15.0];

        let normalized = std_weights(&w, None).unwrap();

        assert!((lin_comb(&x, &normalized).unwrap() - wtd_mean(&x, &w).unwrap()).abs() < 1e-12);
    }

    #[test]
    fn test_cycle_weights() {
        assert_approx_eq_iter_f64!(cycle_weights(&[1.0, 2.0], 5).unwrap(), vec![1.0, 2.0, 1.0, 2.0, 1.0]);
        assert_approx_eq_iter_f64!(cycle_weights(&[3.0], 3).unwrap(), vec![3.0, 3.0, 3.0]);
        assert!(cycle_weights(&[], 3).is_err());
    }

    #[test]
    fn test_std_weights() {
        let result = std_weights(&[1.0, 3.0, 4.0], None).unwrap();

        assert_approx_eq_iter_f64!(result, vec![0.125, 0.375, 0.5]);
        assert!((result.iter().sum::<f64>() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_std_weights_with_divisor() {
        let result = std_weights(&[1.0, 3.0, 4.0], Some(2.0)).unwrap();

        assert_approx_eq_iter_f64!(result, vec![0.5, 1.5, 2.0]);
    }

    #[test]
    fn test_std_weights_zero_total() {
        assert!(matches!(std_weights(&[1.0, -1.0], None), Err(PostStratError::ArithmeticIndeterminate(_))));
        assert!(matches!(std_weights(&[1.0], Some(0.0)), Err(PostStratError::ArithmeticIndeterminate(_))));
    }

    #[test]
    fn test_estimators() {
        let x = [1.0, 2.0, 3.0];
        let w = [2.0, 1.0, 1.0];

        assert!((WeightedMean.estimate(&x, &w).unwrap() - 1.75).abs() < 1e-15);
        assert!((LinearCombination.estimate(&x, &w).unwrap() - 7.0).abs() < 1e-15);
        assert_eq!("mean", WeightedMean.name());

        let max = |x: &[f64], _: &[f64]| -> Result<f64> { Ok(x.iter().cloned().fold(f64::MIN, f64::max)) };
        assert!((max.estimate(&x, &w).unwrap() - 3.0).abs() < 1e-15);
        assert_eq!("custom", max.name());
        assert!(max.weighted_sums_form().is_none());
    }

    #[test]
    fn test_weighted_sums_form() {
        let mean_form = WeightedMean.weighted_sums_form().unwrap();
        let sum_form = LinearCombination.weighted_sums_form().unwrap();

        assert_eq!(Ok(2.5), mean_form(5.0, 2.0));
        assert_eq!(Ok(5.0), sum_form(5.0, 2.0));
        assert!(matches!(mean_form(5.0, 0.0), Err(PostStratError::ArithmeticIndeterminate(_))));
    }
}
