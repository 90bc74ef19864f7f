//! Grouped apply: reduce every stratum and broadcast the result back onto the
//! positions of its members.

use tracing::trace;
use crate::errors::{PostStratError, Result};
use crate::helper::Strata;

/// Applies `reduce` to the values of every stratum of `by` and scatters the
/// results back into the original order.
///
/// A reducer result of length 1 is broadcast to every member of the stratum, a
/// result with one entry per member is placed at the members' positions. Any
/// other result length is a configuration error.
pub fn capply<T, U, F>(values: &[T], by: &Strata, mut reduce: F) -> Result<Vec<U>>
where
    T: Clone,
    U: Clone,
    F: FnMut(&[T]) -> Vec<U>,
{
    by.ensure_len(values.len(), "by")?;

    let mut scattered: Vec<Option<U>> = vec![None; values.len()];
    let mut subset: Vec<T> = Vec::new();

    for level in 0..by.n_strata() {
        let members = by.members(level);

        subset.clear();
        subset.extend(members.iter().map(|&r| values[r].clone()));

        let result = reduce(&subset);
        trace!(stratum = level, size = members.len(), result_len = result.len(), "reduced stratum");

        if result.len() == 1 {
            for &r in members {
                scattered[r] = Some(result[0].clone());
            }
        } else if result.len() == members.len() {
            for (&r, value) in members.iter().zip(result.into_iter()) {
                scattered[r] = Some(value);
            }
        } else {
            return Err(PostStratError::Configuration(format!(
                "reducer returned {} values for stratum {:?} of size {}",
                result.len(),
                by.levels()[level],
                members.len()
            )));
        }
    }

    scattered
        .into_iter()
        .collect::<Option<Vec<U>>>()
        .ok_or_else(|| PostStratError::configuration("strata do not cover every position"))
}

/// [`capply`] for reducers that always return a single value.
pub fn capply_scalar<T, U, F>(values: &[T], by: &Strata, mut reduce: F) -> Result<Vec<U>>
where
    T: Clone,
    U: Clone,
    F: FnMut(&[T]) -> U,
{
    capply(values, by, |subset| vec![reduce(subset)])
}

/// Size of the stratum containing each observation.
pub fn stratum_sizes(by: &Strata) -> Vec<usize> {
    let sizes = by.sizes();
    by.codes().iter().map(|&code| sizes[code]).collect()
}
