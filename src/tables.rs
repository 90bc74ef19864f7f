use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use crate::errors::{PostStratError, Result};
use crate::helper::Strata;

/// Cross-tabulation over the levels of a stratification key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Table {
    levels: Vec<Vec<String>>,
    values: Vec<f64>,
}

impl Table {
    pub fn levels(&self) -> &Vec<Vec<String>> {
        &self.levels
    }

    pub fn values(&self) -> &Vec<f64> {
        &self.values
    }

    pub fn get(&self, key: &[&str]) -> Option<f64> {
        self.levels.iter()
            .position(|level| level.len() == key.len() && level.iter().zip(key.iter()).all(|(a, b)| a == b))
            .map(|pp| self.values[pp])
    }

    pub fn total(&self) -> f64 {
        DVector::from_column_slice(&self.values).sum()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Frequencies of the strata of `by`, or the sums of `value` within them.
pub fn xtabs(by: &Strata, value: Option<&[f64]>) -> Result<Table> {
    let values = match value {
        None => by.sizes().into_iter().map(|size| size as f64).collect(),
        Some(value) => {
            by.ensure_len(value.len(), "by")?;

            let mut sums = vec![0.0; by.n_strata()];
            for (&code, v) in by.codes().iter().zip(value.iter()) {
                sums[code] += v;
            }
            sums
        }
    };

    Ok(Table {
        levels: by.levels().to_vec(),
        values,
    })
}

/// Position of the first row of every stratum, in order of first appearance.
pub fn unique_by_strata(by: &Strata) -> Vec<usize> {
    (0..by.n_strata()).map(|level| by.members(level)[0]).collect()
}

/// Keeps one row per stratum.
pub fn keep_unique<T: Clone>(rows: &[T], by: &Strata) -> Result<Vec<T>> {
    if rows.len() != by.len() {
        return Err(PostStratError::length_mismatch("by", rows.len(), by.len()));
    }

    Ok(unique_by_strata(by).into_iter().map(|r| rows[r].clone()).collect())
}
