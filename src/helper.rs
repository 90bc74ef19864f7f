use std::collections::HashMap;
use nalgebra::DMatrix;
use crate::errors::{PostStratError, Result};

/// Composite stratification key collapsed to one level code per observation.
///
/// Levels are numbered in order of first appearance. The members of all levels
/// partition `0..len()`, each member list in ascending position order.
#[derive(Clone, Debug, PartialEq)]
pub struct Strata {
    codes: Vec<usize>,
    levels: Vec<Vec<String>>,
    members: Vec<Vec<usize>>,
}

impl Strata {
    /// One stratum holding all `n` observations.
    pub fn single(n: usize) -> Strata {
        Strata::from_keys((0..n).map(|_| vec!["overall".to_string()]))
    }

    pub fn from_labels<S: ToString>(labels: &[S]) -> Strata {
        Strata::from_keys(labels.iter().map(|label| vec![label.to_string()]))
    }

    /// Several categorical columns evaluated jointly, position by position.
    pub fn from_columns<S: ToString>(columns: &[&[S]]) -> Result<Strata> {
        if columns.is_empty() {
            return Err(PostStratError::configuration("no stratum columns given"));
        }

        let nrows = columns[0].len();
        for column in columns.iter().skip(1) {
            if column.len() != nrows {
                return Err(PostStratError::length_mismatch("stratum column", nrows, column.len()));
            }
        }

        Ok(Strata::from_keys((0..nrows).map(|r| {
            columns.iter().map(|column| column[r].to_string()).collect::<Vec<String>>()
        })))
    }

    /// Every row of `matrix` is one composite key; NaN is a key value of its own.
    pub fn from_matrix(matrix: &DMatrix<f64>) -> Strata {
        Strata::from_keys(matrix.row_iter().map(|row| row.iter().map(|v| v.to_string()).collect::<Vec<String>>()))
    }

    fn from_keys<I: Iterator<Item = Vec<String>>>(keys: I) -> Strata {
        let mut index_map: HashMap<Vec<String>, usize> = HashMap::new();
        let mut codes = Vec::new();
        let mut levels = Vec::new();
        let mut members: Vec<Vec<usize>> = Vec::new();

        for (r, key) in keys.enumerate() {
            let code = match index_map.get(&key) {
                Some(&code) => code,
                None => {
                    let code = levels.len();
                    index_map.insert(key.clone(), code);
                    levels.push(key);
                    members.push(Vec::new());
                    code
                }
            };

            codes.push(code);
            members[code].push(r);
        }

        Strata {
            codes,
            levels,
            members,
        }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn n_strata(&self) -> usize {
        self.levels.len()
    }

    pub fn codes(&self) -> &[usize] {
        &self.codes
    }

    pub fn levels(&self) -> &[Vec<String>] {
        &self.levels
    }

    pub fn members(&self, level: usize) -> &[usize] {
        &self.members[level]
    }

    pub fn level_of(&self, key: &[String]) -> Option<usize> {
        self.levels.iter().position(|level| level.as_slice() == key)
    }

    /// Number of observations per level.
    pub fn sizes(&self) -> Vec<usize> {
        self.members.iter().map(|m| m.len()).collect()
    }

    pub fn ensure_len(&self, n: usize, what: &str) -> Result<()> {
        if self.len() != n {
            return Err(PostStratError::length_mismatch(what, n, self.len()));
        }
        Ok(())
    }
}

#[macro_export]
macro_rules! assert_approx_eq_iter_f64 {
    ( $x: expr, $y: expr, $eps: literal ) => {
        assert_eq!($x.len(), $y.len(), "unequal length");
        for (i, value) in $x.iter().enumerate() {
            assert!(f64::abs(value - $y.get(i).unwrap()) < $eps, "unequal value (epsilon {}) at index {}", $eps, i);
        }
    };
    ( $x: expr, $y: expr ) => {
        assert_eq!($x.len(), $y.len(), "unequal length");
        for (i, value) in $x.iter().enumerate() {
            assert!(f64::abs(value - $y.get(i).unwrap()) < 1e-10, "unequal value at index {}", i);
        }
    };
}
