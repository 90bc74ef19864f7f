//! A small column store for survey data, enough to resolve named stratum,
//! weight and value columns before calling into the estimators.

use serde::{Deserialize, Serialize};
use crate::errors::{PostStratError, Result};
use crate::helper::Strata;
use crate::tables::{unique_by_strata, xtabs, Table};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(values) => values.len(),
            Column::Categorical(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn labels(&self) -> Vec<String> {
        match self {
            Column::Numeric(values) => values.iter().map(|v| v.to_string()).collect(),
            Column::Categorical(values) => values.clone(),
        }
    }

    fn select(&self, rows: &[usize]) -> Column {
        match self {
            Column::Numeric(values) => Column::Numeric(rows.iter().map(|&r| values[r]).collect()),
            Column::Categorical(values) => Column::Categorical(rows.iter().map(|&r| values[r].clone()).collect()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurveyFrame {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl SurveyFrame {
    pub fn new() -> SurveyFrame {
        SurveyFrame::default()
    }

    pub fn nrows(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn names(&self) -> &Vec<String> {
        &self.names
    }

    /// Appends a column; it must match the frame's row count and carry a new name.
    pub fn with_column(mut self, name: &str, column: Column) -> Result<SurveyFrame> {
        if self.names.iter().any(|n| n == name) {
            return Err(PostStratError::Configuration(format!("duplicate column {}", name)));
        }
        if !self.columns.is_empty() && column.len() != self.nrows() {
            return Err(PostStratError::length_mismatch(name, self.nrows(), column.len()));
        }

        self.names.push(name.to_string());
        self.columns.push(column);
        Ok(self)
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.names.iter()
            .position(|n| n == name)
            .map(|pp| &self.columns[pp])
            .ok_or_else(|| PostStratError::Configuration(format!("unknown column {}", name)))
    }

    pub fn numeric(&self, name: &str) -> Result<&[f64]> {
        match self.column(name)? {
            Column::Numeric(values) => Ok(values.as_slice()),
            Column::Categorical(_) => Err(PostStratError::Configuration(format!("column {} is not numeric", name))),
        }
    }

    /// Joint stratification by the named columns; numeric columns act as categories.
    pub fn strata(&self, names: &[&str]) -> Result<Strata> {
        let labels = names.iter()
            .map(|name| self.column(name).map(|c| c.labels()))
            .collect::<Result<Vec<Vec<String>>>>()?;
        let columns: Vec<&[String]> = labels.iter().map(|l| l.as_slice()).collect();

        Strata::from_columns(&columns)
    }

    /// Keeps the first row of every stratum of the named columns.
    pub fn unique_by(&self, names: &[&str]) -> Result<SurveyFrame> {
        let rows = unique_by_strata(&self.strata(names)?);

        Ok(SurveyFrame {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.select(&rows)).collect(),
        })
    }
}

/// Which columns to cross-tabulate: the grouping columns and, optionally, a
/// numeric column summed within each group instead of counting rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub group_by: Vec<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl TableSpec {
    pub fn xtabs(&self, frame: &SurveyFrame) -> Result<Table> {
        let names: Vec<&str> = self.group_by.iter().map(|n| n.as_str()).collect();
        let by = frame.strata(&names)?;

        match &self.value {
            Some(value) => xtabs(&by, Some(frame.numeric(value)?)),
            None => xtabs(&by, None),
        }
    }
}
