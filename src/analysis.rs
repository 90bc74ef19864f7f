use std::rc::Rc;
use crate::errors::{PostStratError, Result};
use crate::estimates::{Estimator, LinearCombination, WeightedMean};
use crate::helper::Strata;
use crate::jackknife::{jackknife, JackknifeEstimate};

/// Reusable set-up of a jackknife standard error computation.
///
/// Inputs are shared between copies, so variations of one analysis can be
/// derived cheaply with [`Analysis::copy`].
pub struct Analysis {
    x: Option<Rc<Vec<f64>>>,
    strata: Option<Rc<Strata>>,
    wgt: Option<Rc<Vec<f64>>>,
    check: bool,
    estimator: Option<Rc<dyn Estimator>>,
}

pub fn analysis() -> Analysis {
    Analysis {
        x: None,
        strata: None,
        wgt: None,
        check: true,
        estimator: None,
    }
}

impl Analysis {
    pub fn for_sample(&mut self, x: &[f64]) -> &mut Self {
        self.x = Some(Rc::new(x.to_vec()));
        self
    }

    pub fn stratify_by(&mut self, strata: &Strata) -> &mut Self {
        self.strata = Some(Rc::new(strata.clone()));
        self
    }

    pub fn set_weights(&mut self, wgt: &[f64]) -> &mut Self {
        self.wgt = Some(Rc::new(wgt.to_vec()));
        self
    }

    /// Trusts the caller that weights are constant within strata.
    pub fn skip_check(&mut self) -> &mut Self {
        self.check = false;
        self
    }

    pub fn mean(&mut self) -> &mut Self {
        self.estimator = Some(Rc::new(WeightedMean));
        self
    }

    pub fn linear_combination(&mut self) -> &mut Self {
        self.estimator = Some(Rc::new(LinearCombination));
        self
    }

    pub fn with_estimator<E: Estimator + 'static>(&mut self, estimator: E) -> &mut Self {
        self.estimator = Some(Rc::new(estimator));
        self
    }

    pub fn calculate(&self) -> Result<JackknifeEstimate> {
        let x = self.x.as_ref().ok_or_else(|| PostStratError::configuration("analysis is missing a sample"))?;
        let estimator = self.estimator.as_ref().ok_or_else(|| PostStratError::configuration("analysis is missing an estimator"))?;

        jackknife(
            x,
            self.strata.as_deref(),
            self.wgt.as_ref().map(|w| w.as_slice()),
            self.check,
            &**estimator,
        )
    }

    pub fn summary(&self) -> String {
        let estimate_name = self.estimator.as_ref().map(|e| e.name().to_string()).unwrap_or("none".to_string());

        let data_info = match &self.x {
            None => "no data".to_string(),
            Some(x) => format!("{} cases", x.len()),
        };

        let strata_info = match &self.strata {
            None => "unstratified".to_string(),
            Some(strata) => format!("{} strata", strata.n_strata()),
        };

        let wgt_info = match &self.wgt {
            None => "unit weights".to_string(),
            Some(wgts) => format!("{} weights of sum {}", wgts.len(), wgts.iter().sum::<f64>()),
        };

        let check_info = if self.check { "" } else { "; unchecked" };

        estimate_name + " (" + &data_info + "; " + &strata_info + "; " + &wgt_info + check_info + ")"
    }

    pub fn copy(&self) -> Analysis {
        Analysis {
            x: self.x.clone(),
            strata: self.strata.clone(),
            wgt: self.wgt.clone(),
            check: self.check,
            estimator: self.estimator.clone(),
        }
    }
}
