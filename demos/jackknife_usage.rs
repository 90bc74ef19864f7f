extern crate poststrat;

use poststrat::capply::stratum_sizes;
use poststrat::estimates::{std_weights, wtd_mean};
use poststrat::helper::Strata;
use poststrat::jackknife::{jk_lin_comb_se, jk_wtd_mean_se};

fn main() {
    let income = vec![21.5, 18.0, 25.25, 30.0, 27.5, 33.0, 12.0, 16.5, 19.0, 22.0, 17.5, 24.0];
    let region = ["N", "N", "N", "N", "N", "N", "S", "S", "S", "S", "S", "S"];
    let sex = ["m", "m", "m", "f", "f", "f", "m", "m", "f", "f", "f", "f"];
    let weights = vec![10.0, 10.0, 10.0, 15.0, 15.0, 15.0, 10.0, 10.0, 15.0, 15.0, 15.0, 15.0];

    let strata = Strata::from_columns(&[&region[..], &sex[..]]).expect("unable to build strata");
    println!("stratum sizes {:?}", stratum_sizes(&strata));

    let mean = wtd_mean(&income, &weights).expect("unable to calculate mean");
    let se = jk_wtd_mean_se(&income, Some(&strata), Some(&weights), true).expect("unable to calculate standard error");
    println!("mean {} with standard error of {}", mean, se);

    let shares = std_weights(&weights, None).expect("unable to standardize weights");
    let se_shares = jk_lin_comb_se(&income, Some(&strata), Some(&shares), true).expect("unable to calculate standard error");
    println!("linear combination with standardized weights has standard error of {}", se_shares);
}
