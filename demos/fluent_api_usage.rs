extern crate poststrat;

use poststrat::analysis;
use poststrat::helper::Strata;

pub fn main() {
    let income = vec![21.5, 18.0, 25.25, 30.0, 27.5, 33.0, 12.0, 16.5, 19.0, 22.0, 17.5, 24.0];
    let strata = Strata::from_labels(&["Nm", "Nm", "Nm", "Nf", "Nf", "Nf", "Sm", "Sm", "Sf", "Sf", "Sf", "Sf"]);
    let weights = vec![10.0, 10.0, 10.0, 15.0, 15.0, 15.0, 10.0, 10.0, 15.0, 15.0, 15.0, 15.0];

    let mut analysis = analysis::analysis();

    analysis
        .stratify_by(&strata)
        .set_weights(&weights);
    println!("Analysis setup: {}", analysis.summary());

    let result_mean = analysis
        .for_sample(&income)
        .mean()
        .calculate()
        .expect("unable to calculate mean");
    println!("Analysis 1: {}", analysis.summary());
    println!("mean is {} with standard error of {}", result_mean.estimate(), result_mean.standard_error());

    let mut analysis2 = analysis.copy();
    let result_total = analysis2
        .linear_combination()
        .calculate()
        .expect("unable to calculate total");
    println!("Analysis 2: {}", analysis2.summary());
    println!("total is {} with standard error of {}", result_total.estimate(), result_total.standard_error());
}
