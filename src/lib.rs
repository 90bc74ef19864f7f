pub mod errors;
pub mod helper;
pub mod capply;
pub mod estimates;
pub mod jackknife;
pub mod tables;
pub mod frame;
pub mod analysis;
pub mod external;

pub use errors::PostStratError;
pub use external::*;

uniffi::include_scaffolding!("poststrat");
