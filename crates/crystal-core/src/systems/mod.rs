//! Systems - logic that operates on components

mod anomaly;
mod consumption;
mod crystal;
mod soother;

pub use anomaly::*;
pub use consumption::*;
pub use crystal::*;
pub use soother::*;
