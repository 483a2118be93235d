//! The pure part of spotiskill: folding joined rows into nested catalog objects,
//! and computing listening statistics over playing events.

mod fold;
mod models;
mod stats;

pub use fold::*;
pub use models::*;
pub use stats::*;
