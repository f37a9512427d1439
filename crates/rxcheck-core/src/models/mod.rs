//! Domain models for rxcheck.

mod analysis;
mod dosage;
mod interaction;

pub use analysis::*;
pub use dosage::*;
pub use interaction::*;
