//! # Postprocessor
//!
//! Observables derived from the transmission of the device: the Landauer conductance at
//! the Fermi energy and the linear-response current-voltage characteristic built on it.

mod conductance;
mod current;

pub use conductance::conductance;
pub use current::{linear_response_iv, ohmic_current, BiasPoint};
