// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Constants
//!
//! Defines physical constants used in the simulation

pub const ELECTRON_CHARGE: f64 = 1.602176634e-19; // Single electron charge in C
pub const PLANCK: f64 = 6.62607015e-34; // Planck constant in J s

/// The conductance quantum `2e^2 / h` in Siemens
pub const CONDUCTANCE_QUANTUM: f64 = 2. * ELECTRON_CHARGE * ELECTRON_CHARGE / PLANCK;

/// Raw transmissions below this value are clamped to it before use
pub const TRANSMISSION_FLOOR: f64 = 0.0;
