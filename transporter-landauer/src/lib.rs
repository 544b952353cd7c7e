// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Transporter Landauer is a coherent electron transport solver written in Rust
//!
//! # Overview
//! Transporter Landauer calculates the coherent transmission of a finite one-dimensional
//! tight-binding chain attached to two wide-band leads. The retarded Green's function of the
//! open device
//!
//! `G^r(E) = [(E + iη) I - H - Σ_L - Σ_R]^{-1}`
//!
//! gives the transmission `T(E) = Re Tr[Γ_L G^r Γ_R G^a]`, with `Γ = i(Σ - Σ†)` the broadening
//! of each lead. The Landauer formula turns the transmission at the Fermi energy into a
//! conductance `G = (2e²/h) T(E_F)`, and from there a small-signal current-voltage
//! characteristic follows.
//!
//! The pipeline is strictly one way: parameters build a Hamiltonian and the lead self
//! energies, a dense Gauss-Jordan inversion gives the Green's function, and the observables
//! are computed from it. There is no self-consistent loop.
//!
//! # Usage
//! Transporter Landauer is distributed as a binary crate, and is intended to be run from the
//! command line:
//!
//! ```bash
//! transporter-landauer spectrum --sites 50 --hopping -1.0 --gamma-left 0.5 --gamma-right 0.5
//! transporter-landauer sweep --param gammaL --values 0.1,0.5,1.0
//! ```
//!
//! The same calculations are available as a library:
//!
//! ```
//! use transporter_landauer::{build_hamiltonian, build_self_energies, conductance, disorder_rng};
//!
//! let hamiltonian = build_hamiltonian(3, -1.0, 0.0, 0.0, &mut disorder_rng(Some(0))).unwrap();
//! let self_energy = build_self_energies(3, 0.5, 0.5).unwrap();
//! let g = conductance(0.0, &hamiltonian, &self_energy, 1e-3).unwrap();
//! assert!(g > 0.0);
//! ```

#![warn(missing_docs)]

/// The command line global application, tracing and display primitives
pub mod app;

/// Physical constants
pub mod constants;

/// Error handling
mod error;

/// Greens function methods
pub mod greens_functions;

/// System Hamiltonian
pub mod hamiltonian;

/// Dense complex matrices and their inversion
pub mod matrix;

/// Transport parameters and their physical interpretation
pub mod parameters;

/// Computes quantities of interest from the transmission, the conductance and current
pub mod postprocessor;

/// Self energies of the contacts
pub mod self_energy;

/// Discrete energy and voltage spaces and the transmission spectrum
pub mod spectral;

/// One-parameter sweeps of the conductance
pub mod sweep;

/// Helper functions and traits
pub mod utilities;

pub use constants::{CONDUCTANCE_QUANTUM, TRANSMISSION_FLOOR};
pub use error::TransportError;
pub use greens_functions::{clamp_transmission, transmission};
pub use hamiltonian::{build_hamiltonian, disorder_rng, DeviceHamiltonian};
pub use matrix::ComplexMatrix;
pub use parameters::{ParameterSet, SweepParameter};
pub use postprocessor::{conductance, linear_response_iv, ohmic_current, BiasPoint};
pub use self_energy::{build_self_energies, LeadSelfEnergy};
pub use spectral::{spectrum, SpectralPoint};
pub use sweep::{parallel_sweep, sweep, sweep_with_control, SweepControl, SweepPoint};
