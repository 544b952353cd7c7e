//! # Parameters
//!
//! The immutable description of a single transport calculation. A `ParameterSet` is built
//! once per invocation, from configuration and the command line, and a sweep derives
//! copies of it with a single field overridden through `with_override`.

mod annotation;

pub use annotation::PhysicalAnnotation;

use crate::{
    error::{ensure_finite, ensure_non_negative, ensure_positive, TransportError},
    hamiltonian::{build_hamiltonian, disorder_rng, DeviceHamiltonian},
    matrix::element_count,
    postprocessor::conductance,
    self_energy::{build_self_energies, LeadSelfEnergy},
    spectral::{voltage_grid, LinearGrid, LinearGridBuilder},
};
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Every input of a transport calculation
pub struct ParameterSet {
    /// Number of sites in the chain, `N`
    pub number_of_sites: usize,
    /// Nearest neighbour hopping `t`
    pub hopping: f64,
    /// Onsite energy `eps`
    pub onsite_energy: f64,
    /// Amplitude of the uniform onsite disorder
    pub disorder: f64,
    /// Coupling to the left lead `gammaL`
    pub gamma_left: f64,
    /// Coupling to the right lead `gammaR`
    pub gamma_right: f64,
    /// Broadening `eta` added to the energy
    pub eta: f64,
    /// Fermi energy `EF` at which the conductance is evaluated
    pub fermi_energy: f64,
    /// Seed for the disorder generator, drawn from entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Lower bound of the spectrum energy range
    pub energy_min: f64,
    /// Upper bound of the spectrum energy range
    pub energy_max: f64,
    /// Number of energies in the spectrum, including both bounds
    pub energy_steps: usize,
    /// Lowest bias of the current-voltage characteristic
    pub voltage_min: f64,
    /// Highest bias of the current-voltage characteristic
    pub voltage_max: f64,
    /// Number of bias points, including both bounds
    pub voltage_steps: usize,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            number_of_sites: 50,
            hopping: -1.,
            onsite_energy: 0.,
            disorder: 0.,
            gamma_left: 0.5,
            gamma_right: 0.5,
            eta: 1e-3,
            fermi_energy: 0.,
            seed: None,
            energy_min: -3.,
            energy_max: 3.,
            energy_steps: 201,
            voltage_min: -0.1,
            voltage_max: 0.1,
            voltage_steps: 21,
        }
    }
}

impl ParameterSet {
    /// Checks every device input without building any matrices
    pub fn validate_device(&self) -> Result<(), TransportError> {
        if self.number_of_sites < 1 {
            return Err(TransportError::InvalidDimension {
                dimension: self.number_of_sites,
                reason: "a chain needs at least one site",
            });
        }
        if self.number_of_sites == 1 {
            return Err(TransportError::InvalidConfiguration(
                "both leads would attach to the single site of a one-site chain, at least two sites are needed".into(),
            ));
        }
        element_count(self.number_of_sites, self.number_of_sites)?;
        ensure_finite("t", self.hopping)?;
        ensure_finite("eps", self.onsite_energy)?;
        ensure_non_negative("disorder", self.disorder)?;
        ensure_non_negative("gammaL", self.gamma_left)?;
        ensure_non_negative("gammaR", self.gamma_right)?;
        ensure_positive("eta", self.eta)?;
        ensure_finite("EF", self.fermi_energy)
    }

    /// Checks the device inputs and both the energy and voltage grids
    pub fn validate(&self) -> Result<(), TransportError> {
        self.validate_device()?;
        self.energy_grid()?;
        self.voltage_grid()?;
        Ok(())
    }

    /// The value currently held by a sweepable parameter
    pub fn get(&self, parameter: SweepParameter) -> f64 {
        match parameter {
            SweepParameter::NumberOfSites => self.number_of_sites as f64,
            SweepParameter::Hopping => self.hopping,
            SweepParameter::OnsiteEnergy => self.onsite_energy,
            SweepParameter::Disorder => self.disorder,
            SweepParameter::GammaLeft => self.gamma_left,
            SweepParameter::GammaRight => self.gamma_right,
            SweepParameter::Eta => self.eta,
            SweepParameter::FermiEnergy => self.fermi_energy,
        }
    }

    /// A copy of the parameters with `parameter` replaced by `value`.
    ///
    /// Chain lengths must be whole numbers no smaller than one. Other values are only
    /// checked for their physical domain by `validate_device`.
    pub fn with_override(
        &self,
        parameter: SweepParameter,
        value: f64,
    ) -> Result<Self, TransportError> {
        let mut parameters = self.clone();
        match parameter {
            SweepParameter::NumberOfSites => {
                // `usize::MAX as f64` rounds up to 2^64, the first whole value that does not fit
                if !value.is_finite()
                    || value < 1.
                    || value.fract() != 0.
                    || value >= usize::MAX as f64
                {
                    return Err(TransportError::invalid_parameter(
                        parameter.to_string(),
                        value,
                        "the number of sites must be a positive integer",
                    ));
                }
                parameters.number_of_sites = value as usize;
            }
            SweepParameter::Hopping => parameters.hopping = value,
            SweepParameter::OnsiteEnergy => parameters.onsite_energy = value,
            SweepParameter::Disorder => parameters.disorder = value,
            SweepParameter::GammaLeft => parameters.gamma_left = value,
            SweepParameter::GammaRight => parameters.gamma_right = value,
            SweepParameter::Eta => parameters.eta = value,
            SweepParameter::FermiEnergy => parameters.fermi_energy = value,
        }
        Ok(parameters)
    }

    /// The disorder generator for these parameters
    pub fn rng(&self) -> StdRng {
        disorder_rng(self.seed)
    }

    /// Builds the device Hamiltonian, drawing any disorder from `rng`
    pub fn build_hamiltonian<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<DeviceHamiltonian, TransportError> {
        build_hamiltonian(
            self.number_of_sites,
            self.hopping,
            self.onsite_energy,
            self.disorder,
            rng,
        )
    }

    /// Builds the lead self energies
    pub fn build_self_energies(&self) -> Result<LeadSelfEnergy, TransportError> {
        build_self_energies(self.number_of_sites, self.gamma_left, self.gamma_right)
    }

    /// Builds the device from scratch and evaluates the conductance at the Fermi energy
    pub fn conductance<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64, TransportError> {
        let hamiltonian = self.build_hamiltonian(rng)?;
        let self_energy = self.build_self_energies()?;
        conductance(self.fermi_energy, &hamiltonian, &self_energy, self.eta)
    }

    /// The energy grid of the transmission spectrum
    pub fn energy_grid(&self) -> Result<LinearGrid, TransportError> {
        LinearGridBuilder::new("steps")
            .with_number_of_points(self.energy_steps)
            .with_range(self.energy_min..=self.energy_max)
            .build()
    }

    /// The bias points of the current-voltage characteristic
    pub fn voltage_grid(&self) -> Result<LinearGrid, TransportError> {
        voltage_grid(self.voltage_min, self.voltage_max, self.voltage_steps)
    }

    /// Textual interpretation of the device parameters
    pub fn annotate(&self) -> PhysicalAnnotation {
        PhysicalAnnotation::from(self)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// The parameters a sweep may vary
pub enum SweepParameter {
    /// `N`
    NumberOfSites,
    /// `t`
    Hopping,
    /// `eps`
    OnsiteEnergy,
    /// `disorder`
    Disorder,
    /// `gammaL`
    GammaLeft,
    /// `gammaR`
    GammaRight,
    /// `eta`
    Eta,
    /// `EF`, also accepted as `Ef`
    FermiEnergy,
}

impl SweepParameter {
    /// Every sweepable parameter, in the order they are listed to users
    pub const ALL: [SweepParameter; 8] = [
        SweepParameter::NumberOfSites,
        SweepParameter::Hopping,
        SweepParameter::OnsiteEnergy,
        SweepParameter::Disorder,
        SweepParameter::GammaLeft,
        SweepParameter::GammaRight,
        SweepParameter::Eta,
        SweepParameter::FermiEnergy,
    ];

    /// The short name used on the command line and in artifacts
    pub fn name(&self) -> &'static str {
        match self {
            SweepParameter::NumberOfSites => "N",
            SweepParameter::Hopping => "t",
            SweepParameter::OnsiteEnergy => "eps",
            SweepParameter::Disorder => "disorder",
            SweepParameter::GammaLeft => "gammaL",
            SweepParameter::GammaRight => "gammaR",
            SweepParameter::Eta => "eta",
            SweepParameter::FermiEnergy => "EF",
        }
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SweepParameter {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Ef" {
            return Ok(SweepParameter::FermiEnergy);
        }
        SweepParameter::ALL
            .into_iter()
            .find(|parameter| parameter.name() == s)
            .ok_or_else(|| {
                TransportError::invalid_parameter(
                    "param",
                    s,
                    "expected one of N, t, eps, disorder, gammaL, gammaR, eta, EF",
                )
            })
    }
}
