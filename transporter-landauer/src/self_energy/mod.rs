//! Self energies for the semi-infinite leads
//!
//! Leads are treated in the wide-band approximation: each lead contributes an
//! energy-independent, purely imaginary self energy `-i Γ / 2` on the site it touches.
//! The left lead is attached to site `0` and the right lead to site `N - 1`.

mod contact;

pub use contact::{broadening, contact_self_energy};

use crate::{
    error::{ensure_non_negative, TransportError},
    matrix::ComplexMatrix,
};

#[derive(Clone, Debug, PartialEq)]
/// The retarded self energies of the left and right leads
pub struct LeadSelfEnergy {
    left: ComplexMatrix,
    right: ComplexMatrix,
    gamma_left: f64,
    gamma_right: f64,
}

impl LeadSelfEnergy {
    /// The left lead self energy, nonzero only at `(0, 0)`
    pub fn left(&self) -> &ComplexMatrix {
        &self.left
    }

    /// The right lead self energy, nonzero only at `(N - 1, N - 1)`
    pub fn right(&self) -> &ComplexMatrix {
        &self.right
    }

    /// Coupling strength of the left contact
    pub fn gamma_left(&self) -> f64 {
        self.gamma_left
    }

    /// Coupling strength of the right contact
    pub fn gamma_right(&self) -> f64 {
        self.gamma_right
    }

    /// Number of device sites the self energies act on
    pub fn number_of_sites(&self) -> usize {
        self.left.dimension()
    }

    /// The summed self energy `ΣL + ΣR`
    pub fn total(&self) -> Result<ComplexMatrix, TransportError> {
        self.left.add(&self.right)
    }

    /// Broadening `ΓL = i(ΣL - ΣL†)` of the left contact
    pub fn left_broadening(&self) -> Result<ComplexMatrix, TransportError> {
        broadening(&self.left)
    }

    /// Broadening `ΓR = i(ΣR - ΣR†)` of the right contact
    pub fn right_broadening(&self) -> Result<ComplexMatrix, TransportError> {
        broadening(&self.right)
    }
}

/// Builds the wide-band self energies of two leads attached to the ends of the chain.
///
/// At least two sites are required so the contacts are distinct, and the couplings must
/// be non-negative so the self energies stay passive (`Im Σ <= 0`).
#[tracing::instrument(name = "Self energy builder", level = "debug")]
pub fn build_self_energies(
    number_of_sites: usize,
    gamma_left: f64,
    gamma_right: f64,
) -> Result<LeadSelfEnergy, TransportError> {
    if number_of_sites < 1 {
        return Err(TransportError::InvalidDimension {
            dimension: number_of_sites,
            reason: "a chain needs at least one site",
        });
    }
    if number_of_sites == 1 {
        return Err(TransportError::InvalidConfiguration(
            "both leads would attach to the single site of a one-site chain, at least two sites are needed".into(),
        ));
    }
    ensure_non_negative("gammaL", gamma_left)?;
    ensure_non_negative("gammaR", gamma_right)?;

    let mut left = ComplexMatrix::zeros(number_of_sites)?;
    let mut right = ComplexMatrix::zeros(number_of_sites)?;
    left[(0, 0)] = contact_self_energy(gamma_left);
    right[(number_of_sites - 1, number_of_sites - 1)] = contact_self_energy(gamma_right);

    Ok(LeadSelfEnergy {
        left,
        right,
        gamma_left,
        gamma_right,
    })
}
