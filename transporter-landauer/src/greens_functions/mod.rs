//! # Greens functions
//!
//! The retarded Green's function of the open device is the resolvent
//!
//! `G^r(E) = [(E + iη) I - H - Σ_L - Σ_R]^{-1}`
//!
//! and the advanced function is its Hermitian adjoint. The broadening `η` must be strictly
//! positive: with passive self energies this keeps every pole in the lower half plane and
//! the resolvent well defined for real energies.

mod transmission;

pub use transmission::{clamp_transmission, density_of_states, transmission};
pub(crate) use transmission::transmission_and_retarded;

use crate::{
    error::{ensure_finite, ensure_positive, TransportError},
    hamiltonian::DeviceHamiltonian,
    matrix::ComplexMatrix,
    self_energy::LeadSelfEnergy,
};
use num_complex::Complex;

/// Methods to construct Green's functions in a given matrix representation
pub trait GreensFunctionMethods: Sized {
    /// The representation of the lead self energies
    type SelfEnergy;
    /// Builds the retarded Green's function at `energy`
    fn generate_retarded(
        energy: f64,
        broadening: f64,
        hamiltonian: &DeviceHamiltonian,
        self_energy: &Self::SelfEnergy,
    ) -> Result<Self, TransportError>;
    /// Builds the advanced Green's function from the retarded
    fn generate_advanced(retarded: &Self) -> Self;
}

impl GreensFunctionMethods for ComplexMatrix {
    type SelfEnergy = LeadSelfEnergy;

    fn generate_retarded(
        energy: f64,
        broadening: f64,
        hamiltonian: &DeviceHamiltonian,
        self_energy: &LeadSelfEnergy,
    ) -> Result<Self, TransportError> {
        let num_rows = hamiltonian.number_of_sites();
        // A dense inversion. The chains are short enough that the recursive algorithms are not worth it
        let matrix = ComplexMatrix::zeros(num_rows)?
            .scalar_add_diagonal(Complex::new(energy, broadening))
            .subtract(hamiltonian.matrix())?
            .subtract(self_energy.left())?
            .subtract(self_energy.right())?;
        matrix.invert()
    }

    fn generate_advanced(retarded: &Self) -> Self {
        retarded.conjugate_transpose()
    }
}

/// Validates the energy and broadening of a Green's function evaluation
pub(crate) fn check_evaluation_point(energy: f64, broadening: f64) -> Result<(), TransportError> {
    ensure_finite("E", energy)?;
    ensure_positive("eta", broadening)
}

/// The retarded Green's function of the open device at `energy`
pub fn retarded(
    energy: f64,
    hamiltonian: &DeviceHamiltonian,
    self_energy: &LeadSelfEnergy,
    broadening: f64,
) -> Result<ComplexMatrix, TransportError> {
    check_evaluation_point(energy, broadening)?;
    ComplexMatrix::generate_retarded(energy, broadening, hamiltonian, self_energy)
}

/// The advanced Green's function `G^a = (G^r)†`
pub fn advanced(retarded: &ComplexMatrix) -> ComplexMatrix {
    ComplexMatrix::generate_advanced(retarded)
}
