//! Hamiltonian module
//!
//! Creates the Hamiltonian of an isolated one-dimensional tight-binding chain:
//!
//! - the diagonal holds the onsite energy `eps`, optionally perturbed by a uniform random
//!   draw in `[-disorder, disorder]` at every site
//! - the first off-diagonals hold the nearest-neighbour hopping `t`
//!
//! A Hamiltonian is constructed through the `HamiltonianBuilder` as
//!
//! ```ignore
//! HamiltonianBuilder::default()
//!     .with_number_of_sites(50)
//!     .with_hopping(-1.0)
//!     .with_onsite_energy(0.0)
//!     .with_disorder(0.1)
//!     .build(&mut rng)?;
//! ```
//!
//! The random source is always passed explicitly, so two builds fed identically seeded
//! generators produce identical matrices. With zero disorder the generator is not touched.

use crate::{
    error::{ensure_finite, ensure_non_negative, TransportError},
    matrix::ComplexMatrix,
    utilities::matrices::is_hermitian,
};
use num_complex::Complex;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Clone, Debug, PartialEq)]
/// The Hamiltonian of the isolated device. The matrix is real-symmetric, and so Hermitian
pub struct DeviceHamiltonian {
    matrix: ComplexMatrix,
}

impl DeviceHamiltonian {
    /// Number of sites in the chain
    pub fn number_of_sites(&self) -> usize {
        self.matrix.dimension()
    }

    /// The onsite energy at each site, including any disorder
    pub fn onsite_energies(&self) -> impl Iterator<Item = f64> + '_ {
        self.matrix.diagonal().map(|value| value.re)
    }

    /// The dense Hamiltonian matrix
    pub fn matrix(&self) -> &ComplexMatrix {
        &self.matrix
    }
}

impl AsRef<ComplexMatrix> for DeviceHamiltonian {
    fn as_ref(&self) -> &ComplexMatrix {
        &self.matrix
    }
}

/// Builder for a `DeviceHamiltonian`
#[derive(Clone, Debug)]
pub struct HamiltonianBuilder {
    number_of_sites: usize,
    hopping: f64,
    onsite_energy: f64,
    disorder: f64,
}

impl Default for HamiltonianBuilder {
    /// A single clean site with zero onsite energy and no hopping
    fn default() -> Self {
        Self {
            number_of_sites: 1,
            hopping: 0.,
            onsite_energy: 0.,
            disorder: 0.,
        }
    }
}

impl HamiltonianBuilder {
    /// Set the number of sites in the chain
    pub fn with_number_of_sites(self, number_of_sites: usize) -> Self {
        Self {
            number_of_sites,
            ..self
        }
    }

    /// Set the nearest neighbour hopping amplitude
    pub fn with_hopping(self, hopping: f64) -> Self {
        Self { hopping, ..self }
    }

    /// Set the baseline onsite energy
    pub fn with_onsite_energy(self, onsite_energy: f64) -> Self {
        Self {
            onsite_energy,
            ..self
        }
    }

    /// Set the amplitude of the uniform onsite disorder
    pub fn with_disorder(self, disorder: f64) -> Self {
        Self { disorder, ..self }
    }

    /// Builds the `DeviceHamiltonian`, drawing the onsite disorder from `rng`
    #[tracing::instrument(name = "Hamiltonian Builder", level = "debug", skip(rng))]
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> Result<DeviceHamiltonian, TransportError> {
        if self.number_of_sites < 1 {
            return Err(TransportError::InvalidDimension {
                dimension: self.number_of_sites,
                reason: "a chain needs at least one site",
            });
        }
        ensure_finite("t", self.hopping)?;
        ensure_finite("eps", self.onsite_energy)?;
        ensure_non_negative("disorder", self.disorder)?;

        let mut matrix = ComplexMatrix::zeros(self.number_of_sites)?;
        for idx in 0..self.number_of_sites {
            let shift = if self.disorder > 0. {
                rng.gen_range(-self.disorder..=self.disorder)
            } else {
                0.
            };
            matrix[(idx, idx)] = Complex::from(self.onsite_energy + shift);
        }
        for idx in 0..self.number_of_sites - 1 {
            matrix[(idx, idx + 1)] = Complex::from(self.hopping);
            matrix[(idx + 1, idx)] = Complex::from(self.hopping);
        }
        debug_assert!(is_hermitian(&matrix));
        tracing::trace!("Assembled a {} site tight-binding chain", self.number_of_sites);

        Ok(DeviceHamiltonian { matrix })
    }
}

/// Builds the tight-binding Hamiltonian of an `number_of_sites` chain
pub fn build_hamiltonian<R: Rng + ?Sized>(
    number_of_sites: usize,
    hopping: f64,
    onsite_energy: f64,
    disorder: f64,
    rng: &mut R,
) -> Result<DeviceHamiltonian, TransportError> {
    HamiltonianBuilder::default()
        .with_number_of_sites(number_of_sites)
        .with_hopping(hopping)
        .with_onsite_energy(onsite_energy)
        .with_disorder(disorder)
        .build(rng)
}

/// The generator used for disorder draws: reproducible when seeded, entropy-seeded otherwise
pub fn disorder_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
