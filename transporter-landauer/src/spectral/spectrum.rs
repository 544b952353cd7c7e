use super::{LinearGrid, LinearGridBuilder};
use crate::{
    error::{ensure_positive, TransportError},
    greens_functions::{clamp_transmission, density_of_states, transmission_and_retarded},
    hamiltonian::DeviceHamiltonian,
    self_energy::LeadSelfEnergy,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// A single sample of the transmission spectrum
pub struct SpectralPoint {
    /// Energy of the sample
    pub energy: f64,
    /// Transmission at `energy`, clamped to be non-negative
    pub transmission: f64,
    /// The density of states `-Im Tr[G^r] / π` at `energy`
    pub density_of_states: f64,
}

/// A lazy transmission spectrum over an energy grid.
///
/// Each call to `next` performs one dense inversion. The iterator borrows the device and
/// holds no other state than its position, so a clone restarts from the current point
/// and yields identical values.
#[derive(Clone, Debug)]
pub struct Spectrum<'a> {
    grid: LinearGrid,
    index: usize,
    hamiltonian: &'a DeviceHamiltonian,
    self_energy: &'a LeadSelfEnergy,
    broadening: f64,
}

impl Spectrum<'_> {
    /// The energy grid the spectrum is evaluated on
    pub fn grid(&self) -> &LinearGrid {
        &self.grid
    }
}

impl Iterator for Spectrum<'_> {
    type Item = Result<SpectralPoint, TransportError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.grid.number_of_points() {
            return None;
        }
        let energy = self.grid.point(self.index);
        self.index += 1;
        let point = transmission_and_retarded(
            energy,
            self.hamiltonian,
            self.self_energy,
            self.broadening,
        )
        .map(|(raw, retarded)| SpectralPoint {
            energy,
            transmission: clamp_transmission(raw),
            density_of_states: density_of_states(&retarded),
        })
        .map_err(|error| {
            tracing::error!("Spectrum failed at E = {}: {}", energy, error);
            error.at_point("E", energy)
        });
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.number_of_points() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Spectrum<'_> {}

/// The clamped transmission at `steps` evenly spaced energies from `minimum` to `maximum`.
///
/// All arguments are validated before the first inversion: fewer than two steps, a
/// non-positive broadening, non-finite bounds or self energies sized for a different chain
/// are rejected eagerly.
pub fn spectrum<'a>(
    minimum: f64,
    maximum: f64,
    steps: usize,
    hamiltonian: &'a DeviceHamiltonian,
    self_energy: &'a LeadSelfEnergy,
    broadening: f64,
) -> Result<Spectrum<'a>, TransportError> {
    let grid = LinearGridBuilder::new("steps")
        .with_number_of_points(steps)
        .with_range(minimum..=maximum)
        .build()?;
    ensure_positive("eta", broadening)?;
    if hamiltonian.number_of_sites() != self_energy.number_of_sites() {
        return Err(TransportError::DimensionMismatch {
            operation: "spectrum",
            left: hamiltonian.number_of_sites(),
            right: self_energy.number_of_sites(),
        });
    }
    Ok(Spectrum {
        grid,
        index: 0,
        hamiltonian,
        self_energy,
        broadening,
    })
}

#[cfg(test)]
mod test {
    use super::spectrum;
    use crate::{
        error::TransportError,
        hamiltonian::{build_hamiltonian, disorder_rng},
        self_energy::build_self_energies,
    };

    #[test]
    fn single_step_is_rejected() {
        let hamiltonian = build_hamiltonian(3, -1., 0., 0., &mut disorder_rng(Some(0))).unwrap();
        let self_energy = build_self_energies(3, 0.5, 0.5).unwrap();
        assert!(matches!(
            spectrum(-1., 1., 1, &hamiltonian, &self_energy, 1e-3),
            Err(TransportError::InvalidParameter { name, .. }) if name == "steps"
        ));
    }

    #[test]
    fn spectrum_is_lazy_and_sized() {
        let hamiltonian = build_hamiltonian(3, -1., 0., 0., &mut disorder_rng(Some(0))).unwrap();
        let self_energy = build_self_energies(3, 0.5, 0.5).unwrap();
        let mut points = spectrum(-3., 3., 13, &hamiltonian, &self_energy, 1e-3).unwrap();
        assert_eq!(points.len(), 13);
        let first = points.next().unwrap().unwrap();
        assert_eq!(first.energy, -3.);
        assert_eq!(points.len(), 12);
        let last = points.last().unwrap().unwrap();
        assert_eq!(last.energy, 3.);
    }

    #[test]
    fn cloned_spectrum_replays_identical_values() {
        let hamiltonian = build_hamiltonian(6, -1., 0.1, 0., &mut disorder_rng(Some(0))).unwrap();
        let self_energy = build_self_energies(6, 0.5, 0.3).unwrap();
        let points = spectrum(-2., 2., 41, &hamiltonian, &self_energy, 1e-3).unwrap();
        let replay = points.clone();
        let first: Vec<_> = points.map(Result::unwrap).collect();
        let second: Vec<_> = replay.map(Result::unwrap).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn density_of_states_is_non_negative() {
        let hamiltonian = build_hamiltonian(10, -1., 0., 0., &mut disorder_rng(Some(0))).unwrap();
        let self_energy = build_self_energies(10, 0.5, 0.5).unwrap();
        for point in spectrum(-3., 3., 61, &hamiltonian, &self_energy, 1e-3).unwrap() {
            let point = point.unwrap();
            assert!(point.density_of_states >= 0.);
            assert!(point.transmission >= 0.);
        }
    }

    #[test]
    fn energy_ranges_wider_than_a_double_fail_before_any_inversion() {
        let hamiltonian = build_hamiltonian(3, -1., 0., 0., &mut disorder_rng(Some(0))).unwrap();
        let self_energy = build_self_energies(3, 0.5, 0.5).unwrap();
        assert!(matches!(
            spectrum(-1e308, 1e308, 3, &hamiltonian, &self_energy, 1e-3),
            Err(TransportError::InvalidParameter { name, .. }) if name == "range span"
        ));
    }

    #[test]
    fn failing_energy_is_carried_by_its_error() {
        // At E = -1e308 the diagonal E - eps overflows to -inf and no pivot survives
        let hamiltonian = build_hamiltonian(2, -1., 1e308, 0., &mut disorder_rng(Some(0))).unwrap();
        let self_energy = build_self_energies(2, 0.5, 0.5).unwrap();
        let mut points = spectrum(-1e308, 0., 2, &hamiltonian, &self_energy, 1e-3).unwrap();
        let error = points.next().unwrap().unwrap_err();
        assert!(matches!(
            &error,
            TransportError::PointFailed { parameter, value, .. } if parameter == "E" && *value == -1e308
        ));
        assert!(matches!(
            error.root_cause(),
            TransportError::SingularMatrix { .. }
        ));
        assert_eq!(points.next().unwrap().unwrap().energy, 0.);
    }

    #[test]
    fn mismatched_self_energies_fail_before_any_inversion() {
        let hamiltonian = build_hamiltonian(3, -1., 0., 0., &mut disorder_rng(Some(0))).unwrap();
        let self_energy = build_self_energies(5, 0.5, 0.5).unwrap();
        assert!(matches!(
            spectrum(-1., 1., 5, &hamiltonian, &self_energy, 1e-3),
            Err(TransportError::DimensionMismatch { left: 3, right: 5, .. })
        ));
    }
}
