use super::{check_evaluation_point, GreensFunctionMethods};
use crate::{
    constants::TRANSMISSION_FLOOR, error::TransportError, hamiltonian::DeviceHamiltonian,
    matrix::ComplexMatrix, self_energy::LeadSelfEnergy,
};

/// The raw transmission `Tr[ΓL G^r ΓR G^a]` at `energy` together with `G^r`
pub(crate) fn transmission_and_retarded(
    energy: f64,
    hamiltonian: &DeviceHamiltonian,
    self_energy: &LeadSelfEnergy,
    broadening: f64,
) -> Result<(f64, ComplexMatrix), TransportError> {
    check_evaluation_point(energy, broadening)?;
    let retarded = ComplexMatrix::generate_retarded(energy, broadening, hamiltonian, self_energy)?;
    let advanced = ComplexMatrix::generate_advanced(&retarded);

    let gamma_left = self_energy.left_broadening()?;
    let gamma_right = self_energy.right_broadening()?;

    let left = gamma_left.multiply(&retarded)?;
    let right = gamma_right.multiply(&advanced)?;
    let value = left.multiply(&right)?.trace().re;
    Ok((value, retarded))
}

/// The coherent transmission `T(E) = Re Tr[ΓL G^r ΓR G^a]`.
///
/// The returned value is not clamped: finite broadening can leave it a rounding error
/// below zero, callers pass it through `clamp_transmission` before use.
#[tracing::instrument(level = "trace", skip(hamiltonian, self_energy))]
pub fn transmission(
    energy: f64,
    hamiltonian: &DeviceHamiltonian,
    self_energy: &LeadSelfEnergy,
    broadening: f64,
) -> Result<f64, TransportError> {
    transmission_and_retarded(energy, hamiltonian, self_energy, broadening).map(|(value, _)| value)
}

/// Clamps a raw transmission at `TRANSMISSION_FLOOR`
pub fn clamp_transmission(raw: f64) -> f64 {
    if raw < TRANSMISSION_FLOOR {
        tracing::trace!("Clamping numerically negative transmission {:e}", raw);
        return TRANSMISSION_FLOOR;
    }
    raw
}

/// The density of states `-Im Tr[G^r] / π`
pub fn density_of_states(retarded: &ComplexMatrix) -> f64 {
    -retarded.trace().im / std::f64::consts::PI
}

#[cfg(test)]
mod test {
    use super::{clamp_transmission, transmission};
    use crate::{
        hamiltonian::{build_hamiltonian, disorder_rng},
        self_energy::build_self_energies,
    };
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn chain_transmission(
        number_of_sites: usize,
        gamma_left: f64,
        gamma_right: f64,
        energy: f64,
    ) -> f64 {
        let hamiltonian =
            build_hamiltonian(number_of_sites, -1., 0., 0., &mut disorder_rng(Some(0))).unwrap();
        let self_energy = build_self_energies(number_of_sites, gamma_left, gamma_right).unwrap();
        clamp_transmission(transmission(energy, &hamiltonian, &self_energy, 1e-3).unwrap())
    }

    #[test]
    fn three_site_chain_is_resonant_at_the_band_centre() {
        let peak = chain_transmission(3, 0.5, 0.5, 0.);
        assert!(peak > 0.95 && peak <= 1.);
        assert_relative_eq!(peak, 0.9918, epsilon = 1e-3);

        // Falls away towards and past the band edges at ±2|t|
        let near_edge = chain_transmission(3, 0.5, 0.5, 2.);
        let outside = chain_transmission(3, 0.5, 0.5, 3.);
        assert!(near_edge < 0.05);
        assert!(outside < near_edge);
    }

    #[test]
    fn asymmetric_contacts_bottleneck_transmission() {
        for number_of_sites in [2, 3, 5, 10, 20] {
            for energy in [-2.5, -1.3, -0.4, 0., 0.25, 0.9, 1.75] {
                let asymmetric = chain_transmission(number_of_sites, 0.1, 1.0, energy);
                let symmetric = chain_transmission(number_of_sites, 0.5, 0.5, energy);
                assert!(
                    asymmetric < symmetric,
                    "N = {}, E = {}: {} >= {}",
                    number_of_sites,
                    energy,
                    asymmetric,
                    symmetric
                );
            }
        }
    }

    #[test]
    fn uncoupled_lead_blocks_transmission() {
        assert_eq!(chain_transmission(4, 0., 0.5, 0.3), 0.);
    }

    #[test]
    fn clamp_only_lifts_negative_values() {
        assert_eq!(clamp_transmission(-1e-17), 0.);
        assert_eq!(clamp_transmission(0.25), 0.25);
        assert_eq!(clamp_transmission(0.), 0.);
    }

    proptest! {
        #[test]
        fn transmission_is_an_even_function_at_the_band_centre(
            number_of_sites in 2_usize..16,
            gamma in 0.05_f64..2.,
            energy in 0_f64..3.,
        ) {
            let hamiltonian = build_hamiltonian(number_of_sites, -1., 0., 0., &mut disorder_rng(Some(0))).unwrap();
            let self_energy = build_self_energies(number_of_sites, gamma, gamma).unwrap();
            let positive = transmission(energy, &hamiltonian, &self_energy, 1e-3).unwrap();
            let negative = transmission(-energy, &hamiltonian, &self_energy, 1e-3).unwrap();
            prop_assert!((positive - negative).abs() < 1e-8);
        }
    }
}
