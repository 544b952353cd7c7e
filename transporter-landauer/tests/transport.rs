use approx::assert_relative_eq;
use proptest::prelude::*;
use transporter_landauer::{
    build_hamiltonian, build_self_energies, clamp_transmission, conductance, disorder_rng,
    linear_response_iv, matrix::ComplexMatrix, spectrum, sweep, transmission,
    utilities::matrices::is_hermitian, TransportError, CONDUCTANCE_QUANTUM,
};

#[test]
fn three_site_resonance() {
    let hamiltonian = build_hamiltonian(3, -1., 0., 0., &mut disorder_rng(Some(0))).unwrap();
    let self_energy = build_self_energies(3, 0.5, 0.5).unwrap();
    let rows: Vec<_> = spectrum(-3., 3., 13, &hamiltonian, &self_energy, 1e-3)
        .unwrap()
        .map(Result::unwrap)
        .collect();

    let centre = rows.iter().find(|row| row.energy == 0.).unwrap();
    assert!(centre.transmission > 0.95 && centre.transmission <= 1.);
    let edge = rows.iter().find(|row| row.energy == 2.).unwrap();
    assert!(edge.transmission < 0.05);
    let outside = rows.last().unwrap();
    assert_eq!(outside.energy, 3.);
    assert!(outside.transmission < edge.transmission);
}

#[test]
fn asymmetric_coupling_bottleneck() {
    for number_of_sites in [2, 5, 20] {
        let hamiltonian =
            build_hamiltonian(number_of_sites, -1., 0., 0., &mut disorder_rng(Some(0))).unwrap();
        let symmetric = build_self_energies(number_of_sites, 0.5, 0.5).unwrap();
        let asymmetric = build_self_energies(number_of_sites, 0.1, 1.0).unwrap();
        let symmetric = spectrum(-2.5, 2.5, 101, &hamiltonian, &symmetric, 1e-3).unwrap();
        let asymmetric = spectrum(-2.5, 2.5, 101, &hamiltonian, &asymmetric, 1e-3).unwrap();
        for (s, a) in symmetric.zip(asymmetric) {
            let (s, a) = (s.unwrap(), a.unwrap());
            assert!(a.transmission < s.transmission, "E = {}", s.energy);
        }
    }
}

#[test]
fn spectrum_with_a_single_step_is_rejected() {
    let hamiltonian = build_hamiltonian(4, -1., 0., 0., &mut disorder_rng(Some(0))).unwrap();
    let self_energy = build_self_energies(4, 0.5, 0.5).unwrap();
    assert!(matches!(
        spectrum(-1., 1., 1, &hamiltonian, &self_energy, 1e-3),
        Err(TransportError::InvalidParameter { .. })
    ));
}

#[test]
fn deterministic_spectra_are_idempotent() {
    let compute = || -> Vec<(f64, f64)> {
        let hamiltonian = build_hamiltonian(10, -1., 0.1, 0.3, &mut disorder_rng(Some(5))).unwrap();
        let self_energy = build_self_energies(10, 0.4, 0.6).unwrap();
        spectrum(-3., 3., 61, &hamiltonian, &self_energy, 1e-3)
            .unwrap()
            .map(|row| row.map(|row| (row.energy, row.transmission)).unwrap())
            .collect()
    };
    assert_eq!(compute(), compute());
}

#[test]
fn singular_resolvent_is_reported_with_its_column() {
    let singular = ComplexMatrix::from_row_major(vec![
        1.0.into(),
        2.0.into(),
        2.0.into(),
        4.0.into(),
    ])
    .unwrap();
    assert!(matches!(
        singular.invert(),
        Err(TransportError::SingularMatrix { column: 1, dimension: 2, .. })
    ));
}

#[test]
fn sweep_over_contact_quality_is_monotone_at_the_band_centre() {
    // Resonant at E = 0, so matching the right contact maximises the conductance
    let base = transporter_landauer::ParameterSet {
        number_of_sites: 3,
        seed: Some(0),
        ..Default::default()
    };
    let points = sweep("gammaL", &[0., 0.1, 0.5], &base).unwrap();
    assert_eq!(points[0].conductance, 0.);
    assert!(points[1].conductance < points[2].conductance);
}

#[test]
fn linear_response_current_uses_the_landauer_conductance() {
    let hamiltonian = build_hamiltonian(3, -1., 0., 0., &mut disorder_rng(Some(0))).unwrap();
    let self_energy = build_self_energies(3, 0.5, 0.5).unwrap();
    let curve = linear_response_iv(0., &hamiltonian, &self_energy, 1e-3, &[0.05]).unwrap();
    let expected = CONDUCTANCE_QUANTUM
        * clamp_transmission(transmission(0., &hamiltonian, &self_energy, 1e-3).unwrap())
        * 0.05;
    assert_relative_eq!(curve[0].current, expected);
}

proptest! {
    #[test]
    fn transmission_is_bounded_by_the_number_of_sites(
        number_of_sites in 2_usize..10,
        hopping in -2_f64..-0.1,
        onsite_energy in -1_f64..1.,
        disorder in 0_f64..1.,
        seed in any::<u64>(),
        gamma_left in 0_f64..2.,
        gamma_right in 0_f64..2.,
        eta in 1e-4_f64..1e-1,
        energy in -4_f64..4.,
    ) {
        let hamiltonian = build_hamiltonian(number_of_sites, hopping, onsite_energy, disorder, &mut disorder_rng(Some(seed))).unwrap();
        prop_assert!(is_hermitian(hamiltonian.matrix()));
        let self_energy = build_self_energies(number_of_sites, gamma_left, gamma_right).unwrap();
        let value = clamp_transmission(transmission(energy, &hamiltonian, &self_energy, eta).unwrap());
        prop_assert!(value >= 0.);
        prop_assert!(value <= number_of_sites as f64 + 1e-9);
        // A single channel cannot transmit more than one electron
        prop_assert!(value <= 1. + 1e-9);

        let g = conductance(energy, &hamiltonian, &self_energy, eta).unwrap();
        prop_assert!((g - CONDUCTANCE_QUANTUM * value).abs() <= 1e-12 * CONDUCTANCE_QUANTUM);
    }
}
