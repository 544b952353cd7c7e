use rand::{thread_rng, Rng};
use transporter_landauer::{
    build_hamiltonian, build_self_energies, DeviceHamiltonian, LeadSelfEnergy,
};

/// A weakly disordered chain of `num_sites` sites with symmetric contacts
pub fn construct_test_chain(num_sites: usize) -> (DeviceHamiltonian, LeadSelfEnergy) {
    let mut rng = thread_rng();
    let hopping = -rng.gen_range(0.5..1.5);
    let hamiltonian =
        build_hamiltonian(num_sites, hopping, 0., 0.1, &mut rng).expect("Chain data is invalid");
    let self_energy =
        build_self_energies(num_sites, 0.5, 0.5).expect("Contact data is invalid");
    (hamiltonian, self_energy)
}

/// `num_points` energies drawn uniformly from the band `[-2, 2]`
pub fn random_energies(num_points: usize) -> Vec<f64> {
    let mut rng = thread_rng();
    (0..num_points).map(|_| rng.gen_range(-2. ..2.)).collect()
}
