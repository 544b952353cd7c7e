use crate::{
    constants::CONDUCTANCE_QUANTUM,
    error::TransportError,
    greens_functions::{clamp_transmission, transmission},
    hamiltonian::DeviceHamiltonian,
    self_energy::LeadSelfEnergy,
};

/// The zero-temperature Landauer conductance `G = G0 T(EF)` in Siemens
#[tracing::instrument(level = "debug", skip(hamiltonian, self_energy))]
pub fn conductance(
    fermi_energy: f64,
    hamiltonian: &DeviceHamiltonian,
    self_energy: &LeadSelfEnergy,
    broadening: f64,
) -> Result<f64, TransportError> {
    let value = transmission(fermi_energy, hamiltonian, self_energy, broadening)?;
    Ok(CONDUCTANCE_QUANTUM * clamp_transmission(value))
}
