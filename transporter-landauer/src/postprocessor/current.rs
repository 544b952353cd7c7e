use super::conductance;
use crate::{
    error::{ensure_finite, ensure_non_negative, TransportError},
    hamiltonian::DeviceHamiltonian,
    self_energy::LeadSelfEnergy,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// The current through the device at a single bias
pub struct BiasPoint {
    /// Applied bias in Volts
    pub voltage: f64,
    /// Current in Amperes
    pub current: f64,
}

fn check_voltages(voltages: &[f64]) -> Result<(), TransportError> {
    voltages
        .iter()
        .try_for_each(|&voltage| ensure_finite("V", voltage))
}

/// The small-signal current-voltage characteristic `I = G(EF) V`.
///
/// The conductance is evaluated once at the Fermi energy and the transmission window is
/// not integrated, so the result is only meaningful for `|V|` small compared to the
/// scale on which `T(E)` varies around `EF`. Non-finite voltages are rejected before the
/// conductance is computed.
#[tracing::instrument(level = "debug", skip(hamiltonian, self_energy, voltages))]
pub fn linear_response_iv(
    fermi_energy: f64,
    hamiltonian: &DeviceHamiltonian,
    self_energy: &LeadSelfEnergy,
    broadening: f64,
    voltages: &[f64],
) -> Result<Vec<BiasPoint>, TransportError> {
    check_voltages(voltages)?;
    let conductance = conductance(fermi_energy, hamiltonian, self_energy, broadening)?;
    tracing::debug!("Linear response conductance {:e} S", conductance);
    ohmic_current(conductance, voltages)
}

/// The current `G V` at each bias for an already computed conductance `G`
pub fn ohmic_current(conductance: f64, voltages: &[f64]) -> Result<Vec<BiasPoint>, TransportError> {
    ensure_non_negative("G", conductance)?;
    check_voltages(voltages)?;
    Ok(voltages
        .iter()
        .map(|&voltage| BiasPoint {
            voltage,
            current: conductance * voltage,
        })
        .collect())
}
