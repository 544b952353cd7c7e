use super::ParameterSet;
use serde::Serialize;

#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq, Serialize)]
/// What each device parameter means for a physical device, written next to every result
pub struct PhysicalAnnotation {
    pub length_sites: String,
    pub hopping_t: String,
    pub onsite_eps: String,
    pub disorder: String,
    #[serde(rename = "gammaL")]
    pub gamma_left: String,
    #[serde(rename = "gammaR")]
    pub gamma_right: String,
    pub eta: String,
    #[serde(rename = "EF")]
    pub fermi_energy: String,
}

impl From<&ParameterSet> for PhysicalAnnotation {
    fn from(parameters: &ParameterSet) -> Self {
        Self {
            length_sites: format!(
                "{} (increase for a longer device with more scattering)",
                parameters.number_of_sites
            ),
            hopping_t: format!(
                "{} (bandwidth and orbital overlap, a larger |t| widens the band)",
                parameters.hopping
            ),
            onsite_eps: format!(
                "{} (band alignment to EF, shift to tune resonances)",
                parameters.onsite_energy
            ),
            disorder: format!(
                "{} (material quality, larger values mean more inhomogeneity)",
                parameters.disorder
            ),
            gamma_left: format!(
                "{} (left contact quality, larger values couple better)",
                parameters.gamma_left
            ),
            gamma_right: format!(
                "{} (right contact quality, asymmetry with the left limits transmission)",
                parameters.gamma_right
            ),
            eta: format!(
                "{} (thermal and environmental broadening, larger values give broader peaks)",
                parameters.eta
            ),
            fermi_energy: format!(
                "{} (Fermi level, transmission is largest near the band centre)",
                parameters.fermi_energy
            ),
        }
    }
}
