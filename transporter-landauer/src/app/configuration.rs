use super::error::AppError;
use crate::parameters::ParameterSet;
use config::{Config, Environment, File, FileFormat};
use std::{
    env,
    path::{Path, PathBuf},
};

/// The built-in defaults, the lowest priority layer
const DEFAULT_CONFIGURATION: &str = r#"
results_directory = "results"

number_of_sites = 50
hopping = -1.0
onsite_energy = 0.0
disorder = 0.0
gamma_left = 0.5
gamma_right = 0.5
eta = 1e-3
fermi_energy = 0.0

energy_min = -3.0
energy_max = 3.0
energy_steps = 201

voltage_min = -0.1
voltage_max = 0.1
voltage_steps = 21
"#;

#[derive(Debug)]
pub(crate) struct Configuration {
    pub(crate) parameters: ParameterSet,
    pub(crate) results_directory: PathBuf,
}

impl Configuration {
    /// Layers the built-in defaults, `.config/default`, `.config/$RUN_MODE`, the optional
    /// `config_file` and finally `TRANSPORTER_*` environment variables
    pub(crate) fn build(config_file: Option<&Path>) -> Result<Self, AppError> {
        // If I am running it here we should automatically be more debuggy
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIGURATION, FileFormat::Toml))
            // The default settings which may be set by the user, optional
            .add_source(File::with_name(".config/default").required(false))
            .add_source(File::with_name(&format!(".config/{}", run_mode)).required(false));
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }
        let settings = builder
            .add_source(Environment::with_prefix("TRANSPORTER"))
            .build()?;

        Self::from_settings(settings)
    }

    fn from_settings(settings: Config) -> Result<Self, AppError> {
        let results_directory = PathBuf::from(settings.get_string("results_directory")?);
        let parameters: ParameterSet = settings.try_deserialize()?;
        tracing::debug!("Loaded configuration {:?}", parameters);
        Ok(Self {
            parameters,
            results_directory,
        })
    }
}

#[cfg(test)]
mod test {
    use super::{Configuration, DEFAULT_CONFIGURATION};
    use crate::parameters::ParameterSet;
    use config::{Config, File, FileFormat};
    use std::path::PathBuf;

    fn from_layers(layers: &[&str]) -> Configuration {
        let builder = layers.iter().fold(
            Config::builder().add_source(File::from_str(DEFAULT_CONFIGURATION, FileFormat::Toml)),
            |builder, layer| builder.add_source(File::from_str(layer, FileFormat::Toml)),
        );
        Configuration::from_settings(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn built_in_defaults_match_the_default_parameter_set() {
        let configuration = from_layers(&[]);
        assert_eq!(configuration.parameters, ParameterSet::default());
        assert_eq!(configuration.results_directory, PathBuf::from("results"));
    }

    #[test]
    fn later_layers_override_earlier_ones() {
        let configuration = from_layers(&[
            "number_of_sites = 12\nseed = 7",
            "number_of_sites = 20\nresults_directory = \"out\"",
        ]);
        assert_eq!(configuration.parameters.number_of_sites, 20);
        assert_eq!(configuration.parameters.seed, Some(7));
        assert_eq!(configuration.parameters.hopping, -1.);
        assert_eq!(configuration.results_directory, PathBuf::from("out"));
    }
}
