/// This module governs the high-level implementation of the simulation
mod artifacts;
mod calculations;
mod configuration;
mod error;
mod styles;
mod telemetry;

pub(crate) use configuration::Configuration;

use crate::parameters::{ParameterSet, SweepParameter};
use artifacts::ArtifactWriter;
use clap::{ArgEnum, Args, Parser, Subcommand};
use std::path::PathBuf;
use styles::Styles;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct App {
    /// Log level, overridden by `RUST_LOG`
    #[clap(arg_enum, short, long, global = true, default_value = "info")]
    log_level: LogLevel,
    /// Directory for result artifacts, the audit log and `log.log`
    #[clap(short, long, global = true, parse(from_os_str))]
    results: Option<PathBuf>,
    /// An additional configuration file, layered over `.config/`
    #[clap(short, long, global = true, parse(from_os_str))]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
pub(crate) enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(level)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transmission and density of states over the energy range
    Spectrum {
        #[clap(flatten)]
        overrides: ParameterOverrides,
    },
    /// Landauer conductance at the Fermi energy
    Conductance {
        #[clap(flatten)]
        overrides: ParameterOverrides,
    },
    /// Linear response current over the bias range
    Iv {
        #[clap(flatten)]
        overrides: ParameterOverrides,
    },
    /// Conductance as one parameter is varied
    Sweep {
        /// One of N, t, eps, disorder, gammaL, gammaR, eta, EF
        #[clap(long)]
        param: String,
        /// Comma separated values of the parameter
        #[clap(
            long,
            required = true,
            use_value_delimiter = true,
            allow_hyphen_values = true
        )]
        values: Vec<f64>,
        /// Evaluate the values on the rayon thread pool
        #[clap(long)]
        parallel: bool,
        #[clap(flatten)]
        overrides: ParameterOverrides,
    },
}

impl Command {
    fn overrides(&self) -> &ParameterOverrides {
        match self {
            Command::Spectrum { overrides }
            | Command::Conductance { overrides }
            | Command::Iv { overrides }
            | Command::Sweep { overrides, .. } => overrides,
        }
    }
}

/// Command line values which take precedence over every configuration layer
#[derive(Args, Debug, Default, Clone, PartialEq)]
struct ParameterOverrides {
    /// Number of sites N
    #[clap(long)]
    sites: Option<usize>,
    /// Hopping t
    #[clap(long, allow_hyphen_values = true)]
    hopping: Option<f64>,
    /// Onsite energy eps
    #[clap(long, allow_hyphen_values = true)]
    onsite: Option<f64>,
    /// Onsite disorder amplitude
    #[clap(long)]
    disorder: Option<f64>,
    /// Seed of the disorder generator
    #[clap(long)]
    seed: Option<u64>,
    /// Left contact coupling gammaL
    #[clap(long)]
    gamma_left: Option<f64>,
    /// Right contact coupling gammaR
    #[clap(long)]
    gamma_right: Option<f64>,
    /// Broadening eta
    #[clap(long)]
    eta: Option<f64>,
    /// Fermi energy EF
    #[clap(long, allow_hyphen_values = true)]
    fermi_energy: Option<f64>,
    /// Lower bound of the spectrum
    #[clap(long, allow_hyphen_values = true)]
    energy_min: Option<f64>,
    /// Upper bound of the spectrum
    #[clap(long, allow_hyphen_values = true)]
    energy_max: Option<f64>,
    /// Number of spectrum energies
    #[clap(long)]
    energy_steps: Option<usize>,
    /// Lowest bias
    #[clap(long, allow_hyphen_values = true)]
    voltage_min: Option<f64>,
    /// Highest bias
    #[clap(long, allow_hyphen_values = true)]
    voltage_max: Option<f64>,
    /// Number of bias points
    #[clap(long)]
    voltage_steps: Option<usize>,
}

impl ParameterOverrides {
    fn apply(&self, parameters: ParameterSet) -> ParameterSet {
        ParameterSet {
            number_of_sites: self.sites.unwrap_or(parameters.number_of_sites),
            hopping: self.hopping.unwrap_or(parameters.hopping),
            onsite_energy: self.onsite.unwrap_or(parameters.onsite_energy),
            disorder: self.disorder.unwrap_or(parameters.disorder),
            seed: self.seed.or(parameters.seed),
            gamma_left: self.gamma_left.unwrap_or(parameters.gamma_left),
            gamma_right: self.gamma_right.unwrap_or(parameters.gamma_right),
            eta: self.eta.unwrap_or(parameters.eta),
            fermi_energy: self.fermi_energy.unwrap_or(parameters.fermi_energy),
            energy_min: self.energy_min.unwrap_or(parameters.energy_min),
            energy_max: self.energy_max.unwrap_or(parameters.energy_max),
            energy_steps: self.energy_steps.unwrap_or(parameters.energy_steps),
            voltage_min: self.voltage_min.unwrap_or(parameters.voltage_min),
            voltage_max: self.voltage_max.unwrap_or(parameters.voltage_max),
            voltage_steps: self.voltage_steps.unwrap_or(parameters.voltage_steps),
        }
    }
}

/// Parses the command line, configures logging and runs the requested command
pub fn run() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = App::parse();

    let configuration = Configuration::build(cli.config.as_deref())?;
    let results_directory = cli
        .results
        .clone()
        .unwrap_or_else(|| configuration.results_directory.clone());
    let writer = ArtifactWriter::new(&results_directory)?;

    let (subscriber, _guard) = telemetry::get_subscriber(cli.log_level, writer.directory());
    telemetry::init_subscriber(subscriber)?;

    let parameters = cli.command.overrides().apply(configuration.parameters);
    tracing::debug!("Running with {:?}", parameters);

    let term = console::Term::stdout();
    let styles = Styles::for_stdout();

    match &cli.command {
        Command::Spectrum { .. } => {
            parameters.validate()?;
            calculations::run_spectrum(&parameters, &writer, &term, &styles)?;
        }
        Command::Conductance { .. } => {
            parameters.validate_device()?;
            calculations::run_conductance(&parameters, &writer, &term, &styles)?;
        }
        Command::Iv { .. } => {
            parameters.validate()?;
            calculations::run_iv(&parameters, &writer, &term, &styles)?;
        }
        Command::Sweep {
            param,
            values,
            parallel,
            ..
        } => {
            let parameter: SweepParameter = param.parse()?;
            calculations::run_sweep(
                &parameters,
                parameter,
                values,
                *parallel,
                &writer,
                &term,
                &styles,
            )?;
        }
    }
    Ok(())
}
