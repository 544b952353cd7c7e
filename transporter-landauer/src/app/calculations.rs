//! # Calculations
//!
//! Delegated functions from `App` which run a single command and write its artifacts

use super::{
    artifacts::{ArtifactWriter, AuditEntry, ConductancePoint, WrittenArtifacts},
    error::AppError,
    styles::Styles,
};
use crate::{
    constants::CONDUCTANCE_QUANTUM,
    parameters::{ParameterSet, SweepParameter},
    postprocessor::{conductance, ohmic_current},
    spectral::{spectrum, SpectralPoint},
    sweep::{parallel_sweep, sweep_with_control, SweepControl},
};
use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressIterator, ProgressStyle};
use itertools::{Itertools, MinMaxResult};
use owo_colors::OwoColorize;

fn progress_bar(length: usize) -> ProgressBar {
    let spinner_style = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{prefix:.bold.dim} {spinner} {msg} [{wide_bar:.cyan/blue}] {percent}% ({eta})");
    let pb = ProgressBar::with_draw_target(
        length as u64,
        ProgressDrawTarget::term(Term::stdout(), 60),
    );
    pb.set_style(spinner_style);
    pb
}

fn report(
    term: &Term,
    styles: &Styles,
    heading: &str,
    lines: &[(&str, String)],
    written: &WrittenArtifacts,
) -> Result<(), AppError> {
    term.write_line(&format!("{}", heading.style(styles.heading_style)))?;
    for (label, value) in lines {
        term.write_line(&format!("  {}: {}", label, value.style(styles.value_style)))?;
    }
    term.write_line(&format!(
        "  rows: {}",
        written.rows.display().style(styles.path_style)
    ))?;
    term.write_line(&format!(
        "  manifest: {}",
        written.manifest.display().style(styles.path_style)
    ))?;
    Ok(())
}

pub(crate) fn run_spectrum(
    parameters: &ParameterSet,
    writer: &ArtifactWriter,
    term: &Term,
    styles: &Styles,
) -> Result<(), AppError> {
    tracing::info!("Transmission spectrum");
    let hamiltonian = parameters.build_hamiltonian(&mut parameters.rng())?;
    let self_energy = parameters.build_self_energies()?;
    let points = spectrum(
        parameters.energy_min,
        parameters.energy_max,
        parameters.energy_steps,
        &hamiltonian,
        &self_energy,
        parameters.eta,
    )?;

    let pb = progress_bar(points.len());
    pb.set_message("transmission");
    let rows = points
        .progress_with(pb.clone())
        .collect::<Result<Vec<SpectralPoint>, _>>()?;
    pb.finish_and_clear();

    let peak = rows
        .iter()
        .copied()
        .fold(None, |peak: Option<SpectralPoint>, point| match peak {
            Some(peak) if peak.transmission >= point.transmission => Some(peak),
            _ => Some(point),
        });
    let (peak_energy, peak_transmission) = peak
        .map(|point| (point.energy, point.transmission))
        .unwrap_or_default();

    let written = writer.write(
        "spectrum",
        parameters,
        &rows,
        serde_json::json!({
            "points": rows.len(),
            "peak_energy": peak_energy,
            "peak_transmission": peak_transmission,
        }),
        AuditEntry {
            action: "spectrum",
            points: Some(rows.len()),
            ..AuditEntry::default()
        },
    )?;
    report(
        term,
        styles,
        "Transmission spectrum",
        &[
            ("points", rows.len().to_string()),
            (
                "peak",
                format!("T = {:.6} at E = {:.6}", peak_transmission, peak_energy),
            ),
        ],
        &written,
    )
}

pub(crate) fn run_conductance(
    parameters: &ParameterSet,
    writer: &ArtifactWriter,
    term: &Term,
    styles: &Styles,
) -> Result<(), AppError> {
    tracing::info!("Conductance at the Fermi energy");
    let hamiltonian = parameters.build_hamiltonian(&mut parameters.rng())?;
    let self_energy = parameters.build_self_energies()?;
    let value = conductance(
        parameters.fermi_energy,
        &hamiltonian,
        &self_energy,
        parameters.eta,
    )?;
    let transmission = value / CONDUCTANCE_QUANTUM;

    let row = ConductancePoint {
        fermi_energy: parameters.fermi_energy,
        conductance: value,
        transmission,
    };
    let written = writer.write(
        "conductance",
        parameters,
        &[row],
        row,
        AuditEntry {
            action: "conductance",
            value: Some(value),
            ..AuditEntry::default()
        },
    )?;
    report(
        term,
        styles,
        "Conductance",
        &[
            ("G", format!("{:.6e} S", value)),
            ("G / G0", format!("{:.6}", transmission)),
        ],
        &written,
    )
}

pub(crate) fn run_iv(
    parameters: &ParameterSet,
    writer: &ArtifactWriter,
    term: &Term,
    styles: &Styles,
) -> Result<(), AppError> {
    tracing::info!("Linear response current-voltage characteristic");
    let hamiltonian = parameters.build_hamiltonian(&mut parameters.rng())?;
    let self_energy = parameters.build_self_energies()?;
    let voltages: Vec<f64> = parameters.voltage_grid()?.points().collect();
    let value = conductance(
        parameters.fermi_energy,
        &hamiltonian,
        &self_energy,
        parameters.eta,
    )?;
    let rows = ohmic_current(value, &voltages)?;

    let written = writer.write(
        "iv",
        parameters,
        &rows,
        serde_json::json!({
            "points": rows.len(),
            "conductance": value,
            "regime": "linear response, valid for small bias",
        }),
        AuditEntry {
            action: "iv",
            points: Some(rows.len()),
            ..AuditEntry::default()
        },
    )?;
    report(
        term,
        styles,
        "Current-voltage characteristic",
        &[
            ("points", rows.len().to_string()),
            ("G", format!("{:.6e} S", value)),
        ],
        &written,
    )
}

pub(crate) fn run_sweep(
    parameters: &ParameterSet,
    parameter: SweepParameter,
    values: &[f64],
    parallel: bool,
    writer: &ArtifactWriter,
    term: &Term,
    styles: &Styles,
) -> Result<(), AppError> {
    tracing::info!("Sweep over {}", parameter);
    let pb = progress_bar(values.len());
    pb.set_message(parameter.to_string());
    let control = SweepControl::default().with_progress(pb.clone());
    let rows = if parallel {
        parallel_sweep(parameter, values, parameters, &control)?
    } else {
        sweep_with_control(parameter, values, parameters, &control)?
    };
    pb.finish_and_clear();

    let name = parameter.name();
    let written = writer.write(
        &format!("sweep_{}", name),
        parameters,
        &rows,
        serde_json::json!({
            "param": name,
            "points": rows.len(),
            "parallel": parallel,
        }),
        AuditEntry {
            action: "sweep",
            param: Some(name),
            points: Some(rows.len()),
            ..AuditEntry::default()
        },
    )?;
    let range = match rows
        .iter()
        .map(|point| point.conductance)
        .minmax_by(|a, b| a.total_cmp(b))
    {
        MinMaxResult::NoElements => "none".to_string(),
        MinMaxResult::OneElement(value) => format!("{:.6e} S", value),
        MinMaxResult::MinMax(minimum, maximum) => {
            format!("{:.6e} to {:.6e} S", minimum, maximum)
        }
    };
    report(
        term,
        styles,
        &format!("Sweep over {}", name),
        &[("points", rows.len().to_string()), ("G", range)],
        &written,
    )
}
