//! # Artifacts
//!
//! Every command writes its numeric rows to `<command>_<timestamp>.csv`, a manifest with
//! the parameters, their physical interpretation and a summary to
//! `<command>_<timestamp>.json`, and appends one line to `audit.jsonl`.

use super::error::AppError;
use crate::{
    parameters::{ParameterSet, PhysicalAnnotation},
    postprocessor::BiasPoint,
    spectral::SpectralPoint,
    sweep::SweepPoint,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// A record which can be written as one line of a CSV file
pub(crate) trait CsvRow {
    fn header() -> &'static str;
    fn write_row<W: Write>(&self, writer: &mut W) -> std::io::Result<()>;
}

impl CsvRow for SpectralPoint {
    fn header() -> &'static str {
        "energy, transmission, density_of_states"
    }

    fn write_row<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(
            writer,
            "{}, {}, {}",
            self.energy, self.transmission, self.density_of_states
        )
    }
}

impl CsvRow for BiasPoint {
    fn header() -> &'static str {
        "voltage, current"
    }

    fn write_row<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "{}, {}", self.voltage, self.current)
    }
}

impl CsvRow for SweepPoint {
    fn header() -> &'static str {
        "value, conductance"
    }

    fn write_row<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "{}, {}", self.value, self.conductance)
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
/// The conductance of the device at its Fermi energy
pub(crate) struct ConductancePoint {
    pub(crate) fermi_energy: f64,
    pub(crate) conductance: f64,
    pub(crate) transmission: f64,
}

impl CsvRow for ConductancePoint {
    fn header() -> &'static str {
        "fermi_energy, conductance, transmission"
    }

    fn write_row<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(
            writer,
            "{}, {}, {}",
            self.fermi_energy, self.conductance, self.transmission
        )
    }
}

#[derive(Serialize)]
struct Manifest<'a, S: Serialize> {
    parameters: &'a ParameterSet,
    physical: PhysicalAnnotation,
    summary: S,
}

#[derive(Debug, Default, Serialize)]
/// A single line of the audit log
pub(crate) struct AuditEntry<'a> {
    pub(crate) action: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) param: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) points: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) value: Option<f64>,
}

#[derive(Serialize)]
struct TimestampedEntry<'a> {
    #[serde(flatten)]
    entry: AuditEntry<'a>,
    timestamp: String,
}

/// The paths written for a single command
#[derive(Debug)]
pub(crate) struct WrittenArtifacts {
    pub(crate) rows: PathBuf,
    pub(crate) manifest: PathBuf,
}

/// Writes the artifacts of one command into a results directory
#[derive(Debug)]
pub(crate) struct ArtifactWriter {
    directory: PathBuf,
    started: DateTime<Utc>,
}

impl ArtifactWriter {
    /// Creates the results directory if it does not exist
    pub(crate) fn new(directory: &Path) -> Result<Self, AppError> {
        // If the write directory does not exist then create it
        if !directory.exists() {
            std::fs::create_dir_all(directory)?;
        }
        Ok(Self {
            directory: directory.to_path_buf(),
            started: Utc::now(),
        })
    }

    pub(crate) fn directory(&self) -> &Path {
        &self.directory
    }

    fn stem(&self, command: &str) -> String {
        format!("{}_{}", command, self.started.format("%Y%m%dT%H%M%S%.3fZ"))
    }

    /// Writes `rows` and the manifest for `command`, then records the command in the audit log
    pub(crate) fn write<R: CsvRow, S: Serialize>(
        &self,
        command: &str,
        parameters: &ParameterSet,
        rows: &[R],
        summary: S,
        audit: AuditEntry<'_>,
    ) -> Result<WrittenArtifacts, AppError> {
        let stem = self.stem(command);

        let rows_path = self.directory.join(format!("{}.csv", stem));
        let mut file = BufWriter::new(std::fs::File::create(&rows_path)?);
        writeln!(file, "{}", R::header())?;
        for row in rows {
            row.write_row(&mut file)?;
        }
        file.flush()?;

        let manifest_path = self.directory.join(format!("{}.json", stem));
        let manifest = Manifest {
            parameters,
            physical: parameters.annotate(),
            summary,
        };
        let file = BufWriter::new(std::fs::File::create(&manifest_path)?);
        serde_json::to_writer_pretty(file, &manifest)?;

        self.audit(audit)?;
        tracing::info!("Wrote {} rows to {}", rows.len(), rows_path.display());

        Ok(WrittenArtifacts {
            rows: rows_path,
            manifest: manifest_path,
        })
    }

    /// Appends `entry` with a UTC timestamp to `audit.jsonl`
    pub(crate) fn audit(&self, entry: AuditEntry<'_>) -> Result<(), AppError> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(self.directory.join("audit.jsonl"))?;
        let line = serde_json::to_string(&TimestampedEntry {
            entry,
            timestamp: Utc::now().to_rfc3339(),
        })?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}
