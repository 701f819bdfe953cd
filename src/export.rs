// src/export.rs
//
// Export boundary. Every public function here returns an `ExportReport`
// instead of a `Result`: failures are logged and reported, never propagated,
// so one bad dataset cannot abort a multi-hospital run.

use std::{
    fmt,
    fs,
    path::{Path, PathBuf},
};

use log::{error, info};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::config::consts::JSON_INDENT;
use crate::config::options::{ExportOptions, TableFormat};
use crate::core::sanitize::clean_base_name;
use crate::error::ExportError;
use crate::file::{display_path, write_atomic};
use crate::record::Record;
use crate::table::flatten;
use crate::{csv, xlsx};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Artifact {
    Json,
    Table(TableFormat),
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Json => f.write_str("JSON"),
            Artifact::Table(TableFormat::Xlsx) => f.write_str("Excel"),
            Artifact::Table(TableFormat::Csv) => f.write_str("CSV"),
            Artifact::Table(TableFormat::Tsv) => f.write_str("TSV"),
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Written(PathBuf),
    /// Nothing to export; no file was created.
    Empty,
    Failed(ExportError),
}

#[derive(Debug)]
pub struct ExportReport {
    pub artifact: Artifact,
    pub outcome: Outcome,
}

impl ExportReport {
    pub fn is_ok(&self) -> bool { !matches!(self.outcome, Outcome::Failed(_)) }

    pub fn path(&self) -> Option<&Path> {
        match &self.outcome {
            Outcome::Written(p) => Some(p),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ExportError> {
        match &self.outcome {
            Outcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    fn finish(artifact: Artifact, res: Result<Option<PathBuf>, ExportError>) -> Self {
        let outcome = match res {
            Ok(Some(path)) => Outcome::Written(path),
            Ok(None) => Outcome::Empty,
            Err(e) => Outcome::Failed(e),
        };
        let report = Self { artifact, outcome };
        if report.is_ok() {
            info!("{report}");
        } else {
            error!("{report}");
        }
        report
    }
}

/// The human-readable status line for one export call.
impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Written(p) => write!(f, "{} saved: {}", self.artifact, display_path(p).display()),
            Outcome::Empty => write!(f, "{} skipped: no records to export", self.artifact),
            Outcome::Failed(e) => write!(f, "{} export failed: {e}", self.artifact),
        }
    }
}

/// Write `records` verbatim as pretty JSON to `<base>_crawling_<YYMMDD>.json`.
pub fn export_json(records: &[Record], base_name: &str, opts: &ExportOptions) -> ExportReport {
    ExportReport::finish(Artifact::Json, try_export_json(records, base_name, opts))
}

/// Flatten, sanitize and write `records` as a spreadsheet.
pub fn export_table(records: &[Record], base_name: &str, opts: &ExportOptions) -> ExportReport {
    ExportReport::finish(
        Artifact::Table(opts.table_format),
        try_export_table(records, base_name, opts),
    )
}

/// Both artifacts, independently: a failed JSON write still attempts the table.
pub fn export_batch(records: &[Record], base_name: &str, opts: &ExportOptions) -> [ExportReport; 2] {
    [
        export_json(records, base_name, opts),
        export_table(records, base_name, opts),
    ]
}

/// Read a batch previously written by `export_json`.
pub fn load_json(path: &Path) -> Result<Vec<Record>, ExportError> {
    let text = fs::read_to_string(path)
        .map_err(|source| ExportError::Read { path: path.to_path_buf(), source })?;
    Ok(serde_json::from_str(&text)?)
}

/// Re-export a saved JSON batch as a table.
pub fn convert_json_file(path: &Path, base_name: &str, opts: &ExportOptions) -> ExportReport {
    match load_json(path) {
        Ok(records) => export_table(&records, base_name, opts),
        Err(e) => ExportReport::finish(Artifact::Table(opts.table_format), Err(e)),
    }
}

fn try_export_json(
    records: &[Record],
    base_name: &str,
    opts: &ExportOptions,
) -> Result<Option<PathBuf>, ExportError> {
    if records.is_empty() {
        return Ok(None);
    }
    let stem = checked_stem(base_name)?;
    let path = opts.json_path(&stem);

    let mut buf = Vec::with_capacity(256 * records.len());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    records.serialize(&mut ser)?;

    write_atomic(&path, &buf).map_err(|source| ExportError::Write { path: path.clone(), source })?;
    Ok(Some(path))
}

fn try_export_table(
    records: &[Record],
    base_name: &str,
    opts: &ExportOptions,
) -> Result<Option<PathBuf>, ExportError> {
    if records.is_empty() {
        return Ok(None);
    }
    let stem = checked_stem(base_name)?;
    let path = opts.table_path(&stem);

    let table = flatten(records, &opts.profile_key);
    let bytes = match opts.table_format.delimiter() {
        None => xlsx::encode_table(&table)?,
        Some(sep) => csv::encode_table(&table, sep)
            .map_err(|source| ExportError::Write { path: path.clone(), source })?,
    };

    write_atomic(&path, &bytes).map_err(|source| ExportError::Write { path: path.clone(), source })?;
    Ok(Some(path))
}

fn checked_stem(base_name: &str) -> Result<String, ExportError> {
    clean_base_name(base_name).ok_or_else(|| ExportError::InvalidBaseName(base_name.to_string()))
}
