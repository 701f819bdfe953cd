// src/cli.rs
use std::path::{Path, PathBuf};

use log::{LevelFilter, info};
use thiserror::Error;

use crate::config::consts::{FILE_INFIX, LOG_FILE_NAME};
use crate::config::options::{DateStamp, ExportOptions, TableFormat};
use crate::error::ExportError;
use crate::export::{self, ExportReport};
use crate::record;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    #[error("unknown arg: {0}")]
    UnknownArg(String),
    #[error("unknown format: {0} (expected xlsx, csv or tsv)")]
    UnknownFormat(String),
    #[error("invalid date {0:?} (expected YYMMDD)")]
    InvalidDate(String),
    #[error("no input file given (use -i <batch.json>)")]
    NoInput,
    #[error("cannot derive a base name from {}; pass -n <base>", .0.display())]
    NoBaseName(PathBuf),
    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub input: PathBuf,
    pub base_name: String,
    pub export: ExportOptions,
    pub dedup_key: Option<String>,
    pub write_json: bool,
    pub verbose: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(Params),
    Help,
}

pub const HELP: &str = include_str!("cli_help.txt");

/// Parse arguments (program name already skipped).
pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut input: Option<PathBuf> = None;
    let mut base_name: Option<String> = None;
    let mut opts = ExportOptions::default();
    let mut dedup_key = None;
    let mut write_json = false;
    let mut verbose = false;

    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        match a.as_str() {
            "-i" | "--input" => input = Some(PathBuf::from(args.next().ok_or(CliError::MissingValue("--input"))?)),
            "-n" | "--name" => base_name = Some(args.next().ok_or(CliError::MissingValue("--name"))?),
            "-o" | "--out" => opts.out_dir = PathBuf::from(args.next().ok_or(CliError::MissingValue("--out"))?),
            "--format" => {
                let v = args.next().ok_or(CliError::MissingValue("--format"))?;
                opts.table_format = TableFormat::parse(&v).ok_or(CliError::UnknownFormat(v))?;
            }
            "--profile-key" => opts.profile_key = args.next().ok_or(CliError::MissingValue("--profile-key"))?,
            "--date" => {
                let v = args.next().ok_or(CliError::MissingValue("--date"))?;
                opts.stamp = DateStamp::parse_yymmdd(&v).ok_or(CliError::InvalidDate(v))?;
            }
            "--dedup" => dedup_key = Some(args.next().ok_or(CliError::MissingValue("--dedup"))?),
            "--json" => write_json = true,
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(CliError::UnknownArg(a)),
        }
    }

    let input = input.ok_or(CliError::NoInput)?;
    let base_name = match base_name {
        Some(b) => b,
        None => default_base_name(&input).ok_or_else(|| CliError::NoBaseName(input.clone()))?,
    };

    Ok(Command::Run(Params { input, base_name, export: opts, dedup_key, write_json, verbose }))
}

/// File stem of `input`, with a trailing `_crawling_YYMMDD` removed so that
/// re-exporting `x_crawling_250704.json` yields `x_crawling_<today>.xlsx`.
pub fn default_base_name(input: &Path) -> Option<String> {
    let stem = input.file_stem()?.to_str()?;
    let base = match stem.rfind(FILE_INFIX) {
        Some(ix) => {
            let date = &stem[ix + FILE_INFIX.len()..];
            if date.len() == 6 && date.bytes().all(|b| b.is_ascii_digit()) { &stem[..ix] } else { stem }
        }
        None => stem,
    };
    if base.is_empty() { None } else { Some(base.to_string()) }
}

pub fn log_level(params: &Params) -> LevelFilter {
    if params.verbose { LevelFilter::Debug } else { LevelFilter::Info }
}

/// The log lives next to the exports.
pub fn log_file(params: &Params) -> PathBuf {
    params.export.out_dir.join(LOG_FILE_NAME)
}

/// Load, optionally dedup, export. One report per artifact attempted.
pub fn run(params: &Params) -> Result<Vec<ExportReport>, CliError> {
    let mut records = export::load_json(&params.input)?;
    info!("cli: loaded {} record(s) from {}", records.len(), params.input.display());

    if let Some(key) = &params.dedup_key {
        let before = records.len();
        records = record::dedup_by_key(records, key);
        info!("cli: dedup by {key:?} kept {} of {before}", records.len());
    }

    let reports: Vec<ExportReport> = if params.write_json {
        export::export_batch(&records, &params.base_name, &params.export).into()
    } else {
        vec![export::export_table(&records, &params.base_name, &params.export)]
    };
    Ok(reports)
}
