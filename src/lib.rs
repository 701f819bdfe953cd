// src/lib.rs
//! Export layer shared by the hospital physician-directory scrapers.
//!
//! A crawler hands over one batch of [`record::Record`]s; [`export`] writes it
//! as `<base>_crawling_<YYMMDD>.json` and as a flattened spreadsheet.

pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod error;
pub mod export;
pub mod file;
pub mod logger;
pub mod record;
pub mod table;
pub mod xlsx;

pub use config::options::{DateStamp, ExportOptions, TableFormat};
pub use error::ExportError;
pub use export::{
    Artifact, ExportReport, Outcome, convert_json_file, export_batch, export_json, export_table, load_json,
};
pub use record::{Doctor, Field, IntoRecord, Record};
