// src/config/options.rs
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use super::consts::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TableFormat {
    #[default]
    Xlsx,
    Csv,
    Tsv,
}

impl TableFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            TableFormat::Xlsx => "xlsx",
            TableFormat::Csv => "csv",
            TableFormat::Tsv => "tsv",
        }
    }

    /// Field separator for the delimited formats; `None` for xlsx.
    pub fn delimiter(&self) -> Option<char> {
        match self {
            TableFormat::Xlsx => None,
            TableFormat::Csv => Some(','),
            TableFormat::Tsv => Some('\t'),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Some(TableFormat::Xlsx),
            "csv" => Some(TableFormat::Csv),
            "tsv" => Some(TableFormat::Tsv),
            _ => None,
        }
    }
}

/// Which calendar day goes into output file names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateStamp {
    #[default]
    Today,
    Fixed(NaiveDate),
}

impl DateStamp {
    pub fn date(&self) -> NaiveDate {
        match self {
            DateStamp::Today => Local::now().date_naive(),
            DateStamp::Fixed(d) => *d,
        }
    }

    /// `YYMMDD`, e.g. `250718`.
    pub fn yymmdd(&self) -> String {
        self.date().format(DATE_FORMAT).to_string()
    }

    /// Parse a `YYMMDD` string into a fixed stamp.
    pub fn parse_yymmdd(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok().map(DateStamp::Fixed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub table_format: TableFormat,
    /// Record key whose nested mapping is promoted into columns.
    pub profile_key: String,
    pub stamp: DateStamp,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            table_format: TableFormat::default(),
            profile_key: DEFAULT_PROFILE_KEY.to_string(),
            stamp: DateStamp::default(),
        }
    }
}

impl ExportOptions {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self { out_dir: dir.as_ref().to_path_buf(), ..Self::default() }
    }

    /// `<stem>_crawling_<YYMMDD>.<ext>`; `stem` must already be cleaned.
    pub fn file_name(&self, stem: &str, ext: &str) -> String {
        format!("{stem}{FILE_INFIX}{}.{ext}", self.stamp.yymmdd())
    }

    pub fn json_path(&self, stem: &str) -> PathBuf {
        self.out_dir.join(self.file_name(stem, JSON_EXT))
    }

    pub fn table_path(&self, stem: &str) -> PathBuf {
        self.out_dir.join(self.file_name(stem, self.table_format.ext()))
    }
}
