// src/logger.rs
//
// File sink for the `log` facade. Lines look like
//   [00:00:01.234][INFO] JSON saved: /abs/out/x_crawling_250704.json
// with the timestamp counted from logger installation.
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::file::ensure_directory;

static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

pub struct FileLogger {
    path: PathBuf,
    level: LevelFilter,
    lock: Mutex<()>,
}

impl FileLogger {
    pub fn new(path: impl AsRef<Path>, level: LevelFilter) -> Self {
        Self { path: path.as_ref().to_path_buf(), level, lock: Mutex::new(()) }
    }

    fn write_line(&self, line: &str) {
        if let Ok(_guard) = self.lock.lock() {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&self.path) {
                let _ = file.write_all(line.as_bytes());
            }
        }
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = fmt_elapsed(start().elapsed().as_millis());
        self.write_line(&format!("[{elapsed}][{}] {}\n", record.level(), record.args()));
    }

    fn flush(&self) {}
}

/// Install a `FileLogger` as the global logger. Call once, from a binary.
pub fn init(path: impl AsRef<Path>, level: LevelFilter) -> Result<(), SetLoggerError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            // Logging is best-effort; a missing dir just means no log lines.
            let _ = ensure_directory(parent);
        }
    }
    start();
    log::set_boxed_logger(Box::new(FileLogger::new(path, level)))?;
    log::set_max_level(level);
    Ok(())
}
