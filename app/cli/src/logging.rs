//! FILENAME: app/cli/src/logging.rs
// PURPOSE: Unified logging for the command line front end.
// FORMAT: seq|level|category|message

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;

// ============================================================================
// UNIFIED LOGGING SYSTEM
// ============================================================================

/// Sequence counter shared by every log line of the process.
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Optional log file. Lines always go to stderr; the file is a copy.
pub static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

static LOGGER: UnifiedLogger = UnifiedLogger;

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Single-letter level code used in the line format.
pub fn level_code(level: Level) -> &'static str {
    match level {
        Level::Error => "E",
        Level::Warn => "W",
        Level::Info => "I",
        Level::Debug => "D",
        Level::Trace => "T",
    }
}

/// Renders one line in unified format.
pub fn format_line(seq: u64, level: &str, category: &str, message: &str) -> String {
    format!("{}|{}|{}|{}", seq, level, category, message)
}

/// Opens (truncating) the log file at `path`.
pub fn init_log_file(path: &Path) -> std::io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(file);
    }
    Ok(path.to_path_buf())
}

/// Write a log line in unified format
pub fn write_log(level: &str, category: &str, message: &str) {
    let seq = next_seq();
    let line = format_line(seq, level, category, message);

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            if let Err(e) = writeln!(file, "{}", line) {
                eprintln!("[LOG_ERROR] Failed to write: {}", e);
            }
            let _ = file.flush();
        }
    }

    eprintln!("{}", line);
}

// ============================================================================
// LOG FACADE BRIDGE
// ============================================================================

/// Routes `log` records from every crate into [`write_log`].
/// The record target becomes the category.
pub struct UnifiedLogger;

impl Log for UnifiedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        write_log(
            level_code(record.level()),
            category_of(record.target()),
            &record.args().to_string(),
        );
    }

    fn flush(&self) {
        if let Ok(mut guard) = LOG_FILE.lock() {
            if let Some(ref mut file) = *guard {
                let _ = file.flush();
            }
        }
    }
}

/// Module-path targets (`workhub::session`) are shortened to their last segment.
fn category_of(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

/// Installs the unified logger. Safe to call more than once; later calls
/// only adjust the level and the log file.
pub fn init(level: LevelFilter, log_file: Option<&Path>) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!(target: "SYS", "logger already installed");
    }
    log::set_max_level(level);

    if let Some(path) = log_file {
        match init_log_file(path) {
            Ok(path) => log::info!(target: "SYS", "log file {}", path.display()),
            Err(e) => eprintln!("[LOG_INIT] FAILED to open {}: {}", path.display(), e),
        }
    }
}
