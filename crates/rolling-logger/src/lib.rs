//! Rolling Logger
//!
//! Installs a `tracing` subscriber that writes plain-text lines to
//! `<log_dir>/<app_name>.log`, rotates the file once it grows past a size cap,
//! and keeps the most recent lines in a circular buffer so a front end can
//! show them without touching the disk. `log` records are bridged in, so
//! crates using the `log` macros end up in the same file.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

static LOGGER: OnceLock<RollingWriter> = OnceLock::new();

/// Tuning knobs for the rolling file
#[derive(Debug, Clone)]
pub struct LoggerOptions {
    /// Rotate once the active file exceeds this many bytes
    pub max_file_bytes: u64,
    /// Number of rotated files kept (`.1` is the newest)
    pub max_backups: usize,
    /// Lines kept in memory for `recent_lines`
    pub ring_capacity: usize,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            max_file_bytes: 2 * 1024 * 1024,
            max_backups: 3,
            ring_capacity: 500,
        }
    }
}

struct RollingFile {
    dir: PathBuf,
    base_name: String,
    file: File,
    written: u64,
    options: LoggerOptions,
    ring: VecDeque<String>,
    partial: String,
}

impl RollingFile {
    fn open(dir: &Path, app_name: &str, options: LoggerOptions) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let base_name = format!("{}.log", app_name);
        let path = dir.join(&base_name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        let ring = tail_lines(&path, options.ring_capacity);

        Ok(Self {
            dir: dir.to_path_buf(),
            base_name,
            file,
            written,
            ring,
            options,
            partial: String::new(),
        })
    }

    fn active_path(&self) -> PathBuf {
        self.dir.join(&self.base_name)
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.{}", self.base_name, index))
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.options.max_backups == 0 {
            self.file = File::create(self.active_path())?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.backup_path(self.options.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.options.max_backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(self.active_path(), self.backup_path(1))?;

        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.active_path())?;
        self.written = 0;
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        if self.options.ring_capacity == 0 {
            return;
        }
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            if self.ring.len() == self.options.ring_capacity {
                self.ring.pop_front();
            }
            self.ring.push_back(line.trim_end().to_string());
        }
    }
}

/// Last `count` lines of an existing log, so the ring survives restarts
fn tail_lines(path: &Path, count: usize) -> VecDeque<String> {
    let mut ring = VecDeque::with_capacity(count.min(1024));
    if count == 0 {
        return ring;
    }
    let Ok(bytes) = fs::read(path) else {
        return ring;
    };
    for line in String::from_utf8_lossy(&bytes).lines() {
        if ring.len() == count {
            ring.pop_front();
        }
        ring.push_back(line.trim_end().to_string());
    }
    ring
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.file.write(buf)?;
        self.written += n as u64;
        self.remember(&buf[..n]);
        if self.written > self.options.max_file_bytes {
            self.rotate()?;
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Shared handle handed to the subscriber as its writer
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<RollingFile>>,
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("rolling logger poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("rolling logger poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Initialize the global logger with default options
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    init_logger_with(log_dir, app_name, LoggerOptions::default())
}

/// Initialize the global logger
///
/// Only the first call installs a subscriber; later calls fail.
pub fn init_logger_with(log_dir: PathBuf, app_name: &str, options: LoggerOptions) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Err("logger already initialized".to_string());
    }

    let file = RollingFile::open(&log_dir, app_name, options)
        .map_err(|e| format!("Failed to open log file in {}: {}", log_dir.display(), e))?;
    let writer = RollingWriter {
        inner: Arc::new(Mutex::new(file)),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| format!("Failed to install subscriber: {}", e))?;

    LOGGER
        .set(writer)
        .map_err(|_| "logger already initialized".to_string())
}

/// Path of the active log file, if the logger is running
pub fn log_file_path() -> Option<PathBuf> {
    let writer = LOGGER.get()?;
    let guard = writer.inner.lock().ok()?;
    Some(guard.active_path())
}

/// Most recent log lines, oldest first
pub fn recent_lines() -> Vec<String> {
    LOGGER
        .get()
        .and_then(|writer| writer.inner.lock().ok().map(|g| g.ring.iter().cloned().collect()))
        .unwrap_or_default()
}

fn ensure_initialized() -> Result<(), String> {
    if LOGGER.get().is_none() {
        return Err("logger not initialized".to_string());
    }
    Ok(())
}

pub fn info(msg: &str) -> Result<(), String> {
    ensure_initialized()?;
    log::info!("{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), String> {
    ensure_initialized()?;
    log::warn!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), String> {
    ensure_initialized()?;
    log::error!("{}", msg);
    Ok(())
}
