//! Per-run log file.
//!
//! A [`RunLogger`] owns one log file named `organizer_<YYYYmmdd_HHMMSS>.log`
//! and a tracing dispatcher writing to it. It is never installed as the
//! global default: callers hand it to the organizer, which activates it only
//! for the duration of a run via [`RunLogger::in_scope`].
//!
//! Every line has the shape `<timestamp> - <LEVEL> - <message>`.

use chrono::Local;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, Event, Subscriber};
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Default directory for log files, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

const LINE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";
const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Formats events as `<timestamp> - <LEVEL> - <message>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashFormat;

impl<S, N> FormatEvent<S, N> for DashFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "{} - {} - ",
            Local::now().format(LINE_TIMESTAMP_FORMAT),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// An explicit logger instance bound to one log file.
pub struct RunLogger {
    dispatch: Dispatch,
    path: PathBuf,
    // Flushes buffered lines to the file when the logger is dropped.
    _guard: WorkerGuard,
}

impl RunLogger {
    /// Creates `log_dir` if needed and opens a fresh timestamped log file in it.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the directory or file cannot be created.
    pub fn create(log_dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(log_dir)?;
        let file_name = format!(
            "organizer_{}.log",
            Local::now().format(FILE_TIMESTAMP_FORMAT)
        );
        Self::open(log_dir.join(file_name))
    }

    /// Opens (appending) a log file at an exact path.
    pub fn open(path: PathBuf) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        // Blocks instead of dropping lines when the buffer is full.
        let (non_blocking, guard) = NonBlockingBuilder::default().lossy(false).finish(file);

        let subscriber = tracing_subscriber::fmt()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_max_level(LevelFilter::INFO)
            .event_format(DashFormat)
            .finish();

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            path,
            _guard: guard,
        })
    }

    /// Path of the log file this logger writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `f` with this logger as the active tracing dispatcher.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

impl fmt::Debug for RunLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunLogger")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .expect("Failed to read log file")
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_create_makes_directory_and_timestamped_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log_dir = temp_dir.path().join("logs");

        let logger = RunLogger::create(&log_dir).expect("Failed to create logger");
        let path = logger.path().to_path_buf();
        drop(logger);

        assert!(log_dir.is_dir());
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("organizer_"));
        assert!(name.ends_with(".log"));
        // organizer_ + YYYYmmdd_HHMMSS + .log
        assert_eq!(name.len(), "organizer_".len() + 15 + ".log".len());
    }

    #[test]
    fn test_line_format() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("run.log");

        let logger = RunLogger::open(path.clone()).expect("Failed to open logger");
        logger.in_scope(|| {
            tracing::info!("Moved a.txt to Documents/TXT");
            tracing::error!("Error processing b.txt: boom");
        });
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - INFO - Moved a.txt to Documents/TXT"));
        assert!(lines[1].ends_with(" - ERROR - Error processing b.txt: boom"));
    }

    #[test]
    fn test_debug_events_are_filtered() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("run.log");

        let logger = RunLogger::open(path.clone()).expect("Failed to open logger");
        logger.in_scope(|| tracing::debug!("noise"));
        drop(logger);

        assert!(read_lines(&path).is_empty());
    }

    #[test]
    fn test_events_outside_scope_are_not_written() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("run.log");

        let logger = RunLogger::open(path.clone()).expect("Failed to open logger");
        tracing::info!("not captured");
        drop(logger);

        assert!(read_lines(&path).is_empty());
    }

    #[test]
    fn test_burst_of_lines_is_not_dropped() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("run.log");
        // Well past the writer's default in-memory line limit.
        let count = 200_000;

        let logger = RunLogger::open(path.clone()).expect("Failed to open logger");
        logger.in_scope(|| {
            for i in 0..count {
                tracing::error!("Error processing file_{}.txt: boom", i);
            }
        });
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), count);
        assert!(lines[count - 1].ends_with("Error processing file_199999.txt: boom"));
    }
}
