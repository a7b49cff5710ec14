//! Log and progress sinks handed to the decomposition.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// An append-only, line-oriented text log.
pub trait LogSink {
    /// Appends `text` to the log.
    fn write(&mut self, text: &str);
}

impl<F: FnMut(&str)> LogSink for F {
    fn write(&mut self, text: &str) {
        self(text)
    }
}

/// Receives progress updates from a running decomposition.
///
/// All three percentages are in `[0, 100]`.
pub trait ProgressSink {
    /// Reports the overall, stage and operation progress along with the
    /// names of the current stage and operation.
    fn update(
        &mut self,
        overall: f64,
        stage: f64,
        operation: f64,
        stage_label: &str,
        operation_label: &str,
    );
}

impl<F: FnMut(f64, f64, f64, &str, &str)> ProgressSink for F {
    fn update(
        &mut self,
        overall: f64,
        stage: f64,
        operation: f64,
        stage_label: &str,
        operation_label: &str,
    ) {
        self(overall, stage, operation, stage_label, operation_label)
    }
}

/// A [`LogSink`] writing to a file, flushed after every message.
pub struct FileLogSink {
    file: File,
}

impl FileLogSink {
    /// Creates (or truncates) the log file at `path`.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self {
            file: File::create(path)?,
        })
    }
}

impl LogSink for FileLogSink {
    fn write(&mut self, text: &str) {
        if let Err(e) = self
            .file
            .write_all(text.as_bytes())
            .and_then(|_| self.file.flush())
        {
            log::warn!("failed to append to the decomposition log: {}", e);
        }
    }
}

/// A [`ProgressSink`] printing one line per update on the standard output.
#[derive(Copy, Clone, Debug, Default)]
pub struct ConsoleProgress;

impl ConsoleProgress {
    /// Formats an update the way [`ConsoleProgress`] prints it.
    pub fn format(
        overall: f64,
        stage: f64,
        operation: f64,
        stage_label: &str,
        operation_label: &str,
    ) -> String {
        format!(
            "{:>3}% [ {} {:>3}% ] {} {:>3}%",
            percent(overall),
            stage_label,
            percent(stage),
            operation_label,
            percent(operation)
        )
    }
}

fn percent(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

impl ProgressSink for ConsoleProgress {
    fn update(
        &mut self,
        overall: f64,
        stage: f64,
        operation: f64,
        stage_label: &str,
        operation_label: &str,
    ) {
        println!(
            "{}",
            Self::format(overall, stage, operation, stage_label, operation_label)
        );
    }
}

/// The optional observers of a decomposition.
///
/// Both are fire-and-forget: nothing they do affects the computation.
#[derive(Default)]
pub struct Observers<'a> {
    /// Receives free-text log lines.
    pub log: Option<&'a mut dyn LogSink>,
    /// Receives progress updates.
    pub progress: Option<&'a mut dyn ProgressSink>,
}

impl<'a> Observers<'a> {
    /// Observers that discard everything.
    pub fn none() -> Self {
        Self::default()
    }

    /// Attaches a log sink.
    pub fn with_log(mut self, log: &'a mut dyn LogSink) -> Self {
        self.log = Some(log);
        self
    }

    /// Attaches a progress sink.
    pub fn with_progress(mut self, progress: &'a mut dyn ProgressSink) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Forwards `text` to the log sink, if any.
    pub fn log(&mut self, text: &str) {
        if let Some(log) = self.log.as_deref_mut() {
            log.write(text);
        }
    }

    /// Forwards a progress update to the progress sink, if any.
    pub fn progress(
        &mut self,
        overall: f64,
        stage: f64,
        operation: f64,
        stage_label: &str,
        operation_label: &str,
    ) {
        if let Some(progress) = self.progress.as_deref_mut() {
            progress.update(overall, stage, operation, stage_label, operation_label);
        }
    }
}
