//! Batch aggregation: drives the interpretation pipeline across a directory
//! of invoice PDFs and flattens the results into one tabular artifact.

pub mod progress;
pub mod worker;

pub use progress::{ChannelProgress, NoopProgress, ProgressEvent, ProgressReporter};
pub use worker::{BatchWorker, CancelHandle};

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;
use tracing::{info, info_span, warn};
use walkdir::WalkDir;

use crate::error::BatchError;
use crate::interpret::InvoiceInterpreter;
use crate::report::{self, CsvReport, RowSink};

/// Outcome of one batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Input files attempted (including failed ones).
    pub files: usize,
    /// Data rows emitted, error rows included.
    pub rows: usize,
    /// Files whose interpretation failed.
    pub failures: usize,
    /// Artifact location; `None` when no input files were found.
    pub output: Option<PathBuf>,
    /// True when the run stopped on a cooperative cancel request.
    pub cancelled: bool,
}

pub struct BatchRunner {
    interpreter: InvoiceInterpreter,
}

impl BatchRunner {
    pub fn new(interpreter: InvoiceInterpreter) -> Self {
        Self { interpreter }
    }

    /// Processes every recognizable input file under `directory`, strictly
    /// sequentially, and writes the flattened rows to a timestamped artifact
    /// in that same directory. Zero input files is a no-op: zero processed is
    /// reported and no artifact is created. A single file's failure becomes
    /// one error row and never aborts the batch.
    pub fn run(
        &self,
        directory: &Path,
        progress: &dyn ProgressReporter,
        cancel: &AtomicBool,
    ) -> Result<BatchSummary, BatchError> {
        let _span = info_span!("batch", directory = %directory.display()).entered();

        let files = scan_invoices(directory)?;
        if files.is_empty() {
            info!("No PDF files found in {}", directory.display());
            progress.report(ProgressEvent::Completed {
                files: 0,
                rows: 0,
                failures: 0,
            });
            return Ok(BatchSummary::default());
        }

        let output_path = directory.join(report::artifact_name(Local::now()));
        let mut sink = CsvReport::create(&output_path)?;
        let mut summary = self.process_files(&files, &mut sink, progress, cancel)?;
        sink.finish()?;

        info!(
            "Batch complete: {} files, {} rows, {} failures -> {}",
            summary.files,
            summary.rows,
            summary.failures,
            output_path.display()
        );
        summary.output = Some(output_path);
        Ok(summary)
    }

    /// Row emission against an arbitrary sink. Serial numbers form one
    /// contiguous 1-based sequence across the whole run, incremented once per
    /// emitted row.
    pub fn process_files(
        &self,
        files: &[PathBuf],
        sink: &mut dyn RowSink,
        progress: &dyn ProgressReporter,
        cancel: &AtomicBool,
    ) -> Result<BatchSummary, BatchError> {
        let mut summary = BatchSummary::default();
        let mut serial: u64 = 1;

        progress.report(ProgressEvent::Started {
            total_files: files.len(),
        });

        for (index, path) in files.iter().enumerate() {
            // Cancellation is cooperative and observed between files only;
            // an in-flight interpretation always runs to completion.
            if cancel.load(Ordering::Relaxed) {
                info!("Batch cancelled after {} files", summary.files);
                summary.cancelled = true;
                break;
            }

            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            progress.report(ProgressEvent::FileStarted {
                index,
                total: files.len(),
                file_name: file_name.clone(),
            });

            match self.interpreter.interpret(path) {
                Ok(info) => {
                    for row in report::invoice_rows(&mut serial, &info) {
                        sink.write_row(&row)?;
                        summary.rows += 1;
                    }
                }
                Err(e) => {
                    warn!("Interpretation failed for {}: {}", path.display(), e);
                    progress.report(ProgressEvent::FileFailed {
                        file_name: file_name.clone(),
                        error: e.to_string(),
                    });
                    let row = report::failure_row(&mut serial, &file_name, &e.to_string());
                    sink.write_row(&row)?;
                    summary.rows += 1;
                    summary.failures += 1;
                }
            }
            summary.files += 1;
        }

        progress.report(ProgressEvent::Completed {
            files: summary.files,
            rows: summary.rows,
            failures: summary.failures,
        });
        Ok(summary)
    }
}

/// Deterministic input enumeration: `.pdf` files one level deep, sorted by
/// file name. Row order and serial numbering follow this order.
pub fn scan_invoices(directory: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(directory).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| BatchError::Scan {
            path: directory.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if ext.eq_ignore_ascii_case("pdf") {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    Ok(files)
}
