//! Background execution of one batch run.
//!
//! A single worker thread owns the whole run: it is the only writer of the
//! output artifact and the only reader/writer of cache entries, since the
//! path-derived cache key cannot arbitrate two concurrent writers.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::Receiver;
use log::{error, info};

use crate::batch::progress::{ChannelProgress, ProgressEvent};
use crate::batch::{BatchRunner, BatchSummary};
use crate::error::BatchError;

/// Cooperative stop request, observed between files.
#[derive(Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub struct BatchWorker {
    handle: JoinHandle<Result<BatchSummary, BatchError>>,
    cancel: Arc<AtomicBool>,
    progress: Receiver<ProgressEvent>,
}

impl BatchWorker {
    pub fn spawn(runner: BatchRunner, directory: PathBuf) -> Self {
        Self::spawn_with_capacity(runner, directory, 64)
    }

    /// Starts the run on a background thread. `progress_capacity` bounds the
    /// event channel; a slow observer loses events, never stalls the run.
    pub fn spawn_with_capacity(
        runner: BatchRunner,
        directory: PathBuf,
        progress_capacity: usize,
    ) -> Self {
        let (reporter, progress) = ChannelProgress::bounded(progress_capacity);
        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_flag = Arc::clone(&cancel);

        let handle = std::thread::spawn(move || {
            info!("Batch worker started for {}", directory.display());
            runner.run(&directory, &reporter, &cancel_flag)
        });

        Self {
            handle,
            cancel,
            progress,
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(Arc::clone(&self.cancel))
    }

    /// Non-blocking progress poll.
    pub fn try_progress(&self) -> Option<ProgressEvent> {
        self.progress.try_recv().ok()
    }

    /// Blocks for the next progress event; `None` once the run is over and
    /// the channel has drained.
    pub fn recv_progress(&self) -> Option<ProgressEvent> {
        self.progress.recv().ok()
    }

    /// Waits for the run to finish and returns its summary.
    pub fn join(self) -> Result<BatchSummary, BatchError> {
        match self.handle.join() {
            Ok(result) => result,
            Err(e) => {
                error!("Batch worker panicked: {:?}", e);
                Err(BatchError::WorkerPanicked)
            }
        }
    }
}
