//! One-way progress notifications from the batch worker to an observer.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::debug;

/// Events emitted while a batch runs. Updates are advisory; dropping any of
/// them never affects the run's correctness.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Started {
        total_files: usize,
    },
    FileStarted {
        /// Zero-based position in the run's enumeration order.
        index: usize,
        total: usize,
        file_name: String,
    },
    FileFailed {
        file_name: String,
        error: String,
    },
    Completed {
        files: usize,
        rows: usize,
        failures: usize,
    },
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// No-op reporter for unit tests.
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Bounded-channel reporter. When the observer falls behind and the channel
/// fills up, events are dropped rather than blocking the pipeline.
pub struct ChannelProgress {
    sender: Sender<ProgressEvent>,
}

impl ChannelProgress {
    pub fn bounded(capacity: usize) -> (Self, Receiver<ProgressEvent>) {
        let (sender, receiver) = crossbeam_channel::bounded(capacity);
        (Self { sender }, receiver)
    }
}

impl ProgressReporter for ChannelProgress {
    fn report(&self, event: ProgressEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                debug!("Observer is behind, dropping progress event: {:?}", event);
            }
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_progress_delivers_in_order() {
        let (reporter, receiver) = ChannelProgress::bounded(4);
        reporter.report(ProgressEvent::Started { total_files: 2 });
        reporter.report(ProgressEvent::Completed {
            files: 2,
            rows: 3,
            failures: 0,
        });

        assert!(matches!(
            receiver.recv().unwrap(),
            ProgressEvent::Started { total_files: 2 }
        ));
        assert!(matches!(
            receiver.recv().unwrap(),
            ProgressEvent::Completed { rows: 3, .. }
        ));
    }

    #[test]
    fn test_full_channel_drops_instead_of_blocking() {
        let (reporter, receiver) = ChannelProgress::bounded(1);
        reporter.report(ProgressEvent::Started { total_files: 9 });
        // Channel is full; this must return without blocking.
        reporter.report(ProgressEvent::Completed {
            files: 9,
            rows: 9,
            failures: 0,
        });

        assert!(matches!(
            receiver.try_recv().unwrap(),
            ProgressEvent::Started { .. }
        ));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_disconnected_observer_is_ignored() {
        let (reporter, receiver) = ChannelProgress::bounded(1);
        drop(receiver);
        reporter.report(ProgressEvent::Started { total_files: 1 });
    }
}
