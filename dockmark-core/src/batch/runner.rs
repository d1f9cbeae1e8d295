use std::thread::JoinHandle;

use crossbeam_channel::Receiver;

use super::connector::ConnectorSet;
use super::orchestrator::{BatchConfig, PendingBatch, execute_batch};
use super::report::{BatchReport, ItemOutcome};

/// Progress update from a running batch
#[derive(Debug, Clone)]
pub enum BatchMessage {
    /// Batch accepted, `total` items to go
    Started { total: usize },
    /// One item finished
    Processed(ItemOutcome),
    /// Every item has been processed
    Completed,
}

/// Runs a confirmed batch off the UI thread.
///
/// The caller owns the selection store, so it must clear it once
/// [`BatchMessage::Completed`] arrives.
pub struct BatchRunner {
    connectors: ConnectorSet,
    config: BatchConfig,
}

impl BatchRunner {
    pub fn new(connectors: ConnectorSet, config: BatchConfig) -> Self {
        Self { connectors, config }
    }

    /// Start removing in the background.
    /// Returns a receiver for progress updates and the handle yielding the report.
    pub fn run(self, batch: PendingBatch) -> (Receiver<BatchMessage>, JoinHandle<BatchReport>) {
        let (tx, rx) = crossbeam_channel::unbounded();

        let handle = std::thread::spawn(move || {
            let _ = tx.send(BatchMessage::Started {
                total: batch.total(),
            });
            let report = execute_batch(batch.snapshot(), &self.connectors, &self.config, |outcome| {
                let _ = tx.send(BatchMessage::Processed(outcome.clone()));
            });
            let _ = tx.send(BatchMessage::Completed);
            report
        });

        (rx, handle)
    }
}
