mod connector;
mod orchestrator;
mod report;
mod runner;

pub use connector::{Connector, ConnectorError, ConnectorSet, RemoveOptions, Target};
pub use orchestrator::{
    BatchConfig, CONFIRM_DELETE_SELECTED, CONFIRM_TITLE, ConfirmationPrompt, PendingBatch,
    confirmation_summary, execute_batch, request_confirmation,
};
pub use report::{BatchReport, ItemOutcome, MutationFailure};
pub use runner::{BatchMessage, BatchRunner};
