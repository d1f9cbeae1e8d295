pub mod batch;
pub mod category;
pub mod docker;
pub mod error;
pub mod selection;

pub use batch::{
    BatchConfig, BatchMessage, BatchReport, BatchRunner, ConfirmationPrompt, Connector,
    ConnectorError, ConnectorSet, ItemOutcome, MutationFailure, PendingBatch, RemoveOptions,
    Target, confirmation_summary, execute_batch, request_confirmation,
};
pub use category::Category;
pub use docker::{DockerCli, DockerConnector, Inventory, Resource, connector_set};
pub use error::{DockError, Result};
pub use selection::{
    Item, ItemId, PanelAdapter, SelectionController, SelectionSnapshot, SelectionStore,
    ToggleOutcome, find_by_id,
};
