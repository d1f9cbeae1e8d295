use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, TryRecvError};
use dockmark_core::{
    BatchConfig, BatchMessage, BatchReport, BatchRunner, Category, DockerCli, Inventory,
    ItemOutcome, PanelAdapter, PendingBatch, Result, SelectionController, SelectionStore,
    ToggleOutcome, connector_set,
};
use tracing::{debug, error, info, warn};

use super::panel::ResourcePanel;

/// Statistics tracked during the session
#[derive(Debug, Default, Clone)]
pub struct SessionStats {
    /// Resources removed across all batches
    pub items_removed: usize,
    /// Removals that failed across all batches
    pub items_failed: usize,
}

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Browsing panels
    Browsing,
    /// Typing a filter for the focused panel
    Filtering,
    /// Showing help overlay
    Help,
    /// Showing batch delete confirmation dialog
    ConfirmDelete,
    /// Batch delete running with progress overlay
    Deleting,
    /// Showing the aggregated error panel
    ShowError,
}

/// Progress tracker for a running batch
pub struct BatchProgress {
    pub total: usize,
    pub completed: usize,
    pub removed: usize,
    pub failed: usize,
    pub receiver: Receiver<BatchMessage>,
    pub handle: JoinHandle<BatchReport>,
}

/// Application state
pub struct AppState {
    /// Current mode
    pub mode: AppMode,
    /// Panel receiving navigation and selection keys
    pub focus: Category,
    /// One panel per category, in removal order
    pub panels: [ResourcePanel; 4],
    /// Marked items across all panels
    pub selection: SelectionStore,
    /// Batch waiting for the user's answer
    pub pending_batch: Option<PendingBatch>,
    /// Running batch
    pub batch_progress: Option<BatchProgress>,
    /// Text of the error panel
    pub error_message: Option<String>,
    /// Filter text being typed
    pub filter_input: String,
    /// Session statistics
    pub session_stats: SessionStats,
    /// Spinner frame for animation
    pub spinner_frame: usize,
    /// Whether app should quit
    pub should_quit: bool,
    /// Quit was requested while a batch was running
    pub quit_after_batch: bool,
    docker: DockerCli,
    config: BatchConfig,
}

impl AppState {
    pub fn new(docker: DockerCli, config: BatchConfig) -> Self {
        Self {
            mode: AppMode::Browsing,
            focus: Category::Container,
            panels: Category::ALL.map(ResourcePanel::new),
            selection: SelectionStore::new(),
            pending_batch: None,
            batch_progress: None,
            error_message: None,
            filter_input: String::new(),
            session_stats: SessionStats::default(),
            spinner_frame: 0,
            should_quit: false,
            quit_after_batch: false,
            docker,
            config,
        }
    }

    pub fn panel(&self, category: Category) -> &ResourcePanel {
        &self.panels[category.index()]
    }

    pub fn panel_mut(&mut self, category: Category) -> &mut ResourcePanel {
        &mut self.panels[category.index()]
    }

    fn focused_panel_mut(&mut self) -> &mut ResourcePanel {
        self.panel_mut(self.focus)
    }

    /// Replace every panel's items
    pub fn set_inventory(&mut self, inventory: Inventory) {
        for category in Category::ALL {
            self.panel_mut(category)
                .set_items(inventory.get(category).to_vec());
        }
    }

    /// Items currently shown, as a lookup table for connectors
    fn current_inventory(&self) -> Inventory {
        let mut inventory = Inventory::new();
        for panel in &self.panels {
            inventory.set(panel.category(), panel.all_items().to_vec());
        }
        inventory
    }

    /// Reload all panels from docker
    pub fn refresh(&mut self) {
        match self.docker.inventory() {
            Ok(inventory) => {
                info!(total = inventory.total(), "inventory loaded");
                self.set_inventory(inventory);
            }
            Err(e) => {
                warn!(error = %e, "inventory refresh failed");
                // Never hide a batch report behind a listing error
                if self.error_message.is_none() {
                    self.show_error(format!("Could not list resources: {}", e));
                }
            }
        }
    }

    /// Advance spinner animation
    pub fn tick_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 10;
    }

    pub fn move_up(&mut self) {
        self.focused_panel_mut().move_up();
    }

    pub fn move_down(&mut self) {
        self.focused_panel_mut().move_down();
    }

    pub fn page_up(&mut self) {
        self.focused_panel_mut().page_up();
    }

    pub fn page_down(&mut self) {
        self.focused_panel_mut().page_down();
    }

    pub fn go_to_first(&mut self) {
        self.focused_panel_mut().go_to_first();
    }

    pub fn go_to_last(&mut self) {
        self.focused_panel_mut().go_to_last();
    }

    pub fn next_panel(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_panel(&mut self) {
        self.focus = self.focus.prev();
    }

    // --- Selection methods ---

    /// Surface a render failure; the selection change itself already happened
    fn check<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                error!(error = %e, "panel rerender failed");
                self.show_error(e.to_string());
                None
            }
        }
    }

    /// Toggle the item under the cursor and move down
    pub fn toggle_select(&mut self) {
        let panel = &mut self.panels[self.focus.index()];
        let result = SelectionController::new(&mut self.selection).toggle(panel);
        if let Some(ToggleOutcome::NothingFocused) = self.check(result) {
            debug!(category = %self.focus, "nothing to toggle");
        }
    }

    /// Mark every visible item of the focused panel
    pub fn select_all(&mut self) {
        let panel = &mut self.panels[self.focus.index()];
        let result = SelectionController::new(&mut self.selection).select_all_visible(panel);
        self.check(result);
    }

    /// Unmark every item of the focused panel
    pub fn deselect_all(&mut self) {
        let panel = &mut self.panels[self.focus.index()];
        let result = SelectionController::new(&mut self.selection).deselect_all(panel);
        self.check(result);
    }

    /// Unmark everything
    pub fn clear_selection(&mut self) {
        SelectionController::new(&mut self.selection).clear_everything();
    }

    // --- Filter methods ---

    pub fn start_filter(&mut self) {
        self.filter_input = self.panel(self.focus).filter().to_string();
        self.mode = AppMode::Filtering;
    }

    pub fn filter_input(&mut self, c: char) {
        self.filter_input.push(c);
        let filter = self.filter_input.clone();
        self.focused_panel_mut().set_filter(filter);
    }

    pub fn filter_backspace(&mut self) {
        self.filter_input.pop();
        let filter = self.filter_input.clone();
        self.focused_panel_mut().set_filter(filter);
    }

    pub fn apply_filter(&mut self) {
        self.mode = AppMode::Browsing;
    }

    pub fn clear_filter(&mut self) {
        self.filter_input.clear();
        self.focused_panel_mut().set_filter(String::new());
        self.mode = AppMode::Browsing;
    }

    // --- Batch delete methods ---

    /// Freeze the selection and ask for confirmation
    pub fn request_delete(&mut self) {
        if self.batch_progress.is_some() {
            return;
        }
        match PendingBatch::prepare(&self.selection) {
            Some(batch) => {
                debug!(summary = batch.summary(), "awaiting confirmation");
                self.pending_batch = Some(batch);
                self.mode = AppMode::ConfirmDelete;
            }
            None => debug!("delete requested with nothing selected"),
        }
    }

    /// Start the confirmed batch in the background
    pub fn confirm_delete(&mut self) {
        let Some(batch) = self.pending_batch.take() else {
            self.mode = AppMode::Browsing;
            return;
        };

        info!(summary = batch.summary(), "batch confirmed");
        let total = batch.total();
        let connectors = connector_set(&self.docker, &self.current_inventory());
        let (receiver, handle) = BatchRunner::new(connectors, self.config.clone()).run(batch);

        self.batch_progress = Some(BatchProgress {
            total,
            completed: 0,
            removed: 0,
            failed: 0,
            receiver,
            handle,
        });
        self.mode = AppMode::Deleting;
    }

    /// Decline: drop the pending batch, keep the selection
    pub fn cancel_delete(&mut self) {
        if let Some(batch) = self.pending_batch.take() {
            info!(summary = batch.summary(), "batch declined");
        }
        self.mode = AppMode::Browsing;
    }

    /// Drain batch progress, finishing up once the runner is done
    pub fn poll_batch(&mut self) {
        let Some(progress) = &mut self.batch_progress else {
            return;
        };

        let mut finished = false;
        loop {
            match progress.receiver.try_recv() {
                Ok(BatchMessage::Started { total }) => progress.total = total,
                Ok(BatchMessage::Processed(outcome)) => {
                    progress.completed += 1;
                    match outcome {
                        ItemOutcome::Removed { .. } => progress.removed += 1,
                        ItemOutcome::Failed(_) => progress.failed += 1,
                        ItemOutcome::Skipped { .. } => {}
                    }
                }
                Ok(BatchMessage::Completed) | Err(TryRecvError::Disconnected) => {
                    finished = true;
                    break;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if finished {
            self.finish_batch();
        }
    }

    fn finish_batch(&mut self) {
        let Some(progress) = self.batch_progress.take() else {
            return;
        };

        let report = match progress.handle.join() {
            Ok(report) => Some(report),
            Err(_) => {
                error!(
                    processed = progress.completed,
                    total = progress.total,
                    "batch thread panicked"
                );
                None
            }
        };

        // Selection is reset whatever happened to the individual items
        self.selection.clear_everything();
        self.mode = AppMode::Browsing;

        match report {
            Some(report) => {
                self.session_stats.items_removed += report.removed;
                self.session_stats.items_failed += report.failures.len();
                if let Some(text) = report.error_report() {
                    self.show_error(text);
                }
            }
            None => self.show_error("Batch aborted unexpectedly; see log".to_string()),
        }

        // A deferred quit still lets the user read the failure report
        if self.quit_after_batch {
            self.quit_after_batch = false;
            if self.mode != AppMode::ShowError {
                self.should_quit = true;
                return;
            }
        }
        self.refresh();
    }

    // --- Overlays ---

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
    }

    pub fn hide_help(&mut self) {
        self.mode = AppMode::Browsing;
    }

    pub fn show_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.mode = AppMode::ShowError;
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
        self.mode = AppMode::Browsing;
    }

    /// Request quit; a running batch is finished first
    pub fn quit(&mut self) {
        if self.batch_progress.is_some() {
            info!("quit deferred until the batch finishes");
            self.quit_after_batch = true;
        } else {
            self.should_quit = true;
        }
    }
}
