use tracing::{debug, info, warn};

use crate::category::Category;
use crate::selection::{ItemId, SelectionSnapshot, SelectionStore};

use super::connector::{Connector, ConnectorSet, RemoveOptions};
use super::report::{BatchReport, ItemOutcome, MutationFailure};

pub const CONFIRM_TITLE: &str = "Confirm";
pub const CONFIRM_DELETE_SELECTED: &str = "Are you sure you want to delete the selected items?";

/// Batch execution configuration
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Removal workers per category (1 = strictly sequential)
    pub workers: usize,
    /// Let image removal delete dangling parent layers
    pub prune_images: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            prune_images: true,
        }
    }
}

/// Render `"<n> <category>(s)"` parts in removal order, skipping zero counts
pub fn confirmation_summary(counts: &[(Category, usize)]) -> String {
    let mut counts: Vec<(Category, usize)> =
        counts.iter().copied().filter(|(_, n)| *n > 0).collect();
    counts.sort_by_key(|(category, _)| *category);
    counts
        .iter()
        .map(|(category, n)| format!("{} {}(s)", n, category))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A yes/no modal supplied by the front end
pub trait ConfirmationPrompt {
    fn prompt(&mut self, title: &str, message: &str) -> bool;
}

/// Confirmed-or-not deletion of a frozen selection.
///
/// Holds everything the accept action needs, so the dialog only has to hand
/// it back. Dropping it is the decline path and touches nothing.
#[derive(Debug, Clone)]
pub struct PendingBatch {
    snapshot: SelectionSnapshot,
    summary: String,
}

impl PendingBatch {
    /// Freeze the current selection, `None` if nothing is selected
    pub fn prepare(store: &SelectionStore) -> Option<Self> {
        if !store.has_any_selection() {
            return None;
        }
        let snapshot = store.snapshot();
        let summary = confirmation_summary(&snapshot.counts());
        Some(Self { snapshot, summary })
    }

    pub fn title(&self) -> &'static str {
        CONFIRM_TITLE
    }

    pub fn message(&self) -> String {
        format!("{}\n\n{}", CONFIRM_DELETE_SELECTED, self.summary)
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn snapshot(&self) -> &SelectionSnapshot {
        &self.snapshot
    }

    pub fn total(&self) -> usize {
        self.snapshot.total()
    }

    /// Run the batch, then clear the whole selection whatever the outcome
    pub fn execute(
        self,
        connectors: &ConnectorSet,
        config: &BatchConfig,
        store: &mut SelectionStore,
    ) -> BatchReport {
        let report = execute_batch(&self.snapshot, connectors, config, |_| {});
        store.clear_everything();
        report
    }
}

/// Ask for confirmation and run the batch on acceptance.
///
/// Returns `None` when nothing is selected or the prompt was declined; the
/// store is left untouched in both cases.
pub fn request_confirmation<P: ConfirmationPrompt + ?Sized>(
    store: &mut SelectionStore,
    prompt: &mut P,
    connectors: &ConnectorSet,
    config: &BatchConfig,
) -> Option<BatchReport> {
    let batch = PendingBatch::prepare(store)?;
    if !prompt.prompt(batch.title(), &batch.message()) {
        info!(summary = batch.summary(), "batch declined");
        return None;
    }
    Some(batch.execute(connectors, config, store))
}

/// Remove every item of `snapshot`, category by category in removal order.
///
/// Never stops early: a failed removal is recorded and the next item is
/// tried. `on_outcome` sees each outcome as it happens; the returned report
/// lists failures in snapshot order.
pub fn execute_batch<F>(
    snapshot: &SelectionSnapshot,
    connectors: &ConnectorSet,
    config: &BatchConfig,
    mut on_outcome: F,
) -> BatchReport
where
    F: FnMut(&ItemOutcome),
{
    let mut report = BatchReport::default();
    info!(
        total = snapshot.total(),
        workers = config.workers,
        "batch started"
    );

    for (category, ids) in snapshot.iter() {
        let options = RemoveOptions::for_category(category, config.prune_images);

        let Some(connector) = connectors.get(category) else {
            warn!(%category, count = ids.len(), "no connector registered");
            for id in ids {
                let outcome = ItemOutcome::Failed(MutationFailure {
                    category,
                    name: id.to_string(),
                    reason: format!("no connector for {}s", category),
                });
                on_outcome(&outcome);
                report.record(outcome);
            }
            continue;
        };

        if config.workers > 1 && ids.len() > 1 {
            let outcomes = fan_out(category, ids, connector, options, config.workers, &mut on_outcome);
            for outcome in outcomes {
                report.record(outcome);
            }
        } else {
            for id in ids {
                let outcome = process_item(category, id, connector, options);
                on_outcome(&outcome);
                report.record(outcome);
            }
        }
    }

    info!(
        removed = report.removed,
        skipped = report.skipped,
        failed = report.failures.len(),
        "batch finished"
    );
    report
}

fn process_item(
    category: Category,
    id: &ItemId,
    connector: &dyn Connector,
    options: RemoveOptions,
) -> ItemOutcome {
    let Some(target) = connector.find_by_id(id) else {
        info!(%category, %id, "already gone, skipping");
        return ItemOutcome::Skipped {
            category,
            id: id.clone(),
        };
    };

    debug!(%category, %id, name = %target.name, ?options, "removing");
    match connector.remove(&target, options) {
        Ok(()) => ItemOutcome::Removed {
            category,
            id: target.id,
            name: target.name,
        },
        Err(err) => {
            warn!(%category, name = %target.name, error = %err, "removal failed");
            ItemOutcome::Failed(MutationFailure {
                category,
                name: target.name,
                reason: err.to_string(),
            })
        }
    }
}

/// Remove one category's items with a bounded pool of scoped threads.
///
/// Results are put back into snapshot order before returning.
fn fan_out<F>(
    category: Category,
    ids: &[ItemId],
    connector: &dyn Connector,
    options: RemoveOptions,
    workers: usize,
    on_outcome: &mut F,
) -> Vec<ItemOutcome>
where
    F: FnMut(&ItemOutcome),
{
    let (job_tx, job_rx) = crossbeam_channel::unbounded();
    for job in ids.iter().enumerate() {
        let _ = job_tx.send(job);
    }
    drop(job_tx);

    let (result_tx, result_rx) = crossbeam_channel::unbounded();
    let mut slots: Vec<Option<ItemOutcome>> = vec![None; ids.len()];

    std::thread::scope(|scope| {
        for _ in 0..workers.min(ids.len()) {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                for (index, id) in job_rx {
                    let outcome = process_item(category, id, connector, options);
                    if result_tx.send((index, outcome)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(result_tx);

        for (index, outcome) in result_rx {
            on_outcome(&outcome);
            slots[index] = Some(outcome);
        }
    });

    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{ConnectorError, Target};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type CallLog = Arc<Mutex<Vec<(Category, String)>>>;

    /// Connector over a fixed item list that fails chosen names
    struct FakeConnector {
        category: Category,
        items: Vec<Target>,
        failures: HashMap<String, String>,
        calls: CallLog,
    }

    impl FakeConnector {
        fn new(category: Category, names: &[&str], calls: &CallLog) -> Self {
            Self {
                category,
                items: names
                    .iter()
                    .map(|n| Target {
                        id: ItemId::from(*n),
                        name: n.to_string(),
                    })
                    .collect(),
                failures: HashMap::new(),
                calls: Arc::clone(calls),
            }
        }

        fn failing(mut self, name: &str, reason: &str) -> Self {
            self.failures.insert(name.to_string(), reason.to_string());
            self
        }
    }

    impl Connector for FakeConnector {
        fn find_by_id(&self, id: &ItemId) -> Option<Target> {
            self.items.iter().find(|t| t.id == *id).cloned()
        }

        fn remove(&self, target: &Target, _options: RemoveOptions) -> Result<(), ConnectorError> {
            self.calls
                .lock()
                .unwrap()
                .push((self.category, target.name.clone()));
            match self.failures.get(&target.name) {
                Some(reason) => Err(ConnectorError(reason.clone())),
                None => Ok(()),
            }
        }
    }

    struct Answer(bool);

    impl ConfirmationPrompt for Answer {
        fn prompt(&mut self, title: &str, message: &str) -> bool {
            assert_eq!(title, CONFIRM_TITLE);
            assert!(message.starts_with(CONFIRM_DELETE_SELECTED));
            self.0
        }
    }

    fn select(store: &mut SelectionStore, category: Category, ids: &[&str]) {
        for id in ids {
            store.toggle(category, ItemId::from(*id));
        }
    }

    fn calls(log: &CallLog) -> Vec<(Category, String)> {
        log.lock().unwrap().clone()
    }

    #[test]
    fn test_summary_formatting() {
        assert_eq!(
            confirmation_summary(&[(Category::Container, 2)]),
            "2 container(s)"
        );
        assert_eq!(
            confirmation_summary(&[
                (Category::Network, 1),
                (Category::Volume, 0),
                (Category::Container, 1),
                (Category::Image, 3),
            ]),
            "1 container(s), 3 image(s), 1 network(s)"
        );
    }

    #[test]
    fn test_prepare_requires_selection() {
        let store = SelectionStore::new();
        assert!(PendingBatch::prepare(&store).is_none());
    }

    #[test]
    fn test_pending_batch_message() {
        let mut store = SelectionStore::new();
        select(&mut store, Category::Volume, &["pgdata"]);
        select(&mut store, Category::Container, &["a", "b"]);

        let batch = PendingBatch::prepare(&store).unwrap();
        assert_eq!(batch.summary(), "2 container(s), 1 volume(s)");
        assert_eq!(
            batch.message(),
            "Are you sure you want to delete the selected items?\n\n2 container(s), 1 volume(s)"
        );
        assert_eq!(batch.total(), 3);
    }

    #[test]
    fn test_scenario_one_busy_container() {
        let log = CallLog::default();
        let connectors = ConnectorSet::new().with(
            Category::Container,
            FakeConnector::new(Category::Container, &["A", "B"], &log).failing("B", "resource busy"),
        );
        let mut store = SelectionStore::new();
        select(&mut store, Category::Container, &["A", "B"]);

        let batch = PendingBatch::prepare(&store).unwrap();
        assert_eq!(batch.summary(), "2 container(s)");

        let report = request_confirmation(
            &mut store,
            &mut Answer(true),
            &connectors,
            &BatchConfig::default(),
        )
        .unwrap();

        assert_eq!(report.removed, 1);
        assert_eq!(
            report.failures,
            vec![MutationFailure {
                category: Category::Container,
                name: "B".to_string(),
                reason: "resource busy".to_string(),
            }]
        );
        assert_eq!(report.error_report().as_deref(), Some("B: resource busy"));
        assert!(calls(&log).contains(&(Category::Container, "A".to_string())));
        assert!(!store.has_any_selection());
    }

    #[test]
    fn test_failure_does_not_stop_the_batch() {
        let log = CallLog::default();
        let connectors = ConnectorSet::new().with(
            Category::Image,
            FakeConnector::new(Category::Image, &["i1", "i2", "i3"], &log).failing("i2", "conflict"),
        );
        let mut store = SelectionStore::new();
        select(&mut store, Category::Image, &["i1", "i2", "i3"]);

        let report = PendingBatch::prepare(&store).unwrap().execute(
            &connectors,
            &BatchConfig::default(),
            &mut store,
        );

        assert_eq!(
            calls(&log),
            vec![
                (Category::Image, "i1".to_string()),
                (Category::Image, "i2".to_string()),
                (Category::Image, "i3".to_string()),
            ]
        );
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].name, "i2");
        assert_eq!(report.removed, 2);
    }

    #[test]
    fn test_categories_follow_removal_order() {
        let log = CallLog::default();
        let connectors = ConnectorSet::new()
            .with(Category::Network, FakeConnector::new(Category::Network, &["n1"], &log))
            .with(Category::Volume, FakeConnector::new(Category::Volume, &["v1"], &log))
            .with(Category::Container, FakeConnector::new(Category::Container, &["c1"], &log));
        let mut store = SelectionStore::new();
        select(&mut store, Category::Network, &["n1"]);
        select(&mut store, Category::Volume, &["v1"]);
        select(&mut store, Category::Container, &["c1"]);

        PendingBatch::prepare(&store).unwrap().execute(
            &connectors,
            &BatchConfig::default(),
            &mut store,
        );

        let order: Vec<Category> = calls(&log).into_iter().map(|(c, _)| c).collect();
        assert_eq!(
            order,
            vec![Category::Container, Category::Volume, Category::Network]
        );
    }

    #[test]
    fn test_decline_is_non_destructive() {
        let log = CallLog::default();
        let connectors = ConnectorSet::new().with(
            Category::Container,
            FakeConnector::new(Category::Container, &["a", "b"], &log),
        );
        let mut store = SelectionStore::new();
        select(&mut store, Category::Container, &["a", "b"]);
        let before = store.per_category_counts();

        let report = request_confirmation(
            &mut store,
            &mut Answer(false),
            &connectors,
            &BatchConfig::default(),
        );

        assert!(report.is_none());
        assert_eq!(store.per_category_counts(), before);
        assert!(calls(&log).is_empty());
    }

    #[test]
    fn test_vanished_item_is_skipped_silently() {
        let log = CallLog::default();
        let connectors = ConnectorSet::new().with(
            Category::Volume,
            FakeConnector::new(Category::Volume, &["kept"], &log),
        );
        let mut store = SelectionStore::new();
        select(&mut store, Category::Volume, &["kept", "gone"]);

        let report = PendingBatch::prepare(&store).unwrap().execute(
            &connectors,
            &BatchConfig::default(),
            &mut store,
        );

        assert_eq!(report.skipped, 1);
        assert_eq!(report.removed, 1);
        assert!(report.failures.is_empty());
        assert_eq!(calls(&log).len(), 1);
    }

    #[test]
    fn test_total_failure_still_clears_selection() {
        let log = CallLog::default();
        let connectors = ConnectorSet::new().with(
            Category::Network,
            FakeConnector::new(Category::Network, &["n1", "n2"], &log)
                .failing("n1", "has active endpoints")
                .failing("n2", "has active endpoints"),
        );
        let mut store = SelectionStore::new();
        select(&mut store, Category::Network, &["n1", "n2"]);

        let report = PendingBatch::prepare(&store).unwrap().execute(
            &connectors,
            &BatchConfig::default(),
            &mut store,
        );

        assert_eq!(report.failures.len(), 2);
        assert!(!store.has_any_selection());
    }

    #[test]
    fn test_missing_connector_is_reported() {
        let mut store = SelectionStore::new();
        select(&mut store, Category::Image, &["sha256:1"]);

        let report = PendingBatch::prepare(&store).unwrap().execute(
            &ConnectorSet::new(),
            &BatchConfig::default(),
            &mut store,
        );

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].name, "sha256:1");
        assert!(!store.has_any_selection());
    }

    #[test]
    fn test_fan_out_keeps_snapshot_order() {
        let log = CallLog::default();
        let names = ["a", "b", "c", "d", "e", "f"];
        let connectors = ConnectorSet::new().with(
            Category::Container,
            FakeConnector::new(Category::Container, &names, &log)
                .failing("e", "busy")
                .failing("b", "busy"),
        );
        let mut store = SelectionStore::new();
        select(&mut store, Category::Container, &names);
        let config = BatchConfig {
            workers: 3,
            ..BatchConfig::default()
        };

        let mut seen = 0;
        let report = execute_batch(&store.snapshot(), &connectors, &config, |_| seen += 1);

        assert_eq!(seen, 6);
        assert_eq!(calls(&log).len(), 6);
        let failed: Vec<&str> = report.failures.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(failed, vec!["b", "e"]);
        assert_eq!(report.removed, 4);
    }
}
