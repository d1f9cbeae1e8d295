use tracing::debug;

use crate::category::Category;
use crate::error::Result;

use super::{Item, ItemId, PanelAdapter, SelectionSnapshot, SelectionStore};

/// Result of toggling the focused item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    /// Panel had no focused item, nothing changed
    NothingFocused,
}

/// Applies user selection commands to a [`SelectionStore`].
///
/// Written once against [`PanelAdapter`], so every category shares the same
/// toggle / select-all / deselect-all logic. Store mutations are committed
/// before the panel is asked to rerender; a rerender error is returned to the
/// caller but does not roll anything back.
pub struct SelectionController<'a> {
    store: &'a mut SelectionStore,
}

impl<'a> SelectionController<'a> {
    pub fn new(store: &'a mut SelectionStore) -> Self {
        Self { store }
    }

    /// Toggle the focused item and move the cursor down one row
    pub fn toggle<P: PanelAdapter>(&mut self, panel: &mut P) -> Result<ToggleOutcome> {
        let category = panel.category();
        let Some(item) = panel.focused_item() else {
            return Ok(ToggleOutcome::NothingFocused);
        };
        let id = ItemId::from(item.id());
        debug!(%category, %id, "toggle selection");

        let outcome = if self.store.toggle(category, id) {
            ToggleOutcome::Selected
        } else {
            ToggleOutcome::Deselected
        };

        panel.advance_focus();
        panel.rerender()?;
        Ok(outcome)
    }

    /// Select every item the panel currently shows, returning how many that was
    pub fn select_all_visible<P: PanelAdapter>(&mut self, panel: &mut P) -> Result<usize> {
        let category = panel.category();
        let ids: Vec<ItemId> = panel
            .visible_items()
            .into_iter()
            .map(|item| ItemId::from(item.id()))
            .collect();
        let count = ids.len();
        debug!(%category, count, "select all visible");

        self.store.select_many(category, ids);
        panel.rerender()?;
        Ok(count)
    }

    pub fn deselect_all<P: PanelAdapter>(&mut self, panel: &mut P) -> Result<()> {
        debug!(category = %panel.category(), "deselect all");
        self.store.clear_category(panel.category());
        panel.rerender()
    }

    pub fn clear_everything(&mut self) {
        self.store.clear_everything();
    }

    pub fn total_count(&self) -> usize {
        self.store.total_count()
    }

    pub fn per_category_counts(&self) -> Vec<(Category, usize)> {
        self.store.per_category_counts()
    }

    pub fn has_any_selection(&self) -> bool {
        self.store.has_any_selection()
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        self.store.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DockError;

    #[derive(Debug, Clone)]
    struct Row {
        id: String,
        name: String,
    }

    impl Item for Row {
        fn id(&self) -> &str {
            &self.id
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    /// List panel with a name filter and a cursor over the visible rows
    struct FakePanel {
        category: Category,
        rows: Vec<Row>,
        filter: Option<&'static str>,
        cursor: usize,
        rerenders: usize,
        fail_render: bool,
    }

    impl FakePanel {
        fn new(category: Category, names: &[&str]) -> Self {
            Self {
                category,
                rows: names
                    .iter()
                    .map(|n| Row {
                        id: format!("id-{n}"),
                        name: n.to_string(),
                    })
                    .collect(),
                filter: None,
                cursor: 0,
                rerenders: 0,
                fail_render: false,
            }
        }
    }

    impl PanelAdapter for FakePanel {
        type Item = Row;

        fn category(&self) -> Category {
            self.category
        }

        fn visible_items(&self) -> Vec<&Row> {
            self.rows
                .iter()
                .filter(|r| self.filter.is_none_or(|f| r.name.contains(f)))
                .collect()
        }

        fn all_items(&self) -> &[Row] {
            &self.rows
        }

        fn focused_item(&self) -> Option<&Row> {
            self.visible_items().get(self.cursor).copied()
        }

        fn advance_focus(&mut self) {
            let count = self.visible_items().len();
            if self.cursor + 1 < count {
                self.cursor += 1;
            }
        }

        fn rerender(&mut self) -> Result<()> {
            self.rerenders += 1;
            if self.fail_render {
                return Err(DockError::Render("terminal gone".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_toggle_selects_and_advances() {
        let mut store = SelectionStore::new();
        let mut panel = FakePanel::new(Category::Container, &["web", "db", "cache"]);

        let outcome = SelectionController::new(&mut store)
            .toggle(&mut panel)
            .unwrap();

        assert_eq!(outcome, ToggleOutcome::Selected);
        assert!(store.is_selected(Category::Container, &ItemId::from("id-web")));
        assert_eq!(panel.cursor, 1);
        assert_eq!(panel.rerenders, 1);
    }

    #[test]
    fn test_repeated_toggle_marks_a_run() {
        let mut store = SelectionStore::new();
        let mut panel = FakePanel::new(Category::Image, &["a", "b", "c", "d"]);
        let mut controller = SelectionController::new(&mut store);

        for _ in 0..3 {
            controller.toggle(&mut panel).unwrap();
        }

        assert_eq!(controller.total_count(), 3);
        assert!(!store.is_selected(Category::Image, &ItemId::from("id-d")));
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut store = SelectionStore::new();
        let mut panel = FakePanel::new(Category::Volume, &["only"]);
        let mut controller = SelectionController::new(&mut store);

        // Cursor cannot advance past the last row, so both toggles hit the same item
        assert_eq!(controller.toggle(&mut panel).unwrap(), ToggleOutcome::Selected);
        assert_eq!(
            controller.toggle(&mut panel).unwrap(),
            ToggleOutcome::Deselected
        );
        assert!(!controller.has_any_selection());
    }

    #[test]
    fn test_toggle_without_focus_is_noop() {
        let mut store = SelectionStore::new();
        let mut panel = FakePanel::new(Category::Network, &[]);

        let outcome = SelectionController::new(&mut store)
            .toggle(&mut panel)
            .unwrap();

        assert_eq!(outcome, ToggleOutcome::NothingFocused);
        assert_eq!(panel.rerenders, 0);
        assert!(!store.has_any_selection());
    }

    #[test]
    fn test_select_all_respects_filter() {
        let mut store = SelectionStore::new();
        let mut panel = FakePanel::new(Category::Container, &["api-1", "api-2", "worker"]);
        panel.filter = Some("api");

        let added = SelectionController::new(&mut store)
            .select_all_visible(&mut panel)
            .unwrap();

        assert_eq!(added, 2);
        assert_eq!(store.count(Category::Container), 2);
        assert!(!store.is_selected(Category::Container, &ItemId::from("id-worker")));
        assert_eq!(panel.all_items().len(), 3);
    }

    #[test]
    fn test_select_all_is_idempotent() {
        let mut store = SelectionStore::new();
        let mut panel = FakePanel::new(Category::Image, &["a", "b"]);
        let mut controller = SelectionController::new(&mut store);

        controller.select_all_visible(&mut panel).unwrap();
        let once = controller.snapshot();
        controller.select_all_visible(&mut panel).unwrap();

        assert_eq!(controller.snapshot(), once);
    }

    #[test]
    fn test_deselect_all_only_touches_its_category() {
        let mut store = SelectionStore::new();
        let mut containers = FakePanel::new(Category::Container, &["a", "b"]);
        let mut images = FakePanel::new(Category::Image, &["x"]);
        let mut controller = SelectionController::new(&mut store);

        controller.select_all_visible(&mut containers).unwrap();
        controller.select_all_visible(&mut images).unwrap();
        controller.deselect_all(&mut containers).unwrap();
        controller.deselect_all(&mut containers).unwrap();

        assert_eq!(controller.per_category_counts(), vec![(Category::Image, 1)]);
    }

    #[test]
    fn test_rerender_failure_keeps_mutation() {
        let mut store = SelectionStore::new();
        let mut panel = FakePanel::new(Category::Container, &["web"]);
        panel.fail_render = true;

        let result = SelectionController::new(&mut store).toggle(&mut panel);

        assert!(matches!(result, Err(DockError::Render(_))));
        assert!(store.is_selected(Category::Container, &ItemId::from("id-web")));
    }

    #[test]
    fn test_clear_everything() {
        let mut store = SelectionStore::new();
        let mut panel = FakePanel::new(Category::Network, &["a", "b"]);
        let mut controller = SelectionController::new(&mut store);

        controller.select_all_visible(&mut panel).unwrap();
        controller.clear_everything();

        assert!(!controller.has_any_selection());
        assert_eq!(controller.total_count(), 0);
    }
}
