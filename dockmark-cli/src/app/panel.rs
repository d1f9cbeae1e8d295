use dockmark_core::{Category, Item, PanelAdapter, Resource, Result};

/// Cursor and filter state of one category's list
#[derive(Debug, Clone)]
pub struct ResourcePanel {
    category: Category,
    items: Vec<Resource>,
    filter: String,
    /// Cursor position within the visible (filtered) rows
    selected_index: usize,
    scroll_offset: usize,
    visible_height: usize,
}

impl ResourcePanel {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            items: Vec::new(),
            filter: String::new(),
            selected_index: 0,
            scroll_offset: 0,
            visible_height: 10,
        }
    }

    /// Replace the listed items, keeping the cursor on the same item if it survived
    pub fn set_items(&mut self, items: Vec<Resource>) {
        let focused = self.focused_item().map(|r| r.id().to_string());
        self.items = items;
        if let Some(id) = focused
            && let Some(idx) = self.visible_items().iter().position(|r| r.id() == id)
        {
            self.selected_index = idx;
        }
        self.clamp();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: String) {
        self.filter = filter;
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn set_visible_height(&mut self, height: usize) {
        self.visible_height = height.max(1);
        self.ensure_visible();
    }

    fn matches(&self, resource: &Resource) -> bool {
        self.filter.is_empty()
            || resource
                .name()
                .to_lowercase()
                .contains(&self.filter.to_lowercase())
    }

    fn visible_count(&self) -> usize {
        self.items.iter().filter(|r| self.matches(r)).count()
    }

    fn ensure_visible(&mut self) {
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + self.visible_height {
            self.scroll_offset = self.selected_index - self.visible_height + 1;
        }
    }

    /// Keep cursor and scroll inside the visible rows
    fn clamp(&mut self) {
        let count = self.visible_count();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
        if self.scroll_offset > self.selected_index {
            self.scroll_offset = self.selected_index;
        }
        self.ensure_visible();
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
        self.ensure_visible();
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.visible_count() {
            self.selected_index += 1;
        }
        self.ensure_visible();
    }

    pub fn page_up(&mut self) {
        let page_size = self.visible_height.saturating_sub(2).max(1);
        self.selected_index = self.selected_index.saturating_sub(page_size);
        self.ensure_visible();
    }

    pub fn page_down(&mut self) {
        let page_size = self.visible_height.saturating_sub(2).max(1);
        let last = self.visible_count().saturating_sub(1);
        self.selected_index = (self.selected_index + page_size).min(last);
        self.ensure_visible();
    }

    pub fn go_to_first(&mut self) {
        self.selected_index = 0;
        self.ensure_visible();
    }

    pub fn go_to_last(&mut self) {
        self.selected_index = self.visible_count().saturating_sub(1);
        self.ensure_visible();
    }
}

impl PanelAdapter for ResourcePanel {
    type Item = Resource;

    fn category(&self) -> Category {
        self.category
    }

    fn visible_items(&self) -> Vec<&Resource> {
        self.items.iter().filter(|r| self.matches(r)).collect()
    }

    fn all_items(&self) -> &[Resource] {
        &self.items
    }

    fn focused_item(&self) -> Option<&Resource> {
        self.items
            .iter()
            .filter(|r| self.matches(r))
            .nth(self.selected_index)
    }

    fn advance_focus(&mut self) {
        self.move_down();
    }

    // Frames are redrawn every tick; only the viewport needs fixing up
    fn rerender(&mut self) -> Result<()> {
        self.clamp();
        Ok(())
    }
}
