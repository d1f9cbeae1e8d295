use std::fmt;

use crate::category::Category;
use crate::error::Result;

/// Stable per-category key for one item.
///
/// Container and image IDs, volume and network names. Never a list index,
/// since lists get filtered and re-sorted between renders.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything a panel lists. The core only reads identity and name.
pub trait Item {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

/// Narrow view of one category's list widget
pub trait PanelAdapter {
    type Item: Item;

    /// Category this panel lists
    fn category(&self) -> Category;
    /// Items passing the active filter, in display order
    fn visible_items(&self) -> Vec<&Self::Item>;
    /// Every known item, filtered or not
    fn all_items(&self) -> &[Self::Item];
    /// Item under the cursor, if any
    fn focused_item(&self) -> Option<&Self::Item>;
    /// Move the cursor to the next visible item
    fn advance_focus(&mut self);
    /// Ask the display layer to redraw this panel
    fn rerender(&mut self) -> Result<()>;
}

/// Look up a live item by identifier
pub fn find_by_id<'a, I: Item>(items: &'a [I], id: &ItemId) -> Option<&'a I> {
    items.iter().find(|item| item.id() == id.as_str())
}
