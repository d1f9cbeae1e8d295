mod controller;
mod item;
mod store;

pub use controller::{SelectionController, ToggleOutcome};
pub use item::{Item, ItemId, PanelAdapter, find_by_id};
pub use store::{SelectionSnapshot, SelectionStore};
