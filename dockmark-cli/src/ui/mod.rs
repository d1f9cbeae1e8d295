mod confirm;
mod error_panel;
mod footer;
mod header;
mod help;
mod layout;
mod progress;
mod resource_list;
mod theme;

pub use confirm::ConfirmView;
pub use error_panel::ErrorView;
pub use footer::Footer;
pub use header::Header;
pub use help::HelpView;
pub use layout::AppLayout;
pub use progress::BatchProgressView;
pub use resource_list::{ResourceListView, list_height};
pub use theme::Theme;
