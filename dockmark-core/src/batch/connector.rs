use std::collections::BTreeMap;

use thiserror::Error;

use crate::category::Category;
use crate::error::DockError;
use crate::selection::{Item, ItemId};

/// How hard a removal should push
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveOptions {
    /// Remove even if the resource is running or has soft dependents
    pub force: bool,
    /// Also remove dependents that become dangling (images only)
    pub prune_dependents: bool,
}

impl RemoveOptions {
    /// Policy used for a category during a batch
    pub fn for_category(category: Category, prune_images: bool) -> Self {
        match category {
            Category::Container | Category::Volume => Self {
                force: true,
                prune_dependents: false,
            },
            Category::Image => Self {
                force: true,
                prune_dependents: prune_images,
            },
            // `docker network rm` has no force flag
            Category::Network => Self::default(),
        }
    }
}

/// Live item resolved by a connector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: ItemId,
    pub name: String,
}

impl Target {
    pub fn from_item<I: Item>(item: &I) -> Self {
        Self {
            id: ItemId::from(item.id()),
            name: item.name().to_string(),
        }
    }
}

/// Description of why a single removal failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ConnectorError(pub String);

impl From<DockError> for ConnectorError {
    fn from(err: DockError) -> Self {
        match err {
            DockError::CommandFailed { stderr, .. } => Self(stderr),
            other => Self(other.to_string()),
        }
    }
}

/// Removes items of one category
pub trait Connector: Send + Sync {
    /// Resolve a selected id to a live item, `None` if it is gone
    fn find_by_id(&self, id: &ItemId) -> Option<Target>;

    fn remove(&self, target: &Target, options: RemoveOptions) -> Result<(), ConnectorError>;
}

/// One connector per category
#[derive(Default)]
pub struct ConnectorSet {
    connectors: BTreeMap<Category, Box<dyn Connector>>,
}

impl ConnectorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: Category, connector: impl Connector + 'static) -> Self {
        self.insert(category, connector);
        self
    }

    pub fn insert(&mut self, category: Category, connector: impl Connector + 'static) {
        self.connectors.insert(category, Box::new(connector));
    }

    pub fn get(&self, category: Category) -> Option<&dyn Connector> {
        self.connectors.get(&category).map(|c| c.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_options_policy() {
        let container = RemoveOptions::for_category(Category::Container, true);
        assert!(container.force && !container.prune_dependents);

        let image = RemoveOptions::for_category(Category::Image, true);
        assert!(image.force && image.prune_dependents);

        let image = RemoveOptions::for_category(Category::Image, false);
        assert!(image.force && !image.prune_dependents);

        assert_eq!(
            RemoveOptions::for_category(Category::Network, true),
            RemoveOptions::default()
        );
    }

    #[test]
    fn test_connector_error_from_command_failure_keeps_stderr() {
        let err = DockError::CommandFailed {
            command: "docker rm -f abc".to_string(),
            stderr: "resource busy".to_string(),
        };
        assert_eq!(ConnectorError::from(err).to_string(), "resource busy");
    }
}
