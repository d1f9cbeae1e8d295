use crate::batch::{Connector, ConnectorError, ConnectorSet, RemoveOptions, Target};
use crate::category::Category;
use crate::selection::{ItemId, find_by_id};

use super::cli::DockerCli;
use super::resources::{Inventory, Resource};

/// Removes one category of resources through the docker CLI.
///
/// Lookups run against the item list captured when the batch was confirmed.
pub struct DockerConnector {
    cli: DockerCli,
    category: Category,
    items: Vec<Resource>,
}

impl DockerConnector {
    pub fn new(cli: DockerCli, category: Category, items: Vec<Resource>) -> Self {
        Self {
            cli,
            category,
            items,
        }
    }
}

impl Connector for DockerConnector {
    fn find_by_id(&self, id: &ItemId) -> Option<Target> {
        find_by_id(&self.items, id).map(Target::from_item)
    }

    fn remove(&self, target: &Target, options: RemoveOptions) -> Result<(), ConnectorError> {
        self.cli
            .remove(self.category, target.id.as_str(), options)
            .map_err(ConnectorError::from)
    }
}

/// One docker connector per category over `inventory`
pub fn connector_set(cli: &DockerCli, inventory: &Inventory) -> ConnectorSet {
    let mut set = ConnectorSet::new();
    for category in Category::ALL {
        set.insert(
            category,
            DockerConnector::new(cli.clone(), category, inventory.get(category).to_vec()),
        );
    }
    set
}
