mod cli;
mod connector;
mod resources;

pub use cli::{DockerCli, removal_args};
pub use connector::{DockerConnector, connector_set};
pub use resources::{Container, Image, Inventory, Network, Resource, Volume};
