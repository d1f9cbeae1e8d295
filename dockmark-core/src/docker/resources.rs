use serde::Deserialize;

use crate::category::Category;
use crate::selection::Item;

/// A row of `docker ps -a --format '{{json .}}'`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Container {
    #[serde(rename = "ID")]
    pub id: String,
    pub names: String,
    pub image: String,
    pub state: String,
    pub status: String,
}

/// A row of `docker images --format '{{json .}}'`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Image {
    #[serde(rename = "ID")]
    pub id: String,
    pub repository: String,
    pub tag: String,
    pub size: String,
}

/// A row of `docker volume ls --format '{{json .}}'`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Volume {
    pub name: String,
    pub driver: String,
}

/// A row of `docker network ls --format '{{json .}}'`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Network {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    pub driver: String,
    pub scope: String,
}

/// Any listed Docker resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Container(Container),
    Image(Image),
    Volume(Volume),
    Network(Network),
}

impl Resource {
    pub fn category(&self) -> Category {
        match self {
            Resource::Container(_) => Category::Container,
            Resource::Image(_) => Category::Image,
            Resource::Volume(_) => Category::Volume,
            Resource::Network(_) => Category::Network,
        }
    }
}

impl Item for Resource {
    /// Containers and images are keyed by ID, volumes and networks by name
    fn id(&self) -> &str {
        match self {
            Resource::Container(c) => &c.id,
            Resource::Image(i) => &i.id,
            Resource::Volume(v) => &v.name,
            Resource::Network(n) => &n.name,
        }
    }

    fn name(&self) -> &str {
        match self {
            Resource::Container(c) => &c.names,
            Resource::Image(i) => &i.repository,
            Resource::Volume(v) => &v.name,
            Resource::Network(n) => &n.name,
        }
    }
}

/// Current resources of every category
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    lists: [Vec<Resource>; 4],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> &[Resource] {
        &self.lists[category.index()]
    }

    pub fn set(&mut self, category: Category, resources: Vec<Resource>) {
        self.lists[category.index()] = resources;
    }

    pub fn total(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }
}
