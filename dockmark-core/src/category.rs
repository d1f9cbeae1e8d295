use std::fmt;

/// A kind of Docker resource, managed by one panel and one connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Container,
    Image,
    Volume,
    Network,
}

impl Category {
    /// All categories in removal order.
    ///
    /// Containers reference images, volumes and networks, so they go first.
    pub const ALL: [Category; 4] = [
        Category::Container,
        Category::Image,
        Category::Volume,
        Category::Network,
    ];

    /// Singular lowercase label used in summaries and logs
    pub fn label(&self) -> &'static str {
        match self {
            Category::Container => "container",
            Category::Image => "image",
            Category::Volume => "volume",
            Category::Network => "network",
        }
    }

    /// Panel title
    pub fn title(&self) -> &'static str {
        match self {
            Category::Container => "Containers",
            Category::Image => "Images",
            Category::Volume => "Volumes",
            Category::Network => "Networks",
        }
    }

    /// Position in removal order
    pub fn index(&self) -> usize {
        match self {
            Category::Container => 0,
            Category::Image => 1,
            Category::Volume => 2,
            Category::Network => 3,
        }
    }

    pub fn next(&self) -> Category {
        Category::ALL[(self.index() + 1) % Category::ALL.len()]
    }

    pub fn prev(&self) -> Category {
        let len = Category::ALL.len();
        Category::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
