use std::fmt;

use crate::category::Category;
use crate::selection::ItemId;

/// A removal the connector refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationFailure {
    pub category: Category,
    pub name: String,
    pub reason: String,
}

impl fmt::Display for MutationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.reason)
    }
}

/// What happened to one selected id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Removed {
        category: Category,
        id: ItemId,
        name: String,
    },
    /// Id no longer resolved to a live item
    Skipped { category: Category, id: ItemId },
    Failed(MutationFailure),
}

impl ItemOutcome {
    pub fn category(&self) -> Category {
        match self {
            ItemOutcome::Removed { category, .. } | ItemOutcome::Skipped { category, .. } => {
                *category
            }
            ItemOutcome::Failed(failure) => failure.category,
        }
    }
}

/// Aggregated result of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Failures in processing order
    pub failures: Vec<MutationFailure>,
    pub removed: usize,
    pub skipped: usize,
}

impl BatchReport {
    pub fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Removed { .. } => self.removed += 1,
            ItemOutcome::Skipped { .. } => self.skipped += 1,
            ItemOutcome::Failed(failure) => self.failures.push(failure),
        }
    }

    pub fn processed(&self) -> usize {
        self.removed + self.skipped + self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// One `name: reason` line per failure, or `None` if everything went through
    pub fn error_report(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        Some(
            self.failures
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}
