//! Record-store boundary.
//!
//! Handlers and the lifecycle manager only see this trait; the backing store
//! (in-process today) is wired up in `main`.

pub mod memory;

use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewRecipe, Recipe};
use crate::search::name_pattern;

pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store rejected the operation: {0}")]
    Rejected(String),

    #[error("no record with id {0}")]
    MissingRecord(Uuid),
}

/// Name predicate applied by `find` and `count`. Both queries in a listing
/// request must use the same filter.
#[derive(Debug, Clone)]
pub enum NameFilter {
    /// Match every record.
    All,
    /// Match records whose name contains the pattern.
    Name(Regex),
}

impl NameFilter {
    /// Filter for a user-supplied search term, with metacharacters escaped.
    pub fn for_search(term: &str) -> Result<Self, regex::Error> {
        Ok(NameFilter::Name(name_pattern(term)?))
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameFilter::All => true,
            NameFilter::Name(pattern) => pattern.is_match(name),
        }
    }
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Fetch matching records in store-default order, skipping `skip` and
    /// returning at most `limit`.
    async fn find(&self, filter: &NameFilter, skip: u64, limit: u64)
        -> Result<Vec<Recipe>, StoreError>;

    /// Count all records matching `filter`. A separate round trip from `find`.
    async fn count(&self, filter: &NameFilter) -> Result<u64, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, StoreError>;

    /// Persist a new record and return it with its assigned identity.
    async fn create(&self, fields: NewRecipe) -> Result<Recipe, StoreError>;

    /// Write back a loaded record in place.
    async fn save(&self, recipe: &Recipe) -> Result<(), StoreError>;

    async fn remove(&self, id: Uuid) -> Result<(), StoreError>;
}
