//! Listing Service: one page of recipes plus the page-count metadata the
//! index view needs.

use crate::models::Recipe;
use crate::store::{NameFilter, RecipeStore, StoreError};

/// Fixed page size for the recipe index.
pub const PER_PAGE: u64 = 8;

#[derive(Debug)]
pub struct PageResult {
    /// At most `PER_PAGE` records, in store-default order.
    pub recipes: Vec<Recipe>,
    pub current: u64,
    /// `ceil(match count / PER_PAGE)`, from a separate count query.
    pub pages: u64,
    /// Set only when a search term was supplied and the page came back empty.
    pub no_match: bool,
    /// Echo of the effective search term, if any.
    pub search: Option<String>,
    /// A fetch failure is downgraded to a warning rather than failing the
    /// request; see `list`.
    pub warning: Option<String>,
}

/// Resolve the raw page parameter: absent, non-numeric, and zero all mean
/// page 1.
pub fn resolve_page(raw: Option<&str>) -> u64 {
    raw.and_then(|p| p.parse::<u64>().ok())
        .filter(|&p| p >= 1)
        .unwrap_or(1)
}

/// Compute one page of recipes, optionally filtered by a name search.
///
/// The two store round trips are handled asymmetrically, matching the
/// behavior this service replaces: a failed fetch is reported as a warning on
/// the result and the listing still renders (with an empty page) as long as
/// the count succeeds, while a failed count aborts the whole request.
pub async fn list(
    store: &dyn RecipeStore,
    search: Option<&str>,
    page: Option<&str>,
) -> Result<PageResult, StoreError> {
    let current = resolve_page(page);
    let search = search.filter(|s| !s.is_empty());

    let filter = match search {
        // Cannot fail in practice: the term is metacharacter-escaped before
        // the pattern is built.
        Some(term) => NameFilter::for_search(term)
            .map_err(|e| StoreError::Rejected(format!("invalid search pattern: {e}")))?,
        None => NameFilter::All,
    };

    // `current` is caller-controlled; saturate instead of overflowing on
    // absurd page numbers.
    let skip = current.saturating_sub(1).saturating_mul(PER_PAGE);

    let (recipes, warning) = match store.find(&filter, skip, PER_PAGE).await {
        Ok(recipes) => (recipes, None),
        Err(e) => {
            tracing::warn!(error = %e, "recipe fetch failed, rendering without results");
            (Vec::new(), Some(e.to_string()))
        }
    };

    let count = store.count(&filter).await?;

    let no_match = search.is_some() && recipes.is_empty();

    Ok(PageResult {
        recipes,
        current,
        pages: count.div_ceil(PER_PAGE),
        no_match,
        search: search.map(str::to_string),
        warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, NewRecipe};
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use uuid::Uuid;

    async fn seeded_store(names: &[&str]) -> MemoryStore {
        let store = MemoryStore::new();
        for name in names {
            store
                .create(NewRecipe {
                    name: name.to_string(),
                    description: "d".to_string(),
                    price: 1.0,
                    image: "https://img.example/x.png".to_string(),
                    image_id: "key-x".to_string(),
                    author: Author {
                        id: Uuid::new_v4(),
                        username: "julia".to_string(),
                    },
                })
                .await
                .unwrap();
        }
        store
    }

    /// Store double whose fetch always fails while count works, for the
    /// asymmetric failure path.
    struct FetchFailsStore {
        count: u64,
    }

    #[async_trait]
    impl RecipeStore for FetchFailsStore {
        async fn find(
            &self,
            _filter: &NameFilter,
            _skip: u64,
            _limit: u64,
        ) -> Result<Vec<Recipe>, StoreError> {
            Err(StoreError::Rejected("cursor timed out".to_string()))
        }

        async fn count(&self, _filter: &NameFilter) -> Result<u64, StoreError> {
            Ok(self.count)
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Recipe>, StoreError> {
            Ok(None)
        }

        async fn create(&self, _fields: NewRecipe) -> Result<Recipe, StoreError> {
            Err(StoreError::Rejected("read-only".to_string()))
        }

        async fn save(&self, _recipe: &Recipe) -> Result<(), StoreError> {
            Err(StoreError::Rejected("read-only".to_string()))
        }

        async fn remove(&self, _id: Uuid) -> Result<(), StoreError> {
            Err(StoreError::Rejected("read-only".to_string()))
        }
    }

    /// Store double whose count always fails.
    struct CountFailsStore;

    #[async_trait]
    impl RecipeStore for CountFailsStore {
        async fn find(
            &self,
            _filter: &NameFilter,
            _skip: u64,
            _limit: u64,
        ) -> Result<Vec<Recipe>, StoreError> {
            Ok(Vec::new())
        }

        async fn count(&self, _filter: &NameFilter) -> Result<u64, StoreError> {
            Err(StoreError::Rejected("count timed out".to_string()))
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Recipe>, StoreError> {
            Ok(None)
        }

        async fn create(&self, _fields: NewRecipe) -> Result<Recipe, StoreError> {
            Err(StoreError::Rejected("read-only".to_string()))
        }

        async fn save(&self, _recipe: &Recipe) -> Result<(), StoreError> {
            Err(StoreError::Rejected("read-only".to_string()))
        }

        async fn remove(&self, _id: Uuid) -> Result<(), StoreError> {
            Err(StoreError::Rejected("read-only".to_string()))
        }
    }

    #[test]
    fn test_resolve_page_defaults_to_one() {
        assert_eq!(resolve_page(None), 1);
        assert_eq!(resolve_page(Some("")), 1);
        assert_eq!(resolve_page(Some("abc")), 1);
        // Unlike parseInt, trailing garbage does not salvage leading digits.
        assert_eq!(resolve_page(Some("2abc")), 1);
        assert_eq!(resolve_page(Some("-3")), 1);
        assert_eq!(resolve_page(Some("0")), 1);
        assert_eq!(resolve_page(Some("2")), 2);
    }

    #[tokio::test]
    async fn test_page_count_is_ceiling_of_matches_over_page_size() {
        let names: Vec<String> = (0..17).map(|i| format!("recipe {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let store = seeded_store(&refs).await;

        let result = list(&store, None, None).await.unwrap();
        assert_eq!(result.pages, 3);
        assert_eq!(result.recipes.len(), 8);
        assert_eq!(result.current, 1);
    }

    #[tokio::test]
    async fn test_last_page_holds_the_remainder() {
        let names: Vec<String> = (0..17).map(|i| format!("recipe {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let store = seeded_store(&refs).await;

        let result = list(&store, None, Some("3")).await.unwrap();
        assert_eq!(result.recipes.len(), 1);
        assert_eq!(result.recipes[0].name, "recipe 16");
        assert_eq!(result.current, 3);
    }

    #[tokio::test]
    async fn test_huge_page_number_yields_an_empty_page() {
        let store = seeded_store(&["one", "two"]).await;

        // 2^61: the window multiply would overflow without saturation.
        let result = list(&store, None, Some("2305843009213693952"))
            .await
            .unwrap();
        assert!(result.recipes.is_empty());
        assert_eq!(result.current, 2305843009213693952);
        assert_eq!(result.pages, 1);
    }

    #[tokio::test]
    async fn test_search_filters_by_name_case_insensitively() {
        let store = seeded_store(&["Apple Pie", "apple crumble", "beef stew"]).await;

        let result = list(&store, Some("APPLE"), None).await.unwrap();
        assert_eq!(result.recipes.len(), 2);
        assert_eq!(result.pages, 1);
        assert!(!result.no_match);
        assert_eq!(result.search.as_deref(), Some("APPLE"));
    }

    #[tokio::test]
    async fn test_metacharacters_in_search_match_literally() {
        let store = seeded_store(&["mac & cheese (v2.0)", "mac and cheese v250"]).await;

        let result = list(&store, Some("(v2.0)"), None).await.unwrap();
        assert_eq!(result.recipes.len(), 1);
        assert_eq!(result.recipes[0].name, "mac & cheese (v2.0)");
    }

    #[tokio::test]
    async fn test_no_match_requires_a_search_term() {
        let store = seeded_store(&[]).await;

        let without_search = list(&store, None, None).await.unwrap();
        assert!(!without_search.no_match);
        assert_eq!(without_search.pages, 0);

        let with_search = list(&store, Some("tacos"), None).await.unwrap();
        assert!(with_search.no_match);
        assert!(with_search.recipes.is_empty());
    }

    #[tokio::test]
    async fn test_empty_search_term_means_match_all() {
        let store = seeded_store(&["one", "two"]).await;

        let result = list(&store, Some(""), None).await.unwrap();
        assert_eq!(result.recipes.len(), 2);
        assert!(result.search.is_none());
        assert!(!result.no_match);
    }

    #[tokio::test]
    async fn test_fetch_failure_becomes_a_warning_when_count_succeeds() {
        let store = FetchFailsStore { count: 20 };

        let result = list(&store, Some("soup"), None).await.unwrap();
        assert!(result.warning.is_some());
        assert!(result.recipes.is_empty());
        // Page count still comes from the successful count query.
        assert_eq!(result.pages, 3);
    }

    #[tokio::test]
    async fn test_count_failure_aborts_the_request() {
        let store = CountFailsStore;

        assert!(list(&store, None, None).await.is_err());
        assert!(list(&store, Some("soup"), None).await.is_err());
    }
}
