//! In-process record store.
//!
//! Keeps records in insertion order behind a mutex, which doubles as the
//! store-default ordering the listing contract relies on. This is the default
//! backend wired up in `main` and the store used by unit tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use super::{NameFilter, RecipeStore, StoreError};
use crate::models::{NewRecipe, Recipe};

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Recipe>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn find(
        &self,
        filter: &NameFilter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Recipe>, StoreError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| filter.matches(&r.name))
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &NameFilter) -> Result<u64, StoreError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().filter(|r| filter.matches(&r.name)).count() as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, StoreError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, fields: NewRecipe) -> Result<Recipe, StoreError> {
        let recipe = Recipe {
            id: Uuid::new_v4(),
            name: fields.name,
            description: fields.description,
            price: fields.price,
            image: Some(fields.image),
            image_id: Some(fields.image_id),
            author: fields.author,
            comment_ids: Vec::new(),
            created_at: Utc::now(),
        };
        self.records.lock().unwrap().push(recipe.clone());
        Ok(recipe)
    }

    async fn save(&self, recipe: &Recipe) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == recipe.id) {
            Some(slot) => {
                *slot = recipe.clone();
                Ok(())
            }
            None => Err(StoreError::MissingRecord(recipe.id)),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::MissingRecord(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;

    fn author() -> Author {
        Author {
            id: Uuid::new_v4(),
            username: "gordon".to_string(),
        }
    }

    fn new_recipe(name: &str) -> NewRecipe {
        NewRecipe {
            name: name.to_string(),
            description: "tasty".to_string(),
            price: 4.5,
            image: format!("https://img.example/{name}.jpg"),
            image_id: format!("key-{name}"),
            author: author(),
        }
    }

    #[tokio::test]
    async fn test_find_preserves_insertion_order() {
        let store = MemoryStore::new();
        for name in ["alpha", "bravo", "charlie"] {
            store.create(new_recipe(name)).await.unwrap();
        }

        let all = store.find(&NameFilter::All, 0, 10).await.unwrap();
        let names: Vec<_> = all.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "bravo", "charlie"]);
    }

    #[tokio::test]
    async fn test_find_applies_skip_and_limit_after_filtering() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store.create(new_recipe(&format!("pie {i}"))).await.unwrap();
        }
        store.create(new_recipe("stew")).await.unwrap();

        let filter = NameFilter::for_search("pie").unwrap();
        let page = store.find(&filter, 2, 2).await.unwrap();
        let names: Vec<_> = page.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["pie 2", "pie 3"]);
    }

    #[tokio::test]
    async fn test_count_uses_same_filter_as_find() {
        let store = MemoryStore::new();
        for name in ["apple pie", "APPLE crumble", "stew"] {
            store.create(new_recipe(name)).await.unwrap();
        }

        let filter = NameFilter::for_search("apple").unwrap();
        assert_eq!(store.count(&filter).await.unwrap(), 2);
        assert_eq!(store.count(&NameFilter::All).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_save_replaces_existing_record() {
        let store = MemoryStore::new();
        let mut recipe = store.create(new_recipe("flan")).await.unwrap();
        recipe.description = "wobbly".to_string();

        store.save(&recipe).await.unwrap();

        let loaded = store.find_by_id(recipe.id).await.unwrap().unwrap();
        assert_eq!(loaded.description, "wobbly");
    }

    #[tokio::test]
    async fn test_save_of_unknown_record_is_an_error() {
        let store = MemoryStore::new();
        let recipe = {
            let other = MemoryStore::new();
            other.create(new_recipe("ghost")).await.unwrap()
        };

        assert!(matches!(
            store.save(&recipe).await,
            Err(StoreError::MissingRecord(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_deletes_by_id() {
        let store = MemoryStore::new();
        let recipe = store.create(new_recipe("toast")).await.unwrap();

        store.remove(recipe.id).await.unwrap();

        assert!(store.find_by_id(recipe.id).await.unwrap().is_none());
        assert!(matches!(
            store.remove(recipe.id).await,
            Err(StoreError::MissingRecord(_))
        ));
    }
}
