//! Item Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ItemError, ItemOperation, ItemResult};
use crate::models::{Item, ItemId, ItemInput, ItemRules};
use crate::repository::ItemRepository;

/// Item service providing business logic operations
///
/// The service validates input, enforces name uniqueness ahead of writes, and
/// attributes store failures to the operation that hit them.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
    rules: ItemRules,
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a new ItemService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            rules: ItemRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: ItemRules) -> Self {
        self.rules = rules;
        self
    }

    /// List every item
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> ItemResult<Vec<Item>> {
        self.repository
            .list()
            .await
            .map_err(|e| e.during(ItemOperation::List))
    }

    /// Get an item by its path identifier
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: &str) -> ItemResult<Item> {
        let item_id = parse_id(id)?;

        self.repository
            .get_by_id(item_id)
            .await
            .map_err(|e| e.during(ItemOperation::Get))?
            .ok_or_else(|| ItemError::NotFound(id.to_string()))
    }

    /// Create a new item
    #[instrument(skip(self, input))]
    pub async fn create_item(&self, input: ItemInput) -> ItemResult<Item> {
        let fields = input.into_fields(&self.rules)?;

        let existing = self
            .repository
            .find_by_name(&fields.name)
            .await
            .map_err(|e| e.during(ItemOperation::Create))?;
        if existing.is_some() {
            return Err(ItemError::DuplicateName(fields.name));
        }

        self.repository
            .create(fields)
            .await
            .map_err(|e| e.during(ItemOperation::Create))
    }

    /// Replace the name and price of an existing item.
    ///
    /// Input is checked before the identifier, so an invalid body on an
    /// unknown item is still a 400.
    #[instrument(skip(self, input))]
    pub async fn update_item(&self, id: &str, input: ItemInput) -> ItemResult<Item> {
        let fields = input.into_fields(&self.rules)?;
        let item_id = parse_id(id)?;

        self.repository
            .update(item_id, fields)
            .await
            .map_err(|e| e.during(ItemOperation::Update))?
            .ok_or_else(|| ItemError::NotFound(id.to_string()))
    }

    /// Delete an item
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: &str) -> ItemResult<()> {
        let item_id = parse_id(id)?;

        let deleted = self
            .repository
            .delete(item_id)
            .await
            .map_err(|e| e.during(ItemOperation::Delete))?;

        if !deleted {
            return Err(ItemError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Malformed identifiers can never match, so they read as not found
fn parse_id(id: &str) -> ItemResult<ItemId> {
    ItemId::parse(id).ok_or_else(|| ItemError::NotFound(id.to_string()))
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            rules: self.rules,
        }
    }
}
