use async_trait::async_trait;

use crate::error::ItemResult;
use crate::models::{Item, ItemFields, ItemId};

/// Persistence operations for items.
///
/// Implementations report raw store failures as `ItemError::Database` and
/// uniqueness violations on `name` as `ItemError::DuplicateName`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items in store order
    async fn list(&self) -> ItemResult<Vec<Item>>;

    async fn get_by_id(&self, id: ItemId) -> ItemResult<Option<Item>>;

    /// Exact-match lookup on `name`
    async fn find_by_name(&self, name: &str) -> ItemResult<Option<Item>>;

    /// Insert a new item; the store assigns the identifier
    async fn create(&self, input: ItemFields) -> ItemResult<Item>;

    /// Replace `name` and `price`, returning the updated item or `None` when absent
    async fn update(&self, id: ItemId, input: ItemFields) -> ItemResult<Option<Item>>;

    /// `false` when nothing matched
    async fn delete(&self, id: ItemId) -> ItemResult<bool>;
}
