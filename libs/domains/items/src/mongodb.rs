//! MongoDB implementation of ItemRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemFields, ItemId};
use crate::repository::ItemRepository;

const DEFAULT_COLLECTION: &str = "items";

/// Server error code for a unique index violation
const DUPLICATE_KEY_CODE: i32 = 11000;

/// How many duplicated names an index build failure reports
const DUPLICATE_REPORT_LIMIT: i64 = 10;

/// Stored shape of an item
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    price: f64,
}

impl From<ItemDocument> for Item {
    fn from(doc: ItemDocument) -> Self {
        Item {
            id: doc.id.into(),
            name: doc.name,
            price: doc.price,
        }
    }
}

/// MongoDB implementation of the ItemRepository
pub struct MongoItemRepository {
    collection: Collection<ItemDocument>,
}

impl MongoItemRepository {
    /// Create a repository over the `items` collection
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoItemRepository::new(&client.database("test"));
    /// repo.init_indexes().await?;
    /// ```
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    /// Create a repository over a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<ItemDocument>(collection_name),
        }
    }

    /// Ensure the unique index on `name` exists.
    ///
    /// Uniqueness must hold under concurrent creates, which the read-before-write
    /// check in the service cannot guarantee on its own. A collection that
    /// already holds duplicate names cannot get the index; the error then lists
    /// those names so they can be cleaned up before the next start.
    pub async fn init_indexes(&self) -> ItemResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("name_unique".to_string())
                    .build(),
            )
            .build();

        if let Err(err) = self.collection.create_index(index).await {
            if !is_duplicate_key(&err) {
                return Err(err.into());
            }
            let names = self.duplicate_names().await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Could not list duplicate item names");
                Vec::new()
            });
            return Err(ItemError::Database(duplicate_index_message(&names)));
        }
        tracing::info!(
            collection = %self.collection.name(),
            "Ensured unique index on item name"
        );
        Ok(())
    }

    /// Names stored more than once, sorted, at most [`DUPLICATE_REPORT_LIMIT`]
    async fn duplicate_names(&self) -> ItemResult<Vec<String>> {
        let pipeline = vec![
            doc! { "$group": { "_id": "$name", "count": { "$sum": 1 } } },
            doc! { "$match": { "count": { "$gt": 1 } } },
            doc! { "$sort": { "_id": 1 } },
            doc! { "$limit": DUPLICATE_REPORT_LIMIT },
        ];
        let groups: Vec<Document> = self.collection.aggregate(pipeline).await?.try_collect().await?;
        Ok(groups
            .iter()
            .filter_map(|group| group.get_str("_id").ok().map(str::to_string))
            .collect())
    }

    fn by_id(id: ItemId) -> Document {
        doc! { "_id": id.as_object_id() }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

fn duplicate_index_message(names: &[String]) -> String {
    let listed = if names.is_empty() {
        "unknown names".to_string()
    } else {
        names.join(", ")
    };
    format!(
        "cannot create unique index on item name: collection already holds duplicate names ({}); \
         rename or delete the duplicates, then restart",
        listed
    )
}

/// Duplicate key violations become `DuplicateName`, everything else a store failure
fn map_write_error(err: mongodb::error::Error, name: &str) -> ItemError {
    if is_duplicate_key(&err) {
        ItemError::DuplicateName(name.to_string())
    } else {
        err.into()
    }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> ItemResult<Vec<Item>> {
        let cursor = self.collection.find(doc! {}).await?;
        let docs: Vec<ItemDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Item::from).collect())
    }

    #[instrument(skip(self), fields(item_id = %id))]
    async fn get_by_id(&self, id: ItemId) -> ItemResult<Option<Item>> {
        let found = self.collection.find_one(Self::by_id(id)).await?;
        Ok(found.map(Item::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> ItemResult<Option<Item>> {
        let found = self.collection.find_one(doc! { "name": name }).await?;
        Ok(found.map(Item::from))
    }

    #[instrument(skip(self, input), fields(item_name = %input.name))]
    async fn create(&self, input: ItemFields) -> ItemResult<Item> {
        let result = self
            .collection
            .clone_with_type::<Document>()
            .insert_one(doc! { "name": input.name.as_str(), "price": input.price })
            .await
            .map_err(|e| map_write_error(e, &input.name))?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            ItemError::Database(format!(
                "insert returned a non-ObjectId _id: {}",
                result.inserted_id
            ))
        })?;

        tracing::info!(item_id = %id, "Item created");
        Ok(input.into_item(id.into()))
    }

    #[instrument(skip(self, input), fields(item_id = %id))]
    async fn update(&self, id: ItemId, input: ItemFields) -> ItemResult<Option<Item>> {
        let update = doc! {
            "$set": { "name": input.name.as_str(), "price": input.price }
        };

        let updated = self
            .collection
            .find_one_and_update(Self::by_id(id), update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| map_write_error(e, &input.name))?;

        if updated.is_some() {
            tracing::info!(item_id = %id, "Item updated");
        }
        Ok(updated.map(Item::from))
    }

    #[instrument(skip(self), fields(item_id = %id))]
    async fn delete(&self, id: ItemId) -> ItemResult<bool> {
        let result = self.collection.delete_one(Self::by_id(id)).await?;

        if result.deleted_count == 0 {
            return Ok(false);
        }

        tracing::info!(item_id = %id, "Item deleted");
        Ok(true)
    }
}
