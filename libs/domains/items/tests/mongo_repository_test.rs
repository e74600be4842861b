//! MongoDB repository tests
//!
//! Run against a throwaway container: `cargo test -p domain_items -- --ignored`

use domain_items::*;
use ::mongodb::bson::{Document, doc};
use test_utils::{TestDataBuilder, TestMongo, assertions::assert_some};

async fn repository(mongo: &TestMongo, test_name: &str) -> MongoItemRepository {
    let builder = TestDataBuilder::from_test_name(test_name);
    let repo = MongoItemRepository::new(&mongo.database(&builder.database_name()));
    repo.init_indexes().await.unwrap();
    repo
}

fn fields(name: &str, price: f64) -> ItemFields {
    ItemFields {
        name: name.to_string(),
        price,
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_crud_round_trip() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "crud_round_trip").await;

    let created = repo.create(fields("Widget", 9.99)).await.unwrap();
    let fetched = assert_some(repo.get_by_id(created.id).await.unwrap(), "get_by_id");
    assert_eq!(fetched, created);

    let by_name = assert_some(repo.find_by_name("Widget").await.unwrap(), "find_by_name");
    assert_eq!(by_name.id, created.id);

    let updated = assert_some(
        repo.update(created.id, fields("Widget Pro", 19.99))
            .await
            .unwrap(),
        "update",
    );
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Widget Pro");
    assert_eq!(updated.price, 19.99);

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
    assert!(repo.get_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_item_returns_none() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "update_missing").await;

    let result = repo.update(ItemId::new(), fields("Ghost", 1.0)).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_index_rejects_duplicate_create_and_update() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "unique_index").await;

    repo.create(fields("Widget", 1.0)).await.unwrap();
    let gadget = repo.create(fields("Gadget", 2.0)).await.unwrap();

    let err = repo.create(fields("Widget", 3.0)).await.unwrap_err();
    assert!(matches!(err, ItemError::DuplicateName(name) if name == "Widget"));

    let err = repo
        .update(gadget.id, fields("Widget", 2.0))
        .await
        .unwrap_err();
    assert!(matches!(err, ItemError::DuplicateName(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_concurrent_creates_store_one_item() {
    let mongo = TestMongo::new().await;
    let service = ItemService::new(repository(&mongo, "concurrent_creates").await);

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.create_item(ItemInput::new("Widget", 1.0)).await })
        })
        .collect();

    let mut created = 0;
    for attempt in attempts {
        match attempt.await.unwrap() {
            Ok(_) => created += 1,
            Err(ItemError::DuplicateName(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(service.list_items().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_returns_insertion_order() {
    let mongo = TestMongo::new().await;
    let repo = repository(&mongo, "list_order").await;

    for name in ["Bolt", "Anchor", "Cable"] {
        repo.create(fields(name, 1.0)).await.unwrap();
    }

    let names: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(names, vec!["Bolt", "Anchor", "Cable"]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_init_indexes_reports_existing_duplicate_names() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("index_over_duplicates");
    let db = mongo.database(&builder.database_name());

    db.collection::<Document>("items")
        .insert_many([
            doc! { "name": "Widget", "price": 1.0 },
            doc! { "name": "Widget", "price": 2.0 },
            doc! { "name": "Gadget", "price": 3.0 },
        ])
        .await
        .unwrap();

    let err = MongoItemRepository::new(&db)
        .init_indexes()
        .await
        .unwrap_err();
    match err {
        ItemError::Database(detail) => {
            assert!(detail.contains("(Widget)"), "unexpected detail: {detail}");
        }
        other => panic!("unexpected error: {other}"),
    }
}
