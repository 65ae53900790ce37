//! MongoDB-backed note lookups. Requires Docker: `cargo test -- --ignored`

use domain_notes::{MongoNoteRepository, Note, NoteRepository};
use test_utils::{TestDataBuilder, TestMongo, assertions::assert_some};

#[tokio::test]
#[ignore] // Requires Docker
async fn test_find_by_user_after_insert() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("test_find_by_user_after_insert");
    let repo = MongoNoteRepository::new(mongo.database(&builder.name("db", "notes")));
    repo.create_indexes().await.unwrap();

    let owner = builder.object_id();
    let note = Note::new(owner, "Service HVAC", "Unit 3");
    repo.insert(&note).await.unwrap();

    let found = assert_some(repo.find_by_user(owner).await.unwrap(), "owner's note");
    assert_eq!(found.id, note.id);
    assert_eq!(found.title, "Service HVAC");

    let none = repo
        .find_by_user(mongodb::bson::oid::ObjectId::new())
        .await
        .unwrap();
    assert!(none.is_none());
}
