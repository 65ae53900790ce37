//! Handler tests for the Users domain
//!
//! Drive the users router over in-memory stores and check status codes,
//! messages and what ends up persisted.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_notes::{InMemoryNoteRepository, Note};
use domain_users::*;
use http_body_util::BodyExt;
use ::mongodb::bson::oid::ObjectId;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()
use utoipa::OpenApi;

struct TestApp {
    router: Router,
    users: InMemoryUserRepository,
    notes: InMemoryNoteRepository,
    hasher: PasswordHasher,
}

impl TestApp {
    fn new() -> Self {
        let users = InMemoryUserRepository::new();
        let notes = InMemoryNoteRepository::new();
        let hasher = PasswordHasher::new(PasswordConfig {
            work_factor: 1,
            memory_kib: 64,
        })
        .unwrap();

        let service = UserService::new(users.clone(), notes.clone()).with_hasher(hasher.clone());

        Self {
            router: handlers::router(service),
            users,
            notes,
            hasher,
        }
    }

    async fn send(&self, method: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri("/");
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn send_raw(&self, method: &str, body: &str) -> StatusCode {
        let request = Request::builder()
            .method(method)
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap().status()
    }

    async fn create(&self, username: &str, password: &str, roles: Value) -> (StatusCode, Value) {
        self.send(
            "POST",
            Some(json!({ "username": username, "password": password, "roles": roles })),
        )
        .await
    }

    async fn stored(&self, username: &str) -> User {
        self.users
            .get_by_username(username)
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("{} should be stored", username))
    }
}

// Scenario 1
#[tokio::test]
async fn test_create_user_then_list() {
    let app = TestApp::new();

    let (status, body) = app.create("alice", "secret123", json!(["Employee"])).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "USER CREATED SUCCESSFULLY alice");

    let (status, body) = app.send("GET", None).await;
    assert_eq!(status, StatusCode::OK);

    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "alice");
    assert_eq!(users[0]["roles"], json!(["Employee"]));
    assert_eq!(users[0]["active"], true);
    assert!(users[0].get("password").is_none());
}

// Scenario 2 / P1
#[tokio::test]
async fn test_create_duplicate_username_is_conflict() {
    let app = TestApp::new();
    app.create("alice", "secret123", json!(["Employee"])).await;

    let (status, body) = app.create("alice", "other", json!(["Employee"])).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "user already exists");
    assert_eq!(app.users.list().await.unwrap().len(), 1);
}

// Scenario 3
#[tokio::test]
async fn test_update_without_password_keeps_hash() {
    let app = TestApp::new();
    app.create("alice", "secret123", json!(["Employee"])).await;
    let before = app.stored("alice").await;

    let (status, body) = app
        .send(
            "PATCH",
            Some(json!({
                "id": before.id.to_hex(),
                "username": "alice2",
                "roles": ["Employee", "Admin"],
                "active": false
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "alice2 is now updated");

    let after = app.stored("alice2").await;
    assert_eq!(after.id, before.id);
    assert_eq!(after.password, before.password);
    assert_eq!(after.roles, vec![Role::Employee, Role::Admin]);
    assert!(!after.active);
}

// Scenarios 4 and 5 / P5
#[tokio::test]
async fn test_delete_guarded_by_note_then_succeeds() {
    let app = TestApp::new();
    app.create("alice2", "secret123", json!(["Employee"])).await;
    let user = app.stored("alice2").await;

    let note = Note::new(user.id, "Restock", "Aisle 4");
    app.notes.insert(note.clone()).await;

    let (status, body) = app
        .send("DELETE", Some(json!({ "id": user.id.to_hex() })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User has assigned note");
    assert!(app.users.get_by_id(user.id).await.unwrap().is_some());

    app.notes.remove(note.id).await;

    let (status, body) = app
        .send("DELETE", Some(json!({ "id": user.id.to_hex() })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice2");
    assert_eq!(body["id"], user.id.to_hex());
    assert_eq!(
        body["message"],
        format!(
            "Username alice2 With ID {} was successfully deleted",
            user.id.to_hex()
        )
    );
    assert!(app.users.get_by_id(user.id).await.unwrap().is_none());
}

// Scenario 6
#[tokio::test]
async fn test_list_empty_directory() {
    let app = TestApp::new();

    let (status, body) = app.send("GET", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No users found");
}

// P2
#[tokio::test]
async fn test_password_is_never_stored_in_plaintext() {
    let app = TestApp::new();
    app.create("alice", "secret123", json!(["Employee"])).await;
    let created = app.stored("alice").await;

    assert_ne!(created.password, "secret123");
    assert!(app.hasher.verify("secret123", &created.password));

    app.send(
        "PATCH",
        Some(json!({
            "id": created.id.to_hex(),
            "username": "alice",
            "roles": ["Employee"],
            "active": true,
            "password": "rotated!"
        })),
    )
    .await;

    let updated = app.stored("alice").await;
    assert_ne!(updated.password, "rotated!");
    assert_ne!(updated.password, created.password);
    assert!(app.hasher.verify("rotated!", &updated.password));
}

// P3
#[tokio::test]
async fn test_list_is_repeatable() {
    let app = TestApp::new();
    app.create("alice", "pw", json!(["Employee"])).await;
    app.create("bob", "pw", json!(["Manager"])).await;

    let sorted = |body: Value| {
        let mut names: Vec<String> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["id"].as_str().unwrap().to_string())
            .collect();
        names.sort();
        names
    };

    let (_, first) = app.send("GET", None).await;
    let (_, second) = app.send("GET", None).await;
    assert_eq!(sorted(first), sorted(second));
}

// P4
#[tokio::test]
async fn test_update_to_own_username_is_allowed() {
    let app = TestApp::new();
    app.create("alice", "pw", json!(["Employee"])).await;
    let user = app.stored("alice").await;

    let (status, _) = app
        .send(
            "PATCH",
            Some(json!({
                "id": user.id.to_hex(),
                "username": "alice",
                "roles": ["Manager"],
                "active": true
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_to_taken_username_is_conflict() {
    let app = TestApp::new();
    app.create("alice", "pw", json!(["Employee"])).await;
    app.create("bob", "pw", json!(["Employee"])).await;
    let bob = app.stored("bob").await;

    let (status, body) = app
        .send(
            "PATCH",
            Some(json!({
                "id": bob.id.to_hex(),
                "username": "alice",
                "roles": ["Employee"],
                "active": true
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "user already exists");
    assert_eq!(app.stored("bob").await.username, "bob");
}

// P6
#[tokio::test]
async fn test_empty_roles_rejected() {
    let app = TestApp::new();

    let (status, _) = app.create("alice", "pw", json!([])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.users.list().await.unwrap().is_empty());

    app.create("bob", "pw", json!(["Employee"])).await;
    let bob = app.stored("bob").await;

    let (status, _) = app
        .send(
            "PATCH",
            Some(json!({
                "id": bob.id.to_hex(),
                "username": "bob",
                "roles": [],
                "active": true
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.stored("bob").await.roles, vec![Role::Employee]);
}

#[tokio::test]
async fn test_create_missing_fields_rejected() {
    let app = TestApp::new();

    let (status, body) = app
        .send("POST", Some(json!({ "username": "alice", "roles": ["Employee"] })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["password"].is_array());
}

#[tokio::test]
async fn test_update_non_boolean_active_rejected() {
    let app = TestApp::new();
    app.create("alice", "pw", json!(["Employee"])).await;
    let user = app.stored("alice").await;

    let (status, _) = app
        .send(
            "PATCH",
            Some(json!({
                "id": user.id.to_hex(),
                "username": "alice",
                "roles": ["Employee"],
                "active": "yes"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.stored("alice").await.active);
}

#[tokio::test]
async fn test_update_unknown_user_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            "PATCH",
            Some(json!({
                "id": ObjectId::new().to_hex(),
                "username": "ghost",
                "roles": ["Employee"],
                "active": true
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_delete_without_id_rejected() {
    let app = TestApp::new();

    let (status, _) = app.send("DELETE", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_requests_without_body_rejected() {
    let app = TestApp::new();
    app.create("alice", "pw", json!(["Employee"])).await;

    for method in ["POST", "PATCH", "DELETE"] {
        let (status, body) = app.send(method, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} without body");
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }
    assert!(app.users.get_by_username("alice").await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_unknown_user_is_not_found() {
    let app = TestApp::new();

    let (status, _) = app
        .send("DELETE", Some(json!({ "id": ObjectId::new().to_hex() })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_rejected() {
    let app = TestApp::new();

    let (status, body) = app
        .send("DELETE", Some(json!({ "id": "12345" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_ID");
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let app = TestApp::new();

    assert_eq!(
        app.send_raw("POST", r#"{"username": "alice""#).await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_unknown_role_rejected() {
    let app = TestApp::new();

    let (status, _) = app.create("alice", "pw", json!(["Owner"])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test]
fn test_openapi_documents_bad_request_responses() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
    let operations = doc["paths"]
        .as_object()
        .and_then(|paths| paths.values().next())
        .cloned()
        .unwrap();

    for method in ["get", "post", "patch", "delete"] {
        let reference = operations[method]["responses"]["400"]["$ref"]
            .as_str()
            .unwrap_or_default();
        assert!(
            reference.ends_with("BadRequestValidationResponse"),
            "{method} 400 response: {reference}"
        );
    }
}
