//! Smoke test that the root facade exposes a working router.

use axum_test::TestServer;
use contactbook::{create_app, db::MemoryContactDb, AppState, Config, StorageBackend};
use serde_json::{json, Value};
use std::sync::Arc;

#[tokio::test]
async fn facade_serves_create_and_list() {
    let config = Config {
        db_path: String::from("unused"),
        port: 0,
        storage: StorageBackend::Memory,
        max_body_size: 64 * 1024,
        max_page_limit: None,
        static_dir: None,
    };
    let state = AppState::new(config, Arc::new(MemoryContactDb::default()));
    let server = TestServer::new(create_app(state, false)).expect("server");

    let created = server
        .post("/api/contacts")
        .json(&json!({"name": "Facade", "phone": "1234567890", "tags": ["root"]}))
        .await;
    assert_eq!(created.status_code().as_u16(), 201);

    let list: Value = server.get("/api/contacts").await.json();
    assert_eq!(list["success"], true);
    assert_eq!(list["data"][0]["name"], "Facade");
    assert_eq!(list["data"][0]["tags"], json!(["root"]));
    assert_eq!(list["pagination"]["totalPages"], 1);
}
