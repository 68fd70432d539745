//! Shared integration-test server bootstrap helpers.

use axum_test::TestServer;
use contactbook_server::{create_app, db::open_store, AppState, Config, StorageBackend};
use std::path::Path;
use tempfile::TempDir;

pub(crate) fn test_config(db_path: &Path, storage: StorageBackend) -> Config {
    Config {
        port: 0,
        db_path: db_path.to_str().expect("db path").to_string(),
        storage,
        max_body_size: 64 * 1024,
        max_page_limit: None,
        static_dir: None,
    }
}

pub(crate) fn test_server_for_config(config: Config) -> TestServer {
    let store = open_store(&config).expect("open store");
    let app = create_app(AppState::new(config, store), false);
    TestServer::new(app).expect("server")
}

pub(crate) fn setup_test_server() -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let config = test_config(&temp_dir.path().join("db"), StorageBackend::Redb);
    (test_server_for_config(config), temp_dir)
}

pub(crate) fn setup_memory_server() -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let config = test_config(&temp_dir.path().join("db"), StorageBackend::Memory);
    (test_server_for_config(config), temp_dir)
}

/// Both backends, labelled for assertion messages.
pub(crate) fn all_servers() -> Vec<(&'static str, TestServer, TempDir)> {
    let (redb, redb_dir) = setup_test_server();
    let (memory, memory_dir) = setup_memory_server();
    vec![("redb", redb, redb_dir), ("memory", memory, memory_dir)]
}
