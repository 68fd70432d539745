//! Integration tests for the contact HTTP API.

mod support;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use support::{all_servers, setup_memory_server, setup_test_server};

async fn create(server: &TestServer, body: Value) -> Value {
    let response = server.post("/api/contacts").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    response.json::<Value>()["data"].clone()
}

fn assert_error_envelope(body: &Value, message: &str) {
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], message);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_contact_lifecycle() {
    for (label, server, _temp) in all_servers() {
        let create_response = server
            .post("/api/contacts")
            .json(&json!({"name": "A", "phone": "1234567890"}))
            .await;
        assert_eq!(create_response.status_code(), StatusCode::CREATED, "{}", label);
        let body: Value = create_response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Contact created successfully");
        let contact = &body["data"];
        assert_eq!(contact["isFavorite"], false, "{}", label);
        assert_eq!(contact["tags"], json!([]), "{}", label);
        assert_eq!(contact["createdAt"], contact["updatedAt"], "{}", label);
        let id = contact["id"].as_str().expect("id").to_string();

        let get_response = server.get(&format!("/api/contacts/{}", id)).await;
        assert_eq!(get_response.status_code(), StatusCode::OK);
        let fetched: Value = get_response.json();
        assert_eq!(fetched["message"], "Contact retrieved successfully");
        assert_eq!(fetched["data"]["name"], "A");

        let update_response = server
            .put(&format!("/api/contacts/{}", id))
            .json(&json!({"isFavorite": true}))
            .await;
        assert_eq!(update_response.status_code(), StatusCode::OK);
        let updated: Value = update_response.json();
        assert_eq!(updated["message"], "Contact updated successfully");
        assert_eq!(updated["data"]["isFavorite"], true);
        assert_eq!(updated["data"]["name"], "A");
        assert_eq!(updated["data"]["phone"], "1234567890");
        assert_eq!(updated["data"]["createdAt"], contact["createdAt"]);

        let delete_response = server.delete(&format!("/api/contacts/{}", id)).await;
        assert_eq!(delete_response.status_code(), StatusCode::OK);
        let deleted: Value = delete_response.json();
        assert_eq!(deleted["success"], true);
        assert_eq!(deleted["message"], "Contact deleted successfully");
        assert!(deleted.get("data").is_none());

        let again = server.delete(&format!("/api/contacts/{}", id)).await;
        assert_eq!(again.status_code(), StatusCode::NOT_FOUND, "{}", label);
        assert_error_envelope(&again.json(), "Contact not found");

        let gone = server.get(&format!("/api/contacts/{}", id)).await;
        assert_eq!(gone.status_code(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_create_validation_errors() {
    let (server, _temp) = setup_memory_server();
    let cases = [
        (json!({"name": "A"}), "Name and phone are required"),
        (json!({"phone": "1234567890"}), "Name and phone are required"),
        (
            json!({"name": "A", "phone": "1234567890", "email": "not-an-email"}),
            "Invalid email format",
        ),
        (
            json!({"name": "A", "phone": "1234567890", "email": " x@y.com "}),
            "Invalid email format",
        ),
        (
            json!({"name": "A", "phone": "123"}),
            "Phone number must be at least 10 digits",
        ),
    ];

    for (body, message) in cases {
        let response = server.post("/api/contacts").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", body);
        assert_error_envelope(&response.json(), message);
    }

    let list: Value = server.get("/api/contacts").await.json();
    assert_eq!(list["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    for (label, server, _temp) in all_servers() {
        create(
            &server,
            json!({"name": "A", "phone": "1234567890", "email": "x@y.com"}),
        )
        .await;
        let response = server
            .post("/api/contacts")
            .json(&json!({"name": "B", "phone": "0987654321", "email": "x@y.com"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::CONFLICT, "{}", label);
        assert_error_envelope(&response.json(), "Email already exists");
    }
}

#[tokio::test]
async fn test_update_into_taken_email_conflicts() {
    let (server, _temp) = setup_test_server();
    create(
        &server,
        json!({"name": "A", "phone": "1234567890", "email": "a@b.co"}),
    )
    .await;
    let b = create(
        &server,
        json!({"name": "B", "phone": "1234567890", "email": "b@b.co"}),
    )
    .await;
    let id = b["id"].as_str().expect("id");

    let response = server
        .put(&format!("/api/contacts/{}", id))
        .json(&json!({"email": "a@b.co"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let response = server
        .put(&format!("/api/contacts/{}", id))
        .json(&json!({"phone": "12"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_error_envelope(&response.json(), "Phone number must be at least 10 digits");

    let missing = server
        .put("/api/contacts/does-not-exist")
        .json(&json!({"name": "Z"}))
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_pagination_returns_second_most_recent() {
    for (label, server, _temp) in all_servers() {
        let mut ids = Vec::new();
        for name in ["first", "second", "third"] {
            let contact = create(&server, json!({"name": name, "phone": "1234567890"})).await;
            ids.push(contact["id"].as_str().expect("id").to_string());
        }

        let response = server
            .get("/api/contacts")
            .add_query_param("page", 2)
            .add_query_param("limit", 1)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK, "{}", label);
        let body: Value = response.json();
        assert_eq!(body["message"], "Contacts retrieved successfully");
        let data = body["data"].as_array().expect("data array");
        assert_eq!(data.len(), 1, "{}", label);
        assert_eq!(data[0]["id"], ids[1].as_str(), "{}", label);
        assert_eq!(
            body["pagination"],
            json!({"page": 2, "limit": 1, "total": 3, "totalPages": 3}),
            "{}",
            label
        );

        let past_end: Value = server
            .get("/api/contacts")
            .add_query_param("page", 9)
            .add_query_param("limit", 1)
            .await
            .json();
        assert_eq!(past_end["data"], json!([]));
        assert_eq!(past_end["pagination"]["total"], 3);
    }
}

#[tokio::test]
async fn test_list_filters_and_sorting() {
    let (server, _temp) = setup_test_server();
    create(
        &server,
        json!({"name": "Alice", "phone": "1234567890", "email": "alice@work.io", "tags": ["work"], "isFavorite": true}),
    )
    .await;
    create(
        &server,
        json!({"name": "Bob", "phone": "5551234567", "tags": ["family"]}),
    )
    .await;
    create(
        &server,
        json!({"name": "Carol", "phone": "5559876543", "tags": ["coworker"], "isFavorite": true}),
    )
    .await;

    let names = |body: Value| -> Vec<String> {
        body["data"]
            .as_array()
            .expect("data array")
            .iter()
            .map(|c| c["name"].as_str().expect("name").to_string())
            .collect()
    };

    let search: Value = server
        .get("/api/contacts")
        .add_query_param("search", "WORK")
        .await
        .json();
    assert_eq!(names(search), vec!["Alice"]);

    let by_phone: Value = server
        .get("/api/contacts")
        .add_query_param("search", "555")
        .add_query_param("sortBy", "name")
        .add_query_param("sortOrder", "asc")
        .await
        .json();
    assert_eq!(names(by_phone), vec!["Bob", "Carol"]);

    // Tag matching is a substring match over the stored tag list.
    let tagged: Value = server
        .get("/api/contacts")
        .add_query_param("tag", "work")
        .add_query_param("sortBy", "name")
        .add_query_param("sortOrder", "asc")
        .await
        .json();
    assert_eq!(names(tagged), vec!["Alice", "Carol"]);

    let favorites: Value = server
        .get("/api/contacts")
        .add_query_param("isFavorite", "true")
        .add_query_param("sortBy", "name")
        .add_query_param("sortOrder", "desc")
        .await
        .json();
    assert_eq!(names(favorites), vec!["Carol", "Alice"]);

    let not_favorites: Value = server
        .get("/api/contacts")
        .add_query_param("isFavorite", "false")
        .await
        .json();
    assert_eq!(names(not_favorites), vec!["Bob"]);
}

#[tokio::test]
async fn test_list_rejects_bad_query_parameters() {
    let (server, _temp) = setup_memory_server();
    let cases = [
        ("sortBy", "password; DROP TABLE contacts"),
        ("sortOrder", "sideways"),
        ("isFavorite", "maybe"),
        ("page", "two"),
    ];
    for (key, value) in cases {
        let response = server
            .get("/api/contacts")
            .add_query_param(key, value)
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}={}", key, value);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    let clamped: Value = server
        .get("/api/contacts")
        .add_query_param("page", 0)
        .add_query_param("limit", 100000)
        .await
        .json();
    assert_eq!(clamped["pagination"]["page"], 1);
    assert_eq!(clamped["pagination"]["limit"], 100000);
}

#[tokio::test]
async fn test_large_limit_returns_single_page() {
    let (server, _temp) = setup_memory_server();
    for i in 0..120 {
        create(
            &server,
            json!({"name": format!("Person {}", i), "phone": "1234567890"}),
        )
        .await;
    }

    let body: Value = server
        .get("/api/contacts")
        .add_query_param("limit", 150)
        .await
        .json();
    assert_eq!(body["data"].as_array().expect("data array").len(), 120);
    assert_eq!(
        body["pagination"],
        json!({"page": 1, "limit": 150, "total": 120, "totalPages": 1})
    );
}

#[tokio::test]
async fn test_configured_max_page_limit_caps_limit() {
    let temp_dir = tempfile::TempDir::new().expect("temp dir");
    let mut config = support::test_config(
        &temp_dir.path().join("db"),
        contactbook_server::StorageBackend::Memory,
    );
    config.max_page_limit = Some(5);
    let server = support::test_server_for_config(config);
    for i in 0..7 {
        create(
            &server,
            json!({"name": format!("Person {}", i), "phone": "1234567890"}),
        )
        .await;
    }

    let body: Value = server
        .get("/api/contacts")
        .add_query_param("limit", 50)
        .await
        .json();
    assert_eq!(body["data"].as_array().expect("data array").len(), 5);
    assert_eq!(body["pagination"]["limit"], 5);
    assert_eq!(body["pagination"]["totalPages"], 2);
}

#[tokio::test]
async fn test_malformed_json_returns_envelope() {
    let (server, _temp) = setup_memory_server();
    let response = server
        .post("/api/contacts")
        .bytes(Bytes::from_static(b"{\"name\": "))
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .expect("message")
        .starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_unknown_route_and_health() {
    let (server, _temp) = setup_memory_server();

    let missing = server.get("/api/nothing-here").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert_error_envelope(&missing.json(), "Route not found");

    let health = server.get("/health").await;
    assert_eq!(health.status_code(), StatusCode::OK);
    assert_eq!(
        health.json::<Value>(),
        json!({"status": "OK", "message": "Contact Management API is running"})
    );
    health.assert_header("x-content-type-options", "nosniff");
}

#[tokio::test]
async fn test_contacts_persist_across_app_instances() {
    let temp_dir = tempfile::TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let id = {
        let server = support::test_server_for_config(support::test_config(
            &db_path,
            contactbook_server::StorageBackend::Redb,
        ));
        let contact = create(&server, json!({"name": "Kept", "phone": "1234567890"})).await;
        contact["id"].as_str().expect("id").to_string()
    };

    let server = support::test_server_for_config(support::test_config(
        &db_path,
        contactbook_server::StorageBackend::Redb,
    ));
    let response = server.get(&format!("/api/contacts/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["data"]["name"], "Kept");
}

#[tokio::test]
async fn test_static_dir_serves_files_behind_api_routes() {
    let temp_dir = tempfile::TempDir::new().expect("temp dir");
    let public = temp_dir.path().join("public");
    std::fs::create_dir_all(&public).expect("public dir");
    std::fs::write(public.join("index.html"), "<h1>Contacts</h1>").expect("index");
    std::fs::write(public.join("app.js"), "console.log('contacts');").expect("script");

    let mut config = support::test_config(
        &temp_dir.path().join("db"),
        contactbook_server::StorageBackend::Memory,
    );
    config.static_dir = Some(public.to_str().expect("public path").to_string());
    let server = support::test_server_for_config(config);

    let index = server.get("/").await;
    assert_eq!(index.status_code(), StatusCode::OK);
    assert_eq!(index.text(), "<h1>Contacts</h1>");

    let script = server.get("/app.js").await;
    assert_eq!(script.status_code(), StatusCode::OK);
    assert_eq!(script.text(), "console.log('contacts');");

    let api: Value = server.get("/api/contacts").await.json();
    assert_eq!(api["success"], true);

    let missing = server.get("/missing.css").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert_error_envelope(&missing.json(), "Route not found");

    let wrong_method = server.post("/app.js").await;
    assert_eq!(wrong_method.status_code(), StatusCode::NOT_FOUND);
    assert_error_envelope(&wrong_method.json(), "Route not found");
}
