use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use users_etl::server::{users_router, ServerState};
use users_etl::LocalStorage;

async fn spawn_server(data_dir: &str) -> String {
    let storage = LocalStorage::new(data_dir.to_string());
    let state = Arc::new(ServerState::new(storage, "users.csv".to_string()));
    let router = users_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_get_users_returns_reinflated_records() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().to_str().unwrap();
    std::fs::write(
        temp_dir.path().join("users.csv"),
        "id,name,address,company\n\
         1,Leanne Graham,\"{\"\"street\"\":\"\"Kulas Light\"\",\"\"city\"\":\"\"Gwenborough\"\"}\",\"{\"\"name\"\":\"\"Romaguera-Crona\"\"}\"\n\
         2,\"Howell, Ervin\",,",
    )
    .unwrap();

    let base = spawn_server(data_dir).await;
    let response = reqwest::get(format!("{}/api/users", base)).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);

    // Serving profile: numeric ids, structured columns back as objects.
    assert_eq!(users[0]["id"], json!(1));
    assert_eq!(users[0]["address"]["city"], json!("Gwenborough"));
    assert_eq!(users[0]["company"], json!({"name": "Romaguera-Crona"}));
    assert_eq!(users[1]["name"], json!("Howell, Ervin"));
    assert_eq!(users[1]["address"], json!(""));
}

#[tokio::test]
async fn test_get_users_missing_file_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let base = spawn_server(temp_dir.path().to_str().unwrap()).await;

    let response = reqwest::get(format!("{}/api/users", base)).await.unwrap();
    assert_eq!(response.status(), 404);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("No data yet"));
}

#[tokio::test]
async fn test_header_only_file_serves_empty_array() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("users.csv"), "id,name").unwrap();
    let base = spawn_server(temp_dir.path().to_str().unwrap()).await;

    let response = reqwest::get(format!("{}/api/users", base)).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_other_methods_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("users.csv"), "id,name\n1,Jane").unwrap();
    let base = spawn_server(temp_dir.path().to_str().unwrap()).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/api/users", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 405);
}

#[tokio::test]
async fn test_non_utf8_file_is_a_server_error() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("users.csv"), [0xff, 0xfe, 0x00, 0x41]).unwrap();
    let base = spawn_server(temp_dir.path().to_str().unwrap()).await;

    let response = reqwest::get(format!("{}/api/users", base)).await.unwrap();
    assert_eq!(response.status(), 500);
}
