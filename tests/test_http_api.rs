//! End-to-end HTTP test: start the router in-process on an ephemeral port and
//! drive the pet API with reqwest.

use pet_shelter::{transport, PetProvider};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn spawn_server() -> Result<(String, tokio::task::JoinHandle<()>), Box<dyn std::error::Error>> {
    let provider = PetProvider::connect("sqlite::memory:").await?;
    serve(provider).await
}

async fn serve(
    provider: PetProvider,
) -> Result<(String, tokio::task::JoinHandle<()>), Box<dyn std::error::Error>> {
    let router = transport::http::create_router(transport::http::AppState::new(provider));

    // Bind to an ephemeral port to avoid conflicts with a running API server.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Ok((format!("http://127.0.0.1:{}", port), handle))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_pet_crud_over_http() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, server) = spawn_server().await?;
    let client = reqwest::Client::new();

    let health = client.get(format!("{}/health", base_url)).send().await?;
    assert_eq!(health.status(), StatusCode::OK);

    // --- Insert ---
    let resp = client
        .post(format!("{}/api/pets", base_url))
        .json(&json!({ "name": "Rex", "breed": "Labrador", "gender": 1 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await?;
    assert_eq!(body["success"], json!(true));
    let id = body["data"]["id"].as_i64().expect("new id");
    assert_eq!(
        body["data"]["uri"],
        json!(format!("content://com.example.android.pets/pets/{}", id))
    );

    // --- Validation failure writes nothing ---
    let resp = client
        .post(format!("{}/api/pets", base_url))
        .json(&json!({ "name": "", "gender": 2 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert_eq!(body["success"], json!(false));

    let resp = client
        .post(format!("{}/api/pets", base_url))
        .json(&json!({ "name": "Odd", "gender": 7 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // --- Read back, weight defaulted ---
    let body: Value = client
        .get(format!("{}/api/pets/{}", base_url, id))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(
        body["data"],
        json!({ "id": id, "name": "Rex", "breed": "Labrador", "gender": 1, "weight": 0 })
    );

    let body: Value = client
        .get(format!("{}/api/pets?projection=id,name", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"], json!([{ "id": id, "name": "Rex" }]));

    let resp = client
        .get(format!("{}/api/pets?projection=colour", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // --- Update ---
    let resp = client
        .put(format!("{}/api/pets/{}", base_url, id))
        .json(&json!({ "weight": 31 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["data"]["rows_updated"], json!(1));

    let resp = client
        .put(format!("{}/api/pets/{}", base_url, id + 1000))
        .json(&json!({ "weight": 31 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // --- Empty update body ---
    let resp = client
        .put(format!("{}/api/pets/{}", base_url, id))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["data"]["rows_updated"], json!(0));

    let resp = client
        .put(format!("{}/api/pets/{}", base_url, id + 1000))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await?;
    assert_eq!(body["success"], json!(false));

    // --- Malformed item address ---
    let resp = client
        .get(format!("{}/api/pets/not-a-number", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // --- Delete one ---
    let resp = client
        .delete(format!("{}/api/pets/{}", base_url, id))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = client
        .get(format!("{}/api/pets/{}", base_url, id))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    server.abort();
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_delete_all_requires_confirmation() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, server) = spawn_server().await?;
    let client = reqwest::Client::new();

    for _ in 0..3 {
        let resp = client
            .post(format!("{}/api/pets/dummy", base_url))
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = client.delete(format!("{}/api/pets", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = client
        .delete(format!("{}/api/pets?confirm=true", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"]["rows_deleted"], json!(3));

    let body: Value = client
        .get(format!("{}/api/pets", base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"], json!([]));

    server.abort();
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_save_flow() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, server) = spawn_server().await?;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/pets/save", base_url))
        .json(&json!({ "draft": { "name": "Mia", "breed": "", "gender": 2, "weight": "" } }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await?;
    let uri = body["data"]["uri"].as_str().expect("uri").to_string();

    let resp = client
        .post(format!("{}/api/pets/save", base_url))
        .json(&json!({
            "uri": uri,
            "draft": { "name": "Mia", "breed": "Siamese", "gender": 2, "weight": "4" }
        }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{}/api/pets/save", base_url))
        .json(&json!({ "draft": { "name": "Mia", "gender": 2, "weight": "four" } }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .post(format!("{}/api/pets/save", base_url))
        .json(&json!({
            "uri": "content://com.example.android.pets/pets/9999",
            "draft": { "name": "Ghost", "gender": 1 }
        }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    server.abort();
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_execute_routes_by_uri() -> Result<(), Box<dyn std::error::Error>> {
    let (base_url, server) = spawn_server().await?;
    let client = reqwest::Client::new();
    let execute = format!("{}/api/execute", base_url);

    let resp = client
        .post(&execute)
        .json(&json!({
            "uri": "content://com.example.android.pets/pets",
            "action": "insert",
            "values": { "name": "Bo", "gender": 1, "weight": 5 }
        }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await?;
    let item_uri = body["data"]["uri"].as_str().expect("uri").to_string();

    // Insert is only valid at the collection address.
    let resp = client
        .post(&execute)
        .json(&json!({
            "uri": item_uri,
            "action": "insert",
            "values": { "name": "Bo", "gender": 1 }
        }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = client
        .post(&execute)
        .json(&json!({ "uri": item_uri, "action": "query", "projection": ["name", "weight"] }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"]["rows"], json!([{ "name": "Bo", "weight": 5 }]));

    let resp = client
        .post(&execute)
        .json(&json!({ "uri": "content://com.example.android.pets/dogs", "action": "query" }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = client
        .post(&execute)
        .json(&json!({ "uri": "content://com.example.android.pets/pets/424242", "action": "update", "values": { "weight": 1 } }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"]["rows_affected"], json!(0));

    let body: Value = client
        .post(&execute)
        .json(&json!({ "uri": "content://com.example.android.pets/pets", "action": "delete" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["data"]["rows_affected"], json!(1));

    server.abort();
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_storage_failures_return_500() -> Result<(), Box<dyn std::error::Error>> {
    let provider = PetProvider::connect("sqlite::memory:").await?;
    sqlx::query("DROP TABLE pets").execute(provider.pool()).await?;
    let (base_url, server) = serve(provider).await?;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/pets", base_url))
        .json(&json!({ "name": "Rex", "gender": 1 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await?;
    assert_eq!(body["success"], json!(false));

    let resp = client
        .put(format!("{}/api/pets/1", base_url))
        .json(&json!({ "weight": 3 }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let resp = client
        .delete(format!("{}/api/pets/1", base_url))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let resp = client.get(format!("{}/health", base_url)).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);

    server.abort();
    Ok(())
}
