// tests/api_tests.rs

use blog_comments::{
    config::Config, models::user::CommentUser, routes, state::AppState,
    storage::InMemoryCommentStore, utils::jwt::sign_jwt,
};

const SECRET: &str = "test_secret_for_integration_tests";

/// Helper function to spawn the app on a random port for testing.
/// Uses the in-memory store seeded with users 42 and 43.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    // 1. Create the store and seed authors
    let store = InMemoryCommentStore::new();
    for (id, first_name) in [(42, "Ada"), (43, "Grace")] {
        store
            .insert_user(CommentUser {
                id,
                first_name: first_name.to_string(),
                last_name: "Tester".to_string(),
                email: format!("{}@example.com", first_name.to_lowercase()),
                profile_image_url: None,
            })
            .await;
    }

    // 2. Create test configuration and state
    let config = Config {
        database_url: "postgres://unused".to_string(),
        jwt_secret: SECRET.to_string(),
        rust_log: "error".to_string(),
        port: 0,
        database_max_connections: 1,
        log_dir: "logs".to_string(),
    };

    let state = AppState::new(store, config);

    // 3. Create the router with the app state
    let app = routes::create_router(state);

    // 4. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 5. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn token_for(user_id: i64) -> String {
    sign_jwt(user_id, "user", SECRET, 600).expect("Failed to sign token")
}

async fn create_comment(
    client: &reqwest::Client,
    address: &str,
    user_id: i64,
    post_id: i64,
    description: &str,
) -> serde_json::Value {
    let response = client
        .post(&format!("{}/comments", address))
        .bearer_auth(token_for(user_id))
        .json(&serde_json::json!({
            "description": description,
            "post_id": post_id
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 201);
    response.json().await.expect("Failed to parse comment json")
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn create_comment_as_authenticated_user() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: body tries to claim another author
    let response = client
        .post(&format!("{}/comments", address))
        .bearer_auth(token_for(42))
        .json(&serde_json::json!({
            "description": "nice post",
            "post_id": 5,
            "user_id": 43
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["id"], 1);
    assert_eq!(body["user_id"], 42);
    assert_eq!(body["post_id"], 5);
    assert_eq!(body["description"], "nice post");
    assert_eq!(body["user"]["email"], "ada@example.com");
}

#[tokio::test]
async fn create_comment_rejects_invalid_token() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .post(&format!("{}/comments", address))
        .bearer_auth("not-a-jwt")
        .json(&serde_json::json!({
            "description": "nice post",
            "post_id": 5
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn list_comments_paginates_and_counts() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    for i in 0..25 {
        create_comment(&client, &address, 42, 5, &format!("comment {}", i)).await;
    }
    create_comment(&client, &address, 43, 6, "elsewhere").await;

    // Act
    let body: serde_json::Value = client
        .get(&format!("{}/comments?post_id=5&page=2&limit=10", address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse list json");

    // Assert: second window of the newest-first ordering
    assert_eq!(body["count"], 25);
    let descriptions: Vec<&str> = body["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["description"].as_str().unwrap())
        .collect();
    let expected: Vec<String> = (5..15).rev().map(|i| format!("comment {}", i)).collect();
    assert_eq!(descriptions, expected);
}

#[tokio::test]
async fn list_comments_zero_filter_means_unfiltered() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    create_comment(&client, &address, 42, 5, "a").await;
    create_comment(&client, &address, 43, 6, "b").await;

    // Act
    let body: serde_json::Value = client
        .get(&format!("{}/comments?user_id=0&post_id=0", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert
    assert_eq!(body["count"], 2);
    assert_eq!(body["comments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn list_comments_rejects_bad_limit() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    for query in ["limit=ten", "limit=0", "page=0"] {
        let response = client
            .get(&format!("{}/comments?{}", address, query))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400, "query: {}", query);
    }
}

#[tokio::test]
async fn update_then_delete_flow() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let created = create_comment(&client, &address, 42, 5, "first draft").await;
    let id = created["id"].as_i64().unwrap();

    // 1. Update description
    let update_resp = client
        .put(&format!("{}/comments/{}", address, id))
        .json(&serde_json::json!({ "description": "final version" }))
        .send()
        .await
        .expect("Update failed");

    assert_eq!(update_resp.status().as_u16(), 200);
    let updated: serde_json::Value = update_resp.json().await.unwrap();
    assert_eq!(updated["description"], "final version");
    assert_eq!(updated["user_id"], created["user_id"]);
    assert_eq!(updated["post_id"], created["post_id"]);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert!(updated["updated_at"].is_string());

    // 2. Delete
    let delete_resp = client
        .delete(&format!("{}/comments/{}", address, id))
        .bearer_auth(token_for(42))
        .send()
        .await
        .expect("Delete failed");
    assert_eq!(delete_resp.status().as_u16(), 200);

    // 3. Delete again -> 404
    let again = client
        .delete(&format!("{}/comments/{}", address, id))
        .bearer_auth(token_for(42))
        .send()
        .await
        .expect("Delete failed");
    assert_eq!(again.status().as_u16(), 404);

    // 4. Listing is empty again
    let body: serde_json::Value = client
        .get(&format!("{}/comments", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["count"], 0);
    assert_eq!(body["comments"], serde_json::json!([]));
}

#[tokio::test]
async fn delete_with_non_numeric_id_is_bad_request() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .delete(&format!("{}/comments/abc", address))
        .bearer_auth(token_for(42))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let doc: serde_json::Value = client
        .get(&format!("{}/api-docs/openapi.json", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(doc["paths"]["/comments"].is_object());
    assert!(doc["paths"]["/comments/{id}"].is_object());
}
