use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use todolist_api::app::{build_app, AppServices};
use todolist_infra::{ErrorCodePolicy, InMemoryItemStore};

struct TestServer {
    base_url: String,
    store: Arc<InMemoryItemStore>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(policy: ErrorCodePolicy) -> Self {
        // Same router as prod, but on an ephemeral port over a store we can inspect.
        let store = Arc::new(InMemoryItemStore::new());
        let app = build_app(AppServices::with_in_memory_store(store.clone()), policy);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            store,
            handle,
        }
    }

    fn todo_url(&self) -> String {
        format!("{}/api/todo", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create(client: &reqwest::Client, srv: &TestServer, title: &str) -> serde_json::Value {
    let res = client
        .post(srv.todo_url())
        .json(&json!({ "title": title, "description": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn(ErrorCodePolicy::Strict).await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_then_duplicate_is_conflict() {
    let srv = TestServer::spawn(ErrorCodePolicy::Strict).await;
    let client = reqwest::Client::new();

    let created = create(&client, &srv, "Buy milk").await;
    assert_eq!(created["title"], "Buy milk");
    assert_eq!(created["completed"], false);
    assert!(!created["id"].as_str().unwrap().is_empty());
    assert!(created["createdAt"].as_str().unwrap().ends_with('Z'));

    let res = client
        .post(srv.todo_url())
        .json(&json!({ "title": "Buy milk", "description": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "A todo with the same title already exists.");
    assert_eq!(srv.store.len(), 1);
}

#[tokio::test]
async fn legacy_policy_reports_duplicates_as_server_error() {
    let srv = TestServer::spawn(ErrorCodePolicy::Legacy).await;
    let client = reqwest::Client::new();

    create(&client, &srv, "Buy milk").await;
    let res = client
        .post(srv.todo_url())
        .json(&json!({ "title": "Buy milk" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "A todo with the same title already exists.");
}

#[tokio::test]
async fn update_keeping_own_title_succeeds() {
    let srv = TestServer::spawn(ErrorCodePolicy::Strict).await;
    let client = reqwest::Client::new();

    let a = create(&client, &srv, "A").await;
    let res = client
        .put(srv.todo_url())
        .json(&json!({
            "id": a["id"],
            "title": "A",
            "description": "updated",
            "completed": true,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["id"], a["id"]);
    assert_eq!(body["title"], "A");
    assert_eq!(body["completed"], true);
    assert_eq!(body["createdAt"], a["createdAt"]);
}

#[tokio::test]
async fn update_onto_another_title_is_conflict() {
    let srv = TestServer::spawn(ErrorCodePolicy::Strict).await;
    let client = reqwest::Client::new();

    create(&client, &srv, "A").await;
    let b = create(&client, &srv, "B").await;
    let res = client
        .put(srv.todo_url())
        .json(&json!({ "id": b["id"], "title": "A", "completed": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn update_missing_completed_is_rejected_without_mutation() {
    let srv = TestServer::spawn(ErrorCodePolicy::Strict).await;
    let client = reqwest::Client::new();

    let a = create(&client, &srv, "A").await;
    let res = client
        .put(srv.todo_url())
        .json(&json!({ "id": a["id"], "title": "renamed", "description": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let list: serde_json::Value = client
        .get(srv.todo_url())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list[0]["title"], "A");
    assert_eq!(list[0]["description"], "");
}

#[tokio::test]
async fn delete_unknown_id_succeeds() {
    let srv = TestServer::spawn(ErrorCodePolicy::Strict).await;
    let client = reqwest::Client::new();

    let kept = create(&client, &srv, "keep me").await;
    let res = client
        .delete(srv.todo_url())
        .json(&json!({ "id": "does-not-exist" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["id"], "does-not-exist");

    let list: serde_json::Value = client
        .get(srv.todo_url())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], kept["id"]);
}

#[tokio::test]
async fn list_preserves_insertion_order() {
    let srv = TestServer::spawn(ErrorCodePolicy::Strict).await;
    let client = reqwest::Client::new();

    for title in ["first", "second", "third"] {
        create(&client, &srv, title).await;
    }
    let list: Vec<serde_json::Value> = client
        .get(srv.todo_url())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let titles: Vec<_> = list.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["first", "second", "third"]);
}

#[tokio::test]
async fn unsupported_verb_is_405_with_allow_header() {
    let srv = TestServer::spawn(ErrorCodePolicy::Strict).await;
    let client = reqwest::Client::new();

    for method in [reqwest::Method::PATCH, reqwest::Method::HEAD, reqwest::Method::OPTIONS] {
        let res = client
            .request(method.clone(), srv.todo_url())
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_eq!(res.headers()["allow"], "GET, POST, PUT, DELETE", "{method}");
    }
}
