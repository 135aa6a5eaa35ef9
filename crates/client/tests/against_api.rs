use todolist_api::app::{build_app, AppServices};
use todolist_client::{ClientError, HttpTransport, TodoController};
use todolist_infra::ErrorCodePolicy;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(policy: ErrorCodePolicy) -> Self {
        let app = build_app(AppServices::in_memory(), policy);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn controller_round_trip_against_live_server() {
    let srv = TestServer::spawn(ErrorCodePolicy::Strict).await;
    let transport = HttpTransport::new(srv.base_url.clone());
    assert!(transport.check_connectivity().await);
    let mut ctl = TodoController::new(transport);

    ctl.load().await.unwrap();
    assert!(ctl.state().todos.is_empty());

    let milk = ctl.add_todo("Buy milk", "2 litres\noat").await.unwrap();
    ctl.add_todo("Walk dog", "").await.unwrap();
    assert_eq!(
        ctl.add_todo("Buy milk", "").await.unwrap_err(),
        ClientError::DuplicateTitle
    );

    let toggled = ctl.toggle_complete(&milk.id).await.unwrap();
    assert!(toggled.completed);
    assert_eq!(toggled.created_at, milk.created_at);

    ctl.delete_todo(&milk.id).await.unwrap();

    let mut fresh = TodoController::new(HttpTransport::new(srv.base_url.clone()));
    fresh.load().await.unwrap();
    assert_eq!(fresh.state().todos, ctl.state().todos);
    assert_eq!(fresh.state().todos.len(), 1);
    assert_eq!(fresh.state().todos[0].title, "Walk dog");
}

#[tokio::test]
async fn legacy_server_duplicates_still_surface_as_duplicate_title() {
    let srv = TestServer::spawn(ErrorCodePolicy::Legacy).await;
    let mut ctl = TodoController::new(HttpTransport::new(srv.base_url.clone()));

    ctl.add_todo("A", "").await.unwrap();
    assert_eq!(
        ctl.add_todo("A", "").await.unwrap_err(),
        ClientError::DuplicateTitle
    );
    assert_eq!(ctl.state().todos.len(), 1);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut ctl = TodoController::new(HttpTransport::new(format!("http://{addr}")));
    assert!(matches!(ctl.load().await, Err(ClientError::Network(_))));
    assert_eq!(ctl.state().error.as_deref(), Some("Failed to fetch todos"));
}
