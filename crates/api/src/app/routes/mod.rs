use axum::Router;

pub mod system;
pub mod todo;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new().nest("/todo", todo::router())
}
