use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::Extension,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use todolist_core::TodoId;
use todolist_infra::ErrorCodePolicy;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE";

pub fn router() -> Router {
    Router::new().route(
        "/",
        get(list_todos)
            .post(create_todo)
            .put(update_todo)
            .delete(delete_todo)
            // GET would otherwise answer HEAD implicitly.
            .head(method_not_allowed)
            .fallback(method_not_allowed),
    )
}

pub async fn list_todos(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(policy): Extension<ErrorCodePolicy>,
) -> axum::response::Response {
    match services.list_todos().await {
        Ok(todos) => Json(todos).into_response(),
        Err(e) => errors::repository_error_to_response(e, policy),
    }
}

pub async fn create_todo(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(policy): Extension<ErrorCodePolicy>,
    body: Bytes,
) -> axum::response::Response {
    let req: dto::CreateTodoRequest = match dto::parse_body(&body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    let Some(title) = dto::required(req.title) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "Title is required");
    };
    let description = req.description.unwrap_or_default();

    match services.create_todo(&title, &description).await {
        Ok(todo) => (StatusCode::CREATED, Json(todo)).into_response(),
        Err(e) => errors::repository_error_to_response(e, policy),
    }
}

pub async fn update_todo(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(policy): Extension<ErrorCodePolicy>,
    body: Bytes,
) -> axum::response::Response {
    let req: dto::UpdateTodoRequest = match dto::parse_body(&body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    let (Some(id), Some(title), Some(completed)) =
        (dto::required(req.id), dto::required(req.title), req.completed)
    else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "ID, title, and completed status are required",
        );
    };
    let id = match TodoId::try_from(id) {
        Ok(id) => id,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string()),
    };
    let description = req.description.unwrap_or_default();

    match services
        .update_todo(&id, &title, &description, completed)
        .await
    {
        Ok(todo) => Json(todo).into_response(),
        Err(e) => errors::repository_error_to_response(e, policy),
    }
}

pub async fn delete_todo(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(policy): Extension<ErrorCodePolicy>,
    body: Bytes,
) -> axum::response::Response {
    let req: dto::DeleteTodoRequest = match dto::parse_body(&body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    let Some(id) = dto::required(req.id) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "ID is required");
    };
    let id = match TodoId::try_from(id) {
        Ok(id) => id,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string()),
    };

    match services.delete_todo(&id).await {
        Ok(()) => Json(dto::deleted_todo_ack(id)).into_response(),
        Err(e) => errors::repository_error_to_response(e, policy),
    }
}

pub async fn method_not_allowed() -> axum::response::Response {
    let mut resp = errors::json_error(
        StatusCode::METHOD_NOT_ALLOWED,
        "method_not_allowed",
        "Method not allowed",
    );
    resp.headers_mut()
        .insert(header::ALLOW, header::HeaderValue::from_static(ALLOWED_METHODS));
    resp
}
