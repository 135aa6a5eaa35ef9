use todolist_core::TodoId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Todo with the same title already exists")]
    DuplicateTitle,
    #[error("parse error: {0}")]
    Parse(String),
    #[error("todo {0} is not in the local list")]
    UnknownTodo(TodoId),
}
