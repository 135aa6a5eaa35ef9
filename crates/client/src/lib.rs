//! `todolist-client`
//!
//! **Responsibility:** Client-side view of the to-do list.
//!
//! This crate provides:
//! - An HTTP transport for `/api/todo`
//! - Confirm-then-apply state transitions (the server stays the authority)
//! - Pure presentation helpers (search filter, checklist lines, dates)

pub mod controller;
pub mod error;
pub mod state;
pub mod transport;
pub mod view;

pub use controller::TodoController;
pub use error::ClientError;
pub use state::{Notification, NotificationLevel, TodoListState};
pub use transport::{HttpTransport, TodoTransport};
