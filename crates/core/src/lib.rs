//! `todolist-core`: domain foundation for the to-do list.
//!
//! This crate contains **pure domain** types (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod todo;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::TodoId;
pub use todo::{format_timestamp, Title, Todo};
pub use value_object::ValueObject;
