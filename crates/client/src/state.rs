//! Local copy of the list, changed only after the server confirms.

use todolist_core::{Entity, Todo, TodoId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A user-visible message queued for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoListState {
    pub todos: Vec<Todo>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub notifications: Vec<Notification>,
}

impl TodoListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
    }

    pub fn append(&mut self, todo: Todo) {
        self.todos.push(todo);
    }

    /// Replace the item with `id` by `todo`. Returns whether anything matched.
    pub fn replace_by_id(&mut self, id: &TodoId, todo: Todo) -> bool {
        match self.todos.iter_mut().find(|t| t.id() == id) {
            Some(slot) => {
                *slot = todo;
                true
            }
            None => false,
        }
    }

    /// Drop every item with `id`. Returns whether anything was removed.
    pub fn remove_by_id(&mut self, id: &TodoId) -> bool {
        let before = self.todos.len();
        self.todos.retain(|t| t.id() != id);
        self.todos.len() != before
    }

    pub fn find(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id() == id)
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification {
            level,
            message: message.into(),
        });
    }

    /// Hand queued notifications to the display layer.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: &str, title: &str) -> Todo {
        Todo {
            id: id.parse().unwrap(),
            title: title.to_string(),
            description: String::new(),
            completed: false,
            created_at: "2026-10-19T08:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn append_keeps_existing_order() {
        let mut state = TodoListState::new();
        state.replace_all(vec![todo("1", "a"), todo("2", "b")]);
        state.append(todo("3", "c"));

        let ids: Vec<_> = state.todos.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn replace_by_id_swaps_in_place() {
        let mut state = TodoListState::new();
        state.replace_all(vec![todo("1", "a"), todo("2", "b")]);

        let mut updated = todo("2", "b");
        updated.completed = true;
        assert!(state.replace_by_id(&"2".parse().unwrap(), updated));
        assert!(state.todos[1].completed);
        assert_eq!(state.todos[0], todo("1", "a"));

        assert!(!state.replace_by_id(&"9".parse().unwrap(), todo("9", "z")));
        assert_eq!(state.todos.len(), 2);
    }

    #[test]
    fn remove_by_id_only_touches_the_match() {
        let mut state = TodoListState::new();
        state.replace_all(vec![todo("1", "a"), todo("2", "b")]);

        assert!(state.remove_by_id(&"1".parse().unwrap()));
        assert!(!state.remove_by_id(&"1".parse().unwrap()));
        assert_eq!(state.todos, vec![todo("2", "b")]);
    }

    #[test]
    fn notifications_drain_once() {
        let mut state = TodoListState::new();
        state.notify(NotificationLevel::Success, "ok");
        assert_eq!(state.take_notifications().len(), 1);
        assert!(state.take_notifications().is_empty());
    }
}
