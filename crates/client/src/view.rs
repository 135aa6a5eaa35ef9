//! Pure presentation helpers.

use todolist_core::Todo;

/// Items whose title or description contains `query`, ignoring case.
/// A blank query matches everything.
pub fn filter_by_substring<'a>(todos: &'a [Todo], query: &str) -> Vec<&'a Todo> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return todos.iter().collect();
    }

    todos
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&needle)
                || t.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Render `createdAt` as e.g. `19 October 2026`. Unparsable values render empty.
pub fn format_created_at(todo: &Todo) -> String {
    todo.created_at_time()
        .map(|t| t.format("%-d %B %Y").to_string())
        .unwrap_or_default()
}
