//! To-do list domain model and reducer.
//!
//! This module defines the to-do list state, the actions that transform it,
//! and [`TodoReducer`], a pure [`Reducer`] over them. The state is
//! serializable so a whole list can live inside a
//! [`PersistedCell`](crate::hooks::PersistedCell).
//!
//! # Actions
//!
//! | Action           | Effect                                            |
//! |------------------|---------------------------------------------------|
//! | `Add`            | Appends a new active item (blank text ignored)    |
//! | `Toggle`         | Flips completion of one item                      |
//! | `Delete`         | Removes one item                                  |
//! | `Edit`           | Replaces the text of one item (blank ignored)     |
//! | `ClearCompleted` | Removes every completed item                      |
//! | `SetFilter`      | Changes which items [`TodoState::visible`] yields |
//! | `Load`           | Replaces the whole list                           |

use crate::hooks::reducer::Reducer;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Identifier unique within its list.
    pub id: u64,

    /// Trimmed, non-empty description.
    pub text: String,

    /// Whether the item has been done.
    pub completed: bool,

    /// Unix timestamp (seconds) when the item was added.
    pub created_at: i64,
}

/// Which items are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Every item.
    #[default]
    All,
    /// Items not yet completed.
    Active,
    /// Completed items.
    Completed,
}

impl Filter {
    /// Returns `true` if `todo` passes this filter.
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }
}

/// Item counts by completion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// A whole to-do list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Items in insertion order.
    #[serde(default)]
    pub todos: Vec<Todo>,

    /// Current visibility filter.
    #[serde(default)]
    pub filter: Filter,

    /// Identifier assigned to the next added item.
    #[serde(default)]
    pub next_id: u64,
}

impl TodoState {
    /// Items passing the current filter, in insertion order.
    pub fn visible(&self) -> impl Iterator<Item = &Todo> {
        let filter = self.filter;
        self.todos.iter().filter(move |todo| filter.matches(todo))
    }

    /// Counts items by completion state.
    #[must_use]
    pub fn stats(&self) -> TodoStats {
        let completed = self.todos.iter().filter(|todo| todo.completed).count();
        TodoStats {
            total: self.todos.len(),
            active: self.todos.len() - completed,
            completed,
        }
    }

    /// Looks up one item.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Visible items whose text fuzzy-matches every whitespace-separated token
    /// of `query`, case-insensitively.
    ///
    /// An empty or blank query returns every visible item. Typically fed from
    /// a [`Debounced`](crate::hooks::Debounced) search box.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hooklab::domain::todo::{TodoAction, TodoReducer, TodoState};
    /// use hooklab::hooks::Reducer;
    ///
    /// let reducer = TodoReducer;
    /// let mut state = TodoState::default();
    /// for text in ["buy milk", "write report", "book flights"] {
    ///     state = reducer.reduce(&state, TodoAction::add(text));
    /// }
    ///
    /// let hits: Vec<&str> = state.search("bk fl").iter().map(|t| t.text.as_str()).collect();
    /// assert_eq!(hits, vec!["book flights"]);
    /// ```
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Todo> {
        let _span = tracing::debug_span!("todo_search",
            total = self.todos.len(),
            query_len = query.len(),
            filter = ?self.filter
        )
        .entered();

        let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if tokens.is_empty() {
            return self.visible().collect();
        }

        let matcher = SkimMatcherV2::default();
        let matches: Vec<&Todo> = self
            .visible()
            .filter(|todo| {
                let text = todo.text.to_lowercase();
                tokens.iter().all(|token| matcher.fuzzy_match(&text, token).is_some())
            })
            .collect();

        tracing::debug!(matched = matches.len(), "todo search applied");
        matches
    }
}

/// Transitions understood by [`TodoReducer`].
///
/// `Add` and `Edit` store text as entered; whitespace-only text is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    Add { text: String, created_at: i64 },
    Toggle(u64),
    Delete(u64),
    Edit { id: u64, text: String },
    ClearCompleted,
    SetFilter(Filter),
    Load(Vec<Todo>),
}

impl TodoAction {
    /// Builds an `Add` action stamped with the current time.
    pub fn add(text: impl Into<String>) -> Self {
        Self::Add {
            text: text.into(),
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Pure reducer for [`TodoState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoReducer;

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;

    fn reduce(&self, state: &TodoState, action: TodoAction) -> TodoState {
        let mut next = state.clone();
        match action {
            TodoAction::Add { text, created_at } => {
                if text.trim().is_empty() {
                    return next;
                }
                next.todos.push(Todo {
                    id: next.next_id,
                    text,
                    completed: false,
                    created_at,
                });
                next.next_id = next.next_id.wrapping_add(1);
            }
            TodoAction::Toggle(id) => {
                if let Some(todo) = next.todos.iter_mut().find(|todo| todo.id == id) {
                    todo.completed = !todo.completed;
                }
            }
            TodoAction::Delete(id) => next.todos.retain(|todo| todo.id != id),
            TodoAction::Edit { id, text } => {
                if text.trim().is_empty() {
                    return next;
                }
                if let Some(todo) = next.todos.iter_mut().find(|todo| todo.id == id) {
                    todo.text = text;
                }
            }
            TodoAction::ClearCompleted => next.todos.retain(|todo| !todo.completed),
            TodoAction::SetFilter(filter) => next.filter = filter,
            TodoAction::Load(todos) => {
                // Keep ids unique for items added after the load.
                let max_id = todos.iter().map(|todo| todo.id).max();
                next.next_id = max_id.map_or(0, |id| id.wrapping_add(1)).max(next.next_id);
                next.todos = todos;
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::Store;

    fn store_with(texts: &[&str]) -> Store<TodoReducer> {
        let mut store = Store::new(TodoReducer, TodoState::default());
        for text in texts {
            store.dispatch(TodoAction::add(*text));
        }
        store
    }

    #[test]
    fn add_keeps_text_as_entered_and_ignores_blank() {
        let mut store = store_with(&["  water plants  "]);
        store.dispatch(TodoAction::add("   "));

        let state = store.state();
        assert_eq!(state.todos.len(), 1);
        assert_eq!(state.todos[0].text, "  water plants  ");
        assert!(!state.todos[0].completed);
    }

    #[test]
    fn ids_are_unique_after_delete() {
        let mut store = store_with(&["a", "b"]);
        store.dispatch(TodoAction::Delete(1));
        store.dispatch(TodoAction::add("c"));

        let ids: Vec<u64> = store.state().todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn toggle_and_filters() {
        let mut store = store_with(&["a", "b", "c"]);
        store.dispatch(TodoAction::Toggle(1));

        store.dispatch(TodoAction::SetFilter(Filter::Completed));
        let done: Vec<&str> = store.state().visible().map(|t| t.text.as_str()).collect();
        assert_eq!(done, vec!["b"]);

        store.dispatch(TodoAction::SetFilter(Filter::Active));
        assert_eq!(store.state().visible().count(), 2);

        assert_eq!(
            store.state().stats(),
            TodoStats {
                total: 3,
                active: 2,
                completed: 1
            }
        );
    }

    #[test]
    fn edit_replaces_text_but_not_with_blank() {
        let mut store = store_with(&["draft"]);
        store.dispatch(TodoAction::Edit {
            id: 0,
            text: " final ".to_string(),
        });
        store.dispatch(TodoAction::Edit {
            id: 0,
            text: String::new(),
        });
        assert_eq!(store.state().get(0).map(|t| t.text.as_str()), Some(" final "));
    }

    #[test]
    fn clear_completed_keeps_active_items() {
        let mut store = store_with(&["a", "b", "c"]);
        store.dispatch(TodoAction::Toggle(0));
        store.dispatch(TodoAction::Toggle(2));
        store.dispatch(TodoAction::ClearCompleted);

        let texts: Vec<&str> = store.state().todos.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["b"]);
    }

    #[test]
    fn load_replaces_list_and_advances_ids() {
        let mut store = store_with(&["old"]);
        let loaded = vec![Todo {
            id: 41,
            text: "imported".to_string(),
            completed: true,
            created_at: 0,
        }];
        store.dispatch(TodoAction::Load(loaded));
        store.dispatch(TodoAction::add("fresh"));

        let ids: Vec<u64> = store.state().todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![41, 42]);

        store.dispatch(TodoAction::Load(Vec::new()));
        assert!(store.state().todos.is_empty());
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut store = store_with(&["a"]);
        let before = store.state().clone();
        store.dispatch(TodoAction::Toggle(99));
        store.dispatch(TodoAction::Delete(99));
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn search_respects_filter_and_blank_query() {
        let mut store = store_with(&["Buy milk", "Buy bread", "Call mom"]);
        store.dispatch(TodoAction::Toggle(1));

        assert_eq!(store.state().search("  ").len(), 3);
        assert_eq!(store.state().search("BUY").len(), 2);

        store.dispatch(TodoAction::SetFilter(Filter::Active));
        let hits: Vec<&str> = store.state().search("buy").iter().map(|t| t.text.as_str()).collect();
        assert_eq!(hits, vec!["Buy milk"]);
    }

    #[test]
    fn state_serializes_with_lowercase_filter() {
        let state = TodoState {
            filter: Filter::Completed,
            ..TodoState::default()
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"filter\":\"completed\""));
        assert_eq!(serde_json::from_str::<TodoState>(&json).unwrap(), state);
    }
}
