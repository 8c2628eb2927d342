use serde::{Deserialize, Serialize};

/// Content substituted when a task is created with an empty string.
pub const EMPTY_TASK_CONTENT: &str = "Empty task";

/// One to-do entry. The serialized field names (`editMode` in
/// particular) are the persisted storage layout and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub content: String,
    pub edit_mode: bool,
    pub done: bool,
}

impl Task {
    /// Builds a fresh task with both flags cleared. Empty content falls
    /// back to the placeholder.
    pub fn new(id: u64, content: &str) -> Self {
        let content = if content.is_empty() {
            EMPTY_TASK_CONTENT.to_string()
        } else {
            content.to_string()
        };

        Task {
            id,
            content,
            edit_mode: false,
            done: false,
        }
    }
}
