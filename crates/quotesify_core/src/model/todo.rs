//! To-do entries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDo {
    pub description: String,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

impl ToDo {
    pub fn new(description: impl Into<String>, deadline: Option<String>) -> Self {
        Self {
            description: description.into(),
            deadline,
            is_completed: false,
        }
    }

    pub fn mark_done(&mut self) {
        self.is_completed = true;
    }
}
