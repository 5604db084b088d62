// In-progress task forms survive navigation: drafts persist to
// localStorage under a key scoped per contact id, so drafts for different
// contacts never collide.

use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

const TASK_DRAFT_KEY_PREFIX: &str = "haven_task_draft";

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: String,
}

impl TaskDraft {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.due_date.is_empty()
    }
}

fn draft_key(contact_id: i64) -> String {
    format!("{}_{}", TASK_DRAFT_KEY_PREFIX, contact_id)
}

pub fn load_task_draft(contact_id: i64) -> Option<TaskDraft> {
    LocalStorage::get::<TaskDraft>(&draft_key(contact_id)).ok()
}

pub fn save_task_draft(contact_id: i64, draft: &TaskDraft) {
    if draft.is_empty() {
        clear_task_draft(contact_id);
    } else {
        let _ = LocalStorage::set(&draft_key(contact_id), draft);
    }
}

pub fn clear_task_draft(contact_id: i64) {
    LocalStorage::delete(&draft_key(contact_id));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_scoped_per_contact() {
        assert_ne!(draft_key(1), draft_key(2));
        assert_eq!(draft_key(42), "haven_task_draft_42");
    }

    #[test]
    fn draft_round_trips_through_json() {
        let draft = TaskDraft {
            title: "Call about viewing".to_string(),
            description: "Saturday morning works best".to_string(),
            due_date: "2026-09-01".to_string(),
        };
        let json = serde_json::to_string(&draft).unwrap();
        let back: TaskDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back, draft);
    }

    #[test]
    fn blank_draft_counts_as_empty() {
        assert!(TaskDraft::default().is_empty());
        let partial = TaskDraft {
            title: "x".to_string(),
            ..Default::default()
        };
        assert!(!partial.is_empty());
    }
}
