use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::temporal;

/// Backend row key. The service addresses tasks by this id in its routes,
/// so the client carries it verbatim and never invents one.
pub type TaskId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    Today,
    Upcoming,
    Completed,
}

impl TaskFilter {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Today => "Today",
            Self::Upcoming => "Upcoming",
            Self::Completed => "Completed",
        }
    }

    pub const ALL: &'static [TaskFilter] = &[
        TaskFilter::All,
        TaskFilter::Today,
        TaskFilter::Upcoming,
        TaskFilter::Completed,
    ];
}

/// Visual urgency band for a priority ordinal.
///
/// The backend's convention is 1..=5 with 1 most urgent (3 is its default);
/// the ordinal is reproduced here, not re-derived. Anything outside the
/// known range bands as `Neutral` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Critical,
    High,
    Medium,
    Low,
    Neutral,
}

impl Urgency {
    pub fn from_priority(priority: Option<u8>) -> Self {
        match priority {
            Some(1) => Self::Critical,
            Some(2) => Self::High,
            Some(3) => Self::Medium,
            Some(4) | Some(5) => Self::Low,
            _ => Self::Neutral,
        }
    }
}

/// A task as the backend reports it. The client holds a read-through copy:
/// created by a fetch, replaced wholesale by the next fetch, and mutated
/// only through an acknowledged service call followed by a reload.
///
/// Field names match the service's JSON rows, so this doubles as the wire
/// model; rows carry more columns than we keep and serde skips them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub priority: Option<u8>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            due_date: None,
            priority: None,
            category: None,
            tags: Vec::new(),
            is_completed: false,
            created_at: None,
        }
    }

    pub fn urgency(&self) -> Urgency {
        Urgency::from_priority(self.priority)
    }

    /// Short display form of the due date; a task without one shows an
    /// explicit unscheduled state instead of a formatting error.
    pub fn due_label(&self) -> String {
        temporal::format_due(self.due_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_bands_known_ordinals() {
        assert_eq!(Urgency::from_priority(Some(1)), Urgency::Critical);
        assert_eq!(Urgency::from_priority(Some(2)), Urgency::High);
        assert_eq!(Urgency::from_priority(Some(3)), Urgency::Medium);
        assert_eq!(Urgency::from_priority(Some(4)), Urgency::Low);
        assert_eq!(Urgency::from_priority(Some(5)), Urgency::Low);
    }

    #[test]
    fn urgency_neutral_outside_known_range() {
        assert_eq!(Urgency::from_priority(None), Urgency::Neutral);
        assert_eq!(Urgency::from_priority(Some(0)), Urgency::Neutral);
        assert_eq!(Urgency::from_priority(Some(6)), Urgency::Neutral);
        assert_eq!(Urgency::from_priority(Some(42)), Urgency::Neutral);
    }

    #[test]
    fn decodes_backend_row() {
        let row = r#"{
            "id": 17,
            "uuid": "7c0efa4e-6c4f-4dc5-a31b-8f04a962ba2f",
            "user_id": 3,
            "title": "Buy milk",
            "description": "2% if they have it",
            "due_date": "2026-03-14T09:30:00",
            "priority": 2,
            "category": "errands",
            "tags": ["home"],
            "status": "pending",
            "is_completed": false,
            "created_at": "2026-03-01T08:00:00"
        }"#;
        let task: Task = serde_json::from_str(row).unwrap();
        assert_eq!(task.id, 17);
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.priority, Some(2));
        assert_eq!(task.tags, vec!["home".to_string()]);
        assert!(!task.is_completed);
        assert_eq!(
            task.due_date.unwrap().format("%Y-%m-%d %H:%M").to_string(),
            "2026-03-14 09:30"
        );
    }

    #[test]
    fn decodes_row_with_nulls_and_missing_fields() {
        let row = r#"{"id": 1, "title": "Call Bob", "description": null, "is_completed": true}"#;
        let task: Task = serde_json::from_str(row).unwrap();
        assert_eq!(task.description, None);
        assert_eq!(task.due_date, None);
        assert_eq!(task.priority, None);
        assert!(task.tags.is_empty());
        assert!(task.is_completed);
    }

    #[test]
    fn filter_labels() {
        assert_eq!(TaskFilter::ALL.len(), 4);
        assert_eq!(TaskFilter::Today.label(), "Today");
    }
}
