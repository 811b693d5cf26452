use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// A task as the backend returns it. The server owns every field; the
/// client never fills in ids or timestamps itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body for task creation. Optional fields are omitted entirely so the
/// backend applies its own defaults.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Body for task updates. Every field is optional; absent fields are left
/// untouched by the backend.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the chat transcript. Lives only in memory for the current
/// session; never sent to or restored from storage.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub content: String,
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ToolCall {
    pub tool: String,
    #[serde(default)]
    pub parameters: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChatReply {
    pub conversation_id: i64,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The signed-in identity plus its bearer token, exactly what gets
/// persisted across launches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: AuthUser,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_deserializes_with_missing_optionals() {
        let task: Task =
            serde_json::from_str(r#"{"id": 1, "title": "buy groceries"}"#).expect("parse task");
        assert_eq!(task.id, 1);
        assert_eq!(task.title, "buy groceries");
        assert_eq!(task.description, "");
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.category.is_none());
    }

    #[test]
    fn test_priority_round_trips_lowercase() {
        let json = serde_json::to_string(&Priority::High).expect("serialize");
        assert_eq!(json, r#""high""#);
        let parsed: Priority = serde_json::from_str(r#""low""#).expect("parse");
        assert_eq!(parsed, Priority::Low);
    }

    #[test]
    fn test_task_draft_omits_unset_fields() {
        let draft = TaskDraft {
            title: "buy groceries".to_string(),
            description: String::new(),
            ..Default::default()
        };
        let json = serde_json::to_string(&draft).expect("serialize");
        assert_eq!(json, r#"{"title":"buy groceries","description":""}"#);
    }

    #[test]
    fn test_chat_reply_tolerates_missing_tool_calls() {
        let reply: ChatReply = serde_json::from_str(r#"{"conversation_id": 7, "response": "ok"}"#)
            .expect("parse reply");
        assert_eq!(reply.conversation_id, 7);
        assert!(reply.tool_calls.is_empty());
    }
}
