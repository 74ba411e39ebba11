use serde::{Deserialize, Serialize};

// ========== TODO ITEM ==========
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub todo_id: String,
    pub user_id: String,
    pub name: String,
    pub due_date: String,
    pub done: bool,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl TodoItem {
    /// A fresh item for `user_id` with a generated id and creation
    /// timestamp, not yet done and with no attachment.
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            todo_id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            name: name.into(),
            due_date: due_date.into(),
            done: false,
            created_at: chrono::Utc::now().to_rfc3339(),
            attachment_url: None,
        }
    }
}

/// The three editable fields of an item, carried by a single update call.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdate {
    pub name: String,
    pub due_date: String,
    pub done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_defaults() {
        let item = TodoItem::new("user-1", "Buy milk", "2024-01-01");

        assert!(uuid::Uuid::parse_str(&item.todo_id).is_ok());
        assert_eq!(item.user_id, "user-1");
        assert_eq!(item.name, "Buy milk");
        assert_eq!(item.due_date, "2024-01-01");
        assert!(!item.done);
        assert!(chrono::DateTime::parse_from_rfc3339(&item.created_at).is_ok());
        assert_eq!(item.attachment_url, None);
    }

    #[test]
    fn test_new_items_get_distinct_ids() {
        let a = TodoItem::new("user-1", "a", "2024-01-01");
        let b = TodoItem::new("user-1", "b", "2024-01-01");
        assert_ne!(a.todo_id, b.todo_id);
    }

    #[test]
    fn test_serializes_with_stored_attribute_names() {
        let item = TodoItem {
            todo_id: "todo-1".to_string(),
            user_id: "user-1".to_string(),
            name: "Buy milk".to_string(),
            due_date: "2024-01-01".to_string(),
            done: true,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
            attachment_url: None,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["todoId"], "todo-1");
        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["dueDate"], "2024-01-01");
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00+00:00");
        // Absent attachment is omitted, not serialized as null.
        assert!(json.get("attachmentUrl").is_none());

        let update: TodoUpdate =
            serde_json::from_str(r#"{"name":"X","dueDate":"2024-02-02","done":false}"#).unwrap();
        assert_eq!(update.due_date, "2024-02-02");
    }
}
