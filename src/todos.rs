use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;

use crate::config::Config;
use crate::error::{Result, StorageError};
use crate::types::{TodoItem, TodoUpdate};

/// DynamoDB access for to-do items.
///
/// Holds a clone of the process-wide client plus the table and index
/// names captured from [`Config`] at construction. Every operation is a
/// single request-response round trip; concurrency control is left to
/// DynamoDB.
pub struct TodoRepository {
    client: DynamoClient,
    table_name: String,
    index_name: String,
}

impl TodoRepository {
    pub fn new(client: DynamoClient, config: &Config) -> Self {
        Self {
            client,
            table_name: config.todos_table.clone(),
            index_name: config.todos_by_user_index.clone(),
        }
    }

    /// All items owned by `user_id`, queried through the by-user index.
    ///
    /// Returns an empty vec when the user has no items. Result order is
    /// whatever DynamoDB returns; a single response page is assumed.
    pub async fn list_todos(&self, user_id: &str) -> Result<Vec<TodoItem>> {
        tracing::info!("Listing todos for user {} from {}", user_id, self.table_name);

        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.index_name)
            .key_condition_expression("userId = :userId")
            .expression_attribute_values(":userId", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(|e| store_error("Query", user_id, e))?;

        result.items().iter().map(item_to_todo).collect()
    }

    /// Point lookup by id. A missing item is `Ok(None)`, not an error.
    pub async fn get_todo(&self, todo_id: &str) -> Result<Option<TodoItem>> {
        tracing::info!("Getting todo {} from {}", todo_id, self.table_name);

        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("todoId", AttributeValue::S(todo_id.to_string()))
            .send()
            .await
            .map_err(|e| store_error("GetItem", todo_id, e))?;

        match result.item() {
            Some(item) => Ok(Some(item_to_todo(item)?)),
            None => Ok(None),
        }
    }

    /// Unconditional put: the caller owns id uniqueness, and an existing
    /// item with the same id is silently overwritten.
    pub async fn create_todo(&self, todo: &TodoItem) -> Result<()> {
        tracing::info!("Putting todo {} into {}", todo.todo_id, self.table_name);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(todo_to_item(todo)))
            .send()
            .await
            .map_err(|e| store_error("PutItem", &todo.todo_id, e))?;

        Ok(())
    }

    /// Merge the three editable fields into an existing item.
    ///
    /// Guarded with `attribute_exists(todoId)`: updating a missing id
    /// fails with a store error instead of upserting a new record.
    pub async fn update_todo(&self, todo_id: &str, update: &TodoUpdate) -> Result<()> {
        tracing::info!("Updating todo {} in {}", todo_id, self.table_name);

        self.client
            .update_item()
            .table_name(&self.table_name)
            .key("todoId", AttributeValue::S(todo_id.to_string()))
            .update_expression("SET #name = :name, dueDate = :dueDate, done = :done")
            .condition_expression("attribute_exists(todoId)")
            .expression_attribute_names("#name", "name")
            .expression_attribute_values(":name", AttributeValue::S(update.name.clone()))
            .expression_attribute_values(":dueDate", AttributeValue::S(update.due_date.clone()))
            .expression_attribute_values(":done", AttributeValue::Bool(update.done))
            .send()
            .await
            .map_err(|e| store_error("UpdateItem", todo_id, e))?;

        Ok(())
    }

    /// Set only the attachment reference, independently of `update_todo`.
    /// Same existence guard as `update_todo`.
    pub async fn update_attachment_url(&self, todo_id: &str, attachment_url: &str) -> Result<()> {
        tracing::info!(
            "Updating attachment URL for todo {} in {}",
            todo_id,
            self.table_name
        );

        self.client
            .update_item()
            .table_name(&self.table_name)
            .key("todoId", AttributeValue::S(todo_id.to_string()))
            .update_expression("SET attachmentUrl = :attachmentUrl")
            .condition_expression("attribute_exists(todoId)")
            .expression_attribute_values(
                ":attachmentUrl",
                AttributeValue::S(attachment_url.to_string()),
            )
            .send()
            .await
            .map_err(|e| store_error("UpdateItem", todo_id, e))?;

        Ok(())
    }

    /// Delete by id. Idempotent: deleting a missing item succeeds.
    pub async fn delete_todo(&self, todo_id: &str) -> Result<()> {
        tracing::info!("Deleting todo {} from {}", todo_id, self.table_name);

        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("todoId", AttributeValue::S(todo_id.to_string()))
            .send()
            .await
            .map_err(|e| store_error("DeleteItem", todo_id, e))?;

        Ok(())
    }
}

fn store_error(operation: &'static str, id: &str, err: impl std::fmt::Display) -> StorageError {
    tracing::error!("DynamoDB {} failed for {}: {}", operation, id, err);
    StorageError::Dynamo {
        operation,
        id: id.to_string(),
        message: err.to_string(),
    }
}

fn todo_to_item(todo: &TodoItem) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert("todoId".to_string(), AttributeValue::S(todo.todo_id.clone()));
    item.insert("userId".to_string(), AttributeValue::S(todo.user_id.clone()));
    item.insert("name".to_string(), AttributeValue::S(todo.name.clone()));
    item.insert(
        "dueDate".to_string(),
        AttributeValue::S(todo.due_date.clone()),
    );
    item.insert("done".to_string(), AttributeValue::Bool(todo.done));
    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(todo.created_at.clone()),
    );
    if let Some(url) = &todo.attachment_url {
        item.insert("attachmentUrl".to_string(), AttributeValue::S(url.clone()));
    }
    item
}

fn item_to_todo(item: &HashMap<String, AttributeValue>) -> Result<TodoItem> {
    Ok(TodoItem {
        todo_id: get_string(item, "todoId")?,
        user_id: get_string(item, "userId")?,
        name: get_string(item, "name")?,
        due_date: get_string(item, "dueDate")?,
        done: get_bool(item, "done")?,
        created_at: get_string(item, "createdAt")?,
        attachment_url: get_optional_string(item, "attachmentUrl"),
    })
}

fn get_string(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| StorageError::InvalidItem(format!("missing or invalid attribute {key}")))
}

fn get_optional_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

fn get_bool(item: &HashMap<String, AttributeValue>, key: &str) -> Result<bool> {
    item.get(key)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| StorageError::InvalidItem(format!("missing or invalid attribute {key}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_todo() -> TodoItem {
        TodoItem {
            todo_id: "550e8400-e29b-41d4-a716-446655440001".to_string(),
            user_id: "user-1".to_string(),
            name: "Buy milk".to_string(),
            due_date: "2024-01-01".to_string(),
            done: false,
            created_at: "2024-01-15T10:30:00+00:00".to_string(),
            attachment_url: None,
        }
    }

    #[test]
    fn test_todo_item_round_trip() {
        let todo = sample_todo();
        let restored = item_to_todo(&todo_to_item(&todo)).unwrap();
        assert_eq!(restored, todo);
    }

    #[test]
    fn test_round_trip_keeps_attachment_url() {
        let mut todo = sample_todo();
        todo.attachment_url =
            Some("https://todo-attachments.s3.amazonaws.com/abc123".to_string());
        let restored = item_to_todo(&todo_to_item(&todo)).unwrap();
        assert_eq!(restored, todo);
    }

    #[test]
    fn test_absent_attachment_url_is_not_stored() {
        let item = todo_to_item(&sample_todo());
        assert!(!item.contains_key("attachmentUrl"));
        assert_eq!(
            item.get("todoId"),
            Some(&AttributeValue::S(
                "550e8400-e29b-41d4-a716-446655440001".to_string()
            ))
        );
        assert_eq!(item.get("done"), Some(&AttributeValue::Bool(false)));
    }

    #[test]
    fn test_missing_attribute_is_rejected() {
        let mut item = todo_to_item(&sample_todo());
        item.remove("done");

        let err = item_to_todo(&item).unwrap_err();
        assert_eq!(
            err,
            StorageError::InvalidItem("missing or invalid attribute done".to_string())
        );
    }

    #[test]
    fn test_wrongly_typed_attribute_is_rejected() {
        let mut item = todo_to_item(&sample_todo());
        item.insert("done".to_string(), AttributeValue::S("true".to_string()));

        assert!(matches!(
            item_to_todo(&item),
            Err(StorageError::InvalidItem(_))
        ));
    }
}
