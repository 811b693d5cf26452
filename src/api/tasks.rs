use super::{ApiError, api_base_url, execute};
use crate::types::{Task, TaskDraft, TaskPatch};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

/// Task operations, scoped by user. Views depend on this trait so they can
/// run against `InMemoryTaskApi` in tests.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self, user_id: i64) -> Result<Vec<Task>, ApiError>;
    async fn create_task(&self, user_id: i64, draft: &TaskDraft) -> Result<Task, ApiError>;
    async fn update_task(
        &self,
        user_id: i64,
        task_id: i64,
        patch: &TaskPatch,
    ) -> Result<Task, ApiError>;
    async fn delete_task(&self, user_id: i64, task_id: i64) -> Result<(), ApiError>;
    async fn toggle_task(&self, user_id: i64, task_id: i64) -> Result<Task, ApiError>;
}

/// HTTP client for the task endpoints
pub struct TaskHttpClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl TaskHttpClient {
    pub fn new(token: Option<String>) -> Self {
        Self::with_base_url(api_base_url(), token)
    }

    pub fn with_base_url(base_url: String, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    fn tasks_url(&self, user_id: i64) -> String {
        format!("{}/api/v1/users/{}/tasks", self.base_url, user_id)
    }

    fn task_url(&self, user_id: i64, task_id: i64) -> String {
        format!("{}/api/v1/users/{}/tasks/{}", self.base_url, user_id, task_id)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl TaskApi for TaskHttpClient {
    async fn list_tasks(&self, user_id: i64) -> Result<Vec<Task>, ApiError> {
        let request = self.authorize(self.client.get(self.tasks_url(user_id)));
        let body = execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn create_task(&self, user_id: i64, draft: &TaskDraft) -> Result<Task, ApiError> {
        let request = self.authorize(self.client.post(self.tasks_url(user_id)).json(draft));
        let body = execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn update_task(
        &self,
        user_id: i64,
        task_id: i64,
        patch: &TaskPatch,
    ) -> Result<Task, ApiError> {
        let request = self.authorize(self.client.put(self.task_url(user_id, task_id)).json(patch));
        let body = execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn delete_task(&self, user_id: i64, task_id: i64) -> Result<(), ApiError> {
        let request = self.authorize(self.client.delete(self.task_url(user_id, task_id)));
        // Delete returns no body worth parsing
        execute(request).await?;
        Ok(())
    }

    async fn toggle_task(&self, user_id: i64, task_id: i64) -> Result<Task, ApiError> {
        let url = format!("{}/complete", self.task_url(user_id, task_id));
        let request = self.authorize(self.client.patch(url));
        let body = execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// In-memory implementation backing tests and offline demos. Behaves like
/// the real backend: it owns ids, scopes tasks by user and flips completion
/// on toggle.
pub struct InMemoryTaskApi {
    tasks: Mutex<Vec<Task>>,
    next_id: AtomicI64,
}

impl InMemoryTaskApi {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn not_found() -> ApiError {
        ApiError::Http {
            status: 404,
            body: r#"{"detail": "Task not found"}"#.to_string(),
        }
    }
}

impl Default for InMemoryTaskApi {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_patch(task: &mut Task, patch: &TaskPatch) {
    if let Some(title) = &patch.title {
        task.title = title.clone();
    }
    if let Some(description) = &patch.description {
        task.description = description.clone();
    }
    if let Some(completed) = patch.completed {
        task.completed = completed;
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if let Some(category) = &patch.category {
        task.category = Some(category.clone());
    }
    if let Some(due_date) = &patch.due_date {
        task.due_date = Some(due_date.clone());
    }
}

#[async_trait]
impl TaskApi for InMemoryTaskApi {
    async fn list_tasks(&self, user_id: i64) -> Result<Vec<Task>, ApiError> {
        let tasks = self.tasks.lock().expect("task store poisoned");
        Ok(tasks
            .iter()
            .filter(|task| task.user_id == Some(user_id))
            .cloned()
            .collect())
    }

    async fn create_task(&self, user_id: i64, draft: &TaskDraft) -> Result<Task, ApiError> {
        let task = Task {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            user_id: Some(user_id),
            title: draft.title.clone(),
            description: draft.description.clone(),
            completed: false,
            priority: draft.priority.unwrap_or_default(),
            category: draft.category.clone(),
            due_date: draft.due_date.clone(),
            created_at: None,
            updated_at: None,
        };
        let mut tasks = self.tasks.lock().expect("task store poisoned");
        tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(
        &self,
        user_id: i64,
        task_id: i64,
        patch: &TaskPatch,
    ) -> Result<Task, ApiError> {
        let mut tasks = self.tasks.lock().expect("task store poisoned");
        let task = tasks
            .iter_mut()
            .find(|task| task.id == task_id && task.user_id == Some(user_id))
            .ok_or_else(Self::not_found)?;
        apply_patch(task, patch);
        Ok(task.clone())
    }

    async fn delete_task(&self, user_id: i64, task_id: i64) -> Result<(), ApiError> {
        let mut tasks = self.tasks.lock().expect("task store poisoned");
        let before = tasks.len();
        tasks.retain(|task| !(task.id == task_id && task.user_id == Some(user_id)));
        if tasks.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    async fn toggle_task(&self, user_id: i64, task_id: i64) -> Result<Task, ApiError> {
        let mut tasks = self.tasks.lock().expect("task store poisoned");
        let task = tasks
            .iter_mut()
            .find(|task| task.id == task_id && task.user_id == Some(user_id))
            .ok_or_else(Self::not_found)?;
        task.completed = !task.completed;
        Ok(task.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;

    #[test]
    fn test_task_urls_embed_ids() {
        let client = TaskHttpClient::with_base_url("http://localhost:8000".to_string(), None);
        assert_eq!(
            client.tasks_url(7),
            "http://localhost:8000/api/v1/users/7/tasks"
        );
        assert_eq!(
            client.task_url(7, 12),
            "http://localhost:8000/api/v1/users/7/tasks/12"
        );
    }

    #[test]
    fn test_apply_patch_leaves_absent_fields_alone() {
        let mut task = Task {
            id: 1,
            user_id: Some(1),
            title: "original".to_string(),
            description: "keep me".to_string(),
            completed: false,
            priority: Priority::High,
            category: None,
            due_date: None,
            created_at: None,
            updated_at: None,
        };
        let patch = TaskPatch {
            title: Some("renamed".to_string()),
            ..Default::default()
        };
        apply_patch(&mut task, &patch);
        assert_eq!(task.title, "renamed");
        assert_eq!(task.description, "keep me");
        assert_eq!(task.priority, Priority::High);
        assert!(!task.completed);
    }
}
