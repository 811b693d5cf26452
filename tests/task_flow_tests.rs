//! Integration tests for task CRUD flows
//!
//! Runs the full trait surface against the in-memory backend, the same
//! object the dashboard talks to over HTTP in production.

use todohub::api::{ApiError, InMemoryTaskApi, TaskApi};
use todohub::types::{Priority, TaskDraft, TaskPatch};

fn draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: String::new(),
        ..Default::default()
    }
}

mod crud_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_list() {
        let api = InMemoryTaskApi::new();

        let created = api
            .create_task(1, &draft("buy groceries"))
            .await
            .expect("Failed to create task");
        assert_eq!(created.id, 1);
        assert_eq!(created.title, "buy groceries");
        assert_eq!(created.description, "");
        assert!(!created.completed);
        assert_eq!(created.priority, Priority::Medium);

        let tasks = api.list_tasks(1).await.expect("Failed to list tasks");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0], created);
    }

    #[tokio::test]
    async fn test_ids_are_assigned_in_order() {
        let api = InMemoryTaskApi::new();

        let first = api.create_task(1, &draft("first")).await.expect("create");
        let second = api.create_task(1, &draft("second")).await.expect("create");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_toggle_flips_and_flips_back() {
        let api = InMemoryTaskApi::new();
        let created = api.create_task(1, &draft("stretch")).await.expect("create");

        let toggled = api
            .toggle_task(1, created.id)
            .await
            .expect("Failed to toggle");
        assert!(toggled.completed);

        let toggled_again = api
            .toggle_task(1, created.id)
            .await
            .expect("Failed to toggle back");
        assert!(!toggled_again.completed);
    }

    #[tokio::test]
    async fn test_toggle_persists_into_list() {
        let api = InMemoryTaskApi::new();
        let created = api.create_task(1, &draft("water plants")).await.expect("create");

        api.toggle_task(1, created.id).await.expect("toggle");

        let tasks = api.list_tasks(1).await.expect("list");
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].completed);
    }

    #[tokio::test]
    async fn test_update_changes_only_named_fields() {
        let api = InMemoryTaskApi::new();
        let created = api
            .create_task(
                1,
                &TaskDraft {
                    title: "call the bank".to_string(),
                    description: "about the statement".to_string(),
                    priority: Some(Priority::High),
                    ..Default::default()
                },
            )
            .await
            .expect("create");

        let patch = TaskPatch {
            title: Some("call the bank today".to_string()),
            ..Default::default()
        };
        let updated = api
            .update_task(1, created.id, &patch)
            .await
            .expect("Failed to update");

        assert_eq!(updated.title, "call the bank today");
        assert_eq!(updated.description, "about the statement");
        assert_eq!(updated.priority, Priority::High);
        assert!(!updated.completed);
    }

    #[tokio::test]
    async fn test_delete_removes_the_task() {
        let api = InMemoryTaskApi::new();
        let created = api.create_task(1, &draft("buy groceries")).await.expect("create");

        api.delete_task(1, created.id)
            .await
            .expect("Failed to delete");

        let tasks = api.list_tasks(1).await.expect("list");
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_delete_twice_reports_not_found() {
        let api = InMemoryTaskApi::new();
        let created = api.create_task(1, &draft("one shot")).await.expect("create");

        api.delete_task(1, created.id).await.expect("first delete");

        let err = api
            .delete_task(1, created.id)
            .await
            .expect_err("second delete should fail");
        match err {
            ApiError::Http { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("not found"));
            }
            other => panic!("expected an HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_full_task_lifecycle() {
        let api = InMemoryTaskApi::new();

        let created = api
            .create_task(1, &draft("buy groceries"))
            .await
            .expect("create");
        assert_eq!(created.id, 1);
        assert!(!created.completed);

        let toggled = api.toggle_task(1, created.id).await.expect("toggle");
        assert!(toggled.completed);

        let tasks = api.list_tasks(1).await.expect("list");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 1);
        assert!(tasks[0].completed);

        api.delete_task(1, created.id).await.expect("delete");
        let tasks = api.list_tasks(1).await.expect("list after delete");
        assert!(tasks.is_empty());
    }
}

mod scoping_tests {
    use super::*;

    #[tokio::test]
    async fn test_users_see_only_their_own_tasks() {
        let api = InMemoryTaskApi::new();

        api.create_task(1, &draft("mine")).await.expect("create");
        api.create_task(2, &draft("theirs")).await.expect("create");

        let mine = api.list_tasks(1).await.expect("list user 1");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "mine");

        let theirs = api.list_tasks(2).await.expect("list user 2");
        assert_eq!(theirs.len(), 1);
        assert_eq!(theirs[0].title, "theirs");
    }

    #[tokio::test]
    async fn test_cannot_touch_another_users_task() {
        let api = InMemoryTaskApi::new();
        let created = api.create_task(1, &draft("private")).await.expect("create");

        let err = api
            .toggle_task(2, created.id)
            .await
            .expect_err("toggle across users should fail");
        assert!(matches!(err, ApiError::Http { status: 404, .. }));

        let err = api
            .delete_task(2, created.id)
            .await
            .expect_err("delete across users should fail");
        assert!(matches!(err, ApiError::Http { status: 404, .. }));

        // Still there for its owner
        let tasks = api.list_tasks(1).await.expect("list");
        assert_eq!(tasks.len(), 1);
    }
}
