use crate::api::{ApiError, TaskApi, TaskHttpClient};
use crate::session::SessionStore;
use crate::types::{Task, TaskDraft, TaskPatch};
use crate::views::shared::{BannerKind, StatusBanner};
use dioxus::events::Key;
use dioxus::prelude::*;
use std::time::Duration;

const SUCCESS_BANNER_DELAY: Duration = Duration::from_secs(3);

#[component]
pub fn DashboardView(session: SessionStore, task_refresh: Signal<u64>) -> Element {
    let state = use_dashboard_state();

    use_effect(move || {
        // Re-fetch on sign-in and whenever the assistant mutates tasks
        let _generation = task_refresh();
        if let Some(user) = session.user() {
            state.load(user.id, session.token());
        }
    });

    let tasks = state.tasks();
    let stats = task_stats(&tasks);
    let percent = stats.completion_percent();
    let loading = state.loading();

    rsx! {
        div { class: "main-container dashboard",
            div { class: "dashboard-heading",
                h2 { "My Tasks" }
                span { class: "text-muted", "{percent}% done" }
            }

            TaskStatsRow { stats }

            if let Some(message) = state.success() {
                StatusBanner { kind: BannerKind::Success, message }
            }
            if let Some(message) = state.error() {
                StatusBanner { kind: BannerKind::Error, message }
            }

            TaskForm { state, session }

            if loading && tasks.is_empty() {
                div { class: "task-list-empty",
                    span { class: "shimmer-text", "Loading tasks..." }
                }
            } else if tasks.is_empty() {
                div { class: "task-list-empty",
                    span { class: "text-muted", "No tasks yet. Add your first task above!" }
                }
            } else {
                div { class: "task-list",
                    for task in tasks.iter() {
                        TaskCard { key: "{task.id}", task: task.clone(), state, session }
                    }
                }
            }

            // Delete confirmation overlay
            if let Some(task_id) = state.delete_confirm_id() {
                div { class: "confirm-overlay",
                    onclick: move |_| state.set_delete_confirm(None),
                    div { class: "confirm-dialog",
                        onclick: move |e| e.stop_propagation(),
                        p { "Are you sure you want to delete this task?" }
                        div { class: "confirm-actions",
                            button {
                                class: "btn",
                                onclick: move |_| state.set_delete_confirm(None),
                                "Cancel"
                            }
                            button {
                                class: "btn btn-danger",
                                onclick: move |_| {
                                    if let Some(user) = session.user() {
                                        state.delete(user.id, session.token(), task_id);
                                    }
                                    state.set_delete_confirm(None);
                                },
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TaskStatsRow(stats: TaskStats) -> Element {
    rsx! {
        div { class: "stats-row",
            div { class: "stat-card",
                span { class: "stat-value", "{stats.total}" }
                span { class: "stat-label", "Total Tasks" }
            }
            div { class: "stat-card",
                span { class: "stat-value", "{stats.completed}" }
                span { class: "stat-label", "Completed" }
            }
            div { class: "stat-card",
                span { class: "stat-value", "{stats.pending}" }
                span { class: "stat-label", "Pending" }
            }
        }
    }
}

#[component]
fn TaskForm(state: DashboardState, session: SessionStore) -> Element {
    let editing = state.editing();
    let title = state.title();
    let description = state.description();
    let blocked = !can_submit(&title, state.action_loading());
    let submit_label = if editing.is_some() {
        "Save Changes"
    } else {
        "Add Task"
    };

    let submit = move |_| {
        if let Some(user) = session.user() {
            state.submit_form(user.id, session.token());
        }
    };

    rsx! {
        div { class: "composer task-form",
            div { class: "composer-inner",
                input {
                    r#type: "text",
                    placeholder: "Task title",
                    value: "{title}",
                    autocomplete: "off",
                    oninput: move |ev| state.set_title(ev.value()),
                    onkeydown: move |ev| {
                        if ev.key() == Key::Enter {
                            ev.prevent_default();
                            if let Some(user) = session.user() {
                                state.submit_form(user.id, session.token());
                            }
                        }
                    },
                }
                input {
                    r#type: "text",
                    placeholder: "Description (optional)",
                    value: "{description}",
                    autocomplete: "off",
                    oninput: move |ev| state.set_description(ev.value()),
                    onkeydown: move |ev| {
                        if ev.key() == Key::Enter {
                            ev.prevent_default();
                            if let Some(user) = session.user() {
                                state.submit_form(user.id, session.token());
                            }
                        }
                    },
                }
                div { class: "form-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: blocked,
                        onclick: submit,
                        "{submit_label}"
                    }
                    if editing.is_some() {
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            onclick: move |_| state.clear_form(),
                            "Cancel"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TaskCard(task: Task, state: DashboardState, session: SessionStore) -> Element {
    let busy = state.action_loading() == Some(task.id);
    let task_id = task.id;
    let edit_task = task.clone();
    let priority_label = task.priority.label();
    let check_title = if task.completed {
        "Mark as incomplete"
    } else {
        "Mark as complete"
    };

    rsx! {
        div { class: format_args!("task-card {}", if task.completed { "completed" } else { "" }),
            button {
                class: format_args!("task-check {}", if task.completed { "checked" } else { "" }),
                r#type: "button",
                disabled: busy,
                title: "{check_title}",
                onclick: move |_| {
                    if let Some(user) = session.user() {
                        state.toggle(user.id, session.token(), task_id);
                    }
                },
                if task.completed {
                    span { dangerous_inner_html: "&#10003;" }
                }
            }
            div { class: "task-body",
                span { class: "task-title", "{task.title}" }
                if !task.description.is_empty() {
                    span { class: "task-description", "{task.description}" }
                }
                div { class: "task-meta",
                    span { class: format_args!("priority priority-{}", priority_label),
                        "{priority_label}"
                    }
                    if let Some(category) = task.category.as_ref() {
                        span { class: "task-category", "{category}" }
                    }
                    if let Some(due) = task.due_date.as_ref() {
                        span { class: "task-due", "Due {due}" }
                    }
                }
            }
            div { class: "task-actions",
                button {
                    class: "action-btn",
                    disabled: busy,
                    onclick: move |_| state.start_editing(edit_task.clone()),
                    "Edit"
                }
                button {
                    class: "action-btn action-btn-danger",
                    disabled: busy,
                    onclick: move |_| state.set_delete_confirm(Some(task_id)),
                    "Delete"
                }
            }
        }
    }
}

// ============================================
// State
// ============================================

#[derive(Clone, Copy)]
struct DashboardState {
    tasks: Signal<Vec<Task>>,
    loading: Signal<bool>,
    error: Signal<Option<String>>,
    success: Signal<Option<String>>,
    action_loading: Signal<Option<i64>>,
    editing: Signal<Option<Task>>,
    title: Signal<String>,
    description: Signal<String>,
    delete_confirm_id: Signal<Option<i64>>,
}

impl PartialEq for DashboardState {
    fn eq(&self, _: &Self) -> bool {
        false
    }
}

fn use_dashboard_state() -> DashboardState {
    DashboardState {
        tasks: use_signal(Vec::<Task>::new),
        loading: use_signal(|| false),
        error: use_signal(|| None),
        success: use_signal(|| None),
        action_loading: use_signal(|| None),
        editing: use_signal(|| None),
        title: use_signal(String::new),
        description: use_signal(String::new),
        delete_confirm_id: use_signal(|| None),
    }
}

impl DashboardState {
    fn tasks(&self) -> Vec<Task> {
        (self.tasks)()
    }
    fn loading(&self) -> bool {
        (self.loading)()
    }
    fn error(&self) -> Option<String> {
        (self.error)()
    }
    fn success(&self) -> Option<String> {
        (self.success)()
    }
    fn action_loading(&self) -> Option<i64> {
        (self.action_loading)()
    }
    fn editing(&self) -> Option<Task> {
        (self.editing)()
    }
    fn title(&self) -> String {
        (self.title)()
    }
    fn set_title(&self, v: String) {
        let mut title = self.title;
        title.set(v);
    }
    fn description(&self) -> String {
        (self.description)()
    }
    fn set_description(&self, v: String) {
        let mut description = self.description;
        description.set(v);
    }
    fn delete_confirm_id(&self) -> Option<i64> {
        (self.delete_confirm_id)()
    }
    fn set_delete_confirm(&self, id: Option<i64>) {
        let mut confirm = self.delete_confirm_id;
        confirm.set(id);
    }

    fn start_editing(&self, task: Task) {
        self.set_title(task.title.clone());
        self.set_description(task.description.clone());
        let mut editing = self.editing;
        editing.set(Some(task));
    }

    fn clear_form(&self) {
        self.set_title(String::new());
        self.set_description(String::new());
        let mut editing = self.editing;
        editing.set(None);
    }

    /// Show an error banner. The banners are exclusive, so any success
    /// message comes down at the same time.
    fn set_error(&self, message: &str) {
        let mut error = self.error;
        error.set(Some(message.to_string()));
        let mut success = self.success;
        success.set(None);
    }

    /// Show a success banner and schedule its dismissal. A newer banner in
    /// the meantime wins; the stale timer leaves it alone.
    fn flash_success(&self, message: &str) {
        let banner = message.to_string();
        let mut success = self.success;
        success.set(Some(banner.clone()));
        let mut error = self.error;
        error.set(None);

        let mut control = self.success;
        spawn(async move {
            tokio::time::sleep(SUCCESS_BANNER_DELAY).await;
            if control() == Some(banner) {
                control.set(None);
            }
        });
    }

    fn load(&self, user_id: i64, token: Option<String>) {
        let state = *self;
        spawn(async move {
            state.fetch_list(user_id, token).await;
        });
    }

    async fn fetch_list(self, user_id: i64, token: Option<String>) {
        let mut loading = self.loading;
        loading.set(true);

        let client = TaskHttpClient::new(token);
        match client.list_tasks(user_id).await {
            Ok(list) => {
                let mut tasks = self.tasks;
                tasks.set(list);
                let mut error = self.error;
                error.set(None);
            }
            Err(err) => {
                tracing::warn!("task list fetch failed: {}", err);
                self.set_error("Failed to load tasks");
            }
        }

        loading.set(false);
    }

    /// Re-fetch the list without touching the banners. On failure the
    /// current list stays as-is and the caller decides what to surface.
    async fn refresh_list(self, client: &TaskHttpClient, user_id: i64) -> Result<(), ApiError> {
        let list = client.list_tasks(user_id).await?;
        let mut tasks = self.tasks;
        tasks.set(list);
        Ok(())
    }

    /// Create a task, or save the task being edited. A submit while a row
    /// action is still in flight is dropped, which also covers the Enter
    /// shortcut in the form inputs.
    fn submit_form(&self, user_id: i64, token: Option<String>) {
        let title = self.title();
        if !can_submit(&title, self.action_loading()) {
            return;
        }
        let title = title.trim().to_string();
        let description = self.description().trim().to_string();
        let editing = self.editing();

        let state = *self;
        spawn(async move {
            let client = TaskHttpClient::new(token);
            match editing {
                None => {
                    let draft = TaskDraft {
                        title,
                        description,
                        ..Default::default()
                    };
                    match client.create_task(user_id, &draft).await {
                        Ok(task) => {
                            let mut tasks = state.tasks;
                            tasks.with_mut(|list| list.push(task));
                            state.clear_form();
                            state.flash_success("Task added successfully!");
                        }
                        Err(err) => {
                            tracing::warn!("task create failed: {}", err);
                            state.set_error(&error_banner(&err, "Failed to create task"));
                        }
                    }
                }
                Some(original) => {
                    let mut action = state.action_loading;
                    action.set(Some(original.id));

                    let patch = TaskPatch {
                        title: Some(title),
                        description: Some(description),
                        ..Default::default()
                    };
                    match client.update_task(user_id, original.id, &patch).await {
                        Ok(task) => {
                            let mut tasks = state.tasks;
                            tasks.with_mut(|list| {
                                replace_task(list, task);
                            });
                            state.clear_form();
                            state.flash_success("Task updated successfully!");
                        }
                        Err(err) => {
                            tracing::warn!("task update failed: {}", err);
                            state.set_error(&error_banner(&err, "Failed to update task"));
                        }
                    }

                    action.set(None);
                }
            }
        });
    }

    /// Flip completion. The server's copy lands in the list right away,
    /// then a full re-fetch converges the list with the backend whether the
    /// toggle succeeded or not. The outcome banner goes up only after the
    /// list has settled, and a failed re-fetch surfaces as an error even
    /// when the toggle itself went through.
    fn toggle(&self, user_id: i64, token: Option<String>, task_id: i64) {
        let state = *self;
        spawn(async move {
            let mut action = state.action_loading;
            action.set(Some(task_id));

            let client = TaskHttpClient::new(token);
            let toggled = client.toggle_task(user_id, task_id).await;
            match &toggled {
                Ok(task) => {
                    let server_copy = task.clone();
                    let mut tasks = state.tasks;
                    tasks.with_mut(|list| {
                        replace_task(list, server_copy);
                    });
                }
                Err(err) => {
                    tracing::warn!("task toggle failed: {}", err);
                }
            }

            let refreshed = state.refresh_list(&client, user_id).await;
            if let Err(err) = &refreshed {
                tracing::warn!("task list refresh failed: {}", err);
            }

            match toggle_outcome(toggled.map(|task| task.completed), refreshed) {
                Ok(banner) => state.flash_success(banner),
                Err(message) => state.set_error(&message),
            }

            action.set(None);
        });
    }

    fn delete(&self, user_id: i64, token: Option<String>, task_id: i64) {
        let state = *self;
        spawn(async move {
            let mut action = state.action_loading;
            action.set(Some(task_id));

            let client = TaskHttpClient::new(token);
            match client.delete_task(user_id, task_id).await {
                Ok(()) => {
                    let mut tasks = state.tasks;
                    tasks.with_mut(|list| {
                        remove_task(list, task_id);
                    });
                    state.flash_success("Task deleted successfully!");
                }
                Err(err) => {
                    tracing::warn!("task delete failed: {}", err);
                    state.set_error(&error_banner(&err, "Failed to delete task"));
                }
            }

            action.set(None);
        });
    }
}

// ============================================
// Helpers
// ============================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TaskStats {
    total: usize,
    completed: usize,
    pending: usize,
}

impl TaskStats {
    fn completion_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed as f64 / self.total as f64) * 100.0).round() as u32
    }
}

fn task_stats(tasks: &[Task]) -> TaskStats {
    let completed = tasks.iter().filter(|task| task.completed).count();
    TaskStats {
        total: tasks.len(),
        completed,
        pending: tasks.len() - completed,
    }
}

/// A submit only goes out with a non-empty title and no row action in
/// flight.
fn can_submit(title: &str, action_loading: Option<i64>) -> bool {
    !title.trim().is_empty() && action_loading.is_none()
}

/// Banner text for a failed call: the error's own message, or the fixed
/// fallback if it renders empty.
fn error_banner(err: &ApiError, fallback: &str) -> String {
    let message = err.to_string();
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

/// Outcome of a toggle once its follow-up re-fetch has settled. A failed
/// re-fetch downgrades an otherwise successful toggle to an error.
fn toggle_outcome(
    toggled: Result<bool, ApiError>,
    refreshed: Result<(), ApiError>,
) -> Result<&'static str, String> {
    match (toggled, refreshed) {
        (Ok(true), Ok(())) => Ok("Task marked as complete!"),
        (Ok(false), Ok(())) => Ok("Task marked as incomplete!"),
        (Ok(_), Err(err)) | (Err(err), _) => {
            Err(error_banner(&err, "Failed to update task status"))
        }
    }
}

/// Swap in the server's copy of a task. Returns whether anything matched.
fn replace_task(tasks: &mut [Task], task: Task) -> bool {
    match tasks.iter_mut().find(|existing| existing.id == task.id) {
        Some(slot) => {
            *slot = task;
            true
        }
        None => false,
    }
}

fn remove_task(tasks: &mut Vec<Task>, task_id: i64) -> bool {
    let before = tasks.len();
    tasks.retain(|task| task.id != task_id);
    tasks.len() != before
}
