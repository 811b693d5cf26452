use crate::api::ChatClient;
use crate::session::SessionStore;
use crate::token::user_id_from_token;
use crate::types::{ChatMessage, Role, ToolCall};
use crate::views::shared::markdown_to_html;
use dioxus::events::Key;
use dioxus::prelude::*;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

const WELCOME_MESSAGE: &str = "Hi! I'm your AI assistant. I can help you manage your tasks. \
    Try saying 'Add a task to buy groceries' or 'Show me my tasks'.";

/// Tool names the assistant reports after changing task data. Anything
/// else (listing, small talk) leaves the dashboard alone.
const TASK_MUTATING_TOOLS: &[&str] = &["add_task", "complete_task", "delete_task", "update_task"];

fn has_task_mutation(tool_calls: &[ToolCall]) -> bool {
    tool_calls
        .iter()
        .any(|call| TASK_MUTATING_TOOLS.contains(&call.tool.as_str()))
}

fn current_time() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

fn format_message_timestamp(timestamp: Option<OffsetDateTime>) -> Option<String> {
    let mut datetime = timestamp?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

#[component]
pub fn FloatingChat(session: SessionStore, task_refresh: Signal<u64>) -> Element {
    let state = use_chat_widget_state();

    use_effect(move || {
        // Seed the transcript once a signed-in user is known
        if session.user().is_some() && state.messages().is_empty() {
            state.push_message(Role::Assistant, WELCOME_MESSAGE.to_string());
        }
    });

    if !state.open() {
        return rsx! {
            button {
                class: "chat-launcher",
                title: "Chat with your assistant",
                onclick: move |_| state.set_open(true),
                span { dangerous_inner_html: "&#128172;" }
            }
        };
    }

    rsx! {
        div { class: format_args!("chat-widget {}", if state.minimized() { "minimized" } else { "" }),
            ChatWidgetHeader { state }
            if !state.minimized() {
                if session.user().is_none() && !session.restoring() {
                    div { class: "chat-login-prompt",
                        span { class: "text-muted", "Please log in to use chat" }
                    }
                } else {
                    ChatTranscript { state }
                    ChatComposer { state, session, task_refresh }
                }
            }
        }
    }
}

#[component]
fn ChatWidgetHeader(state: ChatWidgetState) -> Element {
    let minimized = state.minimized();
    let toggle_title = if minimized { "Restore" } else { "Minimize" };
    let toggle_glyph = if minimized { "&#43;" } else { "&#8722;" };
    rsx! {
        div { class: "chat-widget-header",
            span { class: "chat-widget-title", "AI Assistant" }
            div { class: "chat-widget-controls",
                button {
                    class: "action-btn",
                    title: "{toggle_title}",
                    onclick: move |_| state.set_minimized(!minimized),
                    span { dangerous_inner_html: "{toggle_glyph}" }
                }
                button {
                    class: "action-btn",
                    title: "Close",
                    onclick: move |_| state.set_open(false),
                    span { dangerous_inner_html: "&#215;" }
                }
            }
        }
    }
}

#[component]
fn ChatTranscript(state: ChatWidgetState) -> Element {
    let messages = state.messages();
    rsx! {
        div { class: "chat-list chat-widget-list",
            for msg in messages.iter() {
                div {
                    key: "{msg.id}",
                    class: format_args!("message-row {}", match msg.role { Role::User => "user", Role::Assistant => "assistant" }),
                    div { class: "message-stack",
                        div { class: format_args!(
                                "bubble {}",
                                match msg.role { Role::User => "user", Role::Assistant => "assistant" },
                            ),
                            if matches!(msg.role, Role::Assistant) {
                                AssistantBubble { content: msg.content.clone() }
                            } else {
                                "{msg.content}"
                            }
                        }
                        if let Some(ts) = format_message_timestamp(msg.created_at) {
                            div { class: format_args!(
                                    "message-meta {}",
                                    match msg.role { Role::User => "align-end", Role::Assistant => "align-start" }
                                ),
                                span { class: "message-timestamp", "{ts}" }
                            }
                        }
                    }
                }
            }
            if state.sending() {
                div { class: "message-row assistant",
                    div { class: "bubble assistant",
                        span { class: "shimmer-text", "Thinking…" }
                    }
                }
            }
        }
    }
}

#[component]
fn ChatComposer(
    state: ChatWidgetState,
    session: SessionStore,
    task_refresh: Signal<u64>,
) -> Element {
    let sending = state.sending();
    let input_value = state.input();

    rsx! {
        div { class: "composer chat-widget-composer",
            div { class: "composer-inner",
                textarea {
                    rows: "1",
                    placeholder: "Ask me to add, complete or list tasks...",
                    value: "{input_value}",
                    oninput: move |ev| state.set_input(ev.value()),
                    onkeydown: move |ev| {
                        if ev.key() == Key::Enter && !ev.modifiers().shift() {
                            ev.prevent_default();
                            state.send(session, task_refresh);
                        }
                    },
                    disabled: sending,
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: sending || input_value.trim().is_empty(),
                    onclick: move |_| state.send(session, task_refresh),
                    "Send"
                }
            }
        }
    }
}

#[component]
fn AssistantBubble(content: String) -> Element {
    let content_html = markdown_to_html(&content);
    let copy_payload = content.clone();
    let on_copy = move |_| {
        let raw = copy_payload.clone();
        spawn(async move {
            #[cfg(any(feature = "desktop", feature = "mobile"))]
            {
                if let Ok(mut cb) = arboard::Clipboard::new() {
                    let _ = cb.set_text(raw);
                }
            }
        });
    };

    rsx! {
        div { class: "bubble-controls",
            div { class: "actions",
                button { class: "action-btn", title: "Copy reply", onclick: on_copy, "Copy" }
            }
        }
        div { class: "md", dangerous_inner_html: "{content_html}" }
    }
}

// ============================================
// State
// ============================================

#[derive(Clone, Copy)]
struct ChatWidgetState {
    open: Signal<bool>,
    minimized: Signal<bool>,
    messages: Signal<Vec<ChatMessage>>,
    input: Signal<String>,
    sending: Signal<bool>,
    conversation_id: Signal<Option<i64>>,
    next_message_id: Signal<u64>,
}

impl PartialEq for ChatWidgetState {
    fn eq(&self, _: &Self) -> bool {
        false
    }
}

fn use_chat_widget_state() -> ChatWidgetState {
    ChatWidgetState {
        open: use_signal(|| false),
        minimized: use_signal(|| false),
        messages: use_signal(Vec::<ChatMessage>::new),
        input: use_signal(String::new),
        sending: use_signal(|| false),
        conversation_id: use_signal(|| None),
        next_message_id: use_signal(|| 1u64),
    }
}

impl ChatWidgetState {
    fn open(&self) -> bool {
        (self.open)()
    }
    fn set_open(&self, v: bool) {
        let mut open = self.open;
        open.set(v);
    }
    fn minimized(&self) -> bool {
        (self.minimized)()
    }
    fn set_minimized(&self, v: bool) {
        let mut minimized = self.minimized;
        minimized.set(v);
    }
    fn messages(&self) -> Vec<ChatMessage> {
        (self.messages)()
    }
    fn input(&self) -> String {
        (self.input)()
    }
    fn set_input(&self, v: String) {
        let mut input = self.input;
        input.set(v);
    }
    fn sending(&self) -> bool {
        (self.sending)()
    }

    fn push_message(&self, role: Role, content: String) {
        let mut next_id = self.next_message_id;
        let id = next_id();
        next_id.set(id + 1);

        let mut messages = self.messages;
        messages.with_mut(|msgs| {
            msgs.push(ChatMessage {
                id,
                role,
                content,
                created_at: Some(current_time()),
            });
        });
    }

    /// Forward the composer text to the assistant.
    ///
    /// Auth problems short-circuit into transcript entries before the user
    /// message is appended or any network call goes out: no token at all
    /// prompts a login, an unreadable token reports an authentication
    /// error. The composer keeps its draft in both cases.
    fn send(&self, session: SessionStore, task_refresh: Signal<u64>) {
        let text = self.input().trim().to_string();
        if text.is_empty() || self.sending() {
            return;
        }

        let token = match session.token().or_else(crate::session::stored_token) {
            Some(token) => token,
            None => {
                self.push_message(Role::Assistant, "Please log in to use chat".to_string());
                return;
            }
        };

        let user_id = match user_id_from_token(&token) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!("could not read user id from token: {}", err);
                self.push_message(
                    Role::Assistant,
                    "Authentication error. Please log in again.".to_string(),
                );
                return;
            }
        };

        self.push_message(Role::User, text.clone());
        self.set_input(String::new());

        let mut sending = self.sending;
        sending.set(true);

        let conversation = (self.conversation_id)();
        let state = *self;
        let mut task_refresh = task_refresh;
        spawn(async move {
            let client = ChatClient::new();
            match client.send(user_id, &text, conversation, Some(&token)).await {
                Ok(reply) => {
                    let mut conversation_id = state.conversation_id;
                    conversation_id.set(Some(reply.conversation_id));

                    let content = if reply.response.is_empty() {
                        "Message received".to_string()
                    } else {
                        reply.response.clone()
                    };
                    state.push_message(Role::Assistant, content);

                    if has_task_mutation(&reply.tool_calls) {
                        let next = task_refresh() + 1;
                        task_refresh.set(next);
                    }
                }
                Err(err) => {
                    tracing::warn!("chat send failed: {}", err);
                    let content = if err.is_network() {
                        format!(
                            "Failed to connect to the server. Make sure the backend is running on {}.",
                            client.base_url()
                        )
                    } else {
                        format!("Sorry, I encountered an error. {}", err)
                    };
                    state.push_message(Role::Assistant, content);
                }
            }

            let mut sending = state.sending;
            sending.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool_call(tool: &str) -> ToolCall {
        ToolCall {
            tool: tool.to_string(),
            parameters: json!({}),
        }
    }

    #[test]
    fn test_mutating_tools_trigger_refresh() {
        for tool in ["add_task", "complete_task", "delete_task", "update_task"] {
            assert!(has_task_mutation(&[tool_call(tool)]), "{tool} should refresh");
        }
    }

    #[test]
    fn test_listing_does_not_trigger_refresh() {
        assert!(!has_task_mutation(&[tool_call("list_tasks")]));
        assert!(!has_task_mutation(&[]));
    }

    #[test]
    fn test_mixed_tool_calls_trigger_refresh() {
        let calls = vec![tool_call("list_tasks"), tool_call("add_task")];
        assert!(has_task_mutation(&calls));
    }
}
