use crate::types::ThemeMode;

pub fn theme_css(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Dark => DARK_THEME,
        ThemeMode::Light => LIGHT_THEME,
    }
}

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #0f1115;
    --color-bg-secondary: #161a22;
    --color-bg-overlay: rgba(8, 10, 14, 0.82);
    --color-text-primary: #f3f4f6;
    --color-text-secondary: #d5d8df;
    --color-text-muted: #9aa1ad;
    --color-border: #2c3240;
    --color-surface-muted: #1d222d;
    --color-input-border: #343b4a;
    --color-input-bg: #12151c;
    --color-accent-primary: #6366f1;
    --color-accent-hover: #4f52d9;
    --color-chat-user-bg: #6366f1;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #1d222d;
    --color-chat-assistant-text: #f3f4f6;
    --color-task-card-border: #2c3240;
    --color-task-card-bg: #161a22;
    --color-task-card-done: #12151c;
    --color-timestamp: #7c8392;
    --color-success-bg: rgba(34, 197, 94, 0.16);
    --color-success-text: #4ade80;
    --color-error-bg: rgba(239, 68, 68, 0.16);
    --color-error-text: #f87171;
    --color-priority-low: #38bdf8;
    --color-priority-medium: #fbbf24;
    --color-priority-high: #f87171;
    --color-header-fade: rgba(15, 17, 21, 0.88);
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.header { background: var(--color-bg-primary); }
.btn:hover,
.btn-ghost:hover { background: var(--color-surface-muted); }
.composer textarea,
.composer input { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-input-border); }
.composer textarea:focus,
.composer input:focus { border-color: var(--color-accent-primary); }
.task-card.completed { background: var(--color-task-card-done); }
"#;

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #f7f8fb;
    --color-bg-secondary: #ffffff;
    --color-bg-overlay: rgba(247, 248, 251, 0.9);
    --color-text-primary: #1c2030;
    --color-text-secondary: #333a4d;
    --color-text-muted: #6b7280;
    --color-border: #d8dce5;
    --color-surface-muted: #eceef4;
    --color-input-border: #c6ccd8;
    --color-input-bg: #ffffff;
    --color-accent-primary: #6366f1;
    --color-accent-hover: #4f52d9;
    --color-chat-user-bg: #6366f1;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #eceef4;
    --color-chat-assistant-text: #1c2030;
    --color-task-card-border: #d8dce5;
    --color-task-card-bg: #ffffff;
    --color-task-card-done: #f0f1f6;
    --color-timestamp: #8b90a0;
    --color-success-bg: #dcfce7;
    --color-success-text: #15803d;
    --color-error-bg: #fee2e2;
    --color-error-text: #b91c1c;
    --color-priority-low: #0284c7;
    --color-priority-medium: #b45309;
    --color-priority-high: #b91c1c;
    --color-header-fade: rgba(247, 248, 251, 0.92);
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.header { background: var(--color-bg-primary); }
.btn { color: var(--color-text-primary); }
.btn:hover,
.btn-ghost:hover { background: var(--color-surface-muted); }
.composer textarea,
.composer input { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-input-border); }
.composer textarea:focus,
.composer input:focus { border-color: var(--color-accent-primary); }
.task-card.completed { background: var(--color-task-card-done); }
"#;
