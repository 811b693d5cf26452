use crate::session::{SessionStore, use_session_store};
use crate::theme::theme_css;
use crate::types::ThemeMode;
use crate::views::{DashboardView, FloatingChat, SettingsView, SignInView};
use dioxus::prelude::*;

const TODOHUB_CSS: Asset = asset!("/assets/todohub.css");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AppTab {
    Dashboard,
    Settings,
}

#[component]
pub fn App() -> Element {
    let session = use_session_store();
    let active_tab = use_signal(|| AppTab::Dashboard);
    let theme = use_signal(|| ThemeMode::Dark);
    let task_refresh = use_signal(|| 0u64);

    rsx! {
        ThemeStyles { theme }
        if session.restoring() {
            RestoreScreen {}
        } else {
            if !session.is_signed_in() {
                SignInView { session }
            } else {
                AppHeader { active_tab }
                TabPanels { active_tab, session, theme, task_refresh }
            }
            // Mounted above the auth gate; signed-out users get the
            // login prompt pane
            FloatingChat { session, task_refresh }
        }
    }
}

#[component]
fn ThemeStyles(theme: Signal<ThemeMode>) -> Element {
    let css = theme_css(theme());
    rsx! {
        document::Link { rel: "stylesheet", href: TODOHUB_CSS }
        style { dangerous_inner_html: "{css}" }
    }
}

#[component]
fn AppHeader(active_tab: Signal<AppTab>) -> Element {
    rsx! {
        div { class: "header no-divider",
            div { class: "header-content",
                h1 { class: "header-wordmark", "TodoHub" }
                TabNavigation { active_tab }
            }
        }
    }
}

#[component]
fn TabPanels(
    active_tab: Signal<AppTab>,
    session: SessionStore,
    theme: Signal<ThemeMode>,
    task_refresh: Signal<u64>,
) -> Element {
    rsx! {
        div { class: "tab-panels",
            TabPanel {
                active_tab,
                tab: AppTab::Dashboard,
                children: rsx!( DashboardView { session, task_refresh } ),
            }
            TabPanel {
                active_tab,
                tab: AppTab::Settings,
                children: rsx!( SettingsView { theme, session } ),
            }
        }
    }
}

#[component]
fn TabPanel(active_tab: Signal<AppTab>, tab: AppTab, children: Element) -> Element {
    let is_active = active_tab() == tab;
    let class_suffix = if is_active { "active" } else { "" };
    rsx! {
        div {
            class: format_args!("tab-panel {}", class_suffix),
            aria_hidden: (!is_active).to_string(),
            {children}
        }
    }
}

#[component]
fn TabNavigation(active_tab: Signal<AppTab>) -> Element {
    rsx! {
        div { class: "tabs",
            TabButton { active_tab, tab: AppTab::Dashboard, label: "Dashboard" }
            TabButton { active_tab, tab: AppTab::Settings, label: "Settings" }
        }
    }
}

#[component]
fn TabButton(active_tab: Signal<AppTab>, tab: AppTab, label: &'static str) -> Element {
    let mut active_tab = active_tab;
    let class = if active_tab() == tab {
        "tab active"
    } else {
        "tab"
    };
    rsx! {
        h1 {
            class: class,
            onclick: move |_| active_tab.set(tab),
            "{label}"
        }
    }
}

#[component]
fn RestoreScreen() -> Element {
    rsx! {
        div { class: "splash-overlay", aria_hidden: "true",
            div { class: "splash-content",
                span { class: "splash-wordmark shimmer-text", "TodoHub" }
            }
        }
    }
}
