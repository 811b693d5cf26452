use crate::session::SessionStore;
use crate::types::ThemeMode;
use dioxus::prelude::*;

#[component]
pub fn SettingsView(theme: Signal<ThemeMode>, session: SessionStore) -> Element {
    rsx! {
        div { class: "main-container",
            div { class: "settings-section",
                h3 { class: "section-title", "Display" }
                div { class: "theme-toggle",
                    button {
                        class: format_args!(
                            "theme-option {}",
                            if matches!(theme(), ThemeMode::Dark) { "active" } else { "" }
                        ),
                        r#type: "button",
                        onclick: move |_| theme.set(ThemeMode::Dark),
                        "Dark"
                    }
                    button {
                        class: format_args!(
                            "theme-option {}",
                            if matches!(theme(), ThemeMode::Light) { "active" } else { "" }
                        ),
                        r#type: "button",
                        onclick: move |_| theme.set(ThemeMode::Light),
                        "Light"
                    }
                }
            }
            div { class: "settings-section",
                h3 { class: "section-title", "Account" }
                if let Some(user) = session.user() {
                    div { class: "account-row",
                        span { class: "account-email", "{user.email}" }
                        button {
                            class: "btn",
                            r#type: "button",
                            onclick: move |_| session.sign_out(),
                            "Sign Out"
                        }
                    }
                } else {
                    p { class: "text-muted", "Not signed in." }
                }
            }
        }
    }
}
