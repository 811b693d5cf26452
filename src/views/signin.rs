use crate::session::SessionStore;
use crate::views::shared::{BannerKind, StatusBanner};
use dioxus::events::{FormEvent, Key};
use dioxus::prelude::*;

#[component]
pub fn SignInView(session: SessionStore) -> Element {
    let mut email = use_signal(String::new);
    let password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let busy = use_signal(|| false);
    let mut sign_up_mode = use_signal(|| false);

    let submit = {
        let mut error = error;
        let mut busy = busy;
        move || {
            let email_value = email().trim().to_string();
            let password_value = password();
            if email_value.is_empty() || password_value.is_empty() || busy() {
                return;
            }

            busy.set(true);
            error.set(None);
            let registering = sign_up_mode();

            spawn(async move {
                let ok = if registering {
                    session.sign_up(&email_value, &password_value).await
                } else {
                    session.sign_in(&email_value, &password_value).await
                };

                if !ok {
                    let message = if registering {
                        "Failed to create account"
                    } else {
                        "Invalid email or password"
                    };
                    let mut error = error;
                    error.set(Some(message.to_string()));
                }
                let mut busy = busy;
                busy.set(false);
            });
        }
    };

    let submit_label = match (busy(), sign_up_mode()) {
        (true, true) => "Creating account...",
        (true, false) => "Signing in...",
        (false, true) => "Sign Up",
        (false, false) => "Sign In",
    };
    let mut submit_on_click = submit;
    let mut submit_on_enter = submit;

    rsx! {
        div { class: "auth-container",
            div { class: "auth-card",
                h1 { class: "auth-title", "TodoHub" }
                p { class: "text-muted auth-subtitle",
                    if sign_up_mode() {
                        "Create an account to get started"
                    } else {
                        "Sign in to manage your tasks"
                    }
                }

                if let Some(message) = error() {
                    StatusBanner { kind: BannerKind::Error, message }
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: "{email}",
                    autocomplete: "off",
                    oninput: move |ev| email.set(ev.value()),
                    autofocus: true,
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    oninput: {
                        let mut password = password;
                        move |ev: FormEvent| password.set(ev.value())
                    },
                    onkeydown: move |ev| {
                        if ev.key() == Key::Enter {
                            ev.prevent_default();
                            submit_on_enter();
                        }
                    },
                }

                button {
                    class: "btn btn-primary auth-submit",
                    r#type: "button",
                    disabled: busy() || email().trim().is_empty() || password().is_empty(),
                    onclick: move |_| submit_on_click(),
                    "{submit_label}"
                }
                button {
                    class: "btn-ghost auth-switch",
                    r#type: "button",
                    onclick: move |_| {
                        sign_up_mode.set(!sign_up_mode());
                        error.set(None);
                    },
                    if sign_up_mode() {
                        "Already have an account? Sign In"
                    } else {
                        "Don't have an account? Sign Up"
                    }
                }
            }
        }
    }
}
