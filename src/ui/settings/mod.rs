#![allow(non_snake_case)]

//! Settings panel
//!
//! Modal editor for the OCR credentials and the chat endpoint. Saving
//! persists the configuration and refreshes the OCR access token.

use crate::app::AppState;
use crate::ui::components::Notice;
use dioxus::prelude::*;

pub fn SettingsPanel() -> Element {
    let state = use_context::<AppState>();
    let mut draft = use_signal(|| state.settings.peek().clone());
    let mut show_settings = state.show_settings;
    let mut notice = state.notice;

    let current = draft.read().clone();

    let handle_save = {
        let state = state.clone();
        move |_| {
            let updated = draft.peek().clone();
            if let Err(e) = state.apply_settings(updated) {
                tracing::error!("Failed to save settings: {}", e);
                notice.set(Some(Notice::error(format!("Failed to save settings: {}", e))));
            }
        }
    };

    rsx! {
        div {
            class: "dialog-backdrop animate-fade-in",

            div {
                class: "settings-card animate-scale-in",

                h2 { class: "dialog-title", "Settings" }

                // OCR credentials
                div {
                    class: "settings-section",
                    h3 { class: "settings-heading", "Baidu OCR" }

                    Field {
                        label: "API key",
                        value: current.baidu_ocr.api_key,
                        placeholder: "API key from the Baidu AI console",
                        secret: true,
                        oninput: move |value| draft.write().baidu_ocr.api_key = value,
                    }
                    Field {
                        label: "Secret key",
                        value: current.baidu_ocr.secret_key,
                        placeholder: "Secret key from the Baidu AI console",
                        secret: true,
                        oninput: move |value| draft.write().baidu_ocr.secret_key = value,
                    }
                    p { class: "field-hint", "Used to fetch the text recognition access token." }
                }

                // Chat endpoint
                div {
                    class: "settings-section",
                    h3 { class: "settings-heading", "Chat endpoint" }

                    Field {
                        label: "API URL",
                        value: current.gpt.api_url,
                        placeholder: "https://.../v1/chat/completions",
                        oninput: move |value| draft.write().gpt.api_url = value,
                    }
                    Field {
                        label: "API key",
                        value: current.gpt.api_key,
                        placeholder: "Bearer token for the endpoint",
                        secret: true,
                        oninput: move |value| draft.write().gpt.api_key = value,
                    }
                    Field {
                        label: "Model",
                        value: current.gpt.model,
                        placeholder: "gpt-3.5-turbo",
                        oninput: move |value| draft.write().gpt.model = value,
                    }
                    p { class: "field-hint", "Any OpenAI-compatible chat completion endpoint works." }
                }

                div {
                    class: "dialog-footer flex gap-3",
                    button {
                        class: "btn-ghost flex-1",
                        onclick: move |_| show_settings.set(false),
                        "Cancel"
                    }
                    button {
                        class: "btn-primary flex-1",
                        onclick: handle_save,
                        "Save"
                    }
                }
            }
        }
    }
}

#[component]
fn Field(
    label: String,
    value: String,
    placeholder: String,
    oninput: EventHandler<String>,
    #[props(default = false)] secret: bool,
) -> Element {
    let input_type = if secret { "password" } else { "text" };

    rsx! {
        div {
            class: "field-row",
            label { class: "field-label", "{label}" }
            input {
                r#type: "{input_type}",
                class: "field-input",
                value: "{value}",
                placeholder: "{placeholder}",
                oninput: move |evt| oninput.call(evt.value()),
            }
        }
    }
}
