//! Notice dialog
//!
//! Modal message box for errors and warnings surfaced by the capture,
//! recognition, and chat flows.

use crate::app::AppState;
use dioxus::prelude::*;

/// A user-facing dialog message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub is_error: bool,
}

impl Notice {
    /// A failure the user should know about
    pub fn error(body: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            body: body.into(),
            is_error: true,
        }
    }

    /// Anything the user should read that is not a failure
    pub fn info(body: impl Into<String>) -> Self {
        Self {
            title: "Notice".to_string(),
            body: body.into(),
            is_error: false,
        }
    }
}

#[component]
pub fn NoticeDialog() -> Element {
    let app_state = use_context::<AppState>();
    let mut notice_signal = app_state.notice;

    let Some(notice) = app_state.notice.read().clone() else {
        return rsx! {};
    };

    // Pre-compute the icon treatment to avoid type inference issues in rsx!
    let icon_style = if notice.is_error {
        "background: rgba(176,84,62,0.12); border: 1px solid rgba(176,84,62,0.2); color: var(--error);"
    } else {
        "background: rgba(196,153,59,0.12); border: 1px solid rgba(196,153,59,0.2); color: var(--accent-primary);"
    };

    rsx! {
        div {
            class: "dialog-backdrop animate-fade-in",
            onclick: move |_| notice_signal.set(None),

            div {
                class: "dialog-card animate-scale-in",
                onclick: move |evt| evt.stop_propagation(),

                div {
                    class: "dialog-header flex items-center gap-3",

                    div {
                        class: "dialog-icon",
                        style: "{icon_style}",
                        svg {
                            class: "w-5 h-5",
                            view_box: "0 0 24 24",
                            fill: "none",
                            stroke: "currentColor",
                            stroke_width: "2",
                            stroke_linecap: "round",
                            stroke_linejoin: "round",
                            circle { cx: "12", cy: "12", r: "10" }
                            line { x1: "12", y1: "8", x2: "12", y2: "12" }
                            line { x1: "12", y1: "16", x2: "12.01", y2: "16" }
                        }
                    }

                    h2 { class: "dialog-title", "{notice.title}" }
                }

                p { class: "dialog-body", "{notice.body}" }

                div {
                    class: "dialog-footer",
                    button {
                        class: "btn-primary",
                        onclick: move |_| notice_signal.set(None),
                        "OK"
                    }
                }
            }
        }
    }
}
