//! Main question and answer panel

use crate::app::AppState;
use crate::ui::components::NoticeDialog;
use crate::ui::settings::SettingsPanel;
use dioxus::desktop::use_window;
use dioxus::prelude::*;

#[component]
pub fn QueryView() -> Element {
    let state = use_context::<AppState>();
    let desktop = use_window();

    let busy = *state.busy.read();
    let topmost = state.settings.read().window.topmost;
    let show_settings = *state.show_settings.read();
    let answer = state.answer.read().clone();
    let mut question = state.question;
    let mut show_settings_signal = state.show_settings;

    let handle_capture = {
        let state = state.clone();
        let desktop = desktop.clone();
        move |_| state.begin_capture(&desktop)
    };

    let handle_send = {
        let state = state.clone();
        move |_| state.send_question()
    };

    let handle_clear = {
        let mut answer_signal = state.answer;
        move |_| answer_signal.set(String::new())
    };

    let handle_topmost = {
        let state = state.clone();
        let desktop = desktop.clone();
        move |_| {
            let enable = !state.settings.peek().window.topmost;
            state.set_topmost(&desktop, enable);
        }
    };

    let handle_keydown = {
        let state = state.clone();
        move |evt: KeyboardEvent| {
            if evt.key() == Key::Enter && !evt.modifiers().contains(Modifiers::SHIFT) {
                evt.prevent_default();
                state.send_question();
            }
        }
    };

    // Pre-compute dynamic attribute values to avoid type inference issues in rsx!
    let capture_class = if busy {
        "btn-primary opacity-50 cursor-not-allowed"
    } else {
        "btn-primary"
    };
    let send_class = if busy {
        "btn-ghost opacity-50 cursor-not-allowed"
    } else {
        "btn-ghost"
    };
    let checkbox_style = if topmost {
        "background: var(--accent-primary); border-color: var(--accent-primary);"
    } else {
        "border-color: var(--border-medium);"
    };
    let answer_placeholder = answer.is_empty() && !busy;

    rsx! {
        div {
            class: "app-shell",

            // Toolbar
            div {
                class: "toolbar flex items-center gap-2",

                button {
                    class: "{capture_class}",
                    disabled: busy,
                    title: "Select a screen region to recognize (Alt+1)",
                    onclick: handle_capture,
                    svg {
                        class: "w-4 h-4",
                        view_box: "0 0 24 24",
                        fill: "none",
                        stroke: "currentColor",
                        stroke_width: "2",
                        stroke_linecap: "round",
                        stroke_linejoin: "round",
                        path { d: "M6.13 1L6 16a2 2 0 0 0 2 2h15" }
                        path { d: "M1 6.13L16 6a2 2 0 0 1 2 2v15" }
                    }
                    "Capture"
                }

                button {
                    class: "{send_class}",
                    disabled: busy,
                    title: "Send the question (Enter)",
                    onclick: handle_send,
                    svg {
                        class: "w-4 h-4",
                        view_box: "0 0 24 24",
                        fill: "none",
                        stroke: "currentColor",
                        stroke_width: "2",
                        stroke_linecap: "round",
                        stroke_linejoin: "round",
                        line { x1: "12", y1: "19", x2: "12", y2: "5" }
                        polyline { points: "5 12 12 5 19 12" }
                    }
                    "Send"
                }

                button {
                    class: "{send_class}",
                    disabled: busy,
                    title: "Clear the answer panel",
                    onclick: handle_clear,
                    svg {
                        class: "w-4 h-4",
                        view_box: "0 0 24 24",
                        fill: "none",
                        stroke: "currentColor",
                        stroke_width: "2",
                        stroke_linecap: "round",
                        stroke_linejoin: "round",
                        line { x1: "18", y1: "6", x2: "6", y2: "18" }
                        line { x1: "6", y1: "6", x2: "18", y2: "18" }
                    }
                    "Clear"
                }

                div { class: "flex-1" }

                // Stay-on-top toggle
                button {
                    class: "toggle-row flex items-center gap-2",
                    title: "Keep this window above all others",
                    onclick: handle_topmost,
                    div {
                        class: "toggle-box",
                        style: "{checkbox_style}",
                        if topmost {
                            svg {
                                class: "w-3 h-3",
                                style: "color: #F2EDE7;",
                                view_box: "0 0 24 24",
                                fill: "none",
                                stroke: "currentColor",
                                stroke_width: "3",
                                stroke_linecap: "round",
                                stroke_linejoin: "round",
                                polyline { points: "20 6 9 17 4 12" }
                            }
                        }
                    }
                    span { class: "toggle-label", "Stay on top" }
                }

                button {
                    class: "btn-icon",
                    title: "Settings",
                    onclick: move |_| show_settings_signal.set(true),
                    svg {
                        class: "w-4 h-4",
                        view_box: "0 0 24 24",
                        fill: "none",
                        stroke: "currentColor",
                        stroke_width: "2",
                        stroke_linecap: "round",
                        stroke_linejoin: "round",
                        line { x1: "4", y1: "21", x2: "4", y2: "14" }
                        line { x1: "4", y1: "10", x2: "4", y2: "3" }
                        line { x1: "12", y1: "21", x2: "12", y2: "12" }
                        line { x1: "12", y1: "8", x2: "12", y2: "3" }
                        line { x1: "20", y1: "21", x2: "20", y2: "16" }
                        line { x1: "20", y1: "12", x2: "20", y2: "3" }
                        line { x1: "1", y1: "14", x2: "7", y2: "14" }
                        line { x1: "9", y1: "8", x2: "15", y2: "8" }
                        line { x1: "17", y1: "16", x2: "23", y2: "16" }
                    }
                }
            }

            // Question
            span { class: "panel-label", "Question" }
            textarea {
                class: "question-box custom-scrollbar",
                placeholder: "Capture a region or type a question...",
                value: "{question}",
                disabled: busy,
                oninput: move |evt| question.set(evt.value()),
                onkeydown: handle_keydown,
            }

            // Answer
            span { class: "panel-label", "Answer" }
            div {
                class: "answer-panel custom-scrollbar",
                if answer_placeholder {
                    span { class: "answer-placeholder", "The answer will appear here." }
                } else {
                    "{answer}"
                }
            }

            p {
                class: "hint-line",
                "Enter to send, Shift+Enter for a new line. Alt+1 captures a region."
            }

            NoticeDialog {}

            if show_settings {
                SettingsPanel {}
            }
        }
    }
}
