//! Root Dioxus application component
//!
//! Holds the shared application state and the capture, recognition, and
//! chat orchestration that the UI components call into.

use crate::capture;
use crate::chat;
use crate::hotkey;
use crate::ocr::{self, OcrError};
use crate::storage::settings::{load_settings, save_settings, AppSettings};
use crate::storage::StorageError;
use crate::types::Region;
use crate::ui::components::Notice;
use crate::ui::{QueryView, SelectionOverlay};
use dioxus::desktop::{use_window, DesktopContext};
use dioxus::prelude::*;
use std::time::Duration;

/// Delay between hiding the window and grabbing the screen, so the
/// compositor has dropped the overlay before the pixels are read.
const CAPTURE_SETTLE: Duration = Duration::from_millis(150);

/// Which screen the window is currently showing
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum View {
    /// The question and answer panel
    Query,
    /// The fullscreen region selection overlay
    Overlay,
}

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub settings: Signal<AppSettings>,
    /// OCR access token, fetched at startup and again after the
    /// credentials change
    pub access_token: Signal<Option<String>>,
    pub question: Signal<String>,
    pub answer: Signal<String>,
    pub view: Signal<View>,
    pub show_settings: Signal<bool>,
    pub notice: Signal<Option<Notice>>,
    /// True while a capture, recognition, or chat request is running
    pub busy: Signal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        tracing::info!("AppState initialized");
        let settings = load_settings();

        Self {
            settings: Signal::new(settings),
            access_token: Signal::new(None),
            question: Signal::new(String::new()),
            answer: Signal::new(String::new()),
            view: Signal::new(View::Query),
            show_settings: Signal::new(false),
            notice: Signal::new(None),
            busy: Signal::new(false),
        }
    }

    /// Fetch a fresh OCR access token in the background
    pub fn refresh_token(&self) {
        let ocr_settings = self.settings.peek().baidu_ocr.clone();
        if !ocr_settings.is_configured() {
            tracing::info!("OCR credentials not configured, skipping token fetch");
            return;
        }

        let mut access_token = self.access_token;
        let mut notice = self.notice;
        spawn(async move {
            match ocr::fetch_access_token(&ocr_settings).await {
                Ok(token) => {
                    tracing::info!("Fetched OCR access token");
                    access_token.set(Some(token));
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch OCR access token: {}", e);
                    access_token.set(None);
                    notice.set(Some(Notice::error(format!(
                        "Failed to fetch the OCR access token: {}",
                        e
                    ))));
                }
            }
        });
    }

    /// Switch the window into region selection mode
    pub fn begin_capture(&self, desktop: &DesktopContext) {
        if *self.busy.peek() || *self.view.peek() == View::Overlay || *self.show_settings.peek() {
            return;
        }

        let mut notice = self.notice;
        notice.set(None);

        desktop.window.set_minimized(false);
        desktop.set_fullscreen(true);
        desktop.window.set_focus();

        let mut view = self.view;
        view.set(View::Overlay);
    }

    /// Leave selection mode without capturing anything
    pub fn cancel_capture(&self, desktop: &DesktopContext) {
        desktop.set_fullscreen(false);
        desktop.window.set_focus();

        let mut view = self.view;
        view.set(View::Query);
    }

    /// Capture the selected region and run it through text recognition
    ///
    /// The window is hidden for the grab itself so the screenshot shows
    /// what the overlay was covering, then restored and refocused. On
    /// success the recognized text replaces the question box; on failure
    /// the question box is left alone.
    pub fn finish_capture(&self, desktop: &DesktopContext, region: Region) {
        let desktop = desktop.clone();
        let settings = self.settings;
        let access_token = self.access_token;
        let mut view = self.view;
        let mut busy = self.busy;
        let mut question = self.question;
        let mut notice = self.notice;

        desktop.window.set_visible(false);
        busy.set(true);

        spawn(async move {
            tokio::time::sleep(CAPTURE_SETTLE).await;
            let captured = capture::capture_region_png(region).await;

            desktop.set_fullscreen(false);
            desktop.window.set_visible(true);
            desktop.window.set_minimized(false);
            desktop.window.set_focus();
            view.set(View::Query);

            let png = match captured {
                Ok(png) => png,
                Err(e) => {
                    tracing::warn!("Screen capture failed: {}", e);
                    notice.set(Some(Notice::error(format!("Screen capture failed: {}", e))));
                    busy.set(false);
                    return;
                }
            };

            match recognize(settings, access_token, &png).await {
                Ok(text) => question.set(text),
                Err(OcrError::NotConfigured) => {
                    notice.set(Some(Notice::info(
                        "Configure the OCR API key and secret key in Settings first",
                    )));
                }
                Err(e) => {
                    tracing::warn!("Text recognition failed: {}", e);
                    notice.set(Some(Notice::error(format!(
                        "Text recognition failed: {}",
                        e
                    ))));
                }
            }

            busy.set(false);
        });
    }

    /// Send the question text to the chat endpoint
    pub fn send_question(&self) {
        if *self.busy.peek() {
            return;
        }

        let mut notice = self.notice;

        let text = self.question.peek().trim().to_string();
        if text.is_empty() {
            notice.set(Some(Notice::info("Enter a question first")));
            return;
        }

        let gpt_settings = self.settings.peek().gpt.clone();
        if gpt_settings.api_key.trim().is_empty() {
            notice.set(Some(Notice::info(
                "Configure the chat API key in Settings first",
            )));
            return;
        }

        let mut busy = self.busy;
        let mut answer = self.answer;

        busy.set(true);
        answer.set("Thinking...".to_string());

        spawn(async move {
            let messages = chat::build_exchange(&text);
            match chat::ask(&gpt_settings, &messages).await {
                Ok(reply) => answer.set(reply),
                Err(e) => {
                    tracing::warn!("Chat request failed: {}", e);
                    answer.set(String::new());
                    notice.set(Some(Notice::error(format!("{}", e))));
                }
            }
            busy.set(false);
        });
    }

    /// Persist edited settings and refresh the OCR token
    pub fn apply_settings(&self, mut updated: AppSettings) -> Result<(), StorageError> {
        updated.validate();
        save_settings(&updated)?;

        let mut settings = self.settings;
        settings.set(updated);

        let mut show_settings = self.show_settings;
        show_settings.set(false);

        let mut notice = self.notice;
        notice.set(Some(Notice::info("Settings saved")));

        // Credentials may have changed, so the old token is stale
        let mut access_token = self.access_token;
        access_token.set(None);
        self.refresh_token();

        Ok(())
    }

    /// Apply and persist the always-on-top preference
    pub fn set_topmost(&self, desktop: &DesktopContext, topmost: bool) {
        desktop.window.set_always_on_top(topmost);

        let mut settings = self.settings;
        settings.write().window.topmost = topmost;

        let current = self.settings.peek().clone();
        if let Err(e) = save_settings(&current) {
            tracing::warn!("Failed to persist window preference: {}", e);
        }
    }
}

/// Recognize PNG bytes, fetching an access token on demand
async fn recognize(
    settings: Signal<AppSettings>,
    mut access_token: Signal<Option<String>>,
    png: &[u8],
) -> Result<String, OcrError> {
    let existing = access_token.peek().clone();
    let token = match existing {
        Some(token) => token,
        None => {
            let ocr_settings = settings.peek().baidu_ocr.clone();
            let token = ocr::fetch_access_token(&ocr_settings).await?;
            access_token.set(Some(token.clone()));
            token
        }
    };

    ocr::recognize_png(&token, png).await
}

#[component]
pub fn App() -> Element {
    let state = use_context_provider(AppState::new);
    let desktop = use_window();

    // Apply the persisted window preference and fetch the first token
    {
        let state = state.clone();
        let desktop = desktop.clone();
        use_effect(move || {
            desktop
                .window
                .set_always_on_top(state.settings.peek().window.topmost);
            state.refresh_token();
        });
    }

    // The global hotkey switches into capture mode from anywhere
    {
        let state = state.clone();
        let desktop = desktop.clone();
        use_effect(move || {
            let state = state.clone();
            let desktop = desktop.clone();
            spawn(async move {
                let mut triggers = hotkey::start_listener();
                while triggers.recv().await.is_some() {
                    state.begin_capture(&desktop);
                }
            });
        });
    }

    rsx! {
        match *state.view.read() {
            View::Overlay => rsx! { SelectionOverlay {} },
            View::Query => rsx! { QueryView {} },
        }
    }
}
