//! Baidu OCR client
//!
//! Exchanges the configured credentials for an OAuth access token and
//! sends captured images to the general text recognition endpoint.

use crate::storage::settings::OcrSettings;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const TOKEN_URL: &str = "https://aip.baidubce.com/oauth/2.0/token";
const RECOGNIZE_URL: &str = "https://aip.baidubce.com/rest/2.0/ocr/v1/general_basic";

const TOKEN_TIMEOUT: Duration = Duration::from_secs(10);
const RECOGNIZE_TIMEOUT: Duration = Duration::from_secs(30);

/// OCR errors
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR credentials are not configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("service returned {status}: {message}")]
    Http {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("token endpoint returned no access token")]
    NoToken,
    #[error("recognition service error {code}: {message}")]
    Service { code: i64, message: String },
    #[error("recognition response contained no text results")]
    NoResult,
    #[error("no text was recognized in the selected region")]
    NoText,
    #[error("unexpected response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WordsItem {
    words: String,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    words_result: Option<Vec<WordsItem>>,
    error_code: Option<i64>,
    error_msg: Option<String>,
}

/// Fetch an OAuth access token for the configured credentials
pub async fn fetch_access_token(settings: &OcrSettings) -> Result<String, OcrError> {
    if !settings.is_configured() {
        return Err(OcrError::NotConfigured);
    }

    let client = reqwest::Client::builder().timeout(TOKEN_TIMEOUT).build()?;

    let response = client
        .get(TOKEN_URL)
        .query(&[
            ("grant_type", "client_credentials"),
            ("client_id", settings.api_key.as_str()),
            ("client_secret", settings.secret_key.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::warn!("Token request failed with status {}", status);
        return Err(OcrError::Http {
            status,
            message: body,
        });
    }

    parse_token(&body)
}

/// Recognize text in a PNG image using a previously fetched token
///
/// Returns the recognized lines joined with single spaces.
pub async fn recognize_png(token: &str, png: &[u8]) -> Result<String, OcrError> {
    let encoded = STANDARD.encode(png);

    let client = reqwest::Client::builder()
        .timeout(RECOGNIZE_TIMEOUT)
        .build()?;

    let response = client
        .post(RECOGNIZE_URL)
        .query(&[("access_token", token)])
        .form(&[("image", encoded.as_str())])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::warn!("Recognition request failed with status {}", status);
        return Err(OcrError::Http {
            status,
            message: body,
        });
    }

    parse_recognition(&body)
}

fn parse_token(body: &str) -> Result<String, OcrError> {
    let parsed: TokenResponse = serde_json::from_str(body)?;
    parsed.access_token.ok_or(OcrError::NoToken)
}

fn parse_recognition(body: &str) -> Result<String, OcrError> {
    let parsed: RecognizeResponse = serde_json::from_str(body)?;

    if let Some(code) = parsed.error_code {
        return Err(OcrError::Service {
            code,
            message: parsed.error_msg.unwrap_or_default(),
        });
    }

    let items = parsed.words_result.ok_or(OcrError::NoResult)?;
    let words: Vec<String> = items.into_iter().map(|item| item.words).collect();
    let text = words.join(" ");

    if text.trim().is_empty() {
        return Err(OcrError::NoText);
    }

    Ok(text)
}
