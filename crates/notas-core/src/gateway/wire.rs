//! Request and response bodies for the auth endpoints and error payloads.

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(crate) struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for Credentials<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
}

/// What the service said after a successful registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterConfirmation {
    pub message: Option<String>,
}

impl RegisterConfirmation {
    /// Registration bodies are free-form; pick a message out if there is one.
    pub(crate) fn from_body(body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(ApiErrorBody::into_message);
        Self { message }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

impl ApiErrorBody {
    fn into_message(self) -> Option<String> {
        self.message
            .or(self.msg)
            .or(self.error_description)
            .or(self.error)
            .map(|message| message.trim().to_string())
            .filter(|message| !message.is_empty())
    }
}

/// Message the server put in an error body, if any.
pub(crate) fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(ApiErrorBody::into_message)
}

const EXCERPT_CHARS: usize = 180;

/// Leading slice of a response body, small enough to carry in an error.
pub(crate) fn excerpt(body: &str) -> String {
    body.trim().chars().take(EXCERPT_CHARS).collect()
}

/// Human-readable description of a failed response.
pub(crate) fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Some(message) = server_message(body) {
        return message;
    }

    let trimmed = excerpt(body);
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string)
    } else {
        trimmed
    }
}
