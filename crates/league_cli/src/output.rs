//! JSON response envelope written to stdout/stderr.

use league_core::ErrorKind;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Response<T: Serialize> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> Self {
        Self { status: "success", data: Some(data), message: None, error_kind: None }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Response<()> {
    pub fn error(message: String, error_kind: Option<ErrorKind>) -> Self {
        Self { status: "error", data: None, message: Some(message), error_kind }
    }
}

pub fn print_json<T: Serialize>(response: &Response<T>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}
