//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or malformed URL).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The API rejected the bearer token and no refresh was possible.
    /// Stored credentials have been cleared by the time this is returned.
    #[error("Not authenticated")]
    Unauthorized,
    /// A token refresh was needed but no refresh token is stored.
    #[error("No refresh token available")]
    MissingRefreshToken,
    /// The response body was not valid JSON or lacked a required field.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
}

impl Error {
    /// Returns the human-readable message the server put in an error body,
    /// if any. The API uses either `{"data": "..."}` or `{"message": "..."}`.
    pub fn server_message(&self) -> Option<String> {
        let Error::HttpStatus { body, .. } = self else {
            return None;
        };
        let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
        ["data", "message"]
            .iter()
            .find_map(|key| parsed.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string)
    }

    /// True for failures that mean the session is gone and the user must log in again.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Error::Unauthorized | Error::MissingRefreshToken)
    }
}
