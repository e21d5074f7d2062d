//! Credential provider seam: where the client reads and writes bearer tokens.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Access token plus the optional refresh token issued alongside it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Source of bearer credentials for outgoing requests.
///
/// The client reads the access token before every request, stores new tokens
/// after login or refresh, and clears them when the server rejects the session.
pub trait CredentialProvider: Send + Sync {
    fn access_token(&self) -> Option<String>;

    fn refresh_token(&self) -> Option<String>;

    /// Stores a new token pair. A `None` refresh token keeps the one already stored.
    fn store(&self, tokens: &AuthTokens);

    fn clear(&self);
}

/// Process-local credential store. Used by tests and short-lived tools.
#[derive(Default)]
pub struct MemoryCredentials {
    tokens: Mutex<Option<AuthTokens>>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds the given tokens.
    pub fn with_tokens(tokens: AuthTokens) -> Self {
        Self {
            tokens: Mutex::new(Some(tokens)),
        }
    }
}

impl CredentialProvider for MemoryCredentials {
    fn access_token(&self) -> Option<String> {
        let tokens = self.tokens.lock().unwrap_or_else(|e| e.into_inner());
        tokens.as_ref().map(|t| t.token.clone())
    }

    fn refresh_token(&self) -> Option<String> {
        let tokens = self.tokens.lock().unwrap_or_else(|e| e.into_inner());
        tokens.as_ref().and_then(|t| t.refresh_token.clone())
    }

    fn store(&self, tokens: &AuthTokens) {
        let mut current = self.tokens.lock().unwrap_or_else(|e| e.into_inner());
        let refresh_token = tokens
            .refresh_token
            .clone()
            .or_else(|| current.as_ref().and_then(|t| t.refresh_token.clone()));
        *current = Some(AuthTokens {
            token: tokens.token.clone(),
            refresh_token,
        });
    }

    fn clear(&self) {
        *self.tokens.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_has_no_tokens() {
        let creds = MemoryCredentials::new();
        assert_eq!(creds.access_token(), None);
        assert_eq!(creds.refresh_token(), None);
    }

    #[test]
    fn store_keeps_previous_refresh_token() {
        let creds = MemoryCredentials::with_tokens(AuthTokens {
            token: "a1".to_string(),
            refresh_token: Some("r1".to_string()),
        });
        creds.store(&AuthTokens {
            token: "a2".to_string(),
            refresh_token: None,
        });
        assert_eq!(creds.access_token().as_deref(), Some("a2"));
        assert_eq!(creds.refresh_token().as_deref(), Some("r1"));
    }

    #[test]
    fn clear_removes_both_tokens() {
        let creds = MemoryCredentials::with_tokens(AuthTokens {
            token: "a1".to_string(),
            refresh_token: Some("r1".to_string()),
        });
        creds.clear();
        assert_eq!(creds.access_token(), None);
        assert_eq!(creds.refresh_token(), None);
    }
}
