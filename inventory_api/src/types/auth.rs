use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// The signed-in user as reported by `/auth/login`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    /// Role name from the server. Defaults to `USER` when the login payload omits it.
    pub role: String,
}
