use serde::{Deserialize, Serialize};
use std::fmt;
use token_authority::secret::{ExposeSecret, SecretString};
use token_authority::Claims;

/// Stored user record.
///
/// Never serialized directly; handlers return [`Principal`].
#[derive(Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

impl User {
    #[must_use]
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.id.clone(),
            username: self.username.clone(),
        }
    }
}

/// The authenticated subject as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub username: String,
}

/// Message resource owned by the principal that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: SecretString,
}

impl CredentialsRequest {
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub text: String,
}

/// Login response carrying the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Echo of the verified claims from a gated write.
#[derive(Debug, Clone, Serialize)]
pub struct PostCreatedResponse {
    pub message: String,
    #[serde(rename = "authData")]
    pub auth_data: Claims,
}
