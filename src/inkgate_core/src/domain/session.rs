use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use super::{email::Email, user_id::UserId};

/// A signed session token as handed to the client.
#[derive(Debug, Clone)]
pub struct SessionToken {
    value: Secret<String>,
    expires_at: DateTime<Utc>,
}

impl SessionToken {
    pub fn new(value: Secret<String>, expires_at: DateTime<Utc>) -> Self {
        Self { value, expires_at }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl AsRef<Secret<String>> for SessionToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.value
    }
}

/// The decoded, signature-checked content of a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: UserId,
    pub session_version: i32,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// The caller resolved by the authorization gate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: UserId,
    #[serde(serialize_with = "serialize_email")]
    pub email: Email,
    pub is_verified: bool,
}

fn serialize_email<S: serde::Serializer>(email: &Email, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(email.as_ref().expose_secret())
}
