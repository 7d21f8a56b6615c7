use chrono::{DateTime, Utc};
use inkgate_core::{SessionClaims, SessionToken, SessionTokenError, SessionTokenService, User, UserId};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct JwtSessionConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtSessionConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

/// HS256 session tokens carrying the user id and session version.
#[derive(Clone)]
pub struct JwtSessionTokens {
    config: JwtSessionConfig,
    validation: Validation,
}

impl JwtSessionTokens {
    pub fn new(config: JwtSessionConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);
        Self { config, validation }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
    ver: i32,
}

fn timestamp(seconds: i64) -> Result<DateTime<Utc>, SessionTokenError> {
    DateTime::from_timestamp(seconds, 0).ok_or(SessionTokenError::Malformed)
}

impl SessionTokenService for JwtSessionTokens {
    fn issue(&self, user: &User) -> Result<SessionToken, SessionTokenError> {
        let delta = chrono::Duration::try_seconds(self.config.token_ttl_in_seconds).ok_or(
            SessionTokenError::UnexpectedError("Failed to create session token duration".into()),
        )?;

        let issued_at = Utc::now();
        let expires_at = issued_at
            .checked_add_signed(delta)
            .ok_or(SessionTokenError::UnexpectedError(
                "Duration out of range".to_string(),
            ))?;

        let claims = Claims {
            sub: user.id().to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            ver: user.session_version(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.as_bytes()),
        )
        .map_err(|e| SessionTokenError::UnexpectedError(e.to_string()))?;

        Ok(SessionToken::new(Secret::new(token), expires_at))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, SessionTokenError> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &self.validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => SessionTokenError::Expired,
            ErrorKind::InvalidSignature => SessionTokenError::SignatureInvalid,
            _ => SessionTokenError::Malformed,
        })?;

        Ok(SessionClaims {
            user_id: UserId::parse(&claims.sub).map_err(|_| SessionTokenError::Malformed)?,
            session_version: claims.ver,
            issued_at: timestamp(claims.iat)?,
            expires_at: timestamp(claims.exp)?,
        })
    }
}
