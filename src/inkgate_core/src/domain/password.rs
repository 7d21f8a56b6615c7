use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;

/// A plaintext password that satisfies the strength rules.
///
/// Only ever held in memory on its way to the hasher.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let raw = value.expose_secret();
        let length = raw.chars().count();

        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
            return Err(UserError::PasswordLength);
        }

        let has_letter = raw.chars().any(char::is_alphabetic);
        let has_digit = raw.chars().any(|c| c.is_ascii_digit());
        if !has_letter || !has_digit {
            return Err(UserError::PasswordTooWeak);
        }

        Ok(Self(value))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// A one-way password hash in PHC string format.
#[derive(Debug, Clone)]
pub struct HashedPassword(Secret<String>);

impl HashedPassword {
    pub fn new(phc: Secret<String>) -> Self {
        Self(phc)
    }
}

impl AsRef<Secret<String>> for HashedPassword {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
