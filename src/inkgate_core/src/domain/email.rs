use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
});

const MAX_EMAIL_LENGTH: usize = 254;

/// A syntactically valid, normalized email address.
///
/// Addresses are compared case-insensitively: parsing trims surrounding
/// whitespace and lower-cases the whole address.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, UserError> {
        let normalized = raw.trim().to_lowercase();

        if normalized.len() > MAX_EMAIL_LENGTH || !EMAIL_REGEX.is_match(&normalized) {
            return Err(UserError::InvalidEmail);
        }

        Ok(Self(Secret::new(normalized)))
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(value.expose_secret())
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
