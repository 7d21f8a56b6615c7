use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher as _, SaltString, rand_core},
};
use inkgate_core::{HashedPassword, Password, PasswordHasher, PasswordHasherError};
use secrecy::{ExposeSecret, Secret};

/// Argon2id hashing on the blocking thread pool.
#[derive(Debug, Clone, Copy)]
pub struct Argon2PasswordHasher {
    memory_kib: u32,
    iterations: u32,
    parallelism: u32,
}

impl Argon2PasswordHasher {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    fn argon2(&self) -> Result<Argon2<'static>, password_hash::Error> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(password_hash::Error::from)?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new(15000, 2, 1)
    }
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: Password) -> Result<HashedPassword, PasswordHasherError> {
        let hasher = *self;
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt = SaltString::generate(rand_core::OsRng);
                hasher
                    .argon2()
                    .and_then(|argon2| {
                        argon2.hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    })
                    .map(|hash| HashedPassword::new(Secret::new(hash.to_string())))
                    .map_err(|e| PasswordHasherError::HashingFailed(e.to_string()))
            })
        })
        .await
        .map_err(|e| PasswordHasherError::HashingFailed(e.to_string()))?
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        candidate: Secret<String>,
        expected: HashedPassword,
    ) -> Result<bool, PasswordHasherError> {
        let hasher = *self;
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let expected = PasswordHash::new(expected.as_ref().expose_secret())
                    .map_err(|e| PasswordHasherError::InvalidHash(e.to_string()))?;
                let argon2 = hasher
                    .argon2()
                    .map_err(|e| PasswordHasherError::InvalidHash(e.to_string()))?;

                match argon2.verify_password(candidate.expose_secret().as_bytes(), &expected) {
                    Ok(()) => Ok(true),
                    Err(password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(PasswordHasherError::InvalidHash(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| PasswordHasherError::HashingFailed(e.to_string()))?
    }
}
