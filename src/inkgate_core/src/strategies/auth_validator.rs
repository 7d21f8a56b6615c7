use async_trait::async_trait;

/// Trait for validating session credentials in middleware.
///
/// Validators extract the credential from the request parts, verify it and
/// produce the claims that protected handlers receive through request
/// extensions.
///
/// The validator receives request parts (headers, method, URI, extensions)
/// rather than the full request so that non-`Sync` bodies stay out of the
/// future.
#[async_trait]
pub trait AuthValidator: Clone + Send + Sync + 'static {
    /// The identity made available to protected route handlers.
    type Claims: Clone + Send + Sync + 'static;

    /// Typically `http::request::Parts`.
    type RequestParts: Sync;

    type Error: std::error::Error + Send + Sync + 'static;

    /// Extract and verify the credential, returning the resolved claims.
    ///
    /// # Errors
    ///
    /// Returns an error if no credential is present, it is invalid or
    /// expired, it has been revoked, or the backing lookup fails.
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error>;
}
