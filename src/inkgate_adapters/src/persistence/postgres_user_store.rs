use chrono::{DateTime, Utc};
use inkgate_core::{
    Email, HashedPassword, IssuedToken, TokenDigest, TokenPurpose, User, UserId, UserParts,
    UserStore, UserStoreError,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{
    PgPool, Postgres, Row,
    postgres::{PgArguments, PgRow},
    query::Query,
};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, email, password_hash, is_verified, \
    verification_token_digest, verification_token_expires_at, \
    reset_token_digest, reset_token_expires_at, session_version, created_at";

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresUserStore { pool }
    }

    async fn fetch_user(
        &self,
        query: Query<'_, Postgres, PgArguments>,
    ) -> Result<Option<User>, UserStoreError> {
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.map(|row| user_from_row(&row)).transpose()
    }
}

fn select_where(predicate: &str) -> String {
    format!("SELECT {USER_COLUMNS} FROM users WHERE {predicate}")
}

fn unexpected(e: sqlx::Error) -> UserStoreError {
    UserStoreError::UnexpectedError(e.to_string())
}

fn token_columns(purpose: TokenPurpose) -> (&'static str, &'static str) {
    match purpose {
        TokenPurpose::EmailVerification => (
            "verification_token_digest",
            "verification_token_expires_at",
        ),
        TokenPurpose::PasswordReset => ("reset_token_digest", "reset_token_expires_at"),
    }
}

fn issued_token(
    digest: Option<String>,
    expires_at: Option<DateTime<Utc>>,
) -> Option<IssuedToken> {
    match (digest, expires_at) {
        (Some(digest), Some(expires_at)) => Some(IssuedToken::from_stored(
            TokenDigest::from_stored(digest),
            expires_at,
        )),
        _ => None,
    }
}

fn user_from_row(row: &PgRow) -> Result<User, UserStoreError> {
    let email: String = row.try_get("email").map_err(unexpected)?;
    let email = Email::try_from(Secret::new(email))
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
    let password_hash: String = row.try_get("password_hash").map_err(unexpected)?;
    let id: Uuid = row.try_get("id").map_err(unexpected)?;

    Ok(User::from_parts(UserParts {
        id: UserId::from(id),
        email,
        password_hash: HashedPassword::new(Secret::new(password_hash)),
        is_verified: row.try_get("is_verified").map_err(unexpected)?,
        verification_token: issued_token(
            row.try_get("verification_token_digest").map_err(unexpected)?,
            row.try_get("verification_token_expires_at")
                .map_err(unexpected)?,
        ),
        reset_token: issued_token(
            row.try_get("reset_token_digest").map_err(unexpected)?,
            row.try_get("reset_token_expires_at").map_err(unexpected)?,
        ),
        session_version: row.try_get("session_version").map_err(unexpected)?,
        created_at: row.try_get("created_at").map_err(unexpected)?,
    }))
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let verification = user.token(TokenPurpose::EmailVerification);

        let query = sqlx::query(
            r#"
                INSERT INTO users (id, email, password_hash, is_verified,
                    verification_token_digest, verification_token_expires_at,
                    session_version, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.email().as_ref().expose_secret())
        .bind(user.password_hash().as_ref().expose_secret())
        .bind(user.is_verified())
        .bind(verification.map(|t| t.digest().as_str().to_string()))
        .bind(verification.map(|t| t.expires_at()))
        .bind(user.session_version())
        .bind(user.created_at());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserStoreError::UserAlreadyExists;
                }
            }
            UserStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError> {
        let sql = select_where("email = $1");
        let query = sqlx::query(&sql).bind(email.as_ref().expose_secret());
        self.fetch_user(query)
            .await?
            .ok_or(UserStoreError::UserNotFound)
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip_all)]
    async fn get_user_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let sql = select_where("id = $1");
        let query = sqlx::query(&sql).bind(id.as_uuid());
        self.fetch_user(query)
            .await?
            .ok_or(UserStoreError::UserNotFound)
    }

    #[tracing::instrument(name = "Retrieving user by token from PostgreSQL", skip_all)]
    async fn get_user_by_token(
        &self,
        purpose: TokenPurpose,
        digest: &TokenDigest,
    ) -> Result<User, UserStoreError> {
        let (digest_column, _) = token_columns(purpose);
        let sql = select_where(&format!("{digest_column} = $1"));
        let query = sqlx::query(&sql).bind(digest.as_str());
        self.fetch_user(query)
            .await?
            .ok_or(UserStoreError::TokenNotFound)
    }

    #[tracing::instrument(name = "Storing token in PostgreSQL", skip_all)]
    async fn store_token(
        &self,
        id: &UserId,
        purpose: TokenPurpose,
        token: IssuedToken,
    ) -> Result<(), UserStoreError> {
        let (digest_column, expiry_column) = token_columns(purpose);
        let sql = format!(
            "UPDATE users SET {digest_column} = $1, {expiry_column} = $2 WHERE id = $3"
        );

        let result = sqlx::query(&sql)
            .bind(token.digest().as_str())
            .bind(token.expires_at())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Marking user verified in PostgreSQL", skip_all)]
    async fn mark_verified(
        &self,
        id: &UserId,
        expected: &TokenDigest,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET is_verified = TRUE,
                    verification_token_digest = NULL,
                    verification_token_expires_at = NULL
                WHERE id = $1 AND verification_token_digest = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(expected.as_str())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::TokenNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Resetting password in PostgreSQL", skip_all)]
    async fn reset_password(
        &self,
        id: &UserId,
        expected: &TokenDigest,
        new_hash: HashedPassword,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET password_hash = $1,
                    reset_token_digest = NULL,
                    reset_token_expires_at = NULL,
                    session_version = session_version + 1
                WHERE id = $2 AND reset_token_digest = $3
            "#,
        )
        .bind(new_hash.as_ref().expose_secret())
        .bind(id.as_uuid())
        .bind(expected.as_str())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::TokenNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Clearing token in PostgreSQL", skip_all)]
    async fn clear_token(
        &self,
        id: &UserId,
        purpose: TokenPurpose,
        expected: &TokenDigest,
    ) -> Result<(), UserStoreError> {
        let (digest_column, expiry_column) = token_columns(purpose);
        let sql = format!(
            "UPDATE users SET {digest_column} = NULL, {expiry_column} = NULL \
             WHERE id = $1 AND {digest_column} = $2"
        );

        sqlx::query(&sql)
            .bind(id.as_uuid())
            .bind(expected.as_str())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(())
    }
}
