//! Admin authentication.
//!
//! A single shared admin password (stored as an Argon2 hash in config) is
//! exchanged for an opaque bearer token backed by a row in `admin_sessions`.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Duration, Utc};
use council_common::config::AdminConfig;
use council_common::{AppError, AppResult, IdGenerator};
use council_db::entities::admin_session;
use council_db::repositories::AdminSessionRepository;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

/// Issued session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
}

/// Current session details.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub authenticated: bool,
    pub expires_at: String,
}

impl From<&admin_session::Model> for SessionInfo {
    fn from(session: &admin_session::Model) -> Self {
        Self {
            authenticated: true,
            expires_at: session.expires_at.to_rfc3339(),
        }
    }
}

/// Hash a password using Argon2.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Config(format!("Invalid admin hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Service for admin login sessions.
#[derive(Clone)]
pub struct AdminAuthService {
    session_repo: AdminSessionRepository,
    password_hash: String,
    session_ttl: Duration,
    id_gen: IdGenerator,
}

impl AdminAuthService {
    /// Create a new admin auth service.
    #[must_use]
    pub fn new(session_repo: AdminSessionRepository, config: &AdminConfig) -> Self {
        Self {
            session_repo,
            password_hash: config.password_hash.clone(),
            session_ttl: Duration::hours(config.session_ttl_hours),
            id_gen: IdGenerator::new(),
        }
    }

    /// Exchange the admin password for a session token.
    pub async fn login(&self, input: LoginInput) -> AppResult<LoginResponse> {
        self.login_at(input, Utc::now()).await
    }

    /// Log in as of `now`.
    pub async fn login_at(&self, input: LoginInput, now: DateTime<Utc>) -> AppResult<LoginResponse> {
        input.validate()?;

        if !verify_password(&input.password, &self.password_hash)? {
            tracing::warn!("Admin login rejected");
            return Err(AppError::Unauthorized);
        }

        match self.session_repo.delete_expired(now).await {
            Ok(purged) if purged > 0 => tracing::debug!(purged, "Purged expired admin sessions"),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to purge expired admin sessions"),
        }

        let expires_at = now + self.session_ttl;
        let model = admin_session::ActiveModel {
            id: Set(self.id_gen.generate()),
            token: Set(self.id_gen.generate_token()),
            created_at: Set(now.into()),
            expires_at: Set(expires_at.into()),
        };
        let session = self.session_repo.create(model).await?;

        tracing::info!(session_id = %session.id, "Admin logged in");

        Ok(LoginResponse {
            token: session.token,
            expires_at: session.expires_at.to_rfc3339(),
        })
    }

    /// Resolve an unexpired session by token.
    pub async fn authenticate(&self, token: &str) -> AppResult<admin_session::Model> {
        self.authenticate_at(token, Utc::now()).await
    }

    /// Resolve a session that is still valid at `now`.
    pub async fn authenticate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<admin_session::Model> {
        self.session_repo
            .find_active_by_token(token, now)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// End a session.
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        if self.session_repo.delete_by_token(token).await? {
            tracing::info!("Admin logged out");
        }
        Ok(())
    }
}
