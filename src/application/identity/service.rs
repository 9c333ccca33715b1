//! User management service: application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, RepositoryProvider, User};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a JWT.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.repos.users().find_by_email(&email).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        let valid = user
            .password_hash
            .as_deref()
            .map(|hash| verify_password(password, hash).unwrap_or(false))
            .unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = create_token(&user, &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        info!(user_id = user.id, "User logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    // ── Users ───────────────────────────────────────────────────

    /// Register a billing customer.
    pub async fn create_customer(&self, email: &str, name: &str) -> DomainResult<User> {
        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        if name.trim().is_empty() {
            return Err(DomainError::Validation("Name is required".into()));
        }

        let user = User::new_customer(email, name.trim());
        if self.repos.users().find_by_email(&user.email).await?.is_some() {
            return Err(DomainError::Conflict(format!("Email {}", user.email)));
        }

        let user = self.repos.users().save(user).await?;
        info!(user_id = user.id, "Customer registered");
        Ok(user)
    }

    pub async fn list(&self) -> DomainResult<Vec<User>> {
        self.repos.users().find_all().await
    }

    pub async fn get(&self, id: i32) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", id))
    }

    /// Create the bootstrap admin unless an admin already exists.
    ///
    /// Returns `true` when an account was created.
    pub async fn ensure_admin(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> DomainResult<bool> {
        if self.repos.users().count_admins().await? > 0 {
            return Ok(false);
        }

        let hash = hash_password(password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;
        let admin = self
            .repos
            .users()
            .save(User::new_admin(email, name, hash))
            .await?;

        info!(user_id = admin.id, email = admin.email.as_str(), "Default admin created");
        Ok(true)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn service() -> UserService {
        UserService::new(
            Arc::new(InMemoryRepositoryProvider::new()),
            JwtConfig::new("test-secret", 1),
        )
    }

    #[tokio::test]
    async fn admin_is_created_once_and_can_log_in() {
        let svc = service();
        assert!(svc.ensure_admin("Admin@NexusPay.local", "Admin", "pw-123456").await.unwrap());
        assert!(!svc.ensure_admin("other@nexuspay.local", "Other", "pw").await.unwrap());

        let auth = svc.login("admin@nexuspay.local", "pw-123456").await.unwrap();
        assert_eq!(auth.token_type, "Bearer");
        assert_eq!(auth.expires_in, 3600);
        assert!(auth.user.is_admin());
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let svc = service();
        svc.ensure_admin("admin@nexuspay.local", "Admin", "pw-123456").await.unwrap();
        assert!(matches!(
            svc.login("admin@nexuspay.local", "nope").await.unwrap_err(),
            DomainError::Unauthorized(_)
        ));
    }

    #[tokio::test]
    async fn customers_cannot_log_in() {
        let svc = service();
        svc.create_customer("frank@example.com", "Frank").await.unwrap();
        assert!(svc.login("frank@example.com", "").await.is_err());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let svc = service();
        svc.create_customer("gina@example.com", "Gina").await.unwrap();
        assert!(matches!(
            svc.create_customer("GINA@example.com", "Gina Again").await.unwrap_err(),
            DomainError::Conflict(_)
        ));
        assert_eq!(svc.list().await.unwrap().len(), 1);
    }
}
