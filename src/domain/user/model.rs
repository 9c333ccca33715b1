//! User domain entity

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::shared::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Customer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Customer => "CUSTOMER",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "CUSTOMER" => Ok(Self::Customer),
            other => Err(DomainError::Validation(format!("Unknown role: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// Only operators that can log in carry a password.
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new_customer(email: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            email: email.into().trim().to_lowercase(),
            name: name.into(),
            role: UserRole::Customer,
            password_hash: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn new_admin(
        email: impl Into<String>,
        name: impl Into<String>,
        password_hash: String,
    ) -> Self {
        Self {
            role: UserRole::Admin,
            password_hash: Some(password_hash),
            ..Self::new_customer(email, name)
        }
    }

    pub fn can_log_in(&self) -> bool {
        self.is_active && self.password_hash.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_email_is_normalised() {
        let user = User::new_customer("  Jane.Smith@Example.com ", "Jane Smith");
        assert_eq!(user.email, "jane.smith@example.com");
        assert_eq!(user.role, UserRole::Customer);
        assert!(!user.can_log_in());
    }

    #[test]
    fn admin_can_log_in() {
        let admin = User::new_admin("admin@nexuspay.com", "Admin", "hash".into());
        assert!(admin.is_admin());
        assert!(admin.can_log_in());
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("owner".parse::<UserRole>().is_err());
    }
}
