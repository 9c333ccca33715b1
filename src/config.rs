//! Application configuration
//!
//! Loaded from a TOML file. Every section and field is optional; anything
//! missing takes the default shown in [`AppConfig::default`].
//!
//! ```toml
//! [server]
//! api_host = "0.0.0.0"
//! api_port = 8080
//!
//! [billing]
//! tax_rate = 0.10
//! scheduler_interval_secs = 3600
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::application::BillingPolicy;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::DatabaseConfig;
use crate::shared::errors::InfraError;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "NEXUSPAY_CONFIG";

/// Upper bound for `billing.retry_delay_hours` (one year)
pub const MAX_RETRY_DELAY_HOURS: i64 = 8760;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub admin: AdminConfig,
    pub billing: BillingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds allowed for in-flight work to finish on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
            min_connections: db.min_connections,
            connect_timeout_secs: db.connect_timeout_secs,
        }
    }
}

impl DatabaseSection {
    pub fn to_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            connect_timeout_secs: self.connect_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_hours: 24,
        }
    }
}

impl SecurityConfig {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::new(self.jwt_secret.clone(), self.jwt_expiration_hours)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `nexuspay=debug,tower_http=info`
    pub level: String,
    /// `plain` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "plain".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: "admin@nexuspay.local".to_string(),
            name: "Administrator".to_string(),
            password: "admin123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    pub tax_rate: f64,
    pub premium_discount_rate: f64,
    /// Probability that the simulated gateway approves a charge
    pub payment_success_rate: f64,
    pub retry_delay_hours: i64,
    pub max_payment_retries: i32,
    /// 0 disables the background scheduler
    pub scheduler_interval_secs: u64,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            tax_rate: 0.10,
            premium_discount_rate: 0.20,
            payment_success_rate: 0.8,
            retry_delay_hours: 24,
            max_payment_retries: 3,
            scheduler_interval_secs: 3600,
        }
    }
}

impl BillingConfig {
    pub fn policy(&self) -> Result<BillingPolicy, InfraError> {
        if !(0..=MAX_RETRY_DELAY_HOURS).contains(&self.retry_delay_hours) {
            return Err(InfraError::Config(format!(
                "billing.retry_delay_hours must be between 0 and {}, got {}",
                MAX_RETRY_DELAY_HOURS, self.retry_delay_hours
            )));
        }
        Ok(BillingPolicy {
            tax_rate: rate("billing.tax_rate", self.tax_rate)?,
            premium_discount_rate: rate(
                "billing.premium_discount_rate",
                self.premium_discount_rate,
            )?,
            retry_delay: chrono::Duration::hours(self.retry_delay_hours),
            max_payment_retries: self.max_payment_retries,
        })
    }
}

fn rate(name: &str, value: f64) -> Result<Decimal, InfraError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(InfraError::Config(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Decimal::try_from(value)
        .map(|d| d.round_dp(4).normalize())
        .map_err(|e| InfraError::Config(format!("{}: {}", name, e)))
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| InfraError::Config(format!("{}: {}", path.display(), e)))?;
            let parsed: AppConfig = toml::from_str(&contents)
                .map_err(|e| InfraError::Config(format!("{}: {}", path.display(), e)))?;
            debug!(path = %path.display(), "Parsed configuration file");
            parsed
        } else {
            info!(path = %path.display(), "Config file not found, using defaults");
            AppConfig::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InfraError> {
        if self.security.jwt_secret.trim().is_empty() {
            return Err(InfraError::Config("security.jwt_secret must not be empty".into()));
        }
        if self.security.jwt_expiration_hours <= 0 {
            return Err(InfraError::Config(
                "security.jwt_expiration_hours must be positive".into(),
            ));
        }
        if self.billing.max_payment_retries < 0 {
            return Err(InfraError::Config(
                "billing.max_payment_retries must not be negative".into(),
            ));
        }
        rate("billing.payment_success_rate", self.billing.payment_success_rate)?;
        self.billing.policy()?;

        if self.security.jwt_secret == SecurityConfig::default().jwt_secret {
            warn!("Using the default JWT secret; set security.jwt_secret");
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("NEXUSPAY_DATABASE_URL") {
            debug!("Overriding database.url from environment");
            self.database.url = url;
        }
        if let Ok(secret) = std::env::var("NEXUSPAY_JWT_SECRET") {
            debug!("Overriding security.jwt_secret from environment");
            self.security.jwt_secret = secret;
        }
    }
}

/// `~/.config/nexuspay/config.toml`, or `./config.toml` when no config
/// directory can be determined.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("nexuspay").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            api_port = 9090

            [billing]
            tax_rate = 0.15
            scheduler_interval_secs = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.server.api_port, 9090);
        assert_eq!(config.server.api_host, "0.0.0.0");
        assert_eq!(config.billing.scheduler_interval_secs, 0);
        assert_eq!(config.billing.max_payment_retries, 3);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.billing.policy().unwrap().tax_rate, dec!(0.15));
    }

    #[test]
    fn default_policy_matches_billing_defaults() {
        let policy = AppConfig::default().billing.policy().unwrap();
        let expected = BillingPolicy::default();
        assert_eq!(policy.tax_rate, expected.tax_rate);
        assert_eq!(policy.premium_discount_rate, expected.premium_discount_rate);
        assert_eq!(policy.retry_delay, expected.retry_delay);
        assert_eq!(policy.max_payment_retries, expected.max_payment_retries);
    }

    #[test]
    fn out_of_range_rate_is_rejected() {
        let mut config = AppConfig::default();
        config.billing.payment_success_rate = 1.5;
        assert!(matches!(config.validate(), Err(InfraError::Config(_))));

        let mut config = AppConfig::default();
        config.billing.tax_rate = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn retry_delay_must_fit_a_year() {
        let mut config = AppConfig::default();
        config.billing.retry_delay_hours = i64::MAX;
        assert!(matches!(config.validate(), Err(InfraError::Config(_))));
        assert!(config.billing.policy().is_err());

        config.billing.retry_delay_hours = -1;
        assert!(config.validate().is_err());

        config.billing.retry_delay_hours = MAX_RETRY_DELAY_HOURS;
        let policy = config.billing.policy().unwrap();
        assert_eq!(policy.retry_delay, chrono::Duration::days(365));
    }

    #[test]
    fn empty_jwt_secret_is_rejected() {
        let mut config = AppConfig::default();
        config.security.jwt_secret = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("nexuspay-missing-config-test.toml");
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.server.api_port, 8080);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path =
            std::env::temp_dir().join(format!("nexuspay-bad-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[server\napi_port = ").unwrap();
        let result = AppConfig::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(InfraError::Config(_))));
    }

    #[test]
    fn database_section_maps_to_pool_config() {
        let mut config = AppConfig::default();
        config.database.url = "sqlite::memory:".into();
        config.database.max_connections = 2;
        let db = config.database.to_database_config();
        assert_eq!(db.url, "sqlite::memory:");
        assert_eq!(db.max_connections, 2);
    }

    #[test]
    fn default_path_ends_with_app_dir() {
        let path = default_config_path();
        assert!(path.ends_with("nexuspay/config.toml") || path.ends_with("config.toml"));
    }
}
