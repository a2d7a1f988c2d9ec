//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Admin authentication configuration.
    pub admin: AdminConfig,
    /// Outgoing email configuration. Email dispatch is disabled when absent.
    #[serde(default)]
    pub email: Option<EmailSettings>,
    /// Branding used in exports and email templates.
    #[serde(default)]
    pub site: SiteConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL of the site.
    pub url: String,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Admin authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Argon2 PHC string of the shared admin password.
    pub password_hash: String,
    /// How long an admin session stays valid, in hours.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
}

/// Which delivery backend to use for outgoing email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProviderKind {
    /// SMTP relay (STARTTLS).
    Smtp,
    /// Resend HTTP API.
    Resend,
}

/// Outgoing email configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailSettings {
    /// Delivery backend.
    pub provider: EmailProviderKind,
    /// Sender address.
    pub from_address: String,
    /// Sender display name.
    #[serde(default = "default_council_name")]
    pub from_name: String,
    /// SMTP host (smtp provider).
    #[serde(default)]
    pub smtp_host: Option<String>,
    /// SMTP port (smtp provider).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username (smtp provider).
    #[serde(default)]
    pub smtp_username: Option<String>,
    /// SMTP password (smtp provider).
    #[serde(default)]
    pub smtp_password: Option<String>,
    /// API key (resend provider).
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Site branding.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Council name shown in exports and email headers.
    #[serde(default = "default_council_name")]
    pub council_name: String,
    /// Institute name shown in email headers and footers.
    #[serde(default = "default_institute_name")]
    pub institute_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            council_name: default_council_name(),
            institute_name: default_institute_name(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

const fn default_session_ttl_hours() -> i64 {
    12
}

const fn default_smtp_port() -> u16 {
    587
}

fn default_council_name() -> String {
    "XIE Student Council".to_string()
}

fn default_institute_name() -> String {
    "Xavier Institute of Engineering".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `COUNCIL_ENV`)
    /// 3. Environment variables with `COUNCIL_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("COUNCIL_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("COUNCIL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("COUNCIL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Result<Config, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_minimal_config_applies_defaults() {
        let config = from_toml(
            r#"
            [server]
            url = "https://council.example.edu"

            [database]
            url = "postgres://localhost/council"

            [admin]
            password_hash = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaA"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.admin.session_ttl_hours, 12);
        assert!(config.email.is_none());
        assert_eq!(config.site.council_name, "XIE Student Council");
    }

    #[test]
    fn test_email_section_parses_provider() {
        let config = from_toml(
            r#"
            [server]
            url = "https://council.example.edu"

            [database]
            url = "postgres://localhost/council"

            [admin]
            password_hash = "hash"

            [email]
            provider = "smtp"
            from_address = "council@example.edu"
            smtp_host = "smtp.example.edu"
            "#,
        )
        .unwrap();

        let email = config.email.unwrap();
        assert_eq!(email.provider, EmailProviderKind::Smtp);
        assert_eq!(email.smtp_port, 587);
        assert_eq!(email.smtp_host.as_deref(), Some("smtp.example.edu"));
        assert_eq!(email.from_name, "XIE Student Council");
    }

    #[test]
    fn test_missing_admin_section_is_an_error() {
        let result = from_toml(
            r#"
            [server]
            url = "https://council.example.edu"

            [database]
            url = "postgres://localhost/council"
            "#,
        );

        assert!(result.is_err());
    }
}
