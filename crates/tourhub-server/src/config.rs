//! Server configuration.
//!
//! Sources, later ones overriding earlier ones:
//! built-in defaults, an optional `config/tourhub.{toml,yaml,json}` file,
//! then `TOURHUB__*` environment variables with `__` separating nested
//! keys (e.g. `TOURHUB__AUTH__JWT_SECRET`, `TOURHUB__DATABASE__URL`).

use anyhow::{Context, bail};
use axum::http::HeaderValue;
use axum_extra::extract::cookie::SameSite;
use ::config::{Config, Environment, File};
use serde::Deserialize;
use tourhub_auth::AuthConfig;
use tourhub_auth::config::DEFAULT_SESSION_LIFETIME_SECS;
use tourhub_db::DbConfig;

pub const DEFAULT_COOKIE_NAME: &str = "dream-place-token";

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunningEnvironment {
    #[default]
    Development,
    Production,
}

impl RunningEnvironment {
    /// Session cookies are only marked `Secure` in production.
    pub fn secure_cookies(self) -> bool {
        self == RunningEnvironment::Production
    }

    /// Production serves a cross-site frontend, so the cookie must be
    /// sent on cross-site requests.
    pub fn same_site(self) -> SameSite {
        match self {
            RunningEnvironment::Production => SameSite::None,
            RunningEnvironment::Development => SameSite::Strict,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl From<DatabaseSettings> for DbConfig {
    fn from(s: DatabaseSettings) -> Self {
        DbConfig {
            url: s.url,
            namespace: s.namespace,
            database: s.database,
            username: s.username,
            password: s.password,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub session_lifetime_secs: u64,
}

impl From<AuthSettings> for AuthConfig {
    fn from(s: AuthSettings) -> Self {
        AuthConfig {
            jwt_secret: s.jwt_secret,
            session_lifetime_secs: s.session_lifetime_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: RunningEnvironment,
    pub cookie_name: String,
    pub cors_origins: Vec<String>,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
}

impl ServerConfig {
    pub fn load() -> anyhow::Result<Self> {
        let defaults = DbConfig::default();

        let config: ServerConfig = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 5000)?
            .set_default("environment", "development")?
            .set_default("cookie_name", DEFAULT_COOKIE_NAME)?
            .set_default("cors_origins", vec!["http://localhost:5173"])?
            .set_default("database.url", defaults.url)?
            .set_default("database.namespace", defaults.namespace)?
            .set_default("database.database", defaults.database)?
            .set_default("database.username", defaults.username)?
            .set_default("database.password", defaults.password)?
            .set_default("auth.jwt_secret", "")?
            .set_default("auth.session_lifetime_secs", DEFAULT_SESSION_LIFETIME_SECS)?
            .add_source(File::with_name("config/tourhub").required(false))
            .add_source(
                Environment::with_prefix("TOURHUB")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors_origins")
                    .try_parsing(true),
            )
            .build()
            .context("unable to merge configuration sources")?
            .try_deserialize()
            .context("unable to parse configuration")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.auth.jwt_secret.is_empty() {
            bail!("auth.jwt_secret must be set (TOURHUB__AUTH__JWT_SECRET)");
        }
        if self.cookie_name.trim().is_empty() {
            bail!("cookie_name must not be empty");
        }
        self.cors_origins()?;
        Ok(())
    }

    pub fn cors_origins(&self) -> anyhow::Result<Vec<HeaderValue>> {
        self.cors_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("invalid CORS origin: {origin}"))
            })
            .collect()
    }

    pub fn auth_config(&self) -> AuthConfig {
        self.auth.clone().into()
    }

    pub fn db_config(&self) -> DbConfig {
        self.database.clone().into()
    }
}
