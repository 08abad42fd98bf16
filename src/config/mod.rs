use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Privileged address used when `ADMIN_EMAILS` is not set
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@marido.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub security: SecurityConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    #[serde(skip_serializing)]
    pub key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub privileged_emails: Vec<String>,
    pub privileged_role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub strict_validation: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Environment presets are applied first, then each variable overrides
    /// its preset value. `SUPABASE_URL` and `SUPABASE_KEY` have no preset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            _ => Environment::Development,
        };

        let url = lookup("SUPABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        let key = lookup("SUPABASE_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("SUPABASE_KEY"))?;

        let preset = match environment {
            Environment::Production => Self::production(url, key),
            Environment::Development => Self::development(url, key),
        };

        preset.with_overrides(lookup)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(v) = lookup("HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("PORT") {
            self.server.port = parse("PORT", &v)?;
        }

        // Backend overrides
        if let Some(v) = lookup("BACKEND_TIMEOUT_SECS") {
            self.backend.timeout_secs = parse("BACKEND_TIMEOUT_SECS", &v)?;
        }

        // Security overrides
        if let Some(v) = lookup("ADMIN_EMAILS") {
            self.security.privileged_emails = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(v) = lookup("ADMIN_ROLE") {
            let role = v.trim().to_string();
            self.security.privileged_role = (!role.is_empty()).then_some(role);
        }

        // API overrides
        if let Some(v) = lookup("API_STRICT_VALIDATION") {
            self.api.strict_validation = parse("API_STRICT_VALIDATION", &v)?;
        }

        Ok(self)
    }

    fn development(url: String, key: String) -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            backend: BackendConfig {
                url,
                key,
                timeout_secs: 30,
            },
            security: SecurityConfig {
                privileged_emails: vec![DEFAULT_ADMIN_EMAIL.to_string()],
                privileged_role: None,
            },
            api: ApiConfig {
                strict_validation: false,
            },
        }
    }

    fn production(url: String, key: String) -> Self {
        Self {
            environment: Environment::Production,
            backend: BackendConfig {
                url,
                key,
                timeout_secs: 10,
            },
            ..Self::development(String::new(), String::new())
        }
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}
