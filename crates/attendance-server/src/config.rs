use std::fmt;
use std::str::FromStr;

use attendance_core::AppError;

const DEFAULT_PORT: u16 = 8000;

/// Deployment environment. Production hides server error details from clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" | "test" => Ok(Environment::Development),
            other => Err(AppError::ConfigError(format!(
                "Invalid APP_ENV '{other}': expected 'production' or 'development'"
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Production => f.write_str("production"),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub environment: Environment,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `PORT` (optional, defaults to 8000)
    /// - `APP_ENV` (optional, `production` or `development`, defaults to development)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(std::env::var("PORT").ok(), std::env::var("APP_ENV").ok())
    }

    fn from_vars(port: Option<String>, environment: Option<String>) -> Result<Self, AppError> {
        let port = match port {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse().map_err(|_| {
                AppError::ConfigError(format!("Invalid PORT '{raw}': must be 0-65535"))
            })?,
        };

        let environment: Environment = environment
            .map(|raw| raw.parse::<Environment>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self { port, environment })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
