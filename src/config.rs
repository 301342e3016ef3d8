use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    DASHBOARD_CACHE_TTL_MS, DEFAULT_DEVELOPMENT_URL, DEFAULT_PRODUCTION_URL, REQUEST_TIMEOUT_MS,
    TOKEN_STORAGE_KEY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Debug apunta al backend de desarrollo, release a producción
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else {
            Environment::Production
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// URL explícita; gana sobre las dos URLs por defecto
    pub base_url_override: Option<String>,
    pub base_url_development: String,
    pub base_url_production: String,
    pub environment: Environment,
    pub request_timeout_ms: u32,
    pub cache_ttl_ms: i64,
    pub token_storage_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url_override: None,
            base_url_development: DEFAULT_DEVELOPMENT_URL.to_string(),
            base_url_production: DEFAULT_PRODUCTION_URL.to_string(),
            environment: Environment::from_build(),
            request_timeout_ms: REQUEST_TIMEOUT_MS,
            cache_ttl_ms: DASHBOARD_CACHE_TTL_MS,
            token_storage_key: TOKEN_STORAGE_KEY.to_string(),
        }
    }
}

impl ApiConfig {
    /// Solo API_BASE_URL viene del entorno (en compilación, ver build.rs);
    /// el resto son valores fijos.
    pub fn from_env() -> Self {
        Self {
            base_url_override: option_env!("API_BASE_URL")
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
            ..Self::default()
        }
    }

    /// Precedencia: override, luego la URL del entorno
    pub fn base_url(&self) -> &str {
        if let Some(url) = self.base_url_override.as_deref() {
            return url;
        }
        match self.environment {
            Environment::Production => &self.base_url_production,
            Environment::Development => &self.base_url_development,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url_override = Some(url.into());
        self
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: ApiConfig = ApiConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_environment_defaults() {
        let config = ApiConfig {
            environment: Environment::Production,
            ..ApiConfig::default()
        }
        .with_base_url("http://10.0.0.5:9000");

        assert_eq!(config.base_url(), "http://10.0.0.5:9000");
    }

    #[test]
    fn environment_selects_default_url() {
        let dev = ApiConfig {
            environment: Environment::Development,
            ..ApiConfig::default()
        };
        let prod = ApiConfig {
            environment: Environment::Production,
            ..ApiConfig::default()
        };

        assert_eq!(dev.base_url(), DEFAULT_DEVELOPMENT_URL);
        assert_eq!(prod.base_url(), DEFAULT_PRODUCTION_URL);
    }

    #[test]
    fn from_env_keeps_fixed_values() {
        let config = ApiConfig::from_env();

        assert_eq!(config.request_timeout_ms, REQUEST_TIMEOUT_MS);
        assert_eq!(config.cache_ttl_ms, DASHBOARD_CACHE_TTL_MS);
        assert_eq!(config.base_url_development, DEFAULT_DEVELOPMENT_URL);
        assert_eq!(config.base_url_production, DEFAULT_PRODUCTION_URL);
        assert_eq!(config.environment, Environment::from_build());
        assert_eq!(config.token_storage_key, TOKEN_STORAGE_KEY);
    }
}
