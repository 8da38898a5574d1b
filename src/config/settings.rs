//! Configuration settings structures

use serde::{Deserialize, Serialize};

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    pub analysis: AnalysisSettings,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Business-data provider configuration. Credentials are deliberately
/// absent: they are supplied per request via headers.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderSettings {
    pub companies_url: String,
    pub persons_url: String,
    /// Dataset selector sent with every query: registration data,
    /// lawsuit records and KYC sanctions.
    pub datasets: String,
    pub timeout_ms: u64,
}

/// LLM analysis configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalysisSettings {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 10000,
            },
            provider: ProviderSettings {
                companies_url: "https://plataforma.bigdatacorp.com.br/empresas".to_string(),
                persons_url: "https://plataforma.bigdatacorp.com.br/pessoas".to_string(),
                datasets: "registration_data,processes,kyc".to_string(),
                timeout_ms: 30_000,
            },
            analysis: AnalysisSettings {
                endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
                model: "gpt-4".to_string(),
                temperature: 0.7,
                max_tokens: 2000,
                timeout_ms: 60_000,
            },
        }
    }
}

impl Settings {
    /// Load defaults and apply environment overrides. Only the listening
    /// address is environment-configurable; nothing else about request
    /// handling is.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(host) = std::env::var("HOST") {
            settings.server.host = host;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            settings.server.port = port;
        }
        settings
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_both_provider_endpoints() {
        let settings = Settings::default();
        assert!(settings.provider.companies_url.ends_with("/empresas"));
        assert!(settings.provider.persons_url.ends_with("/pessoas"));
        assert_eq!(settings.server.port, 10000);
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        let settings = Settings::default();
        assert_eq!(settings.bind_address(), "0.0.0.0:10000");
    }

    #[test]
    fn dataset_selector_names_all_three_subdatasets() {
        let settings = Settings::default();
        assert!(settings.provider.datasets.contains("registration_data"));
        assert!(settings.provider.datasets.contains("processes"));
        assert!(settings.provider.datasets.contains("kyc"));
    }
}
