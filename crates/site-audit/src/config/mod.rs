use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_HUNTER_BASE_URL: &str = "https://api.hunter.io/v2";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub audit: AuditConfig,
    pub enrichment: Option<EnrichmentConfig>,
    pub verification: VerificationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let fetch_timeout_secs = bounded_secs("AUDIT_FETCH_TIMEOUT_SECS", 15, 120)?;
        let user_agent = non_blank_var("AUDIT_USER_AGENT")
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let enrichment = match non_blank_var("OPENAI_API_KEY") {
            Some(api_key) => Some(EnrichmentConfig {
                api_key,
                base_url: non_blank_var("OPENAI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
                model: non_blank_var("OPENAI_MODEL").unwrap_or_else(|| "gpt-4".to_string()),
                parameter_model: non_blank_var("OPENAI_PARAMETER_MODEL")
                    .unwrap_or_else(|| "gpt-3.5-turbo".to_string()),
                timeout: Duration::from_secs(bounded_secs("OPENAI_TIMEOUT_SECS", 30, 600)?),
            }),
            None => None,
        };

        let verification = VerificationConfig {
            hunter_api_key: non_blank_var("HUNTER_API_KEY"),
            hunter_base_url: non_blank_var("HUNTER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_HUNTER_BASE_URL.to_string()),
            timeout: Duration::from_secs(bounded_secs("HUNTER_TIMEOUT_SECS", 10, 120)?),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            audit: AuditConfig {
                fetch_timeout: Duration::from_secs(fetch_timeout_secs),
                user_agent,
            },
            enrichment,
            verification,
        })
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn bounded_secs(key: &'static str, default: u64, max: u64) -> Result<u64, ConfigError> {
    match non_blank_var(key) {
        None => Ok(default),
        Some(raw) => match raw.parse::<u64>() {
            Ok(value) if (1..=max).contains(&value) => Ok(value),
            _ => Err(ConfigError::InvalidTimeout { key, max }),
        },
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Page fetch settings used by the audit analyzer.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub fetch_timeout: Duration,
    pub user_agent: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(15),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Credentials and model selection for the text-generation service.
///
/// Only present when `OPENAI_API_KEY` is set; its absence disables enrichment.
#[derive(Clone)]
pub struct EnrichmentConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub parameter_model: String,
    pub timeout: Duration,
}

impl fmt::Debug for EnrichmentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnrichmentConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("parameter_model", &self.parameter_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Email deliverability verifier settings.
#[derive(Clone)]
pub struct VerificationConfig {
    pub hunter_api_key: Option<String>,
    pub hunter_base_url: String,
    pub timeout: Duration,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            hunter_api_key: None,
            hunter_base_url: DEFAULT_HUNTER_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl fmt::Debug for VerificationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationConfig")
            .field(
                "hunter_api_key",
                &self.hunter_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("hunter_base_url", &self.hunter_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout { key: &'static str, max: u64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout { key, max } => {
                write!(f, "{key} must be a whole number of seconds between 1 and {max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTimeout { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
