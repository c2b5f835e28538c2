//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_BASE_URL` - Public URL for the admin panel
//! - `SALEOR_API_URL` - GraphQL endpoint of the commerce API
//! - `SALEOR_API_TOKEN` - Staff/app token (HIGH PRIVILEGE, high entropy)
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `SALEOR_TIMEOUT_SECS` - Request timeout (default: 30)
//! - `EDIT_SESSION_TTL_SECS` - Idle lifetime of a zone edit session (default: 1800)
//! - `WAREHOUSE_PAGE_SIZE` - Warehouses fetched per "load more" (default: 20)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_TIMEOUT_SECS: &str = "30";
const DEFAULT_EDIT_SESSION_TTL_SECS: &str = "1800";
const DEFAULT_WAREHOUSE_PAGE_SIZE: &str = "20";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin panel
    pub base_url: String,
    /// GraphQL API configuration
    pub saleor: SaleorConfig,
    /// Idle lifetime of a zone edit session, in seconds
    pub edit_session_ttl_secs: u64,
    /// Number of warehouses requested per search page
    pub warehouse_page_size: i64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// GraphQL commerce API configuration.
///
/// Implements `Debug` manually to redact the HIGH PRIVILEGE token.
#[derive(Clone)]
pub struct SaleorConfig {
    /// GraphQL endpoint (e.g., <https://shop.example.net/graphql/>)
    pub api_url: Url,
    /// Staff/app token sent as a bearer token
    pub token: SecretString,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl std::fmt::Debug for SaleorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaleorConfig")
            .field("api_url", &self.api_url.as_str())
            .field("token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("ADMIN_HOST", &get_env_or_default("ADMIN_HOST", "127.0.0.1"))?;
        let port = parse_env("ADMIN_PORT", &get_env_or_default("ADMIN_PORT", "3001"))?;
        let base_url = get_required_env("ADMIN_BASE_URL")?;
        let saleor = SaleorConfig::from_env()?;
        let edit_session_ttl_secs = parse_env(
            "EDIT_SESSION_TTL_SECS",
            &get_env_or_default("EDIT_SESSION_TTL_SECS", DEFAULT_EDIT_SESSION_TTL_SECS),
        )?;
        let warehouse_page_size: i64 = parse_env(
            "WAREHOUSE_PAGE_SIZE",
            &get_env_or_default("WAREHOUSE_PAGE_SIZE", DEFAULT_WAREHOUSE_PAGE_SIZE),
        )?;
        if warehouse_page_size <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "WAREHOUSE_PAGE_SIZE".to_string(),
                "must be positive".to_string(),
            ));
        }

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            base_url,
            saleor,
            edit_session_ttl_secs,
            warehouse_page_size,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SaleorConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_url = parse_api_url(&get_required_env("SALEOR_API_URL")?)?;
        let timeout_secs = parse_env(
            "SALEOR_TIMEOUT_SECS",
            &get_env_or_default("SALEOR_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
        )?;

        Ok(Self {
            api_url,
            token: get_validated_secret("SALEOR_API_TOKEN")?,
            timeout_secs,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a value read from `key`, naming the variable on failure.
fn parse_env<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse the GraphQL endpoint; only http(s) is accepted.
fn parse_api_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar("SALEOR_API_URL".to_string(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEnvVar(
            "SALEOR_API_URL".to_string(),
            format!("unsupported scheme '{other}'"),
        )),
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real API tokens have high entropy
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= \
                 {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated token."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> AdminConfig {
        AdminConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            saleor: SaleorConfig {
                api_url: Url::parse("http://localhost:8000/graphql/").unwrap(),
                token: SecretString::from("tk_9fQ2xLm4Rz8Wv1Nb"),
                timeout_secs: 30,
            },
            edit_session_ttl_secs: 1800,
            warehouse_page_size: 20,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // 50% a, 50% b
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-api-token-here", "SALEOR_API_TOKEN");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result =
            validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "SALEOR_API_TOKEN");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result =
            validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "SALEOR_API_TOKEN");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_api_url_rejects_other_schemes() {
        assert!(parse_api_url("https://shop.test/graphql/").is_ok());
        assert!(matches!(
            parse_api_url("ftp://shop.test/graphql/"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(parse_api_url("not a url").is_err());
    }

    #[test]
    fn test_parse_env_names_variable() {
        let err = parse_env::<u16>("ADMIN_PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("ADMIN_PORT"));
        assert_eq!(parse_env::<u64>("EDIT_SESSION_TTL_SECS", "60").unwrap(), 60);
    }

    #[test]
    fn test_socket_addr() {
        let addr = test_config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3001);
    }

    #[test]
    fn test_saleor_config_debug_redacts_token() {
        let debug_output = format!("{:?}", test_config());

        assert!(debug_output.contains("localhost:8000"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("tk_9fQ2xLm4Rz8Wv1Nb"));
    }
}
