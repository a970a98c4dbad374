//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SITE_BASE_URL` - Public URL for the site (used for canonical links)
//! - `WORDPRESS_API_URL` - WordPress REST base, e.g. `https://cms.example.com/wp-json/wp/v2`
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `WORDPRESS_AUTH_USERNAME` - Application-password user for the CMS
//! - `WORDPRESS_AUTH_PASSWORD` - Application password (set both or neither)
//! - `SUBSCRIBERS_FILE` - Subscriber mirror file (default: data/subscribers.json)
//! - `ADMIN_TOKEN` - Bearer token for `/admin` (admin routes are off without it)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 0.1)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ADMIN_TOKEN_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

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

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// WordPress REST API configuration
    pub wordpress: WordPressConfig,
    /// Path of the subscriber mirror file
    pub subscribers_file: PathBuf,
    /// Bearer token protecting the admin routes
    pub admin_token: Option<SecretString>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry trace sample rate
    pub sentry_traces_sample_rate: f32,
}

/// WordPress REST API configuration.
///
/// Implements `Debug` manually to redact the application password.
#[derive(Clone)]
pub struct WordPressConfig {
    /// Full REST core base ending in `/wp-json/wp/v2`
    pub api_url: String,
    /// Application-password user, if the CMS requires auth
    pub auth_username: Option<String>,
    /// Application password, if the CMS requires auth
    pub auth_password: Option<SecretString>,
}

impl WordPressConfig {
    /// Basic-auth credentials, present only when both halves are set.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &SecretString)> {
        match (&self.auth_username, &self.auth_password) {
            (Some(username), Some(password)) => Some((username.as_str(), password)),
            _ => None,
        }
    }
}

impl std::fmt::Debug for WordPressConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordPressConfig")
            .field("api_url", &self.api_url)
            .field("auth_username", &self.auth_username)
            .field(
                "auth_password",
                &self.auth_password.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl SiteConfig {
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

        let host = get_env_or_default("SITE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SITE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("SITE_BASE_URL")?;

        let wordpress = WordPressConfig::from_env()?;

        let subscribers_file =
            PathBuf::from(get_env_or_default("SUBSCRIBERS_FILE", "data/subscribers.json"));

        let admin_token = match get_optional_env("ADMIN_TOKEN") {
            Some(value) => {
                validate_admin_token(&value, "ADMIN_TOKEN")?;
                Some(SecretString::from(value))
            }
            None => None,
        };

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_f32_or_default("SENTRY_SAMPLE_RATE", 1.0)?;
        let sentry_traces_sample_rate = get_f32_or_default("SENTRY_TRACES_SAMPLE_RATE", 0.1)?;

        Ok(Self {
            host,
            port,
            base_url,
            wordpress,
            subscribers_file,
            admin_token,
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

impl WordPressConfig {
    /// Load just the CMS configuration from environment variables.
    ///
    /// The CLI uses this directly; the server loads it as part of
    /// [`SiteConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `WORDPRESS_API_URL` is missing or invalid,
    /// or if only half of a credential pair is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = get_required_env("WORDPRESS_API_URL")?;
        validate_api_url(&api_url, "WORDPRESS_API_URL")?;

        let auth_username = get_optional_env("WORDPRESS_AUTH_USERNAME");
        let auth_password = match get_optional_env("WORDPRESS_AUTH_PASSWORD") {
            Some(value) => {
                validate_secret_strength(&value, "WORDPRESS_AUTH_PASSWORD")?;
                Some(SecretString::from(value))
            }
            None => None,
        };

        // Half a credential pair is a deployment mistake, not a choice
        if auth_username.is_some() != auth_password.is_some() {
            return Err(ConfigError::InvalidEnvVar(
                "WORDPRESS_AUTH_USERNAME".to_string(),
                "set both WORDPRESS_AUTH_USERNAME and WORDPRESS_AUTH_PASSWORD, or neither"
                    .to_string(),
            ));
        }

        Ok(Self {
            api_url,
            auth_username,
            auth_password,
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

/// Get an `f32` environment variable with a default value.
fn get_f32_or_default(key: &str, default: f32) -> Result<f32, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<f32>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Validate that the API URL parses and points at a WordPress REST base.
fn validate_api_url(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if !url.path().contains("/wp-json/") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "expected the REST base, e.g. https://cms.example.com/wp-json/wp/v2".to_string(),
        ));
    }

    Ok(())
}

/// Validate the admin token length on top of the usual strength checks.
fn validate_admin_token(token: &str, var_name: &str) -> Result<(), ConfigError> {
    if token.len() < MIN_ADMIN_TOKEN_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_ADMIN_TOKEN_LENGTH,
                token.len()
            ),
        ));
    }
    validate_secret_strength(token, var_name)
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

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-api-key-here", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        // High-entropy random string
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_admin_token_too_short() {
        let result = validate_admin_token("aB3$xY9!mK2@", "ADMIN_TOKEN");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InsecureSecret(_, _)
        ));
    }

    #[test]
    fn test_validate_api_url_accepts_rest_base() {
        let result = validate_api_url(
            "https://cms.example.com/wp-json/wp/v2",
            "WORDPRESS_API_URL",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_api_url_rejects_non_rest_url() {
        let result = validate_api_url("https://cms.example.com/", "WORDPRESS_API_URL");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidEnvVar(_, _)
        ));
    }

    #[test]
    fn test_validate_api_url_rejects_bad_scheme() {
        let result = validate_api_url("ftp://cms.example.com/wp-json/wp/v2", "WORDPRESS_API_URL");
        assert!(result.is_err());
    }

    #[test]
    fn test_credentials_require_both_halves() {
        let both = WordPressConfig {
            api_url: "https://cms.example.com/wp-json/wp/v2".to_string(),
            auth_username: Some("editor".to_string()),
            auth_password: Some(SecretString::from("kV8pZq2wXr4tYs6u")),
        };
        assert!(both.credentials().is_some());

        let neither = WordPressConfig {
            api_url: "https://cms.example.com/wp-json/wp/v2".to_string(),
            auth_username: None,
            auth_password: None,
        };
        assert!(neither.credentials().is_none());

        let half = WordPressConfig {
            api_url: "https://cms.example.com/wp-json/wp/v2".to_string(),
            auth_username: Some("editor".to_string()),
            auth_password: None,
        };
        assert!(half.credentials().is_none());
    }

    #[test]
    fn test_socket_addr() {
        let config = SiteConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            wordpress: WordPressConfig {
                api_url: "https://cms.example.com/wp-json/wp/v2".to_string(),
                auth_username: None,
                auth_password: None,
            },
            subscribers_file: PathBuf::from("data/subscribers.json"),
            admin_token: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_wordpress_config_debug_redacts_password() {
        let config = WordPressConfig {
            api_url: "https://cms.example.com/wp-json/wp/v2".to_string(),
            auth_username: Some("editor".to_string()),
            auth_password: Some(SecretString::from("kV8pZq2wXr4tYs6u")),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("cms.example.com"));
        assert!(debug_output.contains("editor"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("kV8pZq2wXr4tYs6u"));
    }
}
