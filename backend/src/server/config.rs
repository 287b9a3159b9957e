//! Environment-driven application configuration.
//!
//! Centralises the variables naming the identity-provider project so they
//! are validated once, at process start, and can be tested in isolation.

use std::net::SocketAddr;
use std::time::Duration;

use mockable::Env;

const PROJECT_ID_ENV: &str = "FIREBASE_PROJECT_ID";
const API_KEY_ENV: &str = "FIREBASE_API_KEY";
const ACCESS_TOKEN_ENV: &str = "FIRESTORE_ACCESS_TOKEN";
const BIND_ADDR_ENV: &str = "BIND_ADDR";
const UPSTREAM_TIMEOUT_ENV: &str = "UPSTREAM_TIMEOUT_SECS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Errors raised while validating the application configuration.
#[derive(Debug, thiserror::Error)]
pub enum AppConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv {
        /// Variable name.
        name: &'static str,
    },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
        /// Human-readable description of the expected shape.
        expected: &'static str,
    },
}

/// Application settings resolved at startup.
#[derive(Debug)]
pub struct AppConfig {
    /// Identity and document store project identifier.
    pub project_id: String,
    /// Browser API key for the token lookup endpoint.
    pub api_key: String,
    /// Optional OAuth bearer token for the document store.
    pub access_token: Option<String>,
    /// Socket the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Timeout applied to both upstream calls.
    pub upstream_timeout: Duration,
}

fn required<E: Env>(env: &E, name: &'static str) -> Result<String, AppConfigError> {
    env.string(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or(AppConfigError::MissingEnv { name })
}

/// Build application settings from environment variables.
///
/// Missing or malformed required variables fail fast so the process never
/// starts half-configured.
///
/// # Examples
/// ```
/// use backend::server::config::app_config_from_env;
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "FIREBASE_PROJECT_ID" => Some("demo".to_owned()),
///     "FIREBASE_API_KEY" => Some("AIza-example".to_owned()),
///     _ => None,
/// });
/// let config = app_config_from_env(&env).expect("valid configuration");
/// assert_eq!(config.project_id, "demo");
/// ```
pub fn app_config_from_env<E: Env>(env: &E) -> Result<AppConfig, AppConfigError> {
    let project_id = required(env, PROJECT_ID_ENV)?;
    let api_key = required(env, API_KEY_ENV)?;
    let access_token = env.string(ACCESS_TOKEN_ENV).filter(|token| !token.is_empty());

    let bind_raw = env
        .string(BIND_ADDR_ENV)
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
    let bind_addr = bind_raw
        .parse::<SocketAddr>()
        .map_err(|_| AppConfigError::InvalidEnv {
            name: BIND_ADDR_ENV,
            value: bind_raw.clone(),
            expected: "host:port socket address",
        })?;

    let upstream_timeout = match env.string(UPSTREAM_TIMEOUT_ENV) {
        Some(raw) => {
            let secs = raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(AppConfigError::InvalidEnv {
                    name: UPSTREAM_TIMEOUT_ENV,
                    value: raw,
                    expected: "positive integer seconds",
                })?;
            Duration::from_secs(secs)
        }
        None => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
    };

    Ok(AppConfig {
        project_id,
        api_key,
        access_token,
        bind_addr,
        upstream_timeout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;

    fn env_with(overrides: Vec<(&'static str, &'static str)>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string().returning(move |name| {
            overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned())
        });
        env
    }

    #[test]
    fn defaults_apply_when_optionals_are_absent() {
        let env = env_with(vec![
            ("FIREBASE_PROJECT_ID", "demo"),
            ("FIREBASE_API_KEY", "AIza-example"),
        ]);
        let config = app_config_from_env(&env).expect("valid configuration");
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
        assert!(config.access_token.is_none());
    }

    #[test]
    fn missing_project_id_fails_fast() {
        let env = env_with(vec![("FIREBASE_API_KEY", "AIza-example")]);
        let error = app_config_from_env(&env).expect_err("missing project id");
        assert!(matches!(
            error,
            AppConfigError::MissingEnv {
                name: "FIREBASE_PROJECT_ID"
            }
        ));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let env = env_with(vec![
            ("FIREBASE_PROJECT_ID", "demo"),
            ("FIREBASE_API_KEY", "   "),
        ]);
        let error = app_config_from_env(&env).expect_err("blank api key");
        assert!(matches!(
            error,
            AppConfigError::MissingEnv {
                name: "FIREBASE_API_KEY"
            }
        ));
    }

    #[test]
    fn malformed_bind_addr_is_rejected() {
        let env = env_with(vec![
            ("FIREBASE_PROJECT_ID", "demo"),
            ("FIREBASE_API_KEY", "AIza-example"),
            ("BIND_ADDR", "not-an-addr"),
        ]);
        let error = app_config_from_env(&env).expect_err("bad bind addr");
        assert!(matches!(
            error,
            AppConfigError::InvalidEnv {
                name: "BIND_ADDR", ..
            }
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let env = env_with(vec![
            ("FIREBASE_PROJECT_ID", "demo"),
            ("FIREBASE_API_KEY", "AIza-example"),
            ("UPSTREAM_TIMEOUT_SECS", "0"),
        ]);
        let error = app_config_from_env(&env).expect_err("zero timeout");
        assert!(matches!(
            error,
            AppConfigError::InvalidEnv {
                name: "UPSTREAM_TIMEOUT_SECS",
                ..
            }
        ));
    }
}
