//! Bearer-token sourcing for authenticated backend calls.
//!
//! The original CleanBoost client fabricated `demo-token-<timestamp>`
//! strings on every request. That scheme is deliberately not reproduced:
//! tokens come from configuration or the environment, and a missing token
//! is an error surfaced before any authenticated request is sent.

use thiserror::Error;

/// Environment variable consulted by [`EnvToken`].
pub const TOKEN_ENV_VAR: &str = "CLEANBOOST_TOKEN";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("no API token configured: set `token` in config.toml or export {TOKEN_ENV_VAR}")]
    Missing,
}

/// A source of bearer tokens for authenticated endpoints.
///
/// Kept as a trait so the CLI can wire config-backed tokens while tests
/// inject fixed strings.
pub trait TokenSource: Send + Sync {
    /// Return the current bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Missing`] when no credential is available.
    fn bearer_token(&self) -> Result<String, AuthError>;
}

/// Fixed token, typically loaded from the config file.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenSource for StaticToken {
    fn bearer_token(&self) -> Result<String, AuthError> {
        Ok(self.0.clone())
    }
}

/// Token read from [`TOKEN_ENV_VAR`] on each request, so a rotated value is
/// picked up without restarting.
#[derive(Debug, Clone, Default)]
pub struct EnvToken;

impl EnvToken {
    /// An unset or empty variable means no credential.
    fn from_value(value: Option<String>) -> Result<String, AuthError> {
        match value {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(AuthError::Missing),
        }
    }
}

impl TokenSource for EnvToken {
    fn bearer_token(&self) -> Result<String, AuthError> {
        Self::from_value(std::env::var(TOKEN_ENV_VAR).ok())
    }
}
