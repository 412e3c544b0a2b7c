//! Access token acquisition.
//!
//! Deliberately thin: a token from `GOOGLE_OAUTH_ACCESS_TOKEN`, or whatever
//! `gcloud auth print-access-token` hands back. Anything richer (refresh,
//! service-account flows) belongs to the surrounding tooling.

use std::fmt;
use std::process::Command;

use crate::error::RemoteError;

const TOKEN_ENV_VAR: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Bearer token attached to every remote call.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Resolve a token: environment variable first, gcloud CLI second.
    pub fn resolve() -> Result<Self, RemoteError> {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            let token = token.trim();
            if !token.is_empty() {
                tracing::debug!("using access token from ${TOKEN_ENV_VAR}");
                return Ok(Self(token.to_owned()));
            }
        }

        let output = Command::new("gcloud")
            .args(["auth", "print-access-token"])
            .output()
            .map_err(|e| RemoteError::Auth(format!("cannot run gcloud: {e}")))?;

        if !output.status.success() {
            return Err(RemoteError::Auth(format!(
                "gcloud auth print-access-token exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_owned();
        if token.is_empty() {
            return Err(RemoteError::Auth(
                "gcloud auth print-access-token returned an empty token".into(),
            ));
        }
        tracing::debug!("using access token from gcloud CLI");
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens must never end up in logs or error chains.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}
