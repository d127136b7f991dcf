//! Access-token exchange against the Zoho identity provider.
//!
//! Every sheet operation fetches a fresh short-lived token via the
//! refresh-token grant — tokens are never cached or persisted, so the
//! "valid token at call time" contract holds trivially.

use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::PipelineError;

/// Opaque short-lived store credential. Disposable — fetched on demand,
/// used for one call, dropped.
#[derive(Debug, Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value expected by the Zoho Sheet API.
    pub fn authorization_header(&self) -> String {
        format!("Zoho-oauthtoken {}", self.0)
    }
}

/// Exchange the configured refresh token for an access token.
///
/// Fails with [`PipelineError::Auth`] when the provider's reply carries no
/// `access_token` field (expired/invalid refresh token, revoked client).
/// No retry — the caller treats this as fatal for the current operation.
pub async fn fetch_access_token(
    config: &Config,
    http: &reqwest::Client,
) -> Result<AccessToken, PipelineError> {
    let params = [
        ("refresh_token", config.zoho_refresh_token.as_str()),
        ("client_id", config.zoho_client_id.as_str()),
        ("client_secret", config.zoho_client_secret.as_str()),
        ("grant_type", "refresh_token"),
    ];

    let body: Value = http
        .post(&config.token_url)
        .form(&params)
        .send()
        .await?
        .json()
        .await
        .map_err(|e| PipelineError::Auth {
            detail: format!("non-JSON token reply: {e}"),
        })?;

    match body.get("access_token").and_then(Value::as_str) {
        Some(token) if !token.is_empty() => {
            debug!("access token refreshed");
            Ok(AccessToken(token.to_string()))
        }
        _ => Err(PipelineError::Auth {
            detail: body.to_string(),
        }),
    }
}
