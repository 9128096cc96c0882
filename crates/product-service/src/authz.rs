use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// Outcome of a remote role check. `Unreachable` covers timeouts, connection
/// failures, and unreadable responses; the caller decides the fail-closed
/// policy rather than this client hiding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCheck {
    Authorized,
    Denied,
    Unreachable,
}

#[derive(Debug, Deserialize)]
struct VerifyRoleBody {
    status: Option<String>,
}

/// Client for the user service's `/users/verify-role` endpoint. Built once
/// with a bounded timeout; one upstream call per protected request, no
/// retries.
#[derive(Clone)]
pub struct RoleCheckClient {
    http: reqwest::Client,
    base_url: String,
}

impl RoleCheckClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build role check client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub async fn check_admin(&self, bearer_token: &str) -> RoleCheck {
        self.check(bearer_token, "admin").await
    }

    pub async fn check(&self, bearer_token: &str, role: &str) -> RoleCheck {
        let url = format!("{}/users/verify-role", self.base_url);

        let response = match self
            .http
            .get(&url)
            .query(&[("role", role)])
            .bearer_auth(bearer_token)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "role verification request failed");
                return RoleCheck::Unreachable;
            }
        };

        if !response.status().is_success() {
            return RoleCheck::Denied;
        }

        match response.json::<VerifyRoleBody>().await {
            Ok(body) if body.status.as_deref() == Some("authorized") => RoleCheck::Authorized,
            Ok(_) => RoleCheck::Denied,
            Err(err) => {
                tracing::warn!(error = %err, "role verification response unreadable");
                RoleCheck::Unreachable
            }
        }
    }
}
