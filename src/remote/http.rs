//! REST gateway over a PostgREST-style projects table

use super::RemoteGateway;
use crate::catalog::ProjectRecord;
use crate::config::RemoteConfig;
use crate::error::{HubError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Fetches projects from `{base_url}/rest/v1/{table}?id=eq.{id}`.
///
/// # Example
///
/// ```rust,no_run
/// use twinhub::{HttpGateway, RemoteConfig, RemoteGateway};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = HttpGateway::new(RemoteConfig {
///     base_url: Some("https://example.supabase.co".into()),
///     api_key: Some("anon-key".into()),
///     ..Default::default()
/// })?;
///
/// if gateway.is_configured() {
///     let project = gateway.fetch_by_id("42").await?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct HttpGateway {
    config: RemoteConfig,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<ProjectRecord>> {
        let (Some(base_url), Some(api_key)) = (
            self.config.base_url.as_deref(),
            self.config.api_key.as_deref(),
        ) else {
            return Err(HubError::Config("remote gateway is not configured".into()));
        };

        let url = format!(
            "{}/rest/v1/{}",
            base_url.trim_end_matches('/'),
            self.config.table
        );

        let response = self
            .client
            .get(&url)
            .query(&[("id", format!("eq.{}", id)), ("select", "*".to_string())])
            .header("apikey", api_key)
            .header("Authorization", format!("Bearer {}", api_key))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(HubError::Network(format!("HTTP {} - {}", status, body)));
        }

        let rows: Vec<serde_json::Value> = response.json().await?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }
}
