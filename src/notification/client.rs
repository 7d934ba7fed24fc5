//! Notification service client.
//!
//! Talks to the platform's model-manage API through the gateway. Transport
//! policy (timeouts, optional transient retries, auth) lives here and nowhere
//! else; callers see one request and one parsed response.

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::notification::NotificationsResponse;

const FIND_BY_MODEL_PATH: &str =
    "model-manage/api/notifications/search/findAllByDeployableModelId";

/// Maximum number of body bytes echoed back in an `UpstreamStatus` error.
const ERROR_BODY_LIMIT: usize = 200;

#[async_trait]
pub trait NotificationsApi: Send + Sync {
    /// Fetch every notification attached to a deployable model.
    async fn find_all_by_deployable_model_id(
        &self,
        id: Uuid,
    ) -> Result<NotificationsResponse, AppError>;
}

pub struct NotificationsClient {
    client: ClientWithMiddleware,
    endpoint: Url,
    access_token: Option<String>,
}

impl NotificationsClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let endpoint = endpoint_url(&config.gateway_location)?;

        let reqwest_client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        let mut builder = ClientBuilder::new(reqwest_client);
        if config.max_retries > 0 {
            let retry_policy =
                ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
            builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }

        Ok(Self {
            client: builder.build(),
            endpoint,
            access_token: config.access_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Join the search path onto the gateway base, tolerating a missing trailing slash.
fn endpoint_url(gateway_location: &str) -> Result<Url, AppError> {
    let mut base = Url::parse(gateway_location).map_err(|e| {
        AppError::Config(format!("invalid gateway location '{}': {}", gateway_location, e))
    })?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(FIND_BY_MODEL_PATH)
        .map_err(|e| AppError::Config(format!("invalid notifications endpoint: {}", e)))
}

#[async_trait]
impl NotificationsApi for NotificationsClient {
    async fn find_all_by_deployable_model_id(
        &self,
        id: Uuid,
    ) -> Result<NotificationsResponse, AppError> {
        let mut req = self
            .client
            .get(self.endpoint.clone())
            .query(&[("deployableModelId", id.to_string())])
            .header("Accept", "application/json");

        if let Some(token) = &self.access_token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(model_id = %id, "notification service request failed: {}", e);
            AppError::from(e)
        })?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                body: truncate(&body, ERROR_BODY_LIMIT),
            });
        }

        let parsed: NotificationsResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::Decode(format!("{} (body: {})", e, truncate(&body, ERROR_BODY_LIMIT)))
        })?;

        tracing::debug!(
            model_id = %id,
            notifications = parsed.notifications().map_or(0, |n| n.len()),
            "fetched notifications"
        );
        Ok(parsed)
    }
}

fn truncate(body: &str, limit: usize) -> String {
    match body.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_with_trailing_slash() {
        let url = endpoint_url("http://localhost:8090/").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8090/model-manage/api/notifications/search/findAllByDeployableModelId"
        );
    }

    #[test]
    fn test_endpoint_keeps_gateway_prefix() {
        let url = endpoint_url("https://platform.example.com/gateway").unwrap();
        assert_eq!(
            url.as_str(),
            "https://platform.example.com/gateway/model-manage/api/notifications/search/findAllByDeployableModelId"
        );
    }

    #[test]
    fn test_invalid_gateway_is_config_error() {
        assert!(matches!(endpoint_url("not a url"), Err(AppError::Config(_))));
    }

    #[test]
    fn test_truncate_long_body() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
    }

    #[test]
    fn test_client_carries_token() {
        let cfg = Config {
            access_token: Some("secret".into()),
            ..Config::default()
        };
        let client = NotificationsClient::new(&cfg).unwrap();
        assert_eq!(client.access_token.as_deref(), Some("secret"));
        assert!(client.endpoint().as_str().ends_with("findAllByDeployableModelId"));
    }
}
