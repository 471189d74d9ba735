use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use gamehub_core::outcome::{FetchError, FetchOutcome};

use crate::catalog_client::CatalogClient;
use crate::config::ApiConfig;

/// reqwest-backed catalog client rooted at a base URL.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {e}"))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl CatalogClient for ApiClient {
    async fn get<T>(
        &self,
        path: &str,
        params: &[(String, String)],
        cancel: &CancellationToken,
    ) -> FetchOutcome<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        if cancel.is_cancelled() {
            return FetchOutcome::Cancelled;
        }

        let url = self.endpoint(path);
        tracing::debug!(%url, params = params.len(), "Catalog GET");

        let mut request = self.client.get(&url).query(params);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        // Dropping the in-flight future aborts the underlying connection.
        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => FetchOutcome::Cancelled,
            outcome = send_and_decode::<T>(request) => outcome,
        };

        match &outcome {
            FetchOutcome::Ok(_) => tracing::debug!(%url, "Catalog GET completed"),
            FetchOutcome::Cancelled => tracing::debug!(%url, "Catalog GET cancelled"),
            FetchOutcome::Failed(e) => {
                tracing::warn!(%url, kind = e.kind(), error = %e, "Catalog GET failed");
            },
        }
        outcome
    }
}

async fn send_and_decode<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> FetchOutcome<T> {
    let resp = match request.send().await {
        Ok(resp) => resp,
        Err(e) => return FetchOutcome::Failed(FetchError::Network(e.to_string())),
    };

    let status = resp.status();
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let body = match resp.text().await {
        Ok(body) => body,
        Err(e) => return FetchOutcome::Failed(FetchError::Network(e.to_string())),
    };

    if !status.is_success() {
        return FetchOutcome::Failed(FetchError::from_response(
            status.as_u16(),
            content_type.as_deref(),
            &body,
        ));
    }

    match serde_json::from_str::<T>(&body) {
        Ok(value) => FetchOutcome::Ok(value),
        Err(e) => FetchOutcome::Failed(FetchError::malformed(e)),
    }
}
