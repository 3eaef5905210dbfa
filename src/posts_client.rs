use std::time::Duration;

use crate::config::EngineConfig;
use crate::Post;

/// Client for the external metrics backend that materializes Post records.
#[derive(Clone)]
pub struct PostsClient {
    endpoint: String,
    client: reqwest::Client,
}

impl PostsClient {
    pub fn from_config(config: &EngineConfig) -> Result<Self, String> {
        let timeout = Duration::from_millis(config.backend.timeout_ms);
        PostsClient::new(config.backend.endpoint.clone(), timeout)
    }

    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| format!("failed to build posts client: {}", err))?;
        Ok(Self { endpoint, client })
    }

    pub async fn fetch_posts(&self) -> Result<Vec<Post>, String> {
        let url = format!("{}/posts", self.endpoint.trim_end_matches('/'));
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| format!("posts request failed: {}", err))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("backend error {}: {}", status, body));
        }

        response
            .json::<Vec<Post>>()
            .await
            .map_err(|err| format!("posts response parse failed: {}", err))
    }
}
