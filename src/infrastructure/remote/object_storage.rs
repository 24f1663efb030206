use super::error::{ensure_success, HttpClientError};
use crate::application::ports::MediaStorage;
use crate::shared::config::RemoteConfig;
use crate::shared::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Object-storage upload endpoint. The server stores the blob under the
/// given key and answers with the durable public URL.
#[derive(Clone)]
pub struct HttpMediaStorage {
    base_url: String,
    api_token: Option<String>,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

impl HttpMediaStorage {
    pub fn new(config: &RemoteConfig) -> Result<Self, AppError> {
        let trimmed = config.media_base_url.trim();
        if trimmed.is_empty() {
            return Err(AppError::ConfigurationError(
                "Remote media_base_url is empty".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;
        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
            api_token: config
                .api_token
                .clone()
                .filter(|value| !value.trim().is_empty()),
            http,
        })
    }
}

#[async_trait]
impl MediaStorage for HttpMediaStorage {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        let url = format!("{}/objects/{}", self.base_url, key.trim_start_matches('/'));
        let mut builder = self
            .http
            .post(url)
            .header("Content-Type", content_type)
            .body(bytes);
        if let Some(token) = &self.api_token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let resp = builder.send().await.map_err(HttpClientError::from)?;
        let resp = ensure_success(resp).await?;
        let uploaded: UploadResponse = resp
            .json()
            .await
            .map_err(|err| HttpClientError::Decode(err.to_string()))?;
        Ok(uploaded.url)
    }
}
