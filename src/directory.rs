//! Directory snapshot fetching / 目录快照获取
//!
//! The search core never talks to the network itself; it consumes a
//! [`DirectoryResponse`] produced by a [`DirectoryProvider`]. The provider owns
//! all transport concerns (timeouts, retries live upstream of this seam).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::NetworkDirectory;

/// Errors raised while fetching the directory snapshot / 获取目录快照时的错误
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("directory upstream returned status {0}")]
    Status(u16),
}

/// Upstream response envelope: either a payload or a reported error
/// 上游响应信封：要么携带数据，要么携带错误
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryResponse {
    #[serde(default)]
    pub data: Option<NetworkDirectory>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Source of network directory snapshots / 全网目录快照来源
#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    async fn get_network_directory(&self) -> Result<DirectoryResponse, DirectoryError>;
}

/// HTTP-backed provider hitting the configured upstream / 基于HTTP的上游目录提供者
pub struct HttpDirectoryProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpDirectoryProvider {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl DirectoryProvider for HttpDirectoryProvider {
    async fn get_network_directory(&self) -> Result<DirectoryResponse, DirectoryError> {
        let response = self.client.post(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status.as_u16()));
        }
        let envelope = response.json::<DirectoryResponse>().await?;
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_data() {
        let envelope: DirectoryResponse = serde_json::from_str(
            r#"{"data":{"users":[{"id":"u1","username":"ann"}],"slates":[]}}"#,
        )
        .unwrap();
        assert!(envelope.error.is_none());
        let data = envelope.data.unwrap();
        assert_eq!(data.users.len(), 1);
        assert_eq!(data.users[0].username.as_deref(), Some("ann"));
    }

    #[test]
    fn test_envelope_with_error() {
        let envelope: DirectoryResponse =
            serde_json::from_str(r#"{"error":"SERVER_ERROR"}"#).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.error.as_deref(), Some("SERVER_ERROR"));
    }

    #[test]
    fn test_empty_envelope() {
        let envelope: DirectoryResponse = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.is_none());
        assert!(envelope.error.is_none());
    }
}
