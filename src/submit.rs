//! Remote submission boundary — hands the finished record to the brand API.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::SubmitConfig;
use crate::error::SubmitError;
use crate::wizard::record::BrandRecord;

/// Identifier assigned by the remote service to a newly created brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBrand {
    pub id: Uuid,
}

/// Accepts a finished record; returns the created brand or why not.
#[async_trait]
pub trait BrandSubmitter: Send + Sync {
    async fn submit(&self, record: &BrandRecord) -> Result<CreatedBrand, SubmitError>;
}

/// `BrandSubmitter` posting the record as JSON to the brand API.
pub struct HttpSubmitter {
    config: SubmitConfig,
    client: reqwest::Client,
}

impl HttpSubmitter {
    pub fn new(config: SubmitConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/brands", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl BrandSubmitter for HttpSubmitter {
    async fn submit(&self, record: &BrandRecord) -> Result<CreatedBrand, SubmitError> {
        let mut request = self
            .client
            .post(self.endpoint())
            .timeout(self.config.request_timeout)
            .json(record);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::Rejected {
                message: format!("{status}: {}", body.trim()),
            });
        }

        let created: CreatedBrand = response
            .json()
            .await
            .map_err(|e| SubmitError::InvalidResponse(e.to_string()))?;
        debug!(brand_id = %created.id, "brand created");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_doubled_slash() {
        let submitter = HttpSubmitter::new(SubmitConfig {
            base_url: "http://localhost:3001/api/".into(),
            ..Default::default()
        });
        assert_eq!(submitter.endpoint(), "http://localhost:3001/api/brands");

        let submitter = HttpSubmitter::new(SubmitConfig::default());
        assert_eq!(submitter.endpoint(), "http://localhost:3001/api/brands");
    }

    #[test]
    fn created_brand_parses_the_response_shape() {
        let created: CreatedBrand =
            serde_json::from_str(r#"{"id":"3fa85f64-5717-4562-b3fc-2c963f66afa6"}"#).unwrap();
        assert_eq!(
            created.id.to_string(),
            "3fa85f64-5717-4562-b3fc-2c963f66afa6"
        );

        // Anything without an id is not a creation receipt.
        assert!(serde_json::from_str::<CreatedBrand>(r#"{"ok":true}"#).is_err());
    }
}
