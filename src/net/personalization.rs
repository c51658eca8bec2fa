//! Personalization submission client.

use async_trait::async_trait;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::NetworkError;
use crate::user::{BirthCoordinates, UserAccount};

/// Wire body for the personalization submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalizationRequest {
    /// `yyyy-MM-dd`.
    pub birthday: String,
    /// `HH:mm:ss`.
    pub birthday_time: String,
    pub birthday_coordinates: BirthCoordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Remote personalization submission. Pure request/response — no state.
#[async_trait]
pub trait PersonalizationClient: Send + Sync {
    /// Submit the collected birth data and receive the server-assigned
    /// identity.
    async fn submit(&self, request: &PersonalizationRequest) -> Result<UserAccount, NetworkError>;
}

/// HTTP implementation against the personalization API.
pub struct HttpPersonalizationClient {
    client: reqwest::Client,
    base_url: String,
}

const PERSONALIZATION_PATH: &str = "/api/v1/user/personalization";

impl HttpPersonalizationClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{PERSONALIZATION_PATH}", self.base_url)
    }
}

#[async_trait]
impl PersonalizationClient for HttpPersonalizationClient {
    async fn submit(&self, request: &PersonalizationRequest) -> Result<UserAccount, NetworkError> {
        let resp = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(NetworkError::from_transport)?;

        if let Some(err) = super::error_for_status(resp.status()) {
            return Err(err);
        }

        let body = resp
            .text()
            .await
            .map_err(|_| NetworkError::InvalidResponse)?;
        serde_json::from_str(&body).map_err(|e| NetworkError::Decoding(e.to_string()))
    }
}
