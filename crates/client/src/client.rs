//! Typed HTTP client for the Locatr API.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use locatr_shared::{
    DataResponse, ErrorResponse, HealthResponse, ListResponse, LocationData, LocationPayload,
    LocationQuery, MessageResponse, UnauthorizedResponse,
};

use crate::config::ClientConfig;
use crate::error::ClientError;

const API_KEY_HEADER: &str = "X-API-Key";

/// Client for the location endpoints.
#[derive(Clone)]
pub struct LocationClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl LocationClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Create client from `LOCATR_API_URL` / `LOCATR_API_KEY`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(API_KEY_HEADER, &self.api_key)
    }

    /// True when the API answers its health check.
    pub async fn health_check(&self) -> bool {
        let response = match self.client.get(self.url("/health")).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Health check failed");
                return false;
            }
        };

        match decode::<HealthResponse>(response).await {
            Ok(health) => health.status == "ok",
            Err(e) => {
                tracing::warn!(error = %e, "Health check returned an error");
                false
            }
        }
    }

    /// True when the configured key is accepted.
    pub async fn test_auth(&self) -> bool {
        let result = self
            .authed(self.client.post(self.url("/auth")))
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(error = %e, "Authentication check failed");
                false
            }
        }
    }

    pub async fn list(&self, query: &LocationQuery) -> Result<ListResponse<LocationData>, ClientError> {
        let response = self
            .authed(self.client.get(self.url("/locations")))
            .query(query)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn get(&self, id: i64) -> Result<LocationData, ClientError> {
        let response = self
            .authed(self.client.get(self.url(&format!("/locations/{id}"))))
            .send()
            .await?;
        decode::<DataResponse<LocationData>>(response)
            .await
            .map(|body| body.data)
    }

    pub async fn create(&self, payload: &LocationPayload) -> Result<LocationData, ClientError> {
        let response = self
            .authed(self.client.post(self.url("/locations")))
            .json(payload)
            .send()
            .await?;
        let created = decode::<DataResponse<LocationData>>(response).await?.data;
        tracing::debug!(id = created.id, code = %created.code, "Created location");
        Ok(created)
    }

    /// Partial update; only the fields set in `payload` change.
    pub async fn update(&self, id: i64, payload: &LocationPayload) -> Result<LocationData, ClientError> {
        let response = self
            .authed(self.client.put(self.url(&format!("/locations/{id}"))))
            .json(payload)
            .send()
            .await?;
        decode::<DataResponse<LocationData>>(response)
            .await
            .map(|body| body.data)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .authed(self.client.delete(self.url(&format!("/locations/{id}"))))
            .send()
            .await?;
        decode::<MessageResponse>(response).await.map(|_| ())
    }
}

/// Decode a success body, or classify the failure by status.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    Err(classify(status, &body))
}

fn classify(status: StatusCode, body: &str) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED => {
            let message = serde_json::from_str::<UnauthorizedResponse>(body)
                .map(|r| r.message)
                .unwrap_or_else(|_| UnauthorizedResponse::default().message);
            ClientError::Unauthorized(message)
        }
        StatusCode::NOT_FOUND => {
            let message = serde_json::from_str::<MessageResponse>(body)
                .map(|r| r.message)
                .unwrap_or_else(|_| "Not found".to_string());
            ClientError::NotFound(message)
        }
        StatusCode::UNPROCESSABLE_ENTITY => match serde_json::from_str::<ErrorResponse>(body) {
            Ok(r) => ClientError::Validation {
                fields: r.error.field_errors(),
                message: r.error.message,
                code: r.error.code,
            },
            Err(e) => ClientError::Decode(e.to_string()),
        },
        _ => {
            let message = serde_json::from_str::<ErrorResponse>(body)
                .map(|r| r.error.message)
                .unwrap_or_else(|_| body.to_string());
            ClientError::Server {
                status: status.as_u16(),
                message,
            }
        }
    }
}
