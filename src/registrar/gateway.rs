//! HTTP blockchain gateway client.
//!
//! Talks to a gateway bridge that relays deploy and call transactions to the
//! chain on the client's behalf. Two endpoints are consumed: `POST /deploy`
//! and `POST /call`.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{IdentityRegistrar, RegistrarError};

pub struct GatewayRegistrar {
    client: Client,
    base_url: String,
    /// Hex public key of the deploying account.
    from: String,
}

#[derive(Serialize)]
struct DeployRequest<'a> {
    from: &'a str,
    bytecode: &'a str,
    args: &'a [serde_json::Value],
}

#[derive(Deserialize)]
struct DeployResponse {
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Serialize)]
struct CallRequest<'a> {
    address: &'a str,
    method: &'a str,
}

#[derive(Deserialize)]
struct CallResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

impl GatewayRegistrar {
    pub fn new(base_url: impl Into<String>, from: impl Into<String>) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            from: from.into(),
        }
    }
}

#[async_trait]
impl IdentityRegistrar for GatewayRegistrar {
    async fn deploy(
        &self,
        bytecode: &str,
        args: &[serde_json::Value],
    ) -> Result<String, RegistrarError> {
        debug!(from = %self.from, "deploying access contract");

        let response = self
            .client
            .post(format!("{}/deploy", self.base_url))
            .json(&DeployRequest {
                from: &self.from,
                bytecode,
                args,
            })
            .send()
            .await
            .map_err(|e| RegistrarError::Network(e.to_string()))?;

        let status = response.status();
        let body: DeployResponse = response
            .json()
            .await
            .map_err(|e| RegistrarError::Parse(e.to_string()))?;

        if let Some(error) = body.error {
            return Err(RegistrarError::Rejected(error));
        }
        let address = body.address.ok_or_else(|| {
            RegistrarError::Parse(format!("gateway returned {status} without an address"))
        })?;

        info!(address = %address, "access contract deployed");
        Ok(address)
    }

    async fn has_expired(&self, address: &str) -> Result<bool, RegistrarError> {
        debug!(address = %address, "querying contract expiry");

        let response = self
            .client
            .post(format!("{}/call", self.base_url))
            .json(&CallRequest {
                address,
                method: "hasExpired",
            })
            .send()
            .await
            .map_err(|e| RegistrarError::Network(e.to_string()))?;

        let status = response.status();
        let body: CallResponse = response
            .json()
            .await
            .map_err(|e| RegistrarError::Parse(e.to_string()))?;

        if let Some(error) = body.error {
            return Err(RegistrarError::Rejected(error));
        }
        body.result
            .as_ref()
            .and_then(serde_json::Value::as_bool)
            .ok_or_else(|| {
                RegistrarError::Parse(format!("gateway returned {status} without a boolean result"))
            })
    }
}
