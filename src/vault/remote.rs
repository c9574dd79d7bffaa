//! Signed HTTP vault client.
//!
//! Requests are JSON envelopes signed with the device key: the vault server
//! verifies the signature against the permissions the access contract grants
//! the signer. Responses carry `responseType` success/error with the payload
//! or failure reason.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::{VaultError, VaultStore};
use crate::keys::DeviceKey;

pub struct RemoteVault {
    client: Client,
    url: String,
    key: Arc<DeviceKey>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestBody<'a> {
    txn_type: &'static str,
    request_type: &'a str,
    contract: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a str>,
}

#[derive(Serialize)]
struct SignedRequest<'a> {
    txn: RequestBody<'a>,
    signature: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseBody {
    response_type: String,
    #[serde(default)]
    data: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct VaultResponse {
    txn: ResponseBody,
}

impl RemoteVault {
    pub fn new(url: impl Into<String>, key: Arc<DeviceKey>) -> Self {
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
            url: url.into(),
            key,
        }
    }

    async fn send(
        &self,
        request_type: &str,
        contract: &str,
        file: Option<&str>,
        data: Option<&str>,
    ) -> Result<String, VaultError> {
        let txn = RequestBody {
            txn_type: "VaultRequest",
            request_type,
            contract,
            file,
            data,
        };

        // Signature covers the serialized txn exactly as sent.
        let payload =
            serde_json::to_vec(&txn).map_err(|e| VaultError::Protocol(e.to_string()))?;
        let signature = self.key.sign(&payload);

        debug!(request_type, contract, file = ?file, "vault request");

        let response = self
            .client
            .post(&self.url)
            .json(&SignedRequest { txn, signature })
            .send()
            .await
            .map_err(|e| VaultError::Network(e.to_string()))?;

        let status = response.status();
        let body: VaultResponse = response
            .json()
            .await
            .map_err(|e| VaultError::Protocol(format!("{status}: {e}")))?;

        match body.txn.response_type.as_str() {
            "success" => Ok(body.txn.data.unwrap_or_default()),
            _ => Err(VaultError::Denied(
                body.txn
                    .error
                    .unwrap_or_else(|| format!("vault returned {status}")),
            )),
        }
    }
}

#[async_trait]
impl VaultStore for RemoteVault {
    async fn create(&self, contract: &str) -> Result<(), VaultError> {
        self.send("create", contract, None, None).await.map(|_| ())
    }

    async fn read(&self, contract: &str, path: &str) -> Result<String, VaultError> {
        self.send("read", contract, Some(path), None).await
    }

    async fn write(&self, contract: &str, path: &str, data: &str) -> Result<(), VaultError> {
        self.send("write", contract, Some(path), Some(data))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let txn = RequestBody {
            txn_type: "VaultRequest",
            request_type: "write",
            contract: "0xabc",
            file: Some("0x01/0x02"),
            data: Some("payload"),
        };
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["txnType"], "VaultRequest");
        assert_eq!(json["requestType"], "write");
        assert_eq!(json["file"], "0x01/0x02");
    }

    #[test]
    fn test_request_omits_absent_fields() {
        let txn = RequestBody {
            txn_type: "VaultRequest",
            request_type: "create",
            contract: "0xabc",
            file: None,
            data: None,
        };
        let json = serde_json::to_value(&txn).unwrap();
        assert!(json.get("file").is_none());
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_response_parsing() {
        let success: VaultResponse =
            serde_json::from_str(r#"{"txn":{"responseType":"success","data":"a\nb"}}"#).unwrap();
        assert_eq!(success.txn.response_type, "success");
        assert_eq!(success.txn.data.as_deref(), Some("a\nb"));

        let error: VaultResponse =
            serde_json::from_str(r#"{"txn":{"responseType":"error","error":"permission denied"}}"#)
                .unwrap();
        assert_eq!(error.txn.response_type, "error");
        assert_eq!(error.txn.error.as_deref(), Some("permission denied"));
    }
}
