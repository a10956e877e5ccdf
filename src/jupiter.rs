//! Thin client for the Jupiter aggregator HTTP API.
//!
//! Responses are passed through as JSON values; only the swap transaction
//! field is picked out for the signer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://quote-api.jup.ag/v6";

#[derive(Debug, Error)]
pub enum JupiterError {
    #[error("request to Jupiter failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Jupiter API error: {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected Jupiter response: {0}")]
    Malformed(String),
}

/// Parameters of a quote request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
    pub input_mint: String,
    pub output_mint: String,
    /// Base units of the input mint.
    pub amount: u64,
    pub slippage_bps: u16,
    /// Solana cluster to route on; omitted lets Jupiter pick mainnet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
}

impl QuoteParams {
    fn query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("inputMint".to_string(), self.input_mint.clone()),
            ("outputMint".to_string(), self.output_mint.clone()),
            ("amount".to_string(), self.amount.to_string()),
            ("slippageBps".to_string(), self.slippage_bps.to_string()),
        ];
        if let Some(cluster) = &self.cluster {
            query.push(("cluster".to_string(), cluster.clone()));
        }
        query
    }
}

/// An unsigned transaction built by the swap endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapTransaction {
    /// Base64-encoded transaction, opaque to us.
    pub swap_transaction: String,
    #[serde(default)]
    pub last_valid_block_height: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct JupiterClient {
    http: reqwest::Client,
    base_url: String,
}

impl JupiterClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read(resp: reqwest::Response) -> Result<Value, JupiterError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %body, "Jupiter returned an error");
            return Err(JupiterError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json::<Value>().await?)
    }

    /// Forward an arbitrary quote query string.
    pub async fn quote_raw(&self, query: &[(String, String)]) -> Result<Value, JupiterError> {
        let url = format!("{}/quote", self.base_url);
        tracing::debug!(%url, "fetching Jupiter quote");
        let resp = self.http.get(&url).query(query).send().await?;
        Self::read(resp).await
    }

    pub async fn quote(&self, params: &QuoteParams) -> Result<Value, JupiterError> {
        self.quote_raw(&params.query()).await
    }

    /// Forward a raw swap-build request body.
    pub async fn swap_raw(&self, body: &Value, cluster: Option<&str>) -> Result<Value, JupiterError> {
        let url = format!("{}/swap", self.base_url);
        let resp = self
            .http
            .post(&url)
            .query(&[("cluster", cluster.unwrap_or("mainnet-beta"))])
            .json(body)
            .send()
            .await?;
        Self::read(resp).await
    }

    /// Build the swap transaction for `quote` on behalf of `user_public_key`.
    pub async fn swap(
        &self,
        quote: &Value,
        user_public_key: &str,
        cluster: &str,
    ) -> Result<SwapTransaction, JupiterError> {
        let body = serde_json::json!({
            "quoteResponse": quote,
            "userPublicKey": user_public_key,
            "wrapAndUnwrapSol": true,
        });
        let value = self.swap_raw(&body, Some(cluster)).await?;
        serde_json::from_value(value).map_err(|e| JupiterError::Malformed(e.to_string()))
    }

    pub async fn tokens(&self, cluster: Option<&str>) -> Result<Value, JupiterError> {
        let url = format!("{}/tokens", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[("cluster", cluster.unwrap_or("mainnet-beta"))])
            .send()
            .await?;
        Self::read(resp).await
    }
}

impl Default for JupiterClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
