//! 上游运费模拟 API 客户端
//!
//! 每次调用只发送一次请求：不重试、不缓存

use reqwest::{Client, StatusCode, header};

use super::error::QuoteError;
use super::upstream::{PricingRequest, PricingResponse};

#[derive(Debug, Clone)]
pub struct PricingClient {
    client: Client,
    endpoint: String,
}

impl PricingClient {
    /// `client` 在请求间共享以复用连接池
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST 模拟请求并解析响应
    pub async fn simulate(&self, req: &PricingRequest) -> Result<PricingResponse, QuoteError> {
        let payload = serde_json::to_vec(req).map_err(QuoteError::Encode)?;

        #[cfg(feature = "sensitive-logs")]
        tracing::debug!(body = %String::from_utf8_lossy(&payload), "上游请求体");

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(QuoteError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(QuoteError::Transport)?;

        #[cfg(feature = "sensitive-logs")]
        tracing::debug!(status = %status, body = %String::from_utf8_lossy(&body), "上游响应体");

        if status != StatusCode::OK {
            return Err(QuoteError::rejected(
                status.as_u16(),
                &String::from_utf8_lossy(&body),
            ));
        }

        serde_json::from_slice(&body).map_err(QuoteError::Decode)
    }
}
