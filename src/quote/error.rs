//! 报价流程错误类型

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::types::JsonResponse;

/// 上游响应体在日志中保留的最大字节数
const MAX_LOGGED_BODY_BYTES: usize = 512;

#[derive(Debug, Error)]
pub enum QuoteError {
    /// 请求缺少必填项
    #[error("Missing arguments!")]
    Validation(Vec<String>),

    /// 构建上游请求时发现 amount 为 0（校验应已拦截）
    #[error("Amount must be non-zero for Volume[{index}]")]
    ZeroAmount { index: usize },

    #[error("failed to encode pricing request: {0}")]
    Encode(#[source] serde_json::Error),

    /// 网络、DNS、超时等传输层失败
    #[error("failed to reach pricing API: {0}")]
    Transport(#[source] reqwest::Error),

    /// 上游返回非 200 状态码；状态码与截断后的响应体仅用于日志
    #[error("pricing API returned a non-200 status code: {status}")]
    UpstreamRejected { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to insert quote: {0}")]
    StorageWrite(anyhow::Error),

    #[error("failed to retrieve quotes: {0}")]
    StorageRead(anyhow::Error),
}

impl QuoteError {
    /// 构造上游拒绝错误，响应体按 UTF-8 边界截断
    pub fn rejected(status: u16, body: &str) -> Self {
        Self::UpstreamRejected {
            status,
            body: truncate_with_ellipsis(body, MAX_LOGGED_BODY_BYTES),
        }
    }

    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Encode(_) | Self::Transport(_) | Self::UpstreamRejected { .. } | Self::Decode(_)
        )
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_upstream() {
            return StatusCode::BAD_GATEWAY;
        }
        match self {
            Self::Validation(_) | Self::ZeroAmount { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对外的响应信封，不包含上游状态码或响应体
    pub fn to_envelope(&self) -> JsonResponse {
        match self {
            Self::Validation(defects) => {
                JsonResponse::error(self.to_string()).with_data(serde_json::json!(defects))
            }
            Self::ZeroAmount { .. } => JsonResponse::error(self.to_string()),
            Self::StorageWrite(_) => JsonResponse::error("Failed to insert quote"),
            Self::StorageRead(_) => JsonResponse::error("Failed to retrieve quotes"),
            _ => JsonResponse::error("Failed to connect to pricing API"),
        }
    }
}

impl IntoResponse for QuoteError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_envelope())).into_response()
    }
}

/// 截断字符串并添加省略号，不会在多字节字符中间截断
fn truncate_with_ellipsis(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }

    let mut end = max_bytes.saturating_sub(3);
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
