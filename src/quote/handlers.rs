//! 报价 API 处理器

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use super::router::QuoteState;
use super::types::{ClientQuoteRequest, JsonResponse};

/// GET /
/// 连通性检查
pub async fn connectivity() -> impl IntoResponse {
    Json(JsonResponse::ok("connected!"))
}

/// POST /quote
/// 调用上游报价并保存精简结果
///
/// 不要求 Content-Type；请求体必须是单个 JSON 值，尾随数据视为非法
pub async fn create_quote(State(state): State<QuoteState>, body: Bytes) -> impl IntoResponse {
    let request: ClientQuoteRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!("报价请求体解析失败: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(JsonResponse::error(e.to_string())),
            )
                .into_response();
        }
    };

    match state.service.quote(request).await {
        Ok(entry) => Json(entry).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /metrics 查询参数
#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    pub last_quotes: Option<String>,
}

/// GET /metrics?last_quotes=N
/// 聚合最近 N 条（缺省为全部）报价记录
pub async fn get_metrics(
    State(state): State<QuoteState>,
    Query(query): Query<MetricsQuery>,
) -> impl IntoResponse {
    let last_quotes = match parse_last_quotes(query.last_quotes.as_deref()) {
        Some(n) => n,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(JsonResponse::error("invalid 'last_quotes' value")),
            )
                .into_response();
        }
    };

    match state.service.metrics(last_quotes).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 空值视为 0（全部），非负整数以外的输入返回 None
fn parse_last_quotes(raw: Option<&str>) -> Option<u64> {
    match raw {
        None | Some("") => Some(0),
        Some(value) => value.parse::<u64>().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_last_quotes() {
        assert_eq!(parse_last_quotes(None), Some(0));
        assert_eq!(parse_last_quotes(Some("")), Some(0));
        assert_eq!(parse_last_quotes(Some("5")), Some(5));
        assert_eq!(parse_last_quotes(Some("0")), Some(0));
        assert_eq!(parse_last_quotes(Some("-1")), None);
        assert_eq!(parse_last_quotes(Some("ten")), None);
        assert_eq!(parse_last_quotes(Some("1.5")), None);
        assert_eq!(parse_last_quotes(Some(" 5")), None);
        assert_eq!(parse_last_quotes(Some("+5")), Some(5));
    }
}
