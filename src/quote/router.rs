//! 报价 API 路由

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use super::handlers::{connectivity, create_quote, get_metrics};
use super::service::QuoteService;

/// 请求体上限 1 MiB
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// 报价 API 状态
#[derive(Clone)]
pub struct QuoteState {
    pub service: Arc<QuoteService>,
}

/// 创建报价 API 路由
///
/// # 端点
/// - `GET /` - 连通性检查
/// - `POST /quote` - 报价并保存
/// - `GET /metrics?last_quotes=N` - 承运商统计
pub fn create_quote_router(service: Arc<QuoteService>) -> Router {
    let state = QuoteState { service };

    Router::new()
        .route("/", get(connectivity))
        .route("/quote", post(create_quote))
        .route("/metrics", get(get_metrics))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors_layer())
        .with_state(state)
}

/// CORS 中间件层
///
/// 允许任何来源、方法和请求头
pub fn cors_layer() -> tower_http::cors::CorsLayer {
    use tower_http::cors::{Any, CorsLayer};

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
