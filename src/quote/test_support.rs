//! 测试用上游桩服务

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use parking_lot::Mutex;
use serde_json::{Value, json};

/// 桩服务收到的请求
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    response: Value,
    last: Arc<Mutex<Option<ReceivedRequest>>>,
    hits: Arc<Mutex<usize>>,
}

pub struct StubServer {
    addr: std::net::SocketAddr,
    state: StubState,
}

impl StubServer {
    pub fn url(&self) -> String {
        format!("http://{}/simulate", self.addr)
    }

    pub fn last_request(&self) -> Option<ReceivedRequest> {
        self.state.last.lock().clone()
    }

    pub fn hits(&self) -> usize {
        *self.state.hits.lock()
    }
}

async fn simulate(
    State(state): State<StubState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };
    *state.last.lock() = Some(ReceivedRequest {
        content_type: header_value(header::CONTENT_TYPE),
        accept: header_value(header::ACCEPT),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });
    *state.hits.lock() += 1;
    (state.status, Json(state.response.clone()))
}

/// 在 127.0.0.1 随机端口启动桩服务，固定返回给定状态码与 JSON
pub async fn spawn_stub(status: StatusCode, response: Value) -> StubServer {
    let state = StubState {
        status,
        response,
        last: Arc::new(Mutex::new(None)),
        hits: Arc::new(Mutex::new(0)),
    };
    let app = Router::new()
        .route("/simulate", post(simulate))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubServer { addr, state }
}

/// 单个 dispatcher 的上游响应，报价顺序与参数一致
pub fn stub_response(offers: &[(&str, f64)]) -> Value {
    let offers: Vec<Value> = offers
        .iter()
        .enumerate()
        .map(|(i, (name, price))| {
            json!({
                "offer": i + 1,
                "simulation_type": 0,
                "carrier": {"name": name, "registered_number": "34028316000103"},
                "service": "Normal",
                "delivery_time": {"days": 10, "estimated_date": "2022-10-03"},
                "cost_price": price,
                "final_price": price,
                "weights": {"real": 1, "cubed": 0.41, "used": 1},
                "home_delivery": true,
                "carrier_original_delivery_time": {"days": i + 1, "estimated_date": "2022-09-30"},
                "modal": "Rodoviário"
            })
        })
        .collect();

    json!({
        "dispatchers": [{
            "id": "6331de4ceb69bc0b9b8d2f14",
            "zipcode_origin": 29161376,
            "offers": offers
        }]
    })
}

/// 不走系统代理的客户端，避免环境变量把本地请求转发出去
pub fn local_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
