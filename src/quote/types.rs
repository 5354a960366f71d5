//! 客户端请求、持久化记录与统计响应类型

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{DefaultOnNull, serde_as};

// ============ 客户端请求 ============
//
// null 与缺失字段一样按默认值处理，交给校验环节报告

/// 客户端报价请求
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientQuoteRequest {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub recipient: RecipientQuote,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub volumes: Vec<Volume>,
}

impl ClientQuoteRequest {
    /// 收件邮编（原始字符串）
    pub fn zipcode(&self) -> &str {
        &self.recipient.address.zipcode
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecipientQuote {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub address: Address,
}

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Address {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub zipcode: String,
}

/// 一件待运输的货物
///
/// 客户端与上游 API 共用同一结构；`unitary_price` 由服务端计算，
/// 客户端传入的值会被覆盖。
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Volume {
    #[serde(default, deserialize_with = "string_or_number")]
    pub category: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unitary_weight: Option<f64>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub price: f64,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub sku: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub height: f64,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub width: f64,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub length: f64,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub unitary_price: f64,
}

/// 部分客户端以数字形式发送 category，统一转成字符串；null 视为空串
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => s,
        Some(Raw::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

/// 发货方身份（来自配置，不从请求派生）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipperIdentity {
    pub registered_number: String,
    pub token: String,
    pub platform_code: String,
}

// ============ 持久化记录 ============

/// 一次完成报价的精简记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteEntry {
    #[serde(default)]
    pub carrier: Vec<Carrier>,
    pub created_at: DateTime<Utc>,
}

impl QuoteEntry {
    pub fn new(carrier: Vec<Carrier>) -> Self {
        Self {
            carrier,
            created_at: Utc::now(),
        }
    }
}

/// 单个承运商报价
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Carrier {
    pub name: String,
    pub service: String,
    /// 承运商原始时效（天）
    pub deadline: i64,
    pub price: f64,
}

// ============ 统计响应 ============

/// GET /metrics 响应，`metrics` 恒为单元素数组
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsResponse {
    pub metrics: Vec<Metric>,
}

/// 按承运商名称聚合的统计
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Metric {
    pub results_per_carrier: BTreeMap<String, u64>,
    pub total_price_per_carrier: BTreeMap<String, f64>,
    pub avg_price_per_carrier: BTreeMap<String, f64>,
    pub cheapest_freight: BTreeMap<String, f64>,
    pub priciest_freight: BTreeMap<String, f64>,
}

// ============ 通用响应 ============

/// 统一 JSON 响应信封
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResponse {
    pub error: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            error: false,
            message: message.into(),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}
