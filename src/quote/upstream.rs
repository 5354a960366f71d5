//! 上游运费模拟 API 请求/响应类型

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, serde_as};

use super::types::Volume;

// ============ 请求 ============

/// POST /quote/simulate 请求体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingRequest {
    pub shipper: Shipper,
    pub recipient: Recipient,
    pub dispatchers: Vec<Dispatcher>,
    pub simulation_type: Vec<i32>,
    pub returns: Returns,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shipper {
    pub registered_number: String,
    pub token: String,
    pub platform_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipient {
    #[serde(rename = "type")]
    pub recipient_type: i32,
    pub country: String,
    pub zipcode: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dispatcher {
    pub registered_number: String,
    pub zipcode: i64,
    pub volumes: Vec<Volume>,
}

/// 控制上游响应中是否附带明细
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Returns {
    pub composition: bool,
    pub volumes: bool,
    pub applied_rules: bool,
}

// ============ 响应 ============
//
// null 与缺失字段一样按默认值处理

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PricingResponse {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub dispatchers: Vec<DispatcherResult>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DispatcherResult {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub request_id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub registered_number_shipper: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub registered_number_dispatcher: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub zipcode_origin: i64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub offers: Vec<Offer>,
}

/// 单个承运商报价
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Offer {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub offer: i64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub table_reference: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub simulation_type: i32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub carrier: OfferCarrier,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub service: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub delivery_time: DeliveryTime,
    pub expiration: Option<DateTime<FixedOffset>>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub cost_price: f64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub final_price: f64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub weights: Weights,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub original_delivery_time: DeliveryTime,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub home_delivery: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub carrier_original_delivery_time: DeliveryTime,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub modal: String,
}

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OfferCarrier {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub registered_number: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub state_inscription: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub logo: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub reference: i64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub company_name: String,
}

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeliveryTime {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub days: i64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub estimated_date: String,
}

#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Weights {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub real: f64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub cubed: f64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub used: f64,
}
