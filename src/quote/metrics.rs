//! 按承运商聚合历史报价

use std::collections::HashMap;

use super::types::{Metric, MetricsResponse, QuoteEntry};

/// 单个承运商的累计状态
#[derive(Debug, Default)]
struct CarrierAccumulator {
    count: u64,
    total: f64,
    average: f64,
    /// None 表示尚未见过该承运商的报价，0 元报价同样会被记录
    cheapest: Option<f64>,
    priciest: Option<f64>,
}

impl CarrierAccumulator {
    fn add(&mut self, price: f64) {
        self.count += 1;
        self.total = truncate_cents(self.total + price);
        self.average = truncate_cents(self.total / self.count as f64);

        if self.cheapest.is_none_or(|min| price < min) {
            self.cheapest = Some(price);
        }
        if self.priciest.is_none_or(|max| price > max) {
            self.priciest = Some(price);
        }
    }
}

/// 保留两位小数，向零截断（先乘 100 取整再除 100）
pub fn truncate_cents(value: f64) -> f64 {
    (value * 100.0) as i64 as f64 / 100.0
}

/// 聚合全部记录，按调用方给出的顺序逐条累加
///
/// 返回值恒为单元素的 `metrics` 列表。
pub fn aggregate(entries: &[QuoteEntry]) -> MetricsResponse {
    let mut carriers: HashMap<&str, CarrierAccumulator> = HashMap::new();

    for entry in entries {
        for carrier in &entry.carrier {
            carriers
                .entry(carrier.name.as_str())
                .or_default()
                .add(carrier.price);
        }
    }

    let mut metric = Metric::default();
    for (name, acc) in carriers {
        metric.results_per_carrier.insert(name.to_string(), acc.count);
        metric.total_price_per_carrier.insert(name.to_string(), acc.total);
        metric.avg_price_per_carrier.insert(name.to_string(), acc.average);
        if let Some(cheapest) = acc.cheapest {
            metric.cheapest_freight.insert(name.to_string(), cheapest);
        }
        if let Some(priciest) = acc.priciest {
            metric.priciest_freight.insert(name.to_string(), priciest);
        }
    }

    MetricsResponse {
        metrics: vec![metric],
    }
}
