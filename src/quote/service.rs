//! 报价业务流程
//!
//! 校验 → 构建上游请求 → 调用上游 → 精简响应 → 持久化；
//! 以及从存储读取记录后聚合统计。

use std::sync::Arc;

use super::builder;
use super::client::PricingClient;
use super::error::QuoteError;
use super::formatter;
use super::metrics;
use super::types::{ClientQuoteRequest, MetricsResponse, QuoteEntry, ShipperIdentity};
use super::validator;
use crate::storage::QuoteStore;

pub struct QuoteService {
    identity: ShipperIdentity,
    client: PricingClient,
    store: Arc<dyn QuoteStore>,
}

impl QuoteService {
    pub fn new(identity: ShipperIdentity, client: PricingClient, store: Arc<dyn QuoteStore>) -> Self {
        Self {
            identity,
            client,
            store,
        }
    }

    /// 完成一次报价并返回已持久化的记录
    ///
    /// 任一环节失败都不会写入存储。
    pub async fn quote(&self, req: ClientQuoteRequest) -> Result<QuoteEntry, QuoteError> {
        let defects = validator::validate(&req);
        if !defects.is_empty() {
            tracing::info!(defects = defects.len(), "报价请求缺少必填项");
            return Err(QuoteError::Validation(defects));
        }

        let pricing_request = builder::build(&req, &self.identity)?;
        tracing::debug!(
            zipcode = pricing_request.recipient.zipcode,
            volumes = req.volumes.len(),
            "调用上游运费模拟"
        );

        let response = self.client.simulate(&pricing_request).await.map_err(|e| {
            match &e {
                QuoteError::UpstreamRejected { status, body } => {
                    tracing::warn!(status, body = %body, "上游拒绝报价请求")
                }
                other => tracing::warn!("上游调用失败: {}", other),
            }
            e
        })?;

        let entry = formatter::format_response(&response);
        self.store.insert(&entry).await.map_err(|e| {
            tracing::error!("写入报价记录失败: {:#}", e);
            QuoteError::StorageWrite(e)
        })?;

        tracing::info!(carriers = entry.carrier.len(), "报价已保存");
        Ok(entry)
    }

    /// 读取最近 `last_quotes` 条记录（0 表示全部）并聚合
    pub async fn metrics(&self, last_quotes: u64) -> Result<MetricsResponse, QuoteError> {
        let entries = self.store.query(last_quotes).await.map_err(|e| {
            tracing::error!("读取报价记录失败: {:#}", e);
            QuoteError::StorageRead(e)
        })?;

        tracing::debug!(entries = entries.len(), last_quotes, "聚合报价统计");
        Ok(metrics::aggregate(&entries))
    }
}
