//! 运费报价模块
//!
//! 校验客户端请求、调用上游模拟接口、保存精简结果并提供承运商统计

pub mod builder;
pub mod client;
pub mod error;
pub mod formatter;
pub mod metrics;
pub mod service;
pub mod types;
pub mod upstream;
pub mod validator;
mod handlers;
mod router;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::PricingClient;
pub use router::create_quote_router;
pub use service::QuoteService;
