//! 报价记录存储
//!
//! 提供 `QuoteStore` 抽象及 SQLite / 内存两种实现

mod memory;
mod sqlite;

use anyhow::Result;
use async_trait::async_trait;

use crate::quote::types::QuoteEntry;

pub use memory::InMemoryQuoteStore;
pub use sqlite::SqliteQuoteStore;

/// 报价记录的持久化能力
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// 写入一条记录，`created_at` 按调用方给出的值保存
    async fn insert(&self, entry: &QuoteEntry) -> Result<()>;

    /// 查询记录
    ///
    /// `limit == 0` 返回全部记录（插入顺序）；
    /// `limit > 0` 返回最近的至多 `limit` 条，按创建时间倒序。
    async fn query(&self, limit: u64) -> Result<Vec<QuoteEntry>>;
}
