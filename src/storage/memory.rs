//! 内存报价存储（测试与临时部署使用）

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;

use super::QuoteStore;
use crate::quote::types::QuoteEntry;

#[derive(Debug, Default)]
pub struct InMemoryQuoteStore {
    entries: RwLock<Vec<QuoteEntry>>,
}

impl InMemoryQuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl QuoteStore for InMemoryQuoteStore {
    async fn insert(&self, entry: &QuoteEntry) -> Result<()> {
        self.entries.write().push(entry.clone());
        Ok(())
    }

    async fn query(&self, limit: u64) -> Result<Vec<QuoteEntry>> {
        let entries = self.entries.read();
        if limit == 0 {
            return Ok(entries.clone());
        }

        let mut recent: Vec<QuoteEntry> = entries.iter().rev().cloned().collect();
        // 稳定排序：同一时间戳时后插入的在前
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(recent)
    }
}
