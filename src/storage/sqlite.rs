//! SQLite 报价存储

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;

use super::QuoteStore;
use crate::quote::types::{Carrier, QuoteEntry};

/// 底层 SQLite 连接（同步）
struct QuoteDb {
    conn: Mutex<Connection>,
}

impl QuoteDb {
    fn open(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("打开数据库失败: {}", db_path))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS quotes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                created_at TEXT NOT NULL,
                carriers TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_quotes_created_at ON quotes(created_at);",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| anyhow!("数据库连接锁已中毒"))
    }

    fn insert(&self, entry: &QuoteEntry) -> Result<()> {
        let carriers = serde_json::to_string(&entry.carrier)?;
        // 固定纳秒精度，保证按字符串排序与时间顺序一致
        let created_at = entry.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true);

        self.connection()?.execute(
            "INSERT INTO quotes (created_at, carriers) VALUES (?1, ?2)",
            rusqlite::params![created_at, carriers],
        )?;
        Ok(())
    }

    fn query(&self, limit: u64) -> Result<Vec<QuoteEntry>> {
        let conn = self.connection()?;

        let (sql, params): (&str, Vec<i64>) = if limit > 0 {
            (
                "SELECT created_at, carriers FROM quotes ORDER BY created_at DESC, id DESC LIMIT ?1",
                vec![i64::try_from(limit).unwrap_or(i64::MAX)],
            )
        } else {
            ("SELECT created_at, carriers FROM quotes ORDER BY id", Vec::new())
        };

        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(created_at, carriers)| -> Result<QuoteEntry> {
                let created_at = DateTime::parse_from_rfc3339(&created_at)
                    .with_context(|| format!("无效的 created_at: {}", created_at))?
                    .with_timezone(&Utc);
                let carrier: Vec<Carrier> =
                    serde_json::from_str(&carriers).context("解析 carriers 列失败")?;
                Ok(QuoteEntry {
                    carrier,
                    created_at,
                })
            })
            .collect()
    }
}

/// 基于 SQLite 的报价存储
///
/// 阻塞调用放到 `spawn_blocking` 中执行
#[derive(Clone)]
pub struct SqliteQuoteStore {
    db: Arc<QuoteDb>,
}

impl SqliteQuoteStore {
    /// 打开（或创建）数据库，`:memory:` 为纯内存库
    pub fn open(db_path: &str) -> Result<Self> {
        Ok(Self {
            db: Arc::new(QuoteDb::open(db_path)?),
        })
    }
}

#[async_trait]
impl QuoteStore for SqliteQuoteStore {
    async fn insert(&self, entry: &QuoteEntry) -> Result<()> {
        let db = self.db.clone();
        let entry = entry.clone();
        tokio::task::spawn_blocking(move || db.insert(&entry)).await?
    }

    async fn query(&self, limit: u64) -> Result<Vec<QuoteEntry>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || db.query(limit)).await?
    }
}
