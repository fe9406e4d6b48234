// ==========================================
// 学校校历生成器 - 外部写入接口
// ==========================================
// 职责: 定义数据库创建/行写入 trait,实现依赖倒置
// 说明: HTTP 传输、鉴权、重试由实现方负责,不在本 crate 内
// ==========================================

use async_trait::async_trait;
use serde_json::Value;
use std::error::Error;
use std::sync::Mutex;
use uuid::Uuid;

pub type SinkError = Box<dyn Error + Send + Sync>;

// ==========================================
// CalendarSink Trait
// ==========================================

/// 课程日历写入方
///
/// 调用顺序: 先 create_database,再按周序逐行 insert_row
#[async_trait]
pub trait CalendarSink: Send + Sync {
    /// 创建数据库,返回数据库 ID
    async fn create_database(&self, parent_page_id: &str, payload: Value) -> Result<String, SinkError>;

    /// 写入一行（一个页面）,返回页面 ID
    async fn insert_row(&self, database_id: &str, payload: Value) -> Result<String, SinkError>;
}

// ==========================================
// RecordingSink - 内存记录实现
// ==========================================

#[derive(Debug, Clone)]
pub struct RecordedDatabase {
    pub id: String,
    pub parent_page_id: String,
    pub payload: Value,
    pub rows: Vec<RecordedPage>,
}

#[derive(Debug, Clone)]
pub struct RecordedPage {
    pub id: String,
    pub payload: Value,
}

/// 用于试运行与测试的写入方
#[derive(Debug, Default)]
pub struct RecordingSink {
    databases: Mutex<Vec<RecordedDatabase>>,
    /// 成功写入该数量的行之后,后续写入失败
    fail_after_rows: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(rows: usize) -> Self {
        Self {
            databases: Mutex::new(Vec::new()),
            fail_after_rows: Some(rows),
        }
    }

    /// 已记录内容的快照
    pub fn databases(&self) -> Vec<RecordedDatabase> {
        self.databases
            .lock()
            .map(|dbs| dbs.clone())
            .unwrap_or_default()
    }

    pub fn total_rows(&self) -> usize {
        self.databases().iter().map(|db| db.rows.len()).sum()
    }
}

#[async_trait]
impl CalendarSink for RecordingSink {
    async fn create_database(&self, parent_page_id: &str, payload: Value) -> Result<String, SinkError> {
        let mut dbs = self
            .databases
            .lock()
            .map_err(|e| format!("锁获取失败: {}", e))?;
        let id = Uuid::new_v4().to_string();
        dbs.push(RecordedDatabase {
            id: id.clone(),
            parent_page_id: parent_page_id.to_string(),
            payload,
            rows: Vec::new(),
        });
        tracing::debug!(database_id = %id, "RecordingSink: 已记录数据库");
        Ok(id)
    }

    async fn insert_row(&self, database_id: &str, payload: Value) -> Result<String, SinkError> {
        let mut dbs = self
            .databases
            .lock()
            .map_err(|e| format!("锁获取失败: {}", e))?;

        if let Some(limit) = self.fail_after_rows {
            let written: usize = dbs.iter().map(|db| db.rows.len()).sum();
            if written >= limit {
                return Err(format!("已达到写入上限 {}", limit).into());
            }
        }

        let db = dbs
            .iter_mut()
            .find(|db| db.id == database_id)
            .ok_or_else(|| format!("数据库不存在: {}", database_id))?;
        let id = Uuid::new_v4().to_string();
        db.rows.push(RecordedPage {
            id: id.clone(),
            payload,
        });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        let db_id = sink.create_database("root", json!({})).await.unwrap();
        for i in 1..=3 {
            sink.insert_row(&db_id, json!({ "n": i })).await.unwrap();
        }

        let dbs = sink.databases();
        assert_eq!(dbs.len(), 1);
        assert_eq!(dbs[0].parent_page_id, "root");
        let ns: Vec<i64> = dbs[0]
            .rows
            .iter()
            .map(|p| p.payload["n"].as_i64().unwrap())
            .collect();
        assert_eq!(ns, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_unknown_database_rejected() {
        let sink = RecordingSink::new();
        assert!(sink.insert_row("missing", json!({})).await.is_err());
    }

    #[tokio::test]
    async fn test_failing_after_limit() {
        let sink = RecordingSink::failing_after(1);
        let db_id = sink.create_database("root", json!({})).await.unwrap();
        assert!(sink.insert_row(&db_id, json!({})).await.is_ok());
        assert!(sink.insert_row(&db_id, json!({})).await.is_err());
        assert_eq!(sink.total_rows(), 1);
    }
}
