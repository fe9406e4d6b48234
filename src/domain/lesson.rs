// ==========================================
// 学校校历生成器 - 课程行领域模型
// ==========================================
// 生成后不再修改,交给外部数据库写入方后即丢弃
// ==========================================

use crate::domain::types::{DurationCategory, StatusLabel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// LessonRow - 每周一行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRow {
    pub week_index: u32, // 周序号 (série de semaine),从 1 开始
    pub lesson_date: NaiveDate, // 上课日期
    pub duration_category: DurationCategory,
    pub status_labels: BTreeSet<StatusLabel>,
    pub room: String,
    pub remark: Option<String>, // 第二课时摘要
}

impl LessonRow {
    /// Notion 标题列内容
    pub fn title(&self) -> String {
        format!("Semaine {}", self.week_index)
    }

    pub fn is_off(&self) -> bool {
        self.duration_category == DurationCategory::None
    }
}
