// ==========================================
// 学校校历生成器 - 课程行属性映射
// ==========================================
// 职责: LessonRow → Notion 页面属性元组 → POST /v1/pages 请求体
// ==========================================

use crate::domain::lesson::LessonRow;
use crate::notion::database::{columns, OFF_TOPIC};
use chrono::NaiveDate;
use serde_json::{json, Map, Value};

/// 上课周的默认分组
pub const DEFAULT_GROUP: &str = "Groupe A+B";
/// 休假周的分组占位
pub const OFF_GROUP: &str = "-";

// ==========================================
// PropertyValue - 属性值
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Title(String),
    Select(String),
    Date(NaiveDate),
    MultiSelect(Vec<String>),
    RichText(String),
    Number(i64),
}

impl PropertyValue {
    pub fn to_json(&self) -> Value {
        match self {
            PropertyValue::Title(text) => json!({ "title": [{ "text": { "content": text } }] }),
            PropertyValue::Select(name) => json!({ "select": { "name": name } }),
            PropertyValue::Date(date) => {
                json!({ "date": { "start": date.format("%Y-%m-%d").to_string() } })
            }
            PropertyValue::MultiSelect(names) => {
                let items: Vec<Value> = names.iter().map(|n| json!({ "name": n })).collect();
                json!({ "multi_select": items })
            }
            PropertyValue::RichText(text) => {
                if text.is_empty() {
                    json!({ "rich_text": [] })
                } else {
                    json!({ "rich_text": [{ "text": { "content": text } }] })
                }
            }
            PropertyValue::Number(n) => json!({ "number": n }),
        }
    }
}

// ==========================================
// RowRecord - 一行的属性元组集合
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    pub properties: Vec<(&'static str, PropertyValue)>,
}

impl RowRecord {
    /// 由课程行构建属性元组
    ///
    /// # 参数
    /// - row: 课程行
    /// - class_label: "Classe" 选项名,如 "1GY3"
    pub fn from_lesson(row: &LessonRow, class_label: &str) -> Self {
        let (group, topics) = if row.is_off() {
            (OFF_GROUP, vec![OFF_TOPIC.to_string()])
        } else {
            (DEFAULT_GROUP, Vec::new())
        };

        Self {
            properties: vec![
                (columns::NOM, PropertyValue::Title(row.title())),
                (columns::CLASSE, PropertyValue::Select(class_label.to_string())),
                (columns::DATE_DU_COURS, PropertyValue::Date(row.lesson_date)),
                (
                    columns::DUREE_DU_COURS,
                    PropertyValue::Select(row.duration_category.label().to_string()),
                ),
                (columns::GROUPE, PropertyValue::MultiSelect(vec![group.to_string()])),
                (
                    columns::MODALITE_DU_COURS,
                    PropertyValue::MultiSelect(
                        row.status_labels
                            .iter()
                            .map(|l| l.option_name().to_string())
                            .collect(),
                    ),
                ),
                (columns::NOTION_ETUDIEE, PropertyValue::MultiSelect(topics)),
                (
                    columns::REMARQUE,
                    PropertyValue::RichText(row.remark.clone().unwrap_or_default()),
                ),
                (
                    columns::SERIE_DE_SEMAINE,
                    PropertyValue::Number(i64::from(row.week_index)),
                ),
            ],
        }
    }

    pub fn get(&self, column: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, v)| v)
    }

    pub fn properties_json(&self) -> Value {
        let map: Map<String, Value> = self
            .properties
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_json()))
            .collect();
        Value::Object(map)
    }

    /// POST /v1/pages 请求体
    pub fn to_page_payload(&self, database_id: &str) -> Value {
        json!({
            "parent": { "database_id": database_id },
            "properties": self.properties_json(),
        })
    }
}
