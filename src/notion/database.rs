// ==========================================
// 学校校历生成器 - 课程日历数据库结构
// ==========================================
// 职责: 定义 Notion 数据库列（封闭枚举）及各层级的课程日历模板
// 输出: POST /v1/databases 的请求体
// ==========================================

use crate::domain::types::{ClassLevel, DurationCategory, StatusLabel};
use crate::engine::error::{GenerationError, GenerationResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

// ==========================================
// 列名
// ==========================================
pub mod columns {
    pub const NOM: &str = "Nom";
    pub const CLASSE: &str = "Classe";
    pub const DATE_DU_COURS: &str = "Date du cours";
    pub const DUREE_DU_COURS: &str = "Durée du cours";
    pub const GROUPE: &str = "Groupe";
    pub const MODALITE_DU_COURS: &str = "Modalité du cours";
    pub const NOTION_ETUDIEE: &str = "Notion étudiée";
    pub const REMARQUE: &str = "Remarque";
    pub const SERIE_DE_SEMAINE: &str = "Série de semaine";
}

/// 课程日历默认图标
pub const DEFAULT_DATABASE_EMOJI: &str = "🗓";

const DEFAULT_DESCRIPTION: &str = "Ce programme de cours présente une liste hebdomadaire exhaustive des sujets, lectures, devoirs et examens.";

/// 班级选项颜色,按班号循环
const CLASS_COLORS: [&str; 12] = [
    "yellow", "default", "green", "gray", "red", "pink", "brown", "blue", "orange", "purple",
    "orange", "brown",
];

/// 每层级的最大班号
const MAX_CLASS_NUMBER: usize = 12;

// ==========================================
// SelectOption - 选项
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
    pub color: String,
}

impl SelectOption {
    pub fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

fn options(pairs: &[(&str, &str)]) -> Vec<SelectOption> {
    pairs
        .iter()
        .map(|(name, color)| SelectOption::new(name, color))
        .collect()
}

// ==========================================
// ColumnKind - 列类型
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Title,
    RichText,
    Date,
    Number { format: String },
    Select(Vec<SelectOption>),
    MultiSelect(Vec<SelectOption>),
    Checkbox,
    Url,
    Email,
    PhoneNumber,
    People,
    Files,
    CreatedBy,
    CreatedTime,
    LastEditedTime,
}

impl ColumnKind {
    /// Notion API 中的类型标识
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnKind::Title => "title",
            ColumnKind::RichText => "rich_text",
            ColumnKind::Date => "date",
            ColumnKind::Number { .. } => "number",
            ColumnKind::Select(_) => "select",
            ColumnKind::MultiSelect(_) => "multi_select",
            ColumnKind::Checkbox => "checkbox",
            ColumnKind::Url => "url",
            ColumnKind::Email => "email",
            ColumnKind::PhoneNumber => "phone_number",
            ColumnKind::People => "people",
            ColumnKind::Files => "files",
            ColumnKind::CreatedBy => "created_by",
            ColumnKind::CreatedTime => "created_time",
            ColumnKind::LastEditedTime => "last_edited_time",
        }
    }

    fn config_json(&self) -> Value {
        match self {
            ColumnKind::Number { format } => json!({ "format": format }),
            ColumnKind::Select(opts) | ColumnKind::MultiSelect(opts) => json!({ "options": opts }),
            _ => json!({}),
        }
    }
}

// ==========================================
// Column - 数据库列
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(name: &str, kind: ColumnKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }

    pub fn to_json(&self) -> Value {
        let type_name = self.kind.type_name();
        let mut obj = Map::new();
        obj.insert("name".to_string(), json!(self.name));
        obj.insert("type".to_string(), json!(type_name));
        obj.insert(type_name.to_string(), self.kind.config_json());
        Value::Object(obj)
    }

    /// 该列允许的选项名（非选择列返回空）
    pub fn option_names(&self) -> Vec<&str> {
        match &self.kind {
            ColumnKind::Select(opts) | ColumnKind::MultiSelect(opts) => {
                opts.iter().map(|o| o.name.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

// ==========================================
// DatabaseSchema - 数据库模板
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSchema {
    pub title: String,
    pub description: String,
    pub emoji: Option<String>,
    pub columns: Vec<Column>,
}

impl DatabaseSchema {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            emoji: Some(DEFAULT_DATABASE_EMOJI.to_string()),
            columns: Vec::new(),
        }
    }

    /// 同名列覆盖
    pub fn add_column(&mut self, column: Column) {
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// 某层级的课程日历模板
    ///
    /// # 参数
    /// - level: 班级层级（目前仅 1gy / 2gy 有模板）
    /// - school_year: 学年起始年份,用于标题
    pub fn course_calendar(level: ClassLevel, school_year: i32) -> GenerationResult<Self> {
        let topics = topic_options(level).ok_or(GenerationError::UnsupportedClassLevel(level))?;

        let mut schema = Self::new(&format!(
            "Calendrier des cours {}-{}",
            school_year,
            school_year + 1
        ));
        schema.add_column(Column::new(columns::NOM, ColumnKind::Title));
        schema.add_column(Column::new(
            columns::CLASSE,
            ColumnKind::Select(class_options(level)),
        ));
        schema.add_column(Column::new(columns::DATE_DU_COURS, ColumnKind::Date));
        schema.add_column(Column::new(
            columns::DUREE_DU_COURS,
            ColumnKind::Select(options(&[
                (DurationCategory::FullSingle.label(), "purple"),
                (DurationCategory::FullDouble.label(), "blue"),
                (DurationCategory::None.label(), "green"),
                ("1ère période uniquement", "orange"),
                ("2ème période uniquement", "orange"),
            ])),
        ));
        schema.add_column(Column::new(
            columns::GROUPE,
            ColumnKind::MultiSelect(options(&[
                ("Groupe A+B", "yellow"),
                ("Groupe A", "brown"),
                ("Groupe B", "orange"),
                ("1ère heure: A", "pink"),
                ("1ère heure: B", "pink"),
                ("2ème heure: A", "pink"),
                ("2ème heure: B", "pink"),
                ("-", "green"),
            ])),
        ));
        schema.add_column(Column::new(
            columns::MODALITE_DU_COURS,
            ColumnKind::MultiSelect(
                StatusLabel::ALL
                    .iter()
                    .map(|l| SelectOption::new(l.option_name(), l.color()))
                    .collect(),
            ),
        ));
        schema.add_column(Column::new(
            columns::NOTION_ETUDIEE,
            ColumnKind::MultiSelect(topics),
        ));
        schema.add_column(Column::new(columns::REMARQUE, ColumnKind::RichText));
        schema.add_column(Column::new(
            columns::SERIE_DE_SEMAINE,
            ColumnKind::Number {
                format: "number".to_string(),
            },
        ));
        Ok(schema)
    }

    /// POST /v1/databases 请求体
    pub fn to_create_payload(&self, parent_page_id: &str) -> Value {
        let properties: Map<String, Value> = self
            .columns
            .iter()
            .map(|c| (c.name.clone(), c.to_json()))
            .collect();

        let mut payload = json!({
            "parent": { "type": "page_id", "page_id": parent_page_id },
            "title": [{ "type": "text", "text": { "content": self.title } }],
            "description": [{ "type": "text", "text": { "content": self.description } }],
            "properties": properties,
        });
        if let Some(emoji) = &self.emoji {
            payload["icon"] = json!({ "type": "emoji", "emoji": emoji });
        }
        payload
    }
}

/// "Vide" + 本层级 1..=12 班
fn class_options(level: ClassLevel) -> Vec<SelectOption> {
    let prefix = level.prefix().to_uppercase();
    std::iter::once(SelectOption::new("Vide", "blue"))
        .chain(
            (1..=MAX_CLASS_NUMBER)
                .map(|n| SelectOption::new(&format!("{}{}", prefix, n), CLASS_COLORS[n - 1])),
        )
        .collect()
}

/// 休假周的"学习内容"占位选项
pub const OFF_TOPIC: &str = "⛱ - ";

fn topic_options(level: ClassLevel) -> Option<Vec<SelectOption>> {
    let specific: &[(&str, &str)] = match level {
        ClassLevel::Gymnase1 => &[
            ("🎒Introduction au cours", "gray"),
            ("💻Programmation", "orange"),
            ("🔐 Cybersécurité", "default"),
            ("🧩Représentation de l'information", "yellow"),
            ("ℹ Informatique et société", "purple"),
            ("💪🏼 Concours Castor Informatique", "brown"),
            ("🔥 Distribution hottes Mails", "red"),
            ("🖥 Architecture des ordinateurs", "red"),
            ("🎨Web", "pink"),
        ],
        ClassLevel::Gymnase2 => &[
            ("🎒Introduction au cours", "gray"),
            ("💻Programmation", "orange"),
            ("🤖 Robotique", "red"),
            ("💪🏼 Concours Castor Informatique", "brown"),
            ("🧩Algorithmique", "yellow"),
            ("ℹ Informatique et société", "brown"),
            ("🔥 Distribution hottes Mails", "red"),
            ("🎨 Web", "pink"),
            ("🕵🏼‍♂️ Cryptographie", "blue"),
            ("📁 Fichiers et formats de fichiers", "brown"),
            ("📶 Applications web et réseaux", "default"),
            ("📁 Bases de données", "default"),
            ("Conclusion du cours", "green"),
        ],
        // TODO: 1ecg / 2ecg / 2ec 的学习内容清单尚未整理
        ClassLevel::Ecg1 | ClassLevel::Ecg2 | ClassLevel::Ec2 => return None,
    };
    Some(
        std::iter::once(SelectOption::new(OFF_TOPIC, "green"))
            .chain(specific.iter().map(|(n, c)| SelectOption::new(n, c)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_calendar_columns() {
        let schema = DatabaseSchema::course_calendar(ClassLevel::Gymnase1, 2023).unwrap();
        assert_eq!(schema.title, "Calendrier des cours 2023-2024");
        assert_eq!(schema.columns.len(), 9);

        let classe = schema.column(columns::CLASSE).unwrap();
        let names = classe.option_names();
        assert_eq!(names.len(), 13);
        assert_eq!(names[0], "Vide");
        assert_eq!(names[12], "1GY12");

        let modalite = schema.column(columns::MODALITE_DU_COURS).unwrap();
        assert!(modalite.option_names().contains(&"⛱ Jour férié"));
    }

    #[test]
    fn test_unsupported_level() {
        let err = DatabaseSchema::course_calendar(ClassLevel::Ecg1, 2023).unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedClassLevel(ClassLevel::Ecg1)));
    }

    #[test]
    fn test_column_json_shape() {
        let col = Column::new(
            columns::SERIE_DE_SEMAINE,
            ColumnKind::Number {
                format: "number".to_string(),
            },
        );
        let v = col.to_json();
        assert_eq!(v["type"], "number");
        assert_eq!(v["number"]["format"], "number");

        let title = Column::new(columns::NOM, ColumnKind::Title).to_json();
        assert_eq!(title["title"], json!({}));
    }

    #[test]
    fn test_create_payload() {
        let schema = DatabaseSchema::course_calendar(ClassLevel::Gymnase2, 2023).unwrap();
        let payload = schema.to_create_payload("root-page");
        assert_eq!(payload["parent"]["page_id"], "root-page");
        assert_eq!(payload["icon"]["emoji"], DEFAULT_DATABASE_EMOJI);
        assert_eq!(
            payload["properties"][columns::DUREE_DU_COURS]["select"]["options"][1]["name"],
            "2 périodes complètes"
        );
    }

    #[test]
    fn test_add_column_replaces_same_name() {
        let mut schema = DatabaseSchema::new("t");
        schema.add_column(Column::new("A", ColumnKind::Title));
        schema.add_column(Column::new("A", ColumnKind::Checkbox));
        assert_eq!(schema.columns.len(), 1);
        assert_eq!(schema.columns[0].kind, ColumnKind::Checkbox);
    }
}
