// ==========================================
// 学校校历生成器 - 领域类型定义
// ==========================================
// 红线: 所有字符串标签必须落到封闭枚举,非法值在构造时拒绝
// ==========================================

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 星期 (Day Of Week)
// ==========================================
// 配置中以法语小写书写: lundi .. dimanche
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Lundi,
    Mardi,
    Mercredi,
    Jeudi,
    Vendredi,
    Samedi,
    Dimanche,
}

impl DayOfWeek {
    /// 从配置中的法语星期名解析
    ///
    /// 只接受精确的小写词,带空白或大写一律视为无法识别;
    /// 返回 None 时由调用方转为配置错误
    pub fn from_french(s: &str) -> Option<Self> {
        match s {
            "lundi" => Some(DayOfWeek::Lundi),
            "mardi" => Some(DayOfWeek::Mardi),
            "mercredi" => Some(DayOfWeek::Mercredi),
            "jeudi" => Some(DayOfWeek::Jeudi),
            "vendredi" => Some(DayOfWeek::Vendredi),
            "samedi" => Some(DayOfWeek::Samedi),
            "dimanche" => Some(DayOfWeek::Dimanche),
            _ => None,
        }
    }

    /// 相对周一的偏移天数 (lundi=0 .. dimanche=6)
    pub fn offset_days(&self) -> i64 {
        match self {
            DayOfWeek::Lundi => 0,
            DayOfWeek::Mardi => 1,
            DayOfWeek::Mercredi => 2,
            DayOfWeek::Jeudi => 3,
            DayOfWeek::Vendredi => 4,
            DayOfWeek::Samedi => 5,
            DayOfWeek::Dimanche => 6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Lundi => "lundi",
            DayOfWeek::Mardi => "mardi",
            DayOfWeek::Mercredi => "mercredi",
            DayOfWeek::Jeudi => "jeudi",
            DayOfWeek::Vendredi => "vendredi",
            DayOfWeek::Samedi => "samedi",
            DayOfWeek::Dimanche => "dimanche",
        }
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Lundi => Weekday::Mon,
            DayOfWeek::Mardi => Weekday::Tue,
            DayOfWeek::Mercredi => Weekday::Wed,
            DayOfWeek::Jeudi => Weekday::Thu,
            DayOfWeek::Vendredi => Weekday::Fri,
            DayOfWeek::Samedi => Weekday::Sat,
            DayOfWeek::Dimanche => Weekday::Sun,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 课程时长类别 (Duration Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DurationCategory {
    FullDouble, // 2 节完整课
    FullSingle, // 1 节完整课
    None,       // 放假,无课
}

impl DurationCategory {
    /// Notion "Durée du cours" 选项名
    pub fn label(&self) -> &'static str {
        match self {
            DurationCategory::FullDouble => "2 périodes complètes",
            DurationCategory::FullSingle => "1 période complète",
            DurationCategory::None => "-",
        }
    }
}

impl fmt::Display for DurationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationCategory::FullDouble => write!(f, "FULL_DOUBLE"),
            DurationCategory::FullSingle => write!(f, "FULL_SINGLE"),
            DurationCategory::None => write!(f, "NONE"),
        }
    }
}

// ==========================================
// 假期类别 (Holiday Kind)
// ==========================================
// 顺序即优先级: Break 先于 PublicHoliday 判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HolidayKind {
    Break,         // 假期 (vacances)
    PublicHoliday, // 法定节日 (jours fériés)
}

impl HolidayKind {
    /// 该类别命中时给出的状态标签
    pub fn status_label(&self) -> StatusLabel {
        match self {
            HolidayKind::Break => StatusLabel::Vacances,
            HolidayKind::PublicHoliday => StatusLabel::JourFerie,
        }
    }

    /// 配置文件中的分组键
    pub fn config_key(&self) -> &'static str {
        match self {
            HolidayKind::Break => "vacances",
            HolidayKind::PublicHoliday => "jours_feries",
        }
    }
}

impl fmt::Display for HolidayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolidayKind::Break => write!(f, "BREAK"),
            HolidayKind::PublicHoliday => write!(f, "PUBLIC_HOLIDAY"),
        }
    }
}

// ==========================================
// 课程状态标签 (Status Label)
// ==========================================
// 对应 Notion "Modalité du cours" 多选列
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusLabel {
    Lecon,
    Examen,
    Vacances,
    Conge,
    CongeEpreuvesEnCommun,
    JourFerie,
    ExamenPremiereHeure,
    ExamenDeSynthese,
}

impl StatusLabel {
    /// 所有标签（数据库列选项顺序）
    pub const ALL: [StatusLabel; 8] = [
        StatusLabel::Lecon,
        StatusLabel::Examen,
        StatusLabel::Vacances,
        StatusLabel::Conge,
        StatusLabel::CongeEpreuvesEnCommun,
        StatusLabel::JourFerie,
        StatusLabel::ExamenPremiereHeure,
        StatusLabel::ExamenDeSynthese,
    ];

    /// 纯文本标签
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLabel::Lecon => "Leçon",
            StatusLabel::Examen => "Examen",
            StatusLabel::Vacances => "Vacances",
            StatusLabel::Conge => "Congé",
            StatusLabel::CongeEpreuvesEnCommun => "Congé épreuves en commun",
            StatusLabel::JourFerie => "Jour férié",
            StatusLabel::ExamenPremiereHeure => "Examen en 1ère heure",
            StatusLabel::ExamenDeSynthese => "Examen de synthèse",
        }
    }

    /// Notion 选项名（带 emoji 前缀）
    pub fn option_name(&self) -> &'static str {
        match self {
            StatusLabel::Lecon => "📒 Leçon",
            StatusLabel::Examen => "🔥 Examen",
            StatusLabel::Vacances => "⛱ Vacances",
            StatusLabel::Conge => "⛱ Congé",
            StatusLabel::CongeEpreuvesEnCommun => "⛱ Congé épreuves en commun",
            StatusLabel::JourFerie => "⛱ Jour férié",
            StatusLabel::ExamenPremiereHeure => "🔥 Examen en 1ère heure",
            StatusLabel::ExamenDeSynthese => "🔥🔥 Examen de synthèse",
        }
    }

    /// 选项颜色
    pub fn color(&self) -> &'static str {
        match self {
            StatusLabel::Lecon => "yellow",
            StatusLabel::Examen
            | StatusLabel::ExamenPremiereHeure
            | StatusLabel::ExamenDeSynthese => "red",
            _ => "green",
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 班级层级 (Class Level)
// ==========================================
// 班级键形如 "1gy3"、"2ecg12"、"2ec1"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClassLevel {
    #[serde(rename = "1gy")]
    Gymnase1,
    #[serde(rename = "2gy")]
    Gymnase2,
    #[serde(rename = "1ecg")]
    Ecg1,
    #[serde(rename = "2ecg")]
    Ecg2,
    #[serde(rename = "2ec")]
    Ec2,
}

impl ClassLevel {
    pub fn prefix(&self) -> &'static str {
        match self {
            ClassLevel::Gymnase1 => "1gy",
            ClassLevel::Gymnase2 => "2gy",
            ClassLevel::Ecg1 => "1ecg",
            ClassLevel::Ecg2 => "2ecg",
            ClassLevel::Ec2 => "2ec",
        }
    }

    /// 班级键是否符合 `^<prefix>\d{1,2}$`
    pub fn matches_class_key(&self, key: &str) -> bool {
        match key.strip_prefix(self.prefix()) {
            Some(digits) => {
                (1..=2).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
            }
            None => false,
        }
    }
}

impl fmt::Display for ClassLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}
