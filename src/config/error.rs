// ==========================================
// 学校校历生成器 - 配置模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置模块错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 文件相关错误 =====
    #[error("配置文件不存在: {0}")]
    FileNotFound(String),

    #[error("配置文件读取失败: {0}")]
    FileReadError(String),

    #[error("配置文件写入失败: {0}")]
    FileWriteError(String),

    #[error("不是有效的 .json 配置文件: {0}")]
    JsonParseError(String),

    // ===== 结构校验错误 =====
    #[error("配置结构不符 ({path}): {message}")]
    SchemaViolation { path: String, message: String },

    #[error("配置校验失败,共 {} 处违规", .0.len())]
    InvalidConfig(Vec<ConfigError>),

    // ===== 字段格式错误 =====
    #[error("日期格式错误 ({field}): 期望 YYYY-MM-DD，实际 {value}")]
    InvalidDate { field: String, value: String },

    #[error("时间格式错误 ({field}): 期望 HH:MM，实际 {value}")]
    InvalidTime { field: String, value: String },

    #[error("无法识别的星期 ({field}): {value}")]
    UnknownWeekday { field: String, value: String },

    #[error("日期区间颠倒 ({name}): {start} > {end}")]
    InvertedDateRange {
        name: String,
        start: String,
        end: String,
    },

    #[error("上课时间颠倒 ({field}): {start} 至 {end}")]
    InvertedTimeRange {
        field: String,
        start: String,
        end: String,
    },

    // ===== 学期锚点错误 =====
    #[error("lundi_semaine_0 必须是周一，实际 {0}")]
    NotAMonday(String),

    #[error("周数超出范围: {value}（允许 {min}..={max}）")]
    WeekCountOutOfRange { value: u32, min: u32, max: u32 },

    #[error("班级键不合法: {0}")]
    InvalidClassKey(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::FileReadError(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::JsonParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
