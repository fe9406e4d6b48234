// ==========================================
// 学校校历生成器 - 引擎层错误类型
// ==========================================

use crate::config::error::ConfigError;
use crate::domain::types::ClassLevel;
use thiserror::Error;

/// 生成流程错误类型
#[derive(Error, Debug)]
pub enum GenerationError {
    /// 单个班级的配置错误,该班级整体放弃
    #[error("班级 {class_name} 配置错误: {source}")]
    Config {
        class_name: String,
        #[source]
        source: ConfigError,
    },

    /// 全局配置错误（假期、学期锚点）,整次运行放弃
    #[error("全局配置错误: {0}")]
    GlobalConfig(#[from] ConfigError),

    #[error("班级层级 {0} 暂无课程日历模板")]
    UnsupportedClassLevel(ClassLevel),

    #[error("外部写入失败: {0}")]
    Sink(String),
}

/// Result 类型别名
pub type GenerationResult<T> = Result<T, GenerationError>;
