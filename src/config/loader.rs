// ==========================================
// 学校校历生成器 - 配置加载器
// ==========================================
// 职责: 配置文件的加载、校验、保存、重置
// 存储: 当前目录下的 config_YYYY_MM_DD.json
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::schema::CalendarConfig;
use crate::config::validator;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 空配置模板的默认文件名
pub const EMPTY_CONFIG_FILE_NAME: &str = "empty_config.json";

/// 当天的默认配置文件名
pub fn default_config_file_name() -> String {
    format!("config_{}.json", Local::now().format("%Y_%m_%d"))
}

/// 解析并校验配置文本
///
/// 结构违规拒绝整个文件;单个班级课表无效只告警,
/// 该班级在生成时记为失败
pub fn load_from_str(raw: &str) -> ConfigResult<CalendarConfig> {
    let config: CalendarConfig = serde_json::from_str(raw)?;
    validator::validate(&config)?;
    report_overlaps(&config);
    for (class_name, problem) in validator::class_problems(&config) {
        warn!(class = %class_name, error = %problem, "班级课表无效,生成时将跳过该班级");
    }
    Ok(config)
}

/// 读取、解析并校验配置文件
pub fn load_from_path(path: &Path) -> ConfigResult<CalendarConfig> {
    if !path.is_file() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }
    let raw = fs::read_to_string(path)?;
    load_from_str(&raw)
}

/// 假期区间重叠只告警,不拒绝
///
/// - 同类别重叠: warn（先命中者生效）
/// - 跨类别重叠: debug（vacances 优先,属正常情况）
fn report_overlaps(config: &CalendarConfig) {
    let calendar = match config.infos_generales.holiday_calendar() {
        Ok(c) => c,
        Err(_) => return,
    };
    for overlap in calendar.overlaps() {
        if overlap.is_same_kind() {
            warn!(
                kind = %overlap.first.0,
                first = %overlap.first.1,
                second = %overlap.second.1,
                "同类假期区间重叠,按先命中者生效"
            );
        } else {
            debug!(
                first = %overlap.first.1,
                second = %overlap.second.1,
                "假期与法定节日重叠,假期优先"
            );
        }
    }
}

// ==========================================
// ConfigLoader - 配置文件管理
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: PathBuf,
    empty_config_path: PathBuf,
    config: Option<CalendarConfig>,
}

impl ConfigLoader {
    /// 创建加载器
    ///
    /// # 参数
    /// - config_path: 当前配置文件路径
    /// - empty_config_path: 配置文件不存在时使用的空模板
    pub fn new(config_path: impl Into<PathBuf>, empty_config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            empty_config_path: empty_config_path.into(),
            config: None,
        }
    }

    /// 使用当天默认文件名
    pub fn with_defaults() -> Self {
        Self::new(default_config_file_name(), EMPTY_CONFIG_FILE_NAME)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config(&self) -> Option<&CalendarConfig> {
        self.config.as_ref()
    }

    /// 加载有效配置
    ///
    /// 配置文件存在则加载它,否则加载空模板。
    /// 解析或校验失败时重置加载器状态并返回错误。
    pub fn load_valid_config(&mut self) -> ConfigResult<&CalendarConfig> {
        let to_load = if self.config_path.is_file() {
            self.config_path.clone()
        } else {
            self.empty_config_path.clone()
        };
        info!(path = %to_load.display(), "加载配置文件");

        match load_from_path(&to_load) {
            Ok(config) => Ok(&*self.config.insert(config)),
            Err(e) => {
                warn!(path = %to_load.display(), error = %e, "配置无效,已重置");
                self.reset_config();
                Err(e)
            }
        }
    }

    /// 替换当前配置（编辑器提交修改后调用）
    pub fn set_config(&mut self, config: CalendarConfig) -> ConfigResult<()> {
        validator::validate(&config)?;
        self.config = Some(config);
        Ok(())
    }

    /// 保存当前配置到 config_path
    pub fn save_config(&self) -> ConfigResult<()> {
        let config = self.config.as_ref().ok_or_else(|| ConfigError::SchemaViolation {
            path: "$".to_string(),
            message: "没有已加载的配置".to_string(),
        })?;
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_path, json)
            .map_err(|e| ConfigError::FileWriteError(format!("{}: {}", self.config_path.display(), e)))?;
        info!(path = %self.config_path.display(), "配置已保存");
        Ok(())
    }

    /// 清空路径与配置
    pub fn reset_config(&mut self) {
        self.config_path = PathBuf::new();
        self.empty_config_path = PathBuf::new();
        self.config = None;
    }
}
