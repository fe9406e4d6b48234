// ==========================================
// 学校校历生成器 - 配置校验器
// ==========================================
// 职责: 生成前的结构校验（通过/不通过 + 违规列表）
// 说明: 收集全部违规,不在第一处停止,便于编辑器一次性展示
//       班级课表内容（星期、时间）不在此拒绝,由生成时按班级隔离处理
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::schema::{CalendarConfig, BREAK_KEYS, PUBLIC_HOLIDAY_KEYS};
use crate::domain::types::HolidayKind;

/// 列出配置中的全部结构违规
pub fn violations(config: &CalendarConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    let info = &config.infos_generales;

    // ===== 学期锚点 =====
    if let Err(e) = info.term() {
        errors.push(e);
    }

    // ===== 假期区间 =====
    for (kind, required) in [
        (HolidayKind::Break, &BREAK_KEYS),
        (HolidayKind::PublicHoliday, &PUBLIC_HOLIDAY_KEYS),
    ] {
        let raw = info.raw_ranges(kind);
        for key in required.iter() {
            if !raw.contains_key(*key) {
                errors.push(ConfigError::SchemaViolation {
                    path: format!("infos_generales.{}", kind.config_key()),
                    message: format!("缺少必填项 '{}'", key),
                });
            }
        }
        for (name, range) in raw {
            let path = format!("infos_generales.{}.{}", kind.config_key(), name);
            if let Err(e) = range.to_range(&path) {
                errors.push(e);
            }
        }
    }

    // ===== 班级键 =====
    for entry in config.classes.entries() {
        if !entry.level.matches_class_key(entry.key) {
            errors.push(ConfigError::InvalidClassKey(entry.key.to_string()));
        }
    }

    errors
}

/// 列出课表无法转换的班级 (班级键, 错误)
///
/// 这些班级在生成时记为失败,不影响其他班级
pub fn class_problems(config: &CalendarConfig) -> Vec<(String, ConfigError)> {
    config
        .classes
        .entries()
        .iter()
        .filter(|entry| entry.level.matches_class_key(entry.key))
        .filter_map(|entry| {
            entry
                .to_schedule()
                .err()
                .map(|e| (entry.key.to_string(), e))
        })
        .collect()
}

/// 校验配置,有任何违规则返回 InvalidConfig
pub fn validate(config: &CalendarConfig) -> ConfigResult<()> {
    let errors = violations(config);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::InvalidConfig(errors))
    }
}

pub fn is_valid(config: &CalendarConfig) -> bool {
    violations(config).is_empty()
}
