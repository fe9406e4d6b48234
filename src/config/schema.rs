// ==========================================
// 学校校历生成器 - 配置文件结构
// ==========================================
// 职责: JSON 配置文件的 serde 模型 + 向领域值的转换
// 说明: 原始字段保持字符串,由转换函数逐字段解析并给出字段路径
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::calendar::{DateRange, HolidayCalendar, NamedRange, Term};
use crate::domain::schedule::{ClassSchedule, WeeklyMeeting};
use crate::domain::types::{ClassLevel, DayOfWeek, HolidayKind};
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// 常量
// ==========================================

/// 必填的假期键
pub const BREAK_KEYS: [&str; 5] = ["automne", "noel", "carnaval", "paques", "ete"];

/// 必填的法定节日键
pub const PUBLIC_HOLIDAY_KEYS: [&str; 5] = [
    "toussaint",
    "immaculee_conception",
    "ascension",
    "pentecote",
    "fete-dieu",
];

/// 未配置 nb_semaines 时生成一整年
pub const DEFAULT_WEEK_COUNT: u32 = 52;
pub const MIN_WEEK_COUNT: u32 = 1;
pub const MAX_WEEK_COUNT: u32 = 60;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

// ==========================================
// 顶层配置
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub infos_generales: GeneralInfo,
    #[serde(default)]
    pub classes: ClassesConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralInfo {
    #[serde(default)]
    pub lundi_semaine_0: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nb_semaines: Option<u32>,
    /// 保持文件中的顺序: 同类区间重叠时先出现者生效
    #[serde(default)]
    pub vacances: IndexMap<String, RawDateRange>,
    #[serde(default)]
    pub jours_feries: IndexMap<String, RawDateRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDateRange {
    pub date_debut: String,
    pub date_fin: String,
}

// ==========================================
// 班级配置
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gymnase: Option<GymnaseClasses>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecg: Option<EcgClasses>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ec: Option<BTreeMap<String, ClassInfo>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GymnaseClasses {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infos_generales: Option<GymnaseInfo>,
    #[serde(rename = "1gy", default)]
    pub first_year: BTreeMap<String, ClassInfo>,
    #[serde(rename = "2gy", default)]
    pub second_year: BTreeMap<String, ClassInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GymnaseInfo {
    pub url_moodle: String,
    pub url_jupyterhub: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EcgClasses {
    #[serde(rename = "1ecg", default)]
    pub first_year: BTreeMap<String, ClassInfo>,
    #[serde(rename = "2ecg", default)]
    pub second_year: BTreeMap<String, ClassInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub nb_eleves: i64,
    pub cours_1: CourseInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cours_2: Option<CourseInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInfo {
    pub jour: String,
    pub heure_debut: String,
    pub heure_fin: String,
    pub salle: String,
}

/// 扁平化后的班级条目
#[derive(Debug, Clone, Copy)]
pub struct ClassEntry<'a> {
    pub level: ClassLevel,
    pub key: &'a str,
    pub info: &'a ClassInfo,
}

impl<'a> ClassEntry<'a> {
    pub fn to_schedule(&self) -> ConfigResult<ClassSchedule> {
        self.info.to_schedule(self.level, self.key)
    }
}

// ==========================================
// 字段解析
// ==========================================

pub(crate) fn parse_date(field: &str, value: &str) -> ConfigResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ConfigError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

pub(crate) fn parse_time(field: &str, value: &str) -> ConfigResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| ConfigError::InvalidTime {
        field: field.to_string(),
        value: value.to_string(),
    })
}

impl RawDateRange {
    pub fn to_range(&self, path: &str) -> ConfigResult<DateRange> {
        let start = parse_date(&format!("{}.date_debut", path), &self.date_debut)?;
        let end = parse_date(&format!("{}.date_fin", path), &self.date_fin)?;
        DateRange::new(start, end).ok_or_else(|| ConfigError::InvertedDateRange {
            name: path.to_string(),
            start: self.date_debut.clone(),
            end: self.date_fin.clone(),
        })
    }
}

impl GeneralInfo {
    pub fn raw_ranges(&self, kind: HolidayKind) -> &IndexMap<String, RawDateRange> {
        match kind {
            HolidayKind::Break => &self.vacances,
            HolidayKind::PublicHoliday => &self.jours_feries,
        }
    }

    /// 按文件中出现的顺序转换区间
    fn ordered_ranges(&self, kind: HolidayKind) -> ConfigResult<Vec<NamedRange>> {
        self.raw_ranges(kind)
            .iter()
            .map(|(name, raw)| {
                let path = format!("infos_generales.{}.{}", kind.config_key(), name);
                Ok(NamedRange {
                    name: name.clone(),
                    range: raw.to_range(&path)?,
                })
            })
            .collect()
    }

    /// 构建假期日历
    pub fn holiday_calendar(&self) -> ConfigResult<HolidayCalendar> {
        Ok(HolidayCalendar::new(
            self.ordered_ranges(HolidayKind::Break)?,
            self.ordered_ranges(HolidayKind::PublicHoliday)?,
        ))
    }

    pub fn week_count(&self) -> u32 {
        self.nb_semaines.unwrap_or(DEFAULT_WEEK_COUNT)
    }

    /// 构建学期锚点
    ///
    /// lundi_semaine_0 必须为周一, 周数必须在允许范围内
    pub fn term(&self) -> ConfigResult<Term> {
        let first_monday = parse_date("infos_generales.lundi_semaine_0", &self.lundi_semaine_0)?;
        if first_monday.weekday() != Weekday::Mon {
            return Err(ConfigError::NotAMonday(self.lundi_semaine_0.clone()));
        }

        let week_count = self.week_count();
        if !(MIN_WEEK_COUNT..=MAX_WEEK_COUNT).contains(&week_count) {
            return Err(ConfigError::WeekCountOutOfRange {
                value: week_count,
                min: MIN_WEEK_COUNT,
                max: MAX_WEEK_COUNT,
            });
        }

        Ok(Term::new(first_monday, week_count))
    }
}

impl CourseInfo {
    pub fn to_meeting(&self, path: &str) -> ConfigResult<WeeklyMeeting> {
        let weekday =
            DayOfWeek::from_french(&self.jour).ok_or_else(|| ConfigError::UnknownWeekday {
                field: format!("{}.jour", path),
                value: self.jour.clone(),
            })?;
        let start_time = parse_time(&format!("{}.heure_debut", path), &self.heure_debut)?;
        let end_time = parse_time(&format!("{}.heure_fin", path), &self.heure_fin)?;
        if end_time <= start_time {
            return Err(ConfigError::InvertedTimeRange {
                field: path.to_string(),
                start: self.heure_debut.clone(),
                end: self.heure_fin.clone(),
            });
        }

        Ok(WeeklyMeeting {
            weekday,
            start_time,
            end_time,
            room: self.salle.clone(),
        })
    }
}

impl ClassInfo {
    pub fn courses(&self) -> impl Iterator<Item = (&'static str, &CourseInfo)> + '_ {
        std::iter::once(("cours_1", &self.cours_1))
            .chain(self.cours_2.as_ref().map(|c| ("cours_2", c)))
    }

    /// 转换为班级课表
    pub fn to_schedule(&self, level: ClassLevel, key: &str) -> ConfigResult<ClassSchedule> {
        if !level.matches_class_key(key) {
            return Err(ConfigError::InvalidClassKey(key.to_string()));
        }

        let meetings = self
            .courses()
            .map(|(slot, course)| course.to_meeting(&format!("classes.{}.{}", key, slot)))
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(ClassSchedule {
            class_name: key.to_string(),
            level,
            student_count: self.nb_eleves,
            meetings,
        })
    }
}

impl ClassesConfig {
    /// 所有班级, 按层级再按自然序 (1gy2 在 1gy10 之前)
    pub fn entries(&self) -> Vec<ClassEntry<'_>> {
        let mut groups: Vec<(ClassLevel, &BTreeMap<String, ClassInfo>)> = Vec::new();
        if let Some(gy) = &self.gymnase {
            groups.push((ClassLevel::Gymnase1, &gy.first_year));
            groups.push((ClassLevel::Gymnase2, &gy.second_year));
        }
        if let Some(ecg) = &self.ecg {
            groups.push((ClassLevel::Ecg1, &ecg.first_year));
            groups.push((ClassLevel::Ecg2, &ecg.second_year));
        }
        if let Some(ec) = &self.ec {
            groups.push((ClassLevel::Ec2, ec));
        }

        let mut entries: Vec<ClassEntry<'_>> = groups
            .into_iter()
            .flat_map(|(level, map)| {
                map.iter().map(move |(key, info)| ClassEntry {
                    level,
                    key: key.as_str(),
                    info,
                })
            })
            .collect();
        entries.sort_by(|a, b| {
            (a.level, a.key.len(), a.key).cmp(&(b.level, b.key.len(), b.key))
        });
        entries
    }

    pub fn find(&self, key: &str) -> Option<ClassEntry<'_>> {
        self.entries().into_iter().find(|e| e.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(jour: &str, debut: &str, fin: &str) -> CourseInfo {
        CourseInfo {
            jour: jour.to_string(),
            heure_debut: debut.to_string(),
            heure_fin: fin.to_string(),
            salle: "A01".to_string(),
        }
    }

    #[test]
    fn test_parse_nested_json() {
        let raw = r#"{
            "infos_generales": {
                "lundi_semaine_0": "2023-08-21",
                "vacances": { "automne": { "date_debut": "2023-10-16", "date_fin": "2023-10-27" } },
                "jours_feries": {}
            },
            "classes": {
                "gymnase": {
                    "infos_generales": { "url_moodle": "https://moodle", "url_jupyterhub": "https://hub" },
                    "1gy": { "1gy2": { "nb_eleves": 22, "cours_1": { "jour": "mardi", "heure_debut": "10:00", "heure_fin": "10:45", "salle": "B12" } } },
                    "2gy": {}
                },
                "ec": { "2ec1": { "nb_eleves": 18, "cours_1": { "jour": "jeudi", "heure_debut": "08:10", "heure_fin": "09:45", "salle": "C3" } } }
            }
        }"#;
        let config: CalendarConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.infos_generales.week_count(), DEFAULT_WEEK_COUNT);

        let entries = config.classes.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "1gy2");
        assert_eq!(entries[0].level, ClassLevel::Gymnase1);
        assert_eq!(entries[1].level, ClassLevel::Ec2);
    }

    #[test]
    fn test_entries_natural_order() {
        let info = ClassInfo {
            nb_eleves: 20,
            cours_1: course("lundi", "08:10", "08:55"),
            cours_2: None,
        };
        let mut first_year = BTreeMap::new();
        for key in ["1gy10", "1gy2", "1gy1"] {
            first_year.insert(key.to_string(), info.clone());
        }
        let classes = ClassesConfig {
            gymnase: Some(GymnaseClasses {
                infos_generales: None,
                first_year,
                second_year: BTreeMap::new(),
            }),
            ecg: None,
            ec: None,
        };
        let keys: Vec<&str> = classes.entries().iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["1gy1", "1gy2", "1gy10"]);
        assert!(classes.find("1gy10").is_some());
        assert!(classes.find("2gy1").is_none());
    }

    #[test]
    fn test_to_meeting_errors_carry_field_path() {
        let err = course("lundii", "08:10", "08:55")
            .to_meeting("classes.1gy1.cours_1")
            .unwrap_err();
        match err {
            ConfigError::UnknownWeekday { field, value } => {
                assert_eq!(field, "classes.1gy1.cours_1.jour");
                assert_eq!(value, "lundii");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = course("lundi", "8h10", "08:55").to_meeting("x").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTime { .. }));

        let err = course("lundi", "09:45", "08:10").to_meeting("x").unwrap_err();
        assert!(matches!(err, ConfigError::InvertedTimeRange { .. }));

        let err = course(" lundi ", "08:10", "08:55").to_meeting("x").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownWeekday { value, .. } if value == " lundi "));
    }

    #[test]
    fn test_holiday_calendar_keeps_file_order() {
        let raw = r#"{
            "lundi_semaine_0": "2023-08-21",
            "vacances": {
                "relache": { "date_debut": "2023-12-20", "date_fin": "2023-12-27" },
                "noel": { "date_debut": "2023-12-25", "date_fin": "2024-01-05" },
                "automne": { "date_debut": "2023-10-16", "date_fin": "2023-10-27" }
            }
        }"#;
        let info: GeneralInfo = serde_json::from_str(raw).unwrap();
        let cal = info.holiday_calendar().unwrap();
        let names: Vec<&str> = cal
            .ranges(HolidayKind::Break)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["relache", "noel", "automne"]);

        // 重叠日命中文件中先出现的区间
        let day = cal.classify(NaiveDate::from_ymd_opt(2023, 12, 26).unwrap());
        assert_eq!(day.matched, Some((HolidayKind::Break, "relache".to_string())));

        // 序列化后顺序不变
        let json = serde_json::to_string(&info).unwrap();
        let reparsed: GeneralInfo = serde_json::from_str(&json).unwrap();
        let keys: Vec<&String> = reparsed.vacances.keys().collect();
        assert_eq!(keys, vec!["relache", "noel", "automne"]);
    }

    #[test]
    fn test_term_requires_monday() {
        let mut info = GeneralInfo {
            lundi_semaine_0: "2023-08-22".to_string(),
            ..Default::default()
        };
        assert!(matches!(info.term(), Err(ConfigError::NotAMonday(_))));

        info.lundi_semaine_0 = "2023-08-21".to_string();
        info.nb_semaines = Some(0);
        assert!(matches!(
            info.term(),
            Err(ConfigError::WeekCountOutOfRange { value: 0, .. })
        ));

        info.nb_semaines = Some(3);
        let term = info.term().unwrap();
        assert_eq!(term.week_count, 3);
    }
}
