// ==========================================
// 学校校历生成器 - 课时解析器
// ==========================================
// 职责: 由周一日期 + 每周课时算出具体上课日,并判定课时长度类别
// 输入: Week.week_start_date, WeeklyMeeting, HolidayCalendar（只读引用）
// 输出: ResolvedSlot（上课日期 + 当日判定 + 长度类别）
// ==========================================

use crate::domain::calendar::{DayClassification, HolidayCalendar};
use crate::domain::schedule::WeeklyMeeting;
use crate::domain::types::DurationCategory;
use chrono::{Duration, NaiveDate};

/// 双节课判定阈值（分钟）
///
/// 单节 45 分钟,超过 50 分钟视为两节
pub const DOUBLE_PERIOD_THRESHOLD_MINUTES: i64 = 50;

/// 某周的具体课时
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSlot {
    pub lesson_date: NaiveDate,
    pub day: DayClassification,
    pub duration_category: DurationCategory,
}

pub struct LessonSlotResolver<'a> {
    holidays: &'a HolidayCalendar,
}

impl<'a> LessonSlotResolver<'a> {
    pub fn new(holidays: &'a HolidayCalendar) -> Self {
        Self { holidays }
    }

    /// 计算本周上课日期
    pub fn resolve(&self, week_start_date: NaiveDate, meeting: &WeeklyMeeting) -> NaiveDate {
        week_start_date + Duration::days(meeting.weekday.offset_days())
    }

    /// 判定课时长度类别
    ///
    /// 规则:
    /// 1) 当天放假 → None（忽略配置时间）
    /// 2) end - start ≥ 50 分钟 → FullDouble
    /// 3) 其他 → FullSingle
    pub fn classify_duration(&self, meeting: &WeeklyMeeting, is_off: bool) -> DurationCategory {
        if is_off {
            return DurationCategory::None;
        }
        if meeting.elapsed_minutes() >= DOUBLE_PERIOD_THRESHOLD_MINUTES {
            DurationCategory::FullDouble
        } else {
            DurationCategory::FullSingle
        }
    }

    /// 解析本周课时: 日期 → 假期判定 → 长度类别
    pub fn resolve_slot(&self, week_start_date: NaiveDate, meeting: &WeeklyMeeting) -> ResolvedSlot {
        let lesson_date = self.resolve(week_start_date, meeting);
        let day = self.holidays.classify(lesson_date);
        let duration_category = self.classify_duration(meeting, day.is_off);
        ResolvedSlot {
            lesson_date,
            day,
            duration_category,
        }
    }
}
