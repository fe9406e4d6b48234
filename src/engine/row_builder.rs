// ==========================================
// 学校校历生成器 - 课程行构建器
// ==========================================
// 职责: 组合周序列 + 课时解析 + 假期判定,每周产出一行
// 输入: ClassSchedule, Term, HolidayCalendar
// 输出: 按 week_index 严格递增的 Vec<LessonRow>
// 红线: 任一周失败则整个班级失败,不输出有缺口的序列
// ==========================================

use crate::config::schema::ClassEntry;
use crate::domain::calendar::{HolidayCalendar, Term};
use crate::domain::lesson::LessonRow;
use crate::domain::schedule::ClassSchedule;
use crate::engine::error::{GenerationError, GenerationResult};
use crate::engine::slot_resolver::LessonSlotResolver;
use crate::engine::week_sequencer::WeekSequencer;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct RowBuilder {
    sequencer: WeekSequencer,
}

impl RowBuilder {
    pub fn new() -> Self {
        Self {
            sequencer: WeekSequencer::new(),
        }
    }

    /// 构建班级全学期的课程行
    ///
    /// 每周一行,取 cours_1 作为该周的主课时;
    /// cours_2 只以摘要形式写入备注。
    /// 没有任何课时的班级返回空序列。
    #[instrument(skip(self, schedule, term, holidays), fields(class = %schedule.class_name))]
    pub fn build_rows(
        &self,
        schedule: &ClassSchedule,
        term: &Term,
        holidays: &HolidayCalendar,
    ) -> Vec<LessonRow> {
        let primary = match schedule.primary_meeting() {
            Some(m) => m,
            None => {
                warn!("班级没有配置课时,跳过");
                return Vec::new();
            }
        };
        let remark = schedule
            .secondary_meeting()
            .map(|m| format!("2e cours: {}", m));

        let resolver = LessonSlotResolver::new(holidays);
        let rows: Vec<LessonRow> = self
            .sequencer
            .enumerate_weeks(term)
            .into_iter()
            .map(|week| {
                let slot = resolver.resolve_slot(week.week_start_date, primary);

                debug!(
                    week_index = week.week_index,
                    lesson_date = %slot.lesson_date,
                    duration = %slot.duration_category,
                    holiday = ?slot.day.matched,
                    "周行已生成"
                );

                LessonRow {
                    week_index: week.week_index,
                    lesson_date: slot.lesson_date,
                    duration_category: slot.duration_category,
                    status_labels: slot.day.labels,
                    room: primary.room.clone(),
                    remark: remark.clone(),
                }
            })
            .collect();

        info!(rows = rows.len(), "课程行构建完成");
        rows
    }

    /// 从配置条目构建课程行
    ///
    /// 先完整转换课表,转换失败时不产出任何行
    pub fn build_rows_for_entry(
        &self,
        entry: &ClassEntry<'_>,
        term: &Term,
        holidays: &HolidayCalendar,
    ) -> GenerationResult<Vec<LessonRow>> {
        let schedule = entry
            .to_schedule()
            .map_err(|source| GenerationError::Config {
                class_name: entry.key.to_string(),
                source,
            })?;
        Ok(self.build_rows(&schedule, term, holidays))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{ClassInfo, CourseInfo};
    use crate::domain::calendar::{DateRange, NamedRange};
    use crate::domain::schedule::WeeklyMeeting;
    use crate::domain::types::{ClassLevel, DayOfWeek, DurationCategory, StatusLabel};
    use chrono::{NaiveDate, NaiveTime};
    use std::collections::BTreeSet;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn schedule(meetings: Vec<WeeklyMeeting>) -> ClassSchedule {
        ClassSchedule {
            class_name: "1gy1".to_string(),
            level: ClassLevel::Gymnase1,
            student_count: 24,
            meetings,
        }
    }

    fn monday_double() -> WeeklyMeeting {
        WeeklyMeeting {
            weekday: DayOfWeek::Lundi,
            start_time: t("08:10"),
            end_time: t("09:45"),
            room: "B12".to_string(),
        }
    }

    fn september_break() -> HolidayCalendar {
        HolidayCalendar::new(
            vec![NamedRange {
                name: "automne".to_string(),
                range: DateRange::new(d(2023, 9, 4), d(2023, 9, 8)).unwrap(),
            }],
            vec![],
        )
    }

    #[test]
    fn test_three_week_scenario() {
        let rows = RowBuilder::new().build_rows(
            &schedule(vec![monday_double()]),
            &Term::new(d(2023, 8, 21), 3),
            &september_break(),
        );

        assert_eq!(rows.len(), 3);
        for row in &rows[..2] {
            assert_eq!(row.duration_category, DurationCategory::FullDouble);
            assert_eq!(row.status_labels, BTreeSet::from([StatusLabel::Lecon]));
        }
        assert_eq!(rows[2].lesson_date, d(2023, 9, 4));
        assert_eq!(rows[2].duration_category, DurationCategory::None);
        assert_eq!(rows[2].status_labels, BTreeSet::from([StatusLabel::Vacances]));
        assert_eq!(rows[2].title(), "Semaine 3");
    }

    #[test]
    fn test_second_meeting_goes_to_remark() {
        let second = WeeklyMeeting {
            weekday: DayOfWeek::Jeudi,
            start_time: t("10:00"),
            end_time: t("10:45"),
            room: "C3".to_string(),
        };
        let rows = RowBuilder::new().build_rows(
            &schedule(vec![monday_double(), second]),
            &Term::new(d(2023, 8, 21), 2),
            &HolidayCalendar::default(),
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].room, "B12");
        assert_eq!(rows[0].remark.as_deref(), Some("2e cours: jeudi 10:00-10:45, salle C3"));
    }

    #[test]
    fn test_no_meeting_yields_no_rows() {
        let rows = RowBuilder::new().build_rows(
            &schedule(vec![]),
            &Term::new(d(2023, 8, 21), 5),
            &HolidayCalendar::default(),
        );
        assert!(rows.is_empty());
    }

    #[test]
    fn test_unknown_weekday_fails_without_rows() {
        let info = ClassInfo {
            nb_eleves: 20,
            cours_1: CourseInfo {
                jour: "lundii".to_string(),
                heure_debut: "08:10".to_string(),
                heure_fin: "09:45".to_string(),
                salle: "B12".to_string(),
            },
            cours_2: None,
        };
        let entry = ClassEntry {
            level: ClassLevel::Gymnase1,
            key: "1gy1",
            info: &info,
        };

        let result = RowBuilder::new().build_rows_for_entry(
            &entry,
            &Term::new(d(2023, 8, 21), 3),
            &HolidayCalendar::default(),
        );
        match result {
            Err(GenerationError::Config { class_name, .. }) => assert_eq!(class_name, "1gy1"),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_rows_follow_resolved_slots() {
        let holidays = september_break();
        let term = Term::new(d(2023, 8, 21), 4);
        let meeting = monday_double();
        let rows = RowBuilder::new().build_rows(&schedule(vec![meeting.clone()]), &term, &holidays);

        let resolver = LessonSlotResolver::new(&holidays);
        for (row, week) in rows.iter().zip(WeekSequencer::new().enumerate_weeks(&term)) {
            let slot = resolver.resolve_slot(week.week_start_date, &meeting);
            assert_eq!(row.lesson_date, slot.lesson_date);
            assert_eq!(row.duration_category, slot.duration_category);
            assert_eq!(row.status_labels, slot.day.labels);
        }
    }
}
