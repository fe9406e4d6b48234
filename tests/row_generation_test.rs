// ==========================================
// 课程行生成 集成测试
// ==========================================
// 测试目标: 从配置到课程行的完整计算链路
// ==========================================


use notion_school_calendar::domain::{DurationCategory, StatusLabel};
use notion_school_calendar::engine::{GenerationError, RowBuilder, WeekSequencer};
use notion_school_calendar::HolidayCalendar;
use std::collections::BTreeSet;
use test_helpers::{class_info, course, d, ConfigBuilder};

#[test]
fn test_three_week_scenario_from_config() {
    let config = ConfigBuilder::new()
        .weeks(3)
        .vacances("automne", "2023-09-04", "2023-09-08")
        .gymnase_class("1gy1", class_info(course("lundi", "08:10", "09:45", "B12"), None))
        .build();

    let holidays = config.infos_generales.holiday_calendar().unwrap();
    let term = config.infos_generales.term().unwrap();
    let entry = config.classes.find("1gy1").unwrap();

    let rows = RowBuilder::new()
        .build_rows_for_entry(&entry, &term, &holidays)
        .unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].lesson_date, d(2023, 8, 21));
    assert_eq!(rows[1].lesson_date, d(2023, 8, 28));
    for row in &rows[..2] {
        assert_eq!(row.duration_category, DurationCategory::FullDouble);
        assert_eq!(row.status_labels, BTreeSet::from([StatusLabel::Lecon]));
    }
    assert_eq!(rows[2].lesson_date, d(2023, 9, 4));
    assert_eq!(rows[2].duration_category, DurationCategory::None);
    assert_eq!(rows[2].status_labels, BTreeSet::from([StatusLabel::Vacances]));
}

#[test]
fn test_unknown_weekday_produces_zero_rows() {
    let config = ConfigBuilder::new()
        .weeks(3)
        .gymnase_class("1gy1", class_info(course("lundii", "08:10", "09:45", "B12"), None))
        .build();

    let holidays = config.infos_generales.holiday_calendar().unwrap();
    let term = config.infos_generales.term().unwrap();
    let entry = config.classes.find("1gy1").unwrap();

    let result = RowBuilder::new().build_rows_for_entry(&entry, &term, &holidays);
    assert!(matches!(result, Err(GenerationError::Config { .. })));
}

#[test]
fn test_public_holiday_on_meeting_day() {
    // 2023-11-01 是周三
    let config = ConfigBuilder::new()
        .weeks(12)
        .jour_ferie("toussaint", "2023-11-01", "2023-11-01")
        .gymnase_class("2gy1", class_info(course("mercredi", "10:00", "10:45", "C3"), None))
        .build();

    let holidays = config.infos_generales.holiday_calendar().unwrap();
    let term = config.infos_generales.term().unwrap();
    let entry = config.classes.find("2gy1").unwrap();
    let rows = RowBuilder::new()
        .build_rows_for_entry(&entry, &term, &holidays)
        .unwrap();

    let off: Vec<_> = rows.iter().filter(|r| r.is_off()).collect();
    assert_eq!(off.len(), 1);
    assert_eq!(off[0].week_index, 11);
    assert_eq!(off[0].lesson_date, d(2023, 11, 1));
    assert_eq!(off[0].status_labels, BTreeSet::from([StatusLabel::JourFerie]));

    // 其余周均为单节课
    assert!(rows
        .iter()
        .filter(|r| !r.is_off())
        .all(|r| r.duration_category == DurationCategory::FullSingle));
}

#[test]
fn test_week_partially_off_depends_on_weekday() {
    // 假期只覆盖周一到周三,周四上课的班级不受影响
    let config = ConfigBuilder::new()
        .weeks(2)
        .vacances("automne", "2023-08-28", "2023-08-30")
        .gymnase_class("1gy1", class_info(course("lundi", "08:10", "08:55", "A1"), None))
        .gymnase_class("1gy2", class_info(course("jeudi", "08:10", "08:55", "A2"), None))
        .build();

    let holidays = config.infos_generales.holiday_calendar().unwrap();
    let term = config.infos_generales.term().unwrap();
    let builder = RowBuilder::new();

    let monday_rows = builder
        .build_rows_for_entry(&config.classes.find("1gy1").unwrap(), &term, &holidays)
        .unwrap();
    let thursday_rows = builder
        .build_rows_for_entry(&config.classes.find("1gy2").unwrap(), &term, &holidays)
        .unwrap();

    assert!(monday_rows[1].is_off());
    assert!(!thursday_rows[1].is_off());
    assert_eq!(thursday_rows[1].lesson_date, d(2023, 8, 31));
}

#[test]
fn test_build_rows_is_idempotent() {
    let config = ConfigBuilder::new()
        .gymnase_class(
            "1gy1",
            class_info(
                course("mardi", "08:10", "09:45", "B12"),
                Some(course("vendredi", "13:00", "13:45", "B14")),
            ),
        )
        .build();

    let holidays = config.infos_generales.holiday_calendar().unwrap();
    let term = config.infos_generales.term().unwrap();
    let entry = config.classes.find("1gy1").unwrap();
    let builder = RowBuilder::new();

    let first = builder.build_rows_for_entry(&entry, &term, &holidays).unwrap();
    let second = builder.build_rows_for_entry(&entry, &term, &holidays).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 52);

    // 严格按周序递增
    for pair in first.windows(2) {
        assert_eq!(pair[1].week_index, pair[0].week_index + 1);
        assert!(pair[1].lesson_date > pair[0].lesson_date);
    }
    assert_eq!(
        first[0].remark.as_deref(),
        Some("2e cours: vendredi 13:00-13:45, salle B14")
    );
}

#[test]
fn test_classify_properties_over_a_year() {
    let config = ConfigBuilder::new()
        .vacances("noel", "2023-12-25", "2024-01-05")
        .jour_ferie("ascension", "2024-05-09", "2024-05-10")
        .build();
    let holidays: HolidayCalendar = config.infos_generales.holiday_calendar().unwrap();
    let term = config.infos_generales.term().unwrap();

    let weeks = WeekSequencer::new().enumerate_weeks(&term);
    for week in weeks {
        for offset in 0..7 {
            let day = week.week_start_date + chrono::Duration::days(offset);
            let c = holidays.classify(day);
            let in_noel = day >= d(2023, 12, 25) && day <= d(2024, 1, 5);
            let in_ascension = day >= d(2024, 5, 9) && day <= d(2024, 5, 10);
            let in_fixture = day.format("%Y").to_string() == "2025";
            if in_noel {
                assert_eq!(c.labels, BTreeSet::from([StatusLabel::Vacances]));
            } else if in_ascension {
                assert_eq!(c.labels, BTreeSet::from([StatusLabel::JourFerie]));
            } else if !in_fixture {
                assert!(!c.is_off, "unexpected holiday on {day}");
                assert_eq!(c.labels, BTreeSet::from([StatusLabel::Lecon]));
            }
        }
    }
}
