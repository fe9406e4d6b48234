// ==========================================
// 学校校历生成器 - 周序列生成器
// ==========================================
// 职责: 由学期锚点枚举每一周的 (周序号, 周一日期)
// 说明: 纯函数,不查询假期日历（假期按具体上课日判定）
// ==========================================

use crate::domain::calendar::Term;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// 一周
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    pub week_index: u32, // 从 1 开始
    pub week_start_date: NaiveDate, // 该周周一
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WeekSequencer;

impl WeekSequencer {
    pub fn new() -> Self {
        Self
    }

    /// 枚举学期内所有周
    ///
    /// 恰好 term.week_count 项, week_start_date = first_monday + 7*(week_index-1)
    pub fn enumerate_weeks(&self, term: &Term) -> Vec<Week> {
        (1..=term.week_count)
            .map(|week_index| Week {
                week_index,
                week_start_date: term.first_monday
                    + Duration::weeks(i64::from(week_index) - 1),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_exact_count_and_spacing() {
        let term = Term::new(d(2023, 8, 21), 52);
        let weeks = WeekSequencer::new().enumerate_weeks(&term);

        assert_eq!(weeks.len(), 52);
        assert_eq!(weeks[0].week_index, 1);
        assert_eq!(weeks[0].week_start_date, d(2023, 8, 21));
        for pair in weeks.windows(2) {
            assert_eq!(pair[1].week_index, pair[0].week_index + 1);
            assert_eq!(
                pair[1].week_start_date - pair[0].week_start_date,
                Duration::days(7)
            );
        }
        assert_eq!(weeks[51].week_start_date, d(2024, 8, 12));
    }

    #[test]
    fn test_crosses_year_boundary() {
        let term = Term::new(d(2023, 12, 18), 3);
        let weeks = WeekSequencer::new().enumerate_weeks(&term);
        assert_eq!(weeks[2].week_start_date, d(2024, 1, 1));
    }

    #[test]
    fn test_zero_weeks_is_empty() {
        let term = Term::new(d(2023, 8, 21), 0);
        assert!(WeekSequencer::new().enumerate_weeks(&term).is_empty());
    }

    #[test]
    fn test_restartable() {
        let term = Term::new(d(2023, 8, 21), 10);
        let seq = WeekSequencer::new();
        assert_eq!(seq.enumerate_weeks(&term), seq.enumerate_weeks(&term));
    }
}
