// ==========================================
// 学校校历生成器 - 假期日历领域模型
// ==========================================
// 职责: 日期区间、假期日历、学期锚点
// 红线: 加载后只读,由调用方以引用方式注入各引擎
// ==========================================

use crate::domain::types::{HolidayKind, StatusLabel};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// DateRange - 闭区间日期范围
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// 创建日期区间
    ///
    /// start > end 时返回 None
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// 两端均包含
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

// ==========================================
// NamedRange - 具名假期区间
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRange {
    pub name: String,
    pub range: DateRange,
}

// ==========================================
// DayClassification - 单日判定结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayClassification {
    pub is_off: bool,
    pub labels: BTreeSet<StatusLabel>,
    /// 命中的假期 (类别, 名称)
    pub matched: Option<(HolidayKind, String)>,
}

impl DayClassification {
    fn lesson() -> Self {
        Self {
            is_off: false,
            labels: BTreeSet::from([StatusLabel::Lecon]),
            matched: None,
        }
    }

    fn off(kind: HolidayKind, name: &str) -> Self {
        Self {
            is_off: true,
            labels: BTreeSet::from([kind.status_label()]),
            matched: Some((kind, name.to_string())),
        }
    }
}

// ==========================================
// RangeOverlap - 区间重叠报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeOverlap {
    pub first: (HolidayKind, String),
    pub second: (HolidayKind, String),
}

impl RangeOverlap {
    /// 是否同类别重叠（数据质量问题）
    pub fn is_same_kind(&self) -> bool {
        self.first.0 == self.second.0
    }
}

// ==========================================
// HolidayCalendar - 假期日历
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    breaks: Vec<NamedRange>,
    public_holidays: Vec<NamedRange>,
}

impl HolidayCalendar {
    pub fn new(breaks: Vec<NamedRange>, public_holidays: Vec<NamedRange>) -> Self {
        Self {
            breaks,
            public_holidays,
        }
    }

    pub fn ranges(&self, kind: HolidayKind) -> &[NamedRange] {
        match kind {
            HolidayKind::Break => &self.breaks,
            HolidayKind::PublicHoliday => &self.public_holidays,
        }
    }

    /// 判定某日是否放假及对应标签
    ///
    /// 规则（顺序执行，命中即返回）:
    /// 1) 落在任一 vacances 区间 → (true, {Vacances})
    /// 2) 落在任一 jours_feries 区间 → (true, {Jour férié})
    /// 3) 其他 → (false, {Leçon})
    ///
    /// 同类别多个区间重叠时,取构建顺序（即配置文件顺序）中的第一个命中者
    pub fn classify(&self, date: NaiveDate) -> DayClassification {
        for kind in [HolidayKind::Break, HolidayKind::PublicHoliday] {
            if let Some(hit) = self.ranges(kind).iter().find(|r| r.range.contains(date)) {
                return DayClassification::off(kind, &hit.name);
            }
        }
        DayClassification::lesson()
    }

    pub fn is_off(&self, date: NaiveDate) -> bool {
        self.classify(date).is_off
    }

    /// 列出所有重叠的区间对（含跨类别）
    pub fn overlaps(&self) -> Vec<RangeOverlap> {
        let all: Vec<(HolidayKind, &NamedRange)> = self
            .breaks
            .iter()
            .map(|r| (HolidayKind::Break, r))
            .chain(
                self.public_holidays
                    .iter()
                    .map(|r| (HolidayKind::PublicHoliday, r)),
            )
            .collect();

        let mut result = Vec::new();
        for (i, (kind_a, a)) in all.iter().enumerate() {
            for (kind_b, b) in all.iter().skip(i + 1) {
                if a.range.overlaps(&b.range) {
                    result.push(RangeOverlap {
                        first: (*kind_a, a.name.clone()),
                        second: (*kind_b, b.name.clone()),
                    });
                }
            }
        }
        result
    }
}

// ==========================================
// Term - 学期锚点
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// 第 1 周的周一
    pub first_monday: NaiveDate,
    pub week_count: u32,
}

impl Term {
    pub fn new(first_monday: NaiveDate, week_count: u32) -> Self {
        Self {
            first_monday,
            week_count,
        }
    }

    pub fn starts_on_monday(&self) -> bool {
        self.first_monday.weekday() == Weekday::Mon
    }
}
