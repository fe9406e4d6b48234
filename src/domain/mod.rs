// ==========================================
// 学校校历生成器 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读写,不含 Notion 载荷拼装
// ==========================================

pub mod calendar;
pub mod lesson;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use calendar::{DateRange, DayClassification, HolidayCalendar, NamedRange, RangeOverlap, Term};
pub use lesson::LessonRow;
pub use schedule::{ClassSchedule, WeeklyMeeting};
pub use types::{ClassLevel, DayOfWeek, DurationCategory, HolidayKind, StatusLabel};
