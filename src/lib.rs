// ==========================================
// 学校校历生成器 - 核心库
// ==========================================
// 由校历配置（课表、假期、法定节日）按周生成
// 每个班级的 Notion 课程日历行
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 生成规则
pub mod engine;

// 配置层 - 配置文件
pub mod config;

// Notion 载荷层 - 数据库模板与写入接口
pub mod notion;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ClassLevel, DayOfWeek, DurationCategory, HolidayKind, StatusLabel};

// 领域实体
pub use domain::{
    ClassSchedule, DateRange, DayClassification, HolidayCalendar, LessonRow, Term, WeeklyMeeting,
};

// 引擎
pub use engine::{
    CalendarGenerator, GenerationError, GenerationReport, LessonSlotResolver, RowBuilder,
    WeekSequencer,
};

// 配置
pub use config::{CalendarConfig, ConfigError, ConfigLoader};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "学校校历生成器";
