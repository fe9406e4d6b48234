// ==========================================
// 学校校历生成器 - 引擎层
// ==========================================
// 职责: 周序列、课时解析、行构建、生成编排
// 红线: 引擎不读写文件,不拼 HTTP 请求
// ==========================================

pub mod error;
pub mod orchestrator;
pub mod row_builder;
pub mod slot_resolver;
pub mod week_sequencer;

// 重导出核心引擎
pub use error::{GenerationError, GenerationResult};
pub use orchestrator::{CalendarGenerator, ClassOutcome, ClassPlan, ClassStatus, GenerationReport};
pub use row_builder::RowBuilder;
pub use slot_resolver::{LessonSlotResolver, ResolvedSlot, DOUBLE_PERIOD_THRESHOLD_MINUTES};
pub use week_sequencer::{Week, WeekSequencer};
