// ==========================================
// 学校校历生成器 - Notion 载荷层
// ==========================================
// 职责: 数据库模板、行属性映射、写入接口
// 红线: 不含 HTTP 传输
// ==========================================

pub mod database;
pub mod properties;
pub mod sink;

pub use database::{columns, Column, ColumnKind, DatabaseSchema, SelectOption};
pub use properties::{PropertyValue, RowRecord};
pub use sink::{CalendarSink, RecordedDatabase, RecordedPage, RecordingSink, SinkError};
