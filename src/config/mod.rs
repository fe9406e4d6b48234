// ==========================================
// 学校校历生成器 - 配置层
// ==========================================
// 职责: 配置文件的读写与校验,以及向领域值的转换
// 存储: JSON 文件（由树形编辑器产出）
// ==========================================

pub mod error;
pub mod loader;
pub mod schema;
pub mod validator;

pub use error::{ConfigError, ConfigResult};
pub use loader::{default_config_file_name, load_from_path, load_from_str, ConfigLoader};
pub use schema::{
    CalendarConfig, ClassEntry, ClassInfo, ClassesConfig, CourseInfo, EcgClasses, GeneralInfo,
    GymnaseClasses, GymnaseInfo, RawDateRange,
};
