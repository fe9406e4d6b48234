// ==========================================
// 学校校历生成器 - 班级课表领域模型
// ==========================================

use crate::domain::types::{ClassLevel, DayOfWeek};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// WeeklyMeeting - 每周固定课时
// ==========================================
// 对应配置中的 cours_1 / cours_2
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyMeeting {
    pub weekday: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: String,
}

impl WeeklyMeeting {
    /// 课时长度（分钟）
    pub fn elapsed_minutes(&self) -> i64 {
        self.end_time
            .signed_duration_since(self.start_time)
            .num_minutes()
    }
}

impl fmt::Display for WeeklyMeeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}, salle {}",
            self.weekday,
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M"),
            self.room
        )
    }
}

// ==========================================
// ClassSchedule - 班级课表
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSchedule {
    pub class_name: String,
    pub level: ClassLevel,
    pub student_count: i64,
    /// 0..=2 个每周课时,按 cours_1, cours_2 顺序
    pub meetings: Vec<WeeklyMeeting>,
}

impl ClassSchedule {
    /// 生成行时使用的主课时 (cours_1)
    pub fn primary_meeting(&self) -> Option<&WeeklyMeeting> {
        self.meetings.first()
    }

    /// 第二课时 (cours_2)，只写入备注
    pub fn secondary_meeting(&self) -> Option<&WeeklyMeeting> {
        self.meetings.get(1)
    }

    /// Notion "Classe" 选项名，如 "1GY3"
    pub fn class_label(&self) -> String {
        self.class_name.to_uppercase()
    }
}
