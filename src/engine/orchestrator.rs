// ==========================================
// 学校校历生成器 - 生成编排器
// ==========================================
// 用途: 协调假期日历、周序列、行构建与外部写入的执行顺序
// 红线: 某班级完整序列生成之前,不向外部写入任何内容
// ==========================================

use crate::config::schema::CalendarConfig;
use crate::domain::calendar::{HolidayCalendar, Term};
use crate::domain::lesson::LessonRow;
use crate::domain::types::ClassLevel;
use crate::engine::error::{GenerationError, GenerationResult};
use crate::engine::row_builder::RowBuilder;
use crate::notion::database::DatabaseSchema;
use crate::notion::properties::RowRecord;
use crate::notion::sink::CalendarSink;
use chrono::Datelike;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

// ==========================================
// ClassPlan - 单班级的生成计划（未写入）
// ==========================================

#[derive(Debug)]
pub struct ClassPlan {
    pub class_name: String,
    pub level: ClassLevel,
    pub rows: GenerationResult<Vec<LessonRow>>,
}

impl ClassPlan {
    pub fn class_label(&self) -> String {
        self.class_name.to_uppercase()
    }
}

// ==========================================
// GenerationReport - 生成结果
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassStatus {
    Inserted {
        database_id: String,
        rows: usize,
    },
    Failed {
        reason: String,
        rows_inserted: usize,
    },
}

#[derive(Debug, Clone)]
pub struct ClassOutcome {
    pub class_name: String,
    pub level: ClassLevel,
    pub status: ClassStatus,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub outcomes: Vec<ClassOutcome>,
}

impl GenerationReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &ClassOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ClassStatus::Inserted { .. }))
    }

    pub fn failed(&self) -> impl Iterator<Item = &ClassOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ClassStatus::Failed { .. }))
    }

    pub fn total_rows(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match &o.status {
                ClassStatus::Inserted { rows, .. } => *rows,
                ClassStatus::Failed { rows_inserted, .. } => *rows_inserted,
            })
            .sum()
    }

    pub fn outcome(&self, class_name: &str) -> Option<&ClassOutcome> {
        self.outcomes.iter().find(|o| o.class_name == class_name)
    }
}

// ==========================================
// CalendarGenerator - 生成编排器
// ==========================================

pub struct CalendarGenerator<S>
where
    S: CalendarSink,
{
    sink: Arc<S>,
    builder: RowBuilder,
    parent_page_id: String,
}

impl<S> CalendarGenerator<S>
where
    S: CalendarSink,
{
    /// 创建编排器
    ///
    /// # 参数
    /// - sink: 外部写入方
    /// - parent_page_id: 课程日历数据库挂载的父页面
    pub fn new(sink: Arc<S>, parent_page_id: &str) -> Self {
        Self {
            sink,
            builder: RowBuilder::new(),
            parent_page_id: parent_page_id.to_string(),
        }
    }

    /// 构建全局假期日历与学期锚点
    pub fn prepare(config: &CalendarConfig) -> GenerationResult<(HolidayCalendar, Term)> {
        let info = &config.infos_generales;
        Ok((info.holiday_calendar()?, info.term()?))
    }

    /// 为所有班级生成课程行（纯计算,不写入）
    ///
    /// 全局配置错误时整体失败;单个班级的错误记录在其 ClassPlan 中
    #[instrument(skip(self, config))]
    pub fn plan(&self, config: &CalendarConfig) -> GenerationResult<Vec<ClassPlan>> {
        let (holidays, term) = Self::prepare(config)?;
        Ok(self.plan_with(config, &holidays, &term))
    }

    /// 使用已构建的假期日历与学期锚点生成课程行
    pub fn plan_with(
        &self,
        config: &CalendarConfig,
        holidays: &HolidayCalendar,
        term: &Term,
    ) -> Vec<ClassPlan> {
        info!(
            first_monday = %term.first_monday,
            week_count = term.week_count,
            "开始生成课程日历"
        );

        config
            .classes
            .entries()
            .iter()
            .map(|entry| ClassPlan {
                class_name: entry.key.to_string(),
                level: entry.level,
                rows: self.builder.build_rows_for_entry(entry, term, holidays),
            })
            .collect()
    }

    /// 生成并写入所有班级的课程日历
    ///
    /// 每个班级: 完整序列 → 创建数据库 → 按周序写入。
    /// 某班级失败不影响其他班级。
    #[instrument(skip(self, config))]
    pub async fn generate(&self, config: &CalendarConfig) -> GenerationResult<GenerationReport> {
        let (holidays, term) = Self::prepare(config)?;
        let school_year = term.first_monday.year();
        let plans = self.plan_with(config, &holidays, &term);

        let mut report = GenerationReport::default();
        for plan in plans {
            let status = self.write_class(&plan, school_year).await;
            if let ClassStatus::Failed { reason, .. } = &status {
                error!(class = %plan.class_name, reason = %reason, "班级生成失败");
            }
            report.outcomes.push(ClassOutcome {
                class_name: plan.class_name,
                level: plan.level,
                status,
            });
        }

        info!(
            succeeded = report.succeeded().count(),
            failed = report.failed().count(),
            rows = report.total_rows(),
            "课程日历生成结束"
        );
        Ok(report)
    }

    async fn write_class(&self, plan: &ClassPlan, school_year: i32) -> ClassStatus {
        let rows = match &plan.rows {
            Ok(rows) => rows,
            Err(e) => return failed(e, 0),
        };
        let schema = match DatabaseSchema::course_calendar(plan.level, school_year) {
            Ok(s) => s,
            Err(e) => return failed(&e, 0),
        };

        let database_id = match self
            .sink
            .create_database(&self.parent_page_id, schema.to_create_payload(&self.parent_page_id))
            .await
        {
            Ok(id) => id,
            Err(e) => return failed(&GenerationError::Sink(e.to_string()), 0),
        };

        let class_label = plan.class_label();
        for (inserted, row) in rows.iter().enumerate() {
            let payload = RowRecord::from_lesson(row, &class_label).to_page_payload(&database_id);
            if let Err(e) = self.sink.insert_row(&database_id, payload).await {
                return failed(&GenerationError::Sink(e.to_string()), inserted);
            }
            debug!(class = %plan.class_name, week_index = row.week_index, "行已写入");
        }

        ClassStatus::Inserted {
            database_id,
            rows: rows.len(),
        }
    }
}

fn failed(err: &GenerationError, rows_inserted: usize) -> ClassStatus {
    ClassStatus::Failed {
        reason: err.to_string(),
        rows_inserted,
    }
}
