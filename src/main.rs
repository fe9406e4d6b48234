// ==========================================
// 学校校历生成器 - 命令行入口（试运行）
// ==========================================
// 用法:
//   notion-school-calendar [config_path] [parent_page_id]
//
// 配置文件不存在时回退到 empty_config.json。
// 加载并校验配置,为每个班级生成课程日历,
// 写入内存记录器后把全部请求体以 JSON 打印到 stdout。
// 不发起任何 HTTP 请求。
// ==========================================

use anyhow::Context;
use notion_school_calendar::config::loader::EMPTY_CONFIG_FILE_NAME;
use notion_school_calendar::config::ConfigLoader;
use notion_school_calendar::engine::{CalendarGenerator, ClassStatus};
use notion_school_calendar::logging::{self, LogFormat};
use notion_school_calendar::notion::RecordingSink;
use serde_json::json;
use std::sync::Arc;

const DRY_RUN_PARENT_PAGE_ID: &str = "dry-run-parent";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let format = std::env::var("NOTION_CALENDAR_LOG_FORMAT")
        .map(|v| LogFormat::parse(&v))
        .unwrap_or_default();
    logging::init(format);

    tracing::info!("{} v{}", notion_school_calendar::APP_NAME, notion_school_calendar::VERSION);

    let mut args = std::env::args().skip(1);
    let mut loader = match args.next() {
        Some(path) => ConfigLoader::new(path, EMPTY_CONFIG_FILE_NAME),
        None => ConfigLoader::with_defaults(),
    };
    let config_path = loader.config_path().to_path_buf();
    let parent_page_id = args
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DRY_RUN_PARENT_PAGE_ID.to_string());

    let config = loader
        .load_valid_config()
        .with_context(|| format!("无法加载配置 {}", config_path.display()))?
        .clone();

    let sink = Arc::new(RecordingSink::new());
    let generator = CalendarGenerator::new(sink.clone(), &parent_page_id);
    let report = generator.generate(&config).await.context("课程日历生成失败")?;

    let databases: Vec<_> = sink
        .databases()
        .into_iter()
        .map(|db| {
            json!({
                "database": db.payload,
                "pages": db.rows.into_iter().map(|p| p.payload).collect::<Vec<_>>(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&databases)?);

    for outcome in report.failed() {
        if let ClassStatus::Failed { reason, .. } = &outcome.status {
            eprintln!("{}: {}", outcome.class_name, reason);
        }
    }
    if report.failed().next().is_some() {
        anyhow::bail!("{} 个班级生成失败", report.failed().count());
    }
    Ok(())
}
