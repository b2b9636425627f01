//! 日志工具模块
//!
//! 日志统一写到标准错误，标准输出只留给分隔线和检测程序自己的输出

use crate::config::Config;
use crate::orchestrator::BatchSummary;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志，默认级别 info，可用 `RUST_LOG` 覆盖
///
/// 重复调用不会报错（测试中会被多次调用）
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量节拍检测");
    info!("📁 数据目录: {}", config.data_root);
    info!(
        "🔧 检测程序: {} {}",
        config.detector_program,
        config.detector_args.join(" ")
    );
    info!(
        "📋 样本数: {} | 间隔: {} ms",
        config.identifiers.len(),
        config.pause_ms
    );
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `summary`: 批次执行结果
/// - `report_file`: 失败报告路径（未启用则为 None）
pub fn print_final_stats(summary: &BatchSummary, report_file: Option<&str>) {
    info!("{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", summary.succeeded(), summary.total());
    info!("❌ 失败: {}", summary.failed());

    let failed = summary.failed_identifiers();
    if !failed.is_empty() {
        let names: Vec<String> = failed.iter().map(|n| format!("train{}", n)).collect();
        info!("失败样本: {}", names.join(", "));
    }

    info!("{}", "=".repeat(60));
    if let Some(path) = report_file {
        info!("失败报告已保存至: {}", path);
    }
}
