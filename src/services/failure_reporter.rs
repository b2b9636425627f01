//! 失败报告服务 - 业务能力层
//!
//! 只负责"把失败的样本写进报告文件"，不影响批次流程

use crate::error::{AppError, AppResult};
use crate::infrastructure::InvocationOutcome;
use crate::models::Identifier;
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::debug;

/// 失败报告服务
///
/// 职责：
/// - 批次开始时写入带时间戳的报告头（覆盖旧报告）
/// - 每个失败样本追加一行
/// - 成功的样本不写
pub struct FailureReporter {
    report_file_path: String,
}

impl FailureReporter {
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            report_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.report_file_path
    }

    /// 写入报告头
    ///
    /// # 参数
    /// - `total`: 本批次样本数量
    pub fn start(&self, total: usize) -> AppResult<()> {
        let header = format!(
            "{}\n检测失败报告 - {} (共 {} 个样本)\n{}\n",
            "=".repeat(60),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            total,
            "=".repeat(60)
        );

        fs::write(&self.report_file_path, header)
            .map_err(|e| AppError::file_write_failed(&self.report_file_path, e))
    }

    /// 记录一个失败的样本
    ///
    /// # 参数
    /// - `identifier`: 样本编号
    /// - `outcome`: 调用结果
    pub fn record(&self, identifier: Identifier, outcome: &InvocationOutcome) -> AppResult<()> {
        if outcome.is_success() {
            return Ok(());
        }

        debug!("写入失败报告: train{} | {}", identifier, outcome);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.report_file_path)
            .map_err(|e| AppError::file_write_failed(&self.report_file_path, e))?;

        writeln!(file, "train{} | {}", identifier, outcome)
            .map_err(|e| AppError::file_write_failed(&self.report_file_path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_report(name: &str) -> String {
        std::env::temp_dir()
            .join(format!(
                "beat_batch_report_{}_{}.txt",
                name,
                std::process::id()
            ))
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn test_only_failures_are_recorded() {
        let path = temp_report("failures");
        let reporter = FailureReporter::with_path(&path);

        reporter.start(3).expect("写入报告头失败");
        reporter
            .record(1, &InvocationOutcome::Succeeded)
            .expect("记录失败");
        reporter
            .record(2, &InvocationOutcome::Failed { code: Some(1) })
            .expect("记录失败");
        reporter
            .record(
                3,
                &InvocationOutcome::NotStarted {
                    reason: "找不到 java".to_string(),
                },
            )
            .expect("记录失败");

        let content = std::fs::read_to_string(&path).expect("读取报告失败");
        std::fs::remove_file(&path).ok();

        assert!(content.contains("共 3 个样本"));
        assert!(!content.contains("train1 |"));
        assert!(content.contains("train2 | 退出码 1"));
        assert!(content.contains("train3 | 未启动: 找不到 java"));
    }

    #[test]
    fn test_start_truncates_previous_report() {
        let path = temp_report("truncate");
        let reporter = FailureReporter::with_path(&path);

        reporter.start(1).expect("写入报告头失败");
        reporter
            .record(9, &InvocationOutcome::Failed { code: Some(2) })
            .expect("记录失败");
        reporter.start(1).expect("写入报告头失败");

        let content = std::fs::read_to_string(&path).expect("读取报告失败");
        std::fs::remove_file(&path).ok();

        assert!(!content.contains("train9"));
    }

    #[test]
    fn test_unwritable_path_is_file_error() {
        let reporter = FailureReporter::with_path("/nonexistent-dir/beat_batch/report.txt");
        assert!(matches!(reporter.start(1), Err(AppError::File(_))));
    }
}
