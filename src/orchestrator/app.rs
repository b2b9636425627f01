//! 应用 - 编排层入口
//!
//! 持有配置和真实的进程调用器，负责启动日志和最终统计

use crate::config::Config;
use crate::infrastructure::ProcessInvoker;
use crate::orchestrator::batch_runner::{BatchRunner, BatchSummary};
use crate::services::FailureReporter;
use crate::utils::logging::{log_startup, print_final_stats};
use anyhow::{Context, Result};
use std::io;
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
    runner: BatchRunner<ProcessInvoker, io::Stdout>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let mut runner = BatchRunner::new(ProcessInvoker::from_config(&config), &config);

        // 失败报告默认关闭
        if let Some(path) = &config.failure_report_file {
            let reporter = FailureReporter::with_path(path);
            reporter
                .start(config.identifiers.len())
                .with_context(|| format!("无法初始化失败报告: {}", path))?;
            info!("📝 失败报告: {}", path);
            runner = runner.with_failure_reporter(reporter);
        }

        Ok(Self { config, runner })
    }

    /// 运行整个批次
    pub async fn run(mut self) -> Result<BatchSummary> {
        let summary = self
            .runner
            .run(&self.config.identifiers, &self.config.data_root)
            .await?;

        print_final_stats(&summary, self.config.failure_report_file.as_deref());

        Ok(summary)
    }
}
