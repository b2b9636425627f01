//! 批次执行器 - 编排层
//!
//! ## 流程（每个样本）
//!
//! 1. 构造五个路径参数
//! 2. 输出一行 `#` 分隔线
//! 3. 调用检测程序并等待它结束
//! 4. 暂停固定时间
//!
//! 严格顺序执行，任何时刻最多只有一个子进程。
//! 调用失败只记录，不重试，不中止，继续下一个样本。

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{CommandInvoker, InvocationOutcome};
use crate::models::{Identifier, PathSet};
use crate::services::FailureReporter;
use std::io::{self, Write};
use std::time::Duration;
use tracing::{info, warn};

/// 单个样本的执行记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    pub identifier: Identifier,
    pub paths: PathSet,
    pub outcome: InvocationOutcome,
}

/// 批次执行结果，按调用顺序排列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub records: Vec<RunRecord>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn succeeded(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn failed_identifiers(&self) -> Vec<Identifier> {
        self.records
            .iter()
            .filter(|r| !r.outcome.is_success())
            .map(|r| r.identifier)
            .collect()
    }
}

/// 批次执行器
///
/// - `I`: 调用能力，生产环境为 `ProcessInvoker`
/// - `W`: 分隔线输出位置，生产环境为标准输出
pub struct BatchRunner<I, W> {
    invoker: I,
    output: W,
    results_dir: String,
    pause: Duration,
    separator: String,
    reporter: Option<FailureReporter>,
}

impl<I: CommandInvoker> BatchRunner<I, io::Stdout> {
    pub fn new(invoker: I, config: &Config) -> Self {
        Self {
            invoker,
            output: io::stdout(),
            results_dir: config.results_dir.clone(),
            pause: config.pause(),
            separator: "#".repeat(config.separator_width),
            reporter: None,
        }
    }
}

impl<I: CommandInvoker, W: Write> BatchRunner<I, W> {
    /// 替换分隔线的输出位置
    pub fn with_output<O: Write>(self, output: O) -> BatchRunner<I, O> {
        BatchRunner {
            invoker: self.invoker,
            output,
            results_dir: self.results_dir,
            pause: self.pause,
            separator: self.separator,
            reporter: self.reporter,
        }
    }

    /// 启用失败报告
    pub fn with_failure_reporter(mut self, reporter: FailureReporter) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// 按顺序处理所有样本
    ///
    /// 只有分隔线写不出去时才返回错误；检测程序的失败都记录在返回的
    /// `BatchSummary` 里。
    pub async fn run(
        &mut self,
        identifiers: &[Identifier],
        data_root: &str,
    ) -> AppResult<BatchSummary> {
        let total = identifiers.len();
        let mut summary = BatchSummary {
            records: Vec::with_capacity(total),
        };

        for (idx, &identifier) in identifiers.iter().enumerate() {
            let paths = PathSet::new(data_root, &self.results_dir, identifier);

            self.write_separator()?;
            info!("[{}/{}] ▶ train{}: {}", idx + 1, total, identifier, paths);

            let outcome = match self.invoker.invoke(&paths.to_args()).await {
                Ok(outcome) => outcome,
                Err(e) => InvocationOutcome::NotStarted {
                    reason: e.to_string(),
                },
            };

            if outcome.is_success() {
                info!("[{}/{}] ✓ train{} 完成", idx + 1, total, identifier);
            } else {
                warn!(
                    "[{}/{}] ⚠️ train{} 失败: {}",
                    idx + 1,
                    total,
                    identifier,
                    outcome
                );
                self.report(identifier, &outcome);
            }

            summary.records.push(RunRecord {
                identifier,
                paths,
                outcome,
            });

            tokio::time::sleep(self.pause).await;
        }

        Ok(summary)
    }

    fn write_separator(&mut self) -> AppResult<()> {
        // 子进程继承同一个标准输出，必须先 flush 才能保证顺序
        writeln!(self.output, "{}", self.separator)
            .and_then(|_| self.output.flush())
            .map_err(|e| AppError::file_write_failed("<stdout>", e))
    }

    fn report(&self, identifier: Identifier, outcome: &InvocationOutcome) {
        if let Some(reporter) = &self.reporter {
            if let Err(e) = reporter.record(identifier, outcome) {
                warn!("写入失败报告出错 ({}): {}", reporter.path(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// 记录参数的桩调用器，输入文件名命中 `fail_on` 时返回失败
    struct StubInvoker {
        calls: Mutex<Vec<Vec<String>>>,
        fail_on: Vec<&'static str>,
    }

    impl StubInvoker {
        fn new(fail_on: Vec<&'static str>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on,
            }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CommandInvoker for StubInvoker {
        async fn invoke(&self, args: &[String]) -> AppResult<InvocationOutcome> {
            self.calls.lock().unwrap().push(args.to_vec());
            let wave = args.get(1).map(String::as_str).unwrap_or_default();
            if self.fail_on.iter().any(|f| wave.ends_with(f)) {
                Ok(InvocationOutcome::Failed { code: Some(1) })
            } else {
                Ok(InvocationOutcome::Succeeded)
            }
        }
    }

    fn test_config() -> Config {
        Config {
            pause_ms: 0,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_invokes_once_per_identifier_in_order() {
        let mut runner = BatchRunner::new(StubInvoker::new(vec![]), &test_config())
            .with_output(Vec::<u8>::new());

        let summary = runner.run(&[3, 1, 2], "./Data").await.expect("执行失败");

        let waves: Vec<String> = runner
            .invoker()
            .calls()
            .into_iter()
            .map(|args| args[1].clone())
            .collect();
        assert_eq!(
            waves,
            vec!["./Data/train3.wav", "./Data/train1.wav", "./Data/train2.wav"]
        );
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.succeeded(), 3);
    }

    #[tokio::test]
    async fn test_one_separator_per_identifier() {
        let mut runner = BatchRunner::new(StubInvoker::new(vec![]), &test_config())
            .with_output(Vec::<u8>::new());

        runner.run(&[1, 2, 4, 5], "./Data").await.expect("执行失败");

        let printed = String::from_utf8(runner.output().clone()).expect("输出应为 UTF-8");
        let lines: Vec<&str> = printed.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| *l == "#".repeat(127)));
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_batch() {
        let mut runner = BatchRunner::new(StubInvoker::new(vec!["train2.wav"]), &test_config())
            .with_output(Vec::<u8>::new());

        let summary = runner.run(&[1, 2, 3], "./Data").await.expect("执行失败");

        assert_eq!(runner.invoker().calls().len(), 3);
        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.failed_identifiers(), vec![2]);
        assert_eq!(summary.records[2].identifier, 3);
    }

    #[tokio::test]
    async fn test_spawn_error_becomes_not_started() {
        struct Missing;

        impl CommandInvoker for Missing {
            async fn invoke(&self, _args: &[String]) -> AppResult<InvocationOutcome> {
                Err(AppError::spawn_failed(
                    "java",
                    io::Error::new(io::ErrorKind::NotFound, "not found"),
                ))
            }
        }

        let mut runner = BatchRunner::new(Missing, &test_config()).with_output(Vec::<u8>::new());
        let summary = runner.run(&[1, 2], "./Data").await.expect("执行失败");

        assert_eq!(summary.total(), 2);
        assert!(summary
            .records
            .iter()
            .all(|r| matches!(r.outcome, InvocationOutcome::NotStarted { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pauses_after_each_invocation() {
        let mut runner = BatchRunner::new(StubInvoker::new(vec![]), &Config::default())
            .with_output(Vec::<u8>::new());

        let start = tokio::time::Instant::now();
        runner.run(&[1, 2], "./Data").await.expect("执行失败");

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1000));
        assert!(elapsed < Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_results_dir_comes_from_config() {
        let config = Config {
            results_dir: "out".to_string(),
            ..test_config()
        };
        let mut runner =
            BatchRunner::new(StubInvoker::new(vec![]), &config).with_output(Vec::<u8>::new());

        let summary = runner.run(&[8], "/data").await.expect("执行失败");

        assert_eq!(summary.records[0].paths.output_dir, "/data/out");
        assert_eq!(runner.invoker().calls()[0][3], "/data/out");
    }
}
