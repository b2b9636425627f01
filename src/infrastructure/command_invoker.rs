//! 命令调用器 - 基础设施层
//!
//! 同步等待子进程结束，标准输入输出直接继承，不捕获也不解析

use crate::config::Config;
use crate::error::{AppError, AppResult};
use std::fmt::Display;
use std::future::Future;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

/// 单次调用的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// 进程以 0 退出
    Succeeded,
    /// 进程以非 0 退出；被信号终止时没有退出码
    Failed { code: Option<i32> },
    /// 进程没有启动起来
    NotStarted { reason: String },
}

impl InvocationOutcome {
    pub fn from_status(status: ExitStatus) -> Self {
        if status.success() {
            InvocationOutcome::Succeeded
        } else {
            InvocationOutcome::Failed {
                code: status.code(),
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, InvocationOutcome::Succeeded)
    }
}

impl Display for InvocationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvocationOutcome::Succeeded => write!(f, "成功"),
            InvocationOutcome::Failed { code: Some(code) } => write!(f, "退出码 {}", code),
            InvocationOutcome::Failed { code: None } => write!(f, "被信号终止"),
            InvocationOutcome::NotStarted { reason } => write!(f, "未启动: {}", reason),
        }
    }
}

/// 调用外部检测程序的能力
///
/// 返回的 future 完成即代表子进程已经退出。
/// 无法启动进程时返回 `Err`，非 0 退出属于正常的 `Ok(Failed)`。
pub trait CommandInvoker {
    fn invoke(&self, args: &[String]) -> impl Future<Output = AppResult<InvocationOutcome>>;
}

/// 真实的进程调用器
///
/// 命令行为 `<program> <base_args...> <args...>`，不经过 shell
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    program: String,
    base_args: Vec<String>,
}

impl ProcessInvoker {
    pub fn new(program: impl Into<String>, base_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            base_args,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.detector_program, config.detector_args.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl CommandInvoker for ProcessInvoker {
    async fn invoke(&self, args: &[String]) -> AppResult<InvocationOutcome> {
        let program = self.program();
        debug!("执行: {} {} {}", program, self.base_args.join(" "), args.join(" "));

        let status = Command::new(program)
            .args(&self.base_args)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| AppError::spawn_failed(program, e))?;

        Ok(InvocationOutcome::from_status(status))
    }
}
