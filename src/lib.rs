//! # Beat Batch
//!
//! 批量调用外部节拍检测程序（beat_detector.jar）处理训练音频的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 唯一会创建操作系统进程的地方
//! - `CommandInvoker` - 调用能力的抽象，测试中可替换为桩实现
//! - `ProcessInvoker` - 基于 tokio::process 的真实实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `FailureReporter` - 把失败的样本写入报告文件（默认关闭）
//!
//! ### ③ 数据层（Models）
//! - `models/` - 样本编号、路径集合、批次清单
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 应用生命周期与最终统计
//! - `orchestrator/batch_runner` - 逐个样本顺序调用检测程序
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

pub use utils::logging as logger;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{CommandInvoker, InvocationOutcome, ProcessInvoker};
pub use models::{BatchManifest, Identifier, PathSet, DEFAULT_IDENTIFIERS};
pub use orchestrator::{App, BatchRunner, BatchSummary, RunRecord};
pub use services::FailureReporter;
