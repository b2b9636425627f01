//! 基础设施层
//!
//! 唯一会创建操作系统进程的地方，只暴露"调用一次检测程序"的能力

pub mod command_invoker;

pub use command_invoker::{CommandInvoker, InvocationOutcome, ProcessInvoker};
