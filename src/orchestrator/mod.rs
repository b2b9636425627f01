//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用
//! - 根据配置组装调用器、失败报告和执行器
//! - 输出启动信息与最终统计
//!
//! ### `batch_runner` - 批次执行器
//! - 按顺序遍历样本编号（Vec<Identifier>）
//! - 每个样本：分隔线 → 调用检测程序 → 暂停
//! - 失败只记录，继续下一个
//!
//! ## 层次关系
//!
//! ```text
//! app (持有 Config)
//!     ↓
//! batch_runner (处理 Vec<Identifier>)
//!     ↓
//! services (能力层：failure report)
//!     ↓
//! infrastructure (基础设施：CommandInvoker)
//! ```

pub mod app;
pub mod batch_runner;

// 重新导出主要类型
pub use app::App;
pub use batch_runner::{BatchRunner, BatchSummary, RunRecord};
