//! 批次清单（TOML）
//!
//! 示例：
//!
//! ```toml
//! data_root = "./Data"
//! results_dir = "results"
//! identifiers = [1, 2, 3]
//! detector_args = ["-jar", "/opt/beat detector/beat_detector.jar"]
//! ```

use crate::models::identifier::Identifier;
use serde::Deserialize;

/// 批次清单，所有字段可选，出现的字段覆盖环境变量/默认配置
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BatchManifest {
    pub data_root: Option<String>,
    pub results_dir: Option<String>,
    pub identifiers: Option<Vec<Identifier>>,
    /// 每个元素原样作为一个参数，可以包含空格
    pub detector_args: Option<Vec<String>>,
}
