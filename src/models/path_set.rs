//! 单个样本的路径集合
//!
//! 每次调用前临时构造，调用结束即丢弃

use crate::models::identifier::Identifier;
use std::fmt::Display;

/// 一次检测调用需要的五个路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSet {
    /// 输入音频 `<root>/train<n>.wav`
    pub wave: String,
    /// 结果目录 `<root>/<results_dir>`
    pub output_dir: String,
    /// 起音输出 `<root>/train<n>.onsets`
    pub onsets: String,
    /// 节拍输出 `<root>/train<n>.beats`
    pub beats: String,
    /// 速度输出 `<root>/train<n>.bpms`
    pub tempo: String,
}

impl PathSet {
    pub fn new(data_root: &str, results_dir: &str, identifier: Identifier) -> Self {
        let sample = |ext: &str| join(data_root, &format!("train{}.{}", identifier, ext));

        Self {
            wave: sample("wav"),
            output_dir: join(data_root, results_dir),
            onsets: sample("onsets"),
            beats: sample("beats"),
            tempo: sample("bpms"),
        }
    }

    /// 带参数标志的命令行参数，顺序固定：-i -d -o -b -t
    pub fn to_args(&self) -> Vec<String> {
        [
            ("-i", &self.wave),
            ("-d", &self.output_dir),
            ("-o", &self.onsets),
            ("-b", &self.beats),
            ("-t", &self.tempo),
        ]
        .into_iter()
        .flat_map(|(flag, path)| [flag.to_string(), path.clone()])
        .collect()
    }
}

impl Display for PathSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_args().join(" "))
    }
}

// 按字符串模板拼接，不做平台路径规范化
fn join(root: &str, name: &str) -> String {
    if root.is_empty() {
        return name.to_string();
    }
    format!("{}/{}", root.trim_end_matches('/'), name)
}
