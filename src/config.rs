use crate::error::{AppResult, ConfigError};
use crate::models::{load_manifest, validate_identifiers, BatchManifest, Identifier, DEFAULT_IDENTIFIERS};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// 数据根目录
    pub data_root: String,
    /// 结果目录名（位于数据根目录下）
    pub results_dir: String,
    /// 待处理的样本编号，按顺序处理
    pub identifiers: Vec<Identifier>,
    /// 检测程序
    pub detector_program: String,
    /// 检测程序的固定前置参数
    ///
    /// `BEAT_DETECTOR_ARGS` 按空白切分，含空格的参数只能写在清单的
    /// `detector_args` 数组里
    pub detector_args: Vec<String>,
    /// 两次调用之间的暂停（毫秒）
    pub pause_ms: u64,
    /// 分隔线宽度
    pub separator_width: usize,
    /// 失败报告文件，未设置则不写报告
    pub failure_report_file: Option<String>,
    /// 批次清单文件
    pub manifest_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_root: "./Data".to_string(),
            results_dir: "results".to_string(),
            identifiers: DEFAULT_IDENTIFIERS.to_vec(),
            detector_program: "java".to_string(),
            detector_args: vec!["-jar".to_string(), "beat_detector.jar".to_string()],
            pause_ms: 500,
            separator_width: 127,
            failure_report_file: None,
            manifest_path: None,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，未设置的字段使用默认值
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 读取环境变量，再叠加批次清单（如果设置了 `BEAT_MANIFEST`）
    pub async fn load() -> AppResult<Self> {
        let mut config = Self::from_env()?;

        if let Some(path) = config.manifest_path.clone() {
            let manifest = load_manifest(&path).await?;
            config.apply_manifest(manifest);
        }

        config.validate()?;
        Ok(config)
    }

    /// 使用任意变量来源构造配置
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let default = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let identifiers = match var("BEAT_IDENTIFIERS") {
            Some(raw) => parse_identifiers(&raw)?,
            None => default.identifiers,
        };

        let detector_args = match lookup("BEAT_DETECTOR_ARGS") {
            Some(raw) => raw.split_whitespace().map(str::to_string).collect(),
            None => default.detector_args,
        };

        let config = Self {
            data_root: var("BEAT_DATA_ROOT").unwrap_or(default.data_root),
            results_dir: var("BEAT_RESULTS_DIR").unwrap_or(default.results_dir),
            identifiers,
            detector_program: var("BEAT_DETECTOR_PROGRAM").unwrap_or(default.detector_program),
            detector_args,
            pause_ms: parse_var(&var, "BEAT_PAUSE_MS", "u64")?.unwrap_or(default.pause_ms),
            separator_width: parse_var(&var, "BEAT_SEPARATOR_WIDTH", "usize")?
                .unwrap_or(default.separator_width),
            failure_report_file: var("BEAT_FAILURE_REPORT"),
            manifest_path: var("BEAT_MANIFEST").map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    /// 用清单中出现的字段覆盖当前配置
    pub fn apply_manifest(&mut self, manifest: BatchManifest) {
        if let Some(data_root) = manifest.data_root {
            self.data_root = data_root;
        }
        if let Some(results_dir) = manifest.results_dir {
            self.results_dir = results_dir;
        }
        if let Some(identifiers) = manifest.identifiers {
            self.identifiers = identifiers;
        }
        if let Some(detector_args) = manifest.detector_args {
            self.detector_args = detector_args;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detector_program.trim().is_empty() {
            return Err(ConfigError::EmptyProgram);
        }
        validate_identifiers(&self.identifiers)
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

fn parse_var<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    name: &str,
    expected_type: &str,
) -> Result<Option<T>, ConfigError> {
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: name.to_string(),
                value: raw,
                expected_type: expected_type.to_string(),
            }),
        None => Ok(None),
    }
}

fn parse_identifiers(raw: &str) -> Result<Vec<Identifier>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse().map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: "BEAT_IDENTIFIERS".to_string(),
                value: s.to_string(),
                expected_type: "u32".to_string(),
            })
        })
        .collect()
}
