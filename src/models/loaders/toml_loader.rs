use crate::error::{AppError, AppResult};
use crate::models::manifest::BatchManifest;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载批次清单
pub async fn load_manifest(manifest_path: &Path) -> AppResult<BatchManifest> {
    let path_name = manifest_path.display().to_string();

    let content = fs::read_to_string(manifest_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_name, e))?;

    let manifest: BatchManifest =
        toml::from_str(&content).map_err(|e| AppError::toml_parse_failed(&path_name, e))?;

    tracing::info!(
        "正在加载批次清单: {} (样本数: {})",
        path_name,
        manifest
            .identifiers
            .as_ref()
            .map_or("未指定".to_string(), |ids| ids.len().to_string())
    );

    Ok(manifest)
}
