//! 训练样本编号

use crate::error::ConfigError;
use std::collections::HashSet;

/// 训练样本编号，对应 `train<n>.wav`
pub type Identifier = u32;

/// 默认批次：12 和 17 号样本不在训练集中
pub const DEFAULT_IDENTIFIERS: [Identifier; 18] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 14, 15, 16, 18, 19, 20,
];

/// 校验样本编号列表：不能为空，不能重复
pub fn validate_identifiers(identifiers: &[Identifier]) -> Result<(), ConfigError> {
    if identifiers.is_empty() {
        return Err(ConfigError::EmptyIdentifierList);
    }

    let mut seen = HashSet::with_capacity(identifiers.len());
    for &identifier in identifiers {
        if !seen.insert(identifier) {
            return Err(ConfigError::DuplicateIdentifier { identifier });
        }
    }

    Ok(())
}
