//! # 应变配置
//!
//! 读取工作流渲染出的 YAML 配置文档，提取应变因子。
//! `Strain value` 字段同时接受数值与数值字符串两种写法。
//!
//! ## 依赖关系
//! - 被 `commands/strain.rs` 使用
//! - 使用 `error.rs`

use crate::error::{PwstrainError, Result};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

/// 应变步骤配置
#[derive(Debug, Clone, Deserialize)]
pub struct StrainConfig {
    /// 体积应变因子，施加时取立方根分配到三个晶轴
    #[serde(rename = "Strain value", deserialize_with = "strain_value")]
    pub strain: f64,
}

impl StrainConfig {
    /// 从 YAML 配置文件加载并校验
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| PwstrainError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: StrainConfig =
            serde_yaml::from_str(&content).map_err(|e| PwstrainError::ConfigError {
                path: path.display().to_string(),
                source: e,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// 应变因子必须为正的有限值，立方根才有物理意义
    pub fn validate(&self) -> Result<()> {
        if !self.strain.is_finite() || self.strain <= 0.0 {
            return Err(PwstrainError::InvalidArgument(format!(
                "Strain value must be a positive finite number, got {}",
                self.strain
            )));
        }
        Ok(())
    }
}

/// 数值或数值字符串形式的应变因子
fn strain_value<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = serde_yaml::Value::deserialize(deserializer)?;
    match value {
        serde_yaml::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("invalid strain number: {:?}", n))),
        serde_yaml::Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid strain value: '{}'", s))),
        other => Err(D::Error::custom(format!(
            "strain value must be a number or string, got {:?}",
            other
        ))),
    }
}
