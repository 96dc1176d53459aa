//! # 输出清单数据模型
//!
//! 应变步骤写出的 YAML 清单，供工作流下游读取生成的文件名与数量。
//!
//! ## 依赖关系
//! - 被 `commands/strain.rs` 使用

use serde::{Deserialize, Serialize};

/// 应变输出清单
///
/// 字段名与下游工作流约定一致：`iter` 为生成的结构文件名列表，
/// `struct_len` 为结构数量。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrainManifest {
    /// 生成的轨迹文件名
    pub iter: Vec<String>,

    /// 应变结构数量
    pub struct_len: usize,
}

impl StrainManifest {
    /// 单结构清单
    pub fn single(file_name: impl Into<String>) -> Self {
        StrainManifest {
            iter: vec![file_name.into()],
            struct_len: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_manifest() {
        let manifest = StrainManifest::single("structure_strain.traj");

        assert_eq!(manifest.struct_len, 1);
        assert_eq!(manifest.iter, vec!["structure_strain.traj".to_string()]);
    }

    #[test]
    fn test_manifest_yaml_round_trip() {
        let manifest = StrainManifest::single("structure_strain.traj");
        let yaml = serde_yaml::to_string(&manifest).unwrap();

        assert!(yaml.contains("struct_len: 1"));
        assert!(yaml.contains("- structure_strain.traj"));

        let back: StrainManifest = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, manifest);
    }
}
