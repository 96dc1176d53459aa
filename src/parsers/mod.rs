//! # 解析器模块
//!
//! 提供 pw.x 弛豫输出与轨迹文件的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: pwo, traj

pub mod pwo;
pub mod traj;

use crate::error::{PwstrainError, Result};
use crate::models::Crystal;
use std::path::Path;

/// 从文件路径推断格式并解析为结构序列
pub fn parse_trajectory_file(path: &Path) -> Result<Vec<Crystal>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pwo" | "out" => Ok(pwo::parse_pwo_file(path)?.frames),
        "traj" | "xyz" => traj::parse_traj_file(path),
        _ => Err(PwstrainError::UnsupportedFormat(format!(
            "Cannot determine format for: {}",
            path.display()
        ))),
    }
}
