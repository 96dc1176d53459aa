//! # 弛豫轨迹数据模型
//!
//! 存储从 pw.x 弛豫输出中提取的离子步序列。
//!
//! ## 依赖关系
//! - 被 `parsers/pwo.rs` 使用
//! - 被 `commands/extract.rs` 使用

use crate::error::{PwstrainError, Result};
use crate::models::Crystal;

/// 弛豫轨迹：按离子步排列的构型序列
#[derive(Debug, Clone)]
pub struct RelaxTrajectory {
    /// 离子步构型，第 0 帧为输出头部的初始构型
    pub frames: Vec<Crystal>,

    /// 计算是否正常结束 (JOB DONE 标记)
    pub is_finished: bool,
}

impl RelaxTrajectory {
    pub fn new() -> Self {
        RelaxTrajectory {
            frames: Vec::new(),
            is_finished: false,
        }
    }

    /// 离子步数量
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// 最后一个离子步，即弛豫得到的最终结构
    pub fn final_frame(&self) -> Result<&Crystal> {
        self.frames
            .last()
            .ok_or_else(|| PwstrainError::InvalidArgument("Trajectory contains no frames".into()))
    }
}

impl Default for RelaxTrajectory {
    fn default() -> Self {
        Self::new()
    }
}
