//! # extract 子命令 CLI 定义
//!
//! 从 pw.x 弛豫输出中取出最后一个离子步并写成单帧轨迹文件。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/extract.rs`

use clap::Args;
use std::path::PathBuf;

/// extract 子命令参数
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Relaxation output file produced by pw.x
    #[arg(short, long, default_value = "output.pwo")]
    pub input: PathBuf,

    /// Output trajectory file for the relaxed structure
    #[arg(short, long, default_value = "optimized_structure.traj")]
    pub output: PathBuf,

    /// Pseudopotential lookup directory
    #[arg(long, env = "PSEUDOPOTENTIALS_PATH", default_value = ".")]
    pub pseudo_dir: PathBuf,
}
