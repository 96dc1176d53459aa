//! # run 子命令 CLI 定义
//!
//! 完整流水线：先提取弛豫结构，再施加应变并写出清单。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/run.rs`

use clap::Args;
use std::path::PathBuf;

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Relaxation output file produced by pw.x
    #[arg(short, long, default_value = "output.pwo")]
    pub input: PathBuf,

    /// YAML configuration document containing the 'Strain value' key
    #[arg(short, long, default_value = "rendered_wano.yml")]
    pub config: PathBuf,

    /// Intermediate trajectory file for the relaxed structure
    #[arg(long, default_value = "optimized_structure.traj")]
    pub optimized: PathBuf,

    /// Output trajectory file for the strained structure
    #[arg(short, long, default_value = "structure_strain.traj")]
    pub output: PathBuf,

    /// Output YAML manifest describing the produced files
    #[arg(short, long, default_value = "output_dict.yml")]
    pub manifest: PathBuf,

    /// Pseudopotential lookup directory
    #[arg(long, env = "PSEUDOPOTENTIALS_PATH", default_value = ".")]
    pub pseudo_dir: PathBuf,
}
