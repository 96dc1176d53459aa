//! # strain 子命令 CLI 定义
//!
//! 读取配置中的应变因子，对输入轨迹中的结构施加体积应变。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/strain.rs`

use clap::Args;
use std::path::PathBuf;

/// strain 子命令参数
#[derive(Args, Debug)]
pub struct StrainArgs {
    /// YAML configuration document containing the 'Strain value' key
    #[arg(short, long, default_value = "rendered_wano.yml")]
    pub config: PathBuf,

    /// Input trajectory file with the optimized structure
    #[arg(short, long, default_value = "optimized_structure.traj")]
    pub input: PathBuf,

    /// Output trajectory file for the strained structure
    #[arg(short, long, default_value = "structure_strain.traj")]
    pub output: PathBuf,

    /// Output YAML manifest describing the produced files
    #[arg(short, long, default_value = "output_dict.yml")]
    pub manifest: PathBuf,
}
