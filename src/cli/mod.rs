//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `extract`: 从 pw.x 弛豫输出提取最终结构
//! - `strain`: 对结构施加体积应变并写出清单
//! - `run`: 依次执行 extract 与 strain（完整流水线）
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: extract, strain, run

pub mod extract;
pub mod run;
pub mod strain;

use clap::{Parser, Subcommand};

/// Pwstrain - Quantum ESPRESSO 弛豫后处理与应变工具
#[derive(Parser)]
#[command(name = "pwstrain")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Quantum ESPRESSO relaxation post-processing and strain toolkit", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Extract the final relaxed structure from a pw.x output file
    Extract(extract::ExtractArgs),

    /// Apply a volumetric strain from a YAML configuration and write a manifest
    Strain(strain::StrainArgs),

    /// Run the full pipeline: extract, then strain
    Run(run::RunArgs),
}
