//! # Pwstrain - Quantum ESPRESSO 弛豫后处理与应变工具
//!
//! 将弛豫计算的后处理脚本用 Rust 重构，统一成单一可执行文件。
//!
//! ## 子命令
//! - `extract` - 从 pw.x 弛豫输出提取最终结构并写成轨迹文件
//! - `strain`  - 按配置对结构施加体积应变，写出应变结构与清单
//! - `run`     - 依次执行 extract 与 strain（完整流水线）
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (pw.x 输出与轨迹格式解析)
//!   │     ├── models/    (数据模型)
//!   │     └── config.rs  (应变配置)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod config;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
