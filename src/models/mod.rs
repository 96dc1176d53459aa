//! # 数据模型模块
//!
//! 定义统一的晶体结构、弛豫轨迹与输出清单数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `commands/` 使用
//! - 子模块: structure, relaxation, manifest

pub mod manifest;
pub mod relaxation;
pub mod structure;

pub use manifest::StrainManifest;
pub use relaxation::RelaxTrajectory;
pub use structure::{Atom, Crystal, Lattice};
