//! # run 命令实现
//!
//! 完整流水线：先提取弛豫结构，再施加应变。两步之间通过
//! 中间轨迹文件衔接，与工作流中单步调用的行为一致。
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的参数
//! - 复用 `commands/extract.rs`, `commands/strain.rs`

use crate::cli::extract::ExtractArgs;
use crate::cli::run::RunArgs;
use crate::cli::strain::StrainArgs;
use crate::commands::{extract, strain};
use crate::error::Result;

/// 执行 run 命令
pub fn execute(args: RunArgs) -> Result<()> {
    extract::execute(ExtractArgs {
        input: args.input,
        output: args.optimized.clone(),
        pseudo_dir: args.pseudo_dir,
    })?;

    strain::execute(StrainArgs {
        config: args.config,
        input: args.optimized,
        output: args.output,
        manifest: args.manifest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StrainManifest;
    use crate::parsers::traj::parse_traj_file;
    use std::fs;

    const RELAX_OUTPUT: &str = r#"
     lattice parameter (alat)  =      10.2622  a.u.
     number of atoms/cell      =            2

     crystal axes: (cart. coord. in units of alat)
               a(1) = (  -0.500000   0.000000   0.500000 )
               a(2) = (   0.000000   0.500000   0.500000 )
               a(3) = (  -0.500000   0.500000   0.000000 )

     site n.     atom                  positions (alat units)
         1           Si  tau(   1) = (   0.0000000   0.0000000   0.0000000  )
         2           Si  tau(   2) = (  -0.2600000   0.2600000   0.2600000  )

!    total energy              =     -22.83912041 Ry

Begin final coordinates
ATOMIC_POSITIONS (crystal)
Si               0.0000000000        0.0000000000        0.0000000000
Si               0.2500000000        0.2500000000        0.2500000000
End final coordinates

     JOB DONE.
"#;

    #[test]
    fn test_full_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();

        fs::write(base.join("output.pwo"), RELAX_OUTPUT).unwrap();
        fs::write(base.join("rendered_wano.yml"), "Strain value: '1.06'\n").unwrap();

        let args = RunArgs {
            input: base.join("output.pwo"),
            config: base.join("rendered_wano.yml"),
            optimized: base.join("optimized_structure.traj"),
            output: base.join("structure_strain.traj"),
            manifest: base.join("output_dict.yml"),
            pseudo_dir: base.to_path_buf(),
        };
        execute(args).unwrap();

        let optimized = parse_traj_file(&base.join("optimized_structure.traj")).unwrap();
        let strained = parse_traj_file(&base.join("structure_strain.traj")).unwrap();
        assert_eq!(optimized.len(), 1);
        assert_eq!(strained.len(), 1);

        let ratio = strained[0].lattice.volume() / optimized[0].lattice.volume();
        assert!((ratio - 1.06).abs() < 1e-6);

        let manifest: StrainManifest = serde_yaml::from_str(
            &fs::read_to_string(base.join("output_dict.yml")).unwrap(),
        )
        .unwrap();
        assert_eq!(manifest.struct_len, 1);
        assert_eq!(manifest.iter, vec!["structure_strain.traj".to_string()]);
    }
}
