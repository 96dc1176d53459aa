//! # strain 命令实现
//!
//! 从 YAML 配置读取应变因子，对轨迹中的结构施加体积应变，
//! 写出应变结构与 YAML 清单。
//!
//! ## 依赖关系
//! - 使用 `cli/strain.rs` 定义的参数
//! - 使用 `config.rs`, `parsers/`, `models/manifest.rs`
//! - 使用 `utils/output.rs`

use crate::cli::strain::StrainArgs;
use crate::config::StrainConfig;
use crate::error::{PwstrainError, Result};
use crate::models::StrainManifest;
use crate::parsers::{self, traj};
use crate::utils::output;

use std::fs;
use std::path::Path;

/// 执行 strain 命令
pub fn execute(args: StrainArgs) -> Result<()> {
    output::print_header("Applying volumetric strain");

    let config = StrainConfig::load(&args.config)?;
    output::print_info(&format!("Strain value: {}", config.strain));

    let frames = parsers::parse_trajectory_file(&args.input)?;
    // 与 ASE 的读取惯例一致：使用最后一帧
    let relaxed = frames
        .last()
        .ok_or_else(|| PwstrainError::InvalidArgument("Trajectory contains no frames".into()))?;

    let strained = relaxed.with_volumetric_strain(config.strain);
    traj::write_traj_file(&args.output, std::slice::from_ref(&strained))?;

    let file_name = args
        .output
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("structure_strain.traj");
    let manifest = StrainManifest::single(file_name);
    write_manifest(&args.manifest, &manifest)?;

    output::print_done(&format!(
        "Cell volume {:.4} -> {:.4} Å³, wrote {} and {}",
        relaxed.lattice.volume().abs(),
        strained.lattice.volume().abs(),
        args.output.display(),
        args.manifest.display()
    ));

    Ok(())
}

/// 将清单序列化为 YAML 并写入文件
fn write_manifest(path: &Path, manifest: &StrainManifest) -> Result<()> {
    let yaml = serde_yaml::to_string(manifest)?;
    fs::write(path, yaml).map_err(|e| PwstrainError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Atom, Crystal, Lattice};
    use crate::parsers::traj::{parse_traj_file, write_traj_file};

    fn sample_crystal() -> Crystal {
        Crystal::new(
            "Si2",
            Lattice::from_vectors([[5.43, 0.0, 0.0], [0.0, 5.43, 0.0], [0.0, 0.0, 5.43]]),
            vec![
                Atom::new("Si", [0.0, 0.0, 0.0]),
                Atom::new("Si", [0.25, 0.25, 0.25]),
            ],
        )
    }

    fn strain_args(dir: &Path) -> StrainArgs {
        StrainArgs {
            config: dir.join("rendered_wano.yml"),
            input: dir.join("optimized_structure.traj"),
            output: dir.join("structure_strain.traj"),
            manifest: dir.join("output_dict.yml"),
        }
    }

    #[test]
    fn test_strain_pipeline_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let args = strain_args(dir.path());

        write_traj_file(&args.input, &[sample_crystal()]).unwrap();
        fs::write(&args.config, "Strain value: 1.06\n").unwrap();

        execute(strain_args(dir.path())).unwrap();

        let frames = parse_traj_file(&args.output).unwrap();
        assert_eq!(frames.len(), 1);

        // 晶胞各轴缩放 1.06^(1/3)，体积缩放 1.06
        let ratio = frames[0].lattice.volume() / sample_crystal().lattice.volume();
        assert!((ratio - 1.06).abs() < 1e-6);
        for (a, b) in frames[0].atoms.iter().zip(sample_crystal().atoms.iter()) {
            for i in 0..3 {
                assert!((a.position[i] - b.position[i]).abs() < 1e-8);
            }
        }

        let manifest: StrainManifest =
            serde_yaml::from_str(&fs::read_to_string(&args.manifest).unwrap()).unwrap();
        assert_eq!(manifest, StrainManifest::single("structure_strain.traj"));
    }

    #[test]
    fn test_unit_strain_preserves_structure() {
        let dir = tempfile::tempdir().unwrap();
        let args = strain_args(dir.path());

        write_traj_file(&args.input, &[sample_crystal()]).unwrap();
        fs::write(&args.config, "Strain value: 1.0\n").unwrap();

        execute(strain_args(dir.path())).unwrap();

        let frames = parse_traj_file(&args.output).unwrap();
        let original = sample_crystal();
        for i in 0..3 {
            for j in 0..3 {
                let diff = frames[0].lattice.matrix[i][j] - original.lattice.matrix[i][j];
                assert!(diff.abs() < 1e-8);
            }
        }
    }

    #[test]
    fn test_missing_trajectory_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let args = strain_args(dir.path());

        fs::write(&args.config, "Strain value: 1.06\n").unwrap();

        let result = execute(strain_args(dir.path()));
        assert!(matches!(result, Err(PwstrainError::FileNotFound { .. })));

        // 失败时不产生任何输出文件
        assert!(!args.output.exists());
        assert!(!args.manifest.exists());
    }

    #[test]
    fn test_missing_strain_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let args = strain_args(dir.path());

        write_traj_file(&args.input, &[sample_crystal()]).unwrap();
        fs::write(&args.config, "Some other key: 3\n").unwrap();

        let result = execute(strain_args(dir.path()));
        assert!(matches!(result, Err(PwstrainError::ConfigError { .. })));
        assert!(!args.output.exists());
    }
}
