//! # extract 命令实现
//!
//! 解析 pw.x 弛豫输出，取最后一个离子步写成单帧轨迹文件。
//!
//! ## 依赖关系
//! - 使用 `cli/extract.rs` 定义的参数
//! - 使用 `parsers/pwo.rs`, `parsers/traj.rs`
//! - 使用 `utils/output.rs`

use crate::cli::extract::ExtractArgs;
use crate::error::Result;
use crate::parsers::{pwo, traj};
use crate::utils::output;

/// 执行 extract 命令
pub fn execute(args: ExtractArgs) -> Result<()> {
    output::print_header("Extracting relaxed structure");
    output::print_info(&format!(
        "Pseudopotential directory: {}",
        args.pseudo_dir.display()
    ));

    let relaxation = pwo::parse_pwo_file(&args.input)?;

    if !relaxation.is_finished {
        output::print_warning(&format!(
            "{}: no JOB DONE marker, relaxation may be incomplete",
            args.input.display()
        ));
    }

    output::print_info(&format!(
        "Read {} ionic step(s) from {}",
        relaxation.len(),
        args.input.display()
    ));

    let relaxed = relaxation.final_frame()?.clone();
    traj::write_traj_file(&args.output, std::slice::from_ref(&relaxed))?;

    output::print_done(&format!(
        "Wrote {} ({} atoms) to {}",
        relaxed.formula(),
        relaxed.atoms.len(),
        args.output.display()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_extract_writes_final_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("output.pwo");
        let output = dir.path().join("optimized_structure.traj");
        fs::write(&input, RELAX_OUTPUT).unwrap();

        let args = ExtractArgs {
            input: input.clone(),
            output: output.clone(),
            pseudo_dir: dir.path().to_path_buf(),
        };
        execute(args).unwrap();

        let frames = parse_traj_file(&output).unwrap();
        assert_eq!(frames.len(), 1);

        let relaxed = &frames[0];
        assert_eq!(relaxed.atoms.len(), 2);
        for x in relaxed.atoms[1].position {
            assert!((x - 0.25).abs() < 1e-8);
        }
    }

    #[test]
    fn test_extract_missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("optimized_structure.traj");

        let args = ExtractArgs {
            input: dir.path().join("output.pwo"),
            output: output.clone(),
            pseudo_dir: dir.path().to_path_buf(),
        };

        assert!(execute(args).is_err());
        assert!(!output.exists());
    }
}
