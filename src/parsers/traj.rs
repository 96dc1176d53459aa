//! # 轨迹文件读写
//!
//! 扩展 XYZ 格式的轨迹序列化，每帧为一个结构快照。
//!
//! ## 格式说明
//! ```text
//! 2
//! Lattice="5.43 0.0 0.0 0.0 5.43 0.0 0.0 0.0 5.43" Properties=species:S:1:pos:R:3 energy=-22.8391204100
//! Si        0.0000000000      0.0000000000      0.0000000000
//! Si        1.3575000000      1.3575000000      1.3575000000
//! ```
//! 注释行必须携带 Lattice 条目（9 个数，行向量展开）；energy 条目可选。
//! 原子行为笛卡尔坐标，单位 Å。多帧文件按此布局依次排列。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs`, `commands/` 使用
//! - 使用 `models/structure.rs`

use crate::error::{PwstrainError, Result};
use crate::models::{Atom, Crystal, Lattice};
use std::fs;
use std::path::Path;

/// 解析轨迹文件
pub fn parse_traj_file(path: &Path) -> Result<Vec<Crystal>> {
    if !path.exists() {
        return Err(PwstrainError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| PwstrainError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_traj_content(&content, &path.display().to_string())
}

/// 从字符串内容解析轨迹
pub fn parse_traj_content(content: &str, path: &str) -> Result<Vec<Crystal>> {
    let lines: Vec<&str> = content.lines().collect();
    let mut frames = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        // 跳过帧间空行
        if lines[i].trim().is_empty() {
            i += 1;
            continue;
        }

        let n_atoms: usize = lines[i].trim().parse().map_err(|_| PwstrainError::ParseError {
            format: "traj".to_string(),
            path: path.to_string(),
            reason: format!("Invalid atom count at line {}", i + 1),
        })?;

        if i + 1 >= lines.len() {
            return Err(PwstrainError::ParseError {
                format: "traj".to_string(),
                path: path.to_string(),
                reason: format!("Truncated frame at line {}", i + 1),
            });
        }

        let comment = lines[i + 1];
        let lattice = parse_lattice_entry(comment).ok_or_else(|| PwstrainError::ParseError {
            format: "traj".to_string(),
            path: path.to_string(),
            reason: format!("Missing Lattice entry at line {}", i + 2),
        })?;
        let energy = parse_energy_entry(comment);

        let mut atoms = Vec::with_capacity(n_atoms);
        for k in 0..n_atoms {
            let line_no = i + 2 + k;
            if line_no >= lines.len() {
                return Err(PwstrainError::ParseError {
                    format: "traj".to_string(),
                    path: path.to_string(),
                    reason: format!("Truncated frame at line {}", i + 1),
                });
            }
            let parts: Vec<&str> = lines[line_no].split_whitespace().collect();
            if parts.len() < 4 {
                return Err(PwstrainError::ParseError {
                    format: "traj".to_string(),
                    path: path.to_string(),
                    reason: format!("Invalid atom line at line {}", line_no + 1),
                });
            }

            let cart: Vec<f64> = parts[1..4].iter().filter_map(|s| s.parse().ok()).collect();
            if cart.len() < 3 {
                return Err(PwstrainError::ParseError {
                    format: "traj".to_string(),
                    path: path.to_string(),
                    reason: format!("Invalid coordinates at line {}", line_no + 1),
                });
            }

            atoms.push(Atom::new(
                parts[0],
                lattice.cart_to_frac([cart[0], cart[1], cart[2]]),
            ));
        }

        let mut crystal = Crystal::new("", lattice, atoms);
        crystal.name = crystal.formula();
        crystal.energy_ry = energy;
        frames.push(crystal);

        i += 2 + n_atoms;
    }

    if frames.is_empty() {
        return Err(PwstrainError::ParseError {
            format: "traj".to_string(),
            path: path.to_string(),
            reason: "No frames found".to_string(),
        });
    }

    Ok(frames)
}

/// 将结构序列转换为轨迹文件内容
pub fn to_traj_string(frames: &[Crystal]) -> String {
    let mut result = String::new();

    for crystal in frames {
        result.push_str(&format!("{}\n", crystal.atoms.len()));

        let m = crystal.lattice.matrix;
        result.push_str(&format!(
            "Lattice=\"{:.10} {:.10} {:.10} {:.10} {:.10} {:.10} {:.10} {:.10} {:.10}\" Properties=species:S:1:pos:R:3",
            m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2]
        ));
        if let Some(e) = crystal.energy_ry {
            result.push_str(&format!(" energy={:.10}", e));
        }
        result.push('\n');

        for atom in &crystal.atoms {
            let cart = crystal.lattice.frac_to_cart(atom.position);
            result.push_str(&format!(
                "{:2} {:16.10} {:16.10} {:16.10}\n",
                atom.element, cart[0], cart[1], cart[2]
            ));
        }
    }

    result
}

/// 写轨迹文件
pub fn write_traj_file(path: &Path, frames: &[Crystal]) -> Result<()> {
    fs::write(path, to_traj_string(frames)).map_err(|e| PwstrainError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 解析注释行中的 Lattice="ax ay az bx by bz cx cy cz" 条目
fn parse_lattice_entry(comment: &str) -> Option<Lattice> {
    let start = comment.find("Lattice=\"")?;
    let rest = &comment[start + 9..];
    let end = rest.find('"')?;

    let nums: Vec<f64> = rest[..end]
        .split_whitespace()
        .filter_map(|s| s.parse().ok())
        .collect();

    if nums.len() != 9 {
        return None;
    }

    Some(Lattice::from_vectors([
        [nums[0], nums[1], nums[2]],
        [nums[3], nums[4], nums[5]],
        [nums[6], nums[7], nums[8]],
    ]))
}

/// 解析注释行中的 energy=<Ry> 条目
fn parse_energy_entry(comment: &str) -> Option<f64> {
    for token in comment.split_whitespace() {
        if let Some(val) = token.strip_prefix("energy=") {
            return val.parse().ok();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_crystal() -> Crystal {
        let lattice = Lattice::from_vectors([
            [-2.715, 0.0, 2.715],
            [0.0, 2.715, 2.715],
            [-2.715, 2.715, 0.0],
        ]);
        let atoms = vec![
            Atom::new("Si", [0.0, 0.0, 0.0]),
            Atom::new("Si", [0.25, 0.25, 0.25]),
        ];
        let mut crystal = Crystal::new("Si2", lattice, atoms);
        crystal.energy_ry = Some(-22.83912041);
        crystal
    }

    #[test]
    fn test_traj_round_trip() {
        let crystal = sample_crystal();
        let content = to_traj_string(std::slice::from_ref(&crystal));
        let frames = parse_traj_content(&content, "test.traj").unwrap();

        assert_eq!(frames.len(), 1);
        let parsed = &frames[0];
        assert_eq!(parsed.atoms.len(), 2);
        assert_eq!(parsed.name, "Si2");

        for i in 0..3 {
            for j in 0..3 {
                let diff = parsed.lattice.matrix[i][j] - crystal.lattice.matrix[i][j];
                assert!(diff.abs() < 1e-8);
            }
        }
        for (a, b) in parsed.atoms.iter().zip(crystal.atoms.iter()) {
            assert_eq!(a.element, b.element);
            for i in 0..3 {
                assert!((a.position[i] - b.position[i]).abs() < 1e-8);
            }
        }
        assert!((parsed.energy_ry.unwrap() - crystal.energy_ry.unwrap()).abs() < 1e-8);
    }

    #[test]
    fn test_multi_frame_round_trip() {
        let first = sample_crystal();
        let second = first.with_volumetric_strain(1.06);
        let content = to_traj_string(&[first, second]);

        let frames = parse_traj_content(&content, "multi.traj").unwrap();
        assert_eq!(frames.len(), 2);

        let ratio = frames[1].lattice.volume() / frames[0].lattice.volume();
        assert!((ratio - 1.06).abs() < 1e-6);
    }

    #[test]
    fn test_missing_lattice_entry_fails() {
        let content = "1\njust a comment\nSi 0.0 0.0 0.0\n";
        let result = parse_traj_content(content, "bad.traj");

        assert!(matches!(result, Err(PwstrainError::ParseError { .. })));
    }

    #[test]
    fn test_truncated_frame_fails() {
        let content = "3\nLattice=\"4 0 0 0 4 0 0 0 4\" Properties=species:S:1:pos:R:3\nSi 0.0 0.0 0.0\n";
        let result = parse_traj_content(content, "short.traj");

        assert!(result.is_err());
    }

    #[test]
    fn test_parse_missing_file_is_file_not_found() {
        let result = parse_traj_file(Path::new("definitely_not_here.traj"));
        assert!(matches!(result, Err(PwstrainError::FileNotFound { .. })));
    }
}
