//! # Quantum ESPRESSO pw.x 输出解析器
//!
//! 解析 pw.x 弛豫计算输出文件 (.pwo)，提取按离子步排列的构型轨迹。
//!
//! ## 输出格式说明
//! ```text
//!      lattice parameter (alat)  =      10.2622  a.u.
//!      number of atoms/cell      =            2
//!
//!      crystal axes: (cart. coord. in units of alat)
//!                a(1) = (  -0.500000   0.000000   0.500000 )
//!                ...
//!
//!      site n.     atom                  positions (alat units)
//!          1           Si  tau(   1) = (   0.0000000   0.0000000   0.0000000  )
//!          ...
//!
//! !    total energy              =     -22.83407176 Ry        # 每个离子步
//!
//! CELL_PARAMETERS (angstrom)                                  # 仅 vc-relax
//!    ...
//! ATOMIC_POSITIONS (crystal)
//! Si               0.0000000000        0.0000000000        0.0000000000
//!    ...
//!      JOB DONE.
//! ```
//! 头部块给出初始构型（第 0 帧），之后每个 ATOMIC_POSITIONS 块对应
//! 一个离子步；CELL_PARAMETERS 块（vc-relax）更新当前晶胞。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs`, `commands/extract.rs` 使用
//! - 使用 `models/structure.rs`, `models/relaxation.rs`

use crate::error::{PwstrainError, Result};
use crate::models::{Atom, Crystal, Lattice, RelaxTrajectory};
use std::fs;
use std::path::Path;

/// Bohr 半径 (Å)
const BOHR_TO_ANG: f64 = 0.5291772109;

/// ATOMIC_POSITIONS 块的坐标单位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PositionUnit {
    Crystal,
    Angstrom,
    Alat,
    Bohr,
}

/// 解析 pw.x 弛豫输出文件
pub fn parse_pwo_file(path: &Path) -> Result<RelaxTrajectory> {
    if !path.exists() {
        return Err(PwstrainError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| PwstrainError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_pwo_content(
        &content,
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("structure"),
    )
}

/// 从字符串内容解析 pw.x 弛豫输出
pub fn parse_pwo_content(content: &str, name: &str) -> Result<RelaxTrajectory> {
    let lines: Vec<&str> = content.lines().collect();
    let mut traj = RelaxTrajectory::new();

    let mut alat_ang = 0.0;
    let mut cell: Option<Lattice> = None;
    let mut energy: Option<f64> = None;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();

        // 晶格常数，原子单位制
        // "lattice parameter (alat)  =      10.2622  a.u."
        if line.starts_with("lattice parameter (alat)") {
            if let Some(val) = extract_value_after_eq(line) {
                alat_ang = val * BOHR_TO_ANG;
            }
        }

        // 初始晶胞，alat 单位的笛卡尔行向量
        // "crystal axes: (cart. coord. in units of alat)"
        if line.starts_with("crystal axes:") && i + 3 < lines.len() {
            let mut matrix = [[0.0; 3]; 3];
            let mut complete = true;
            for row in 0..3 {
                match parse_paren_vec3(lines[i + 1 + row]) {
                    Some(v) => matrix[row] = [v[0] * alat_ang, v[1] * alat_ang, v[2] * alat_ang],
                    None => {
                        complete = false;
                        break;
                    }
                }
            }
            if complete {
                cell = Some(Lattice::from_vectors(matrix));
            }
        }

        // 初始原子位置
        // "site n.     atom                  positions (alat units)"
        if line.starts_with("site n.") && line.contains("positions") {
            if let Some(ref lat) = cell {
                let fractional = line.contains("cryst. coord");
                let mut atoms = Vec::new();
                let mut j = i + 1;

                while j < lines.len() {
                    let site = lines[j].trim();
                    // "1           Si  tau(   1) = (   0.0000000   0.0000000   0.0000000  )"
                    let parts: Vec<&str> = site.split_whitespace().collect();
                    if parts.len() < 2 || parts[0].parse::<usize>().is_err() {
                        break;
                    }
                    let coords = match parse_paren_vec3(site) {
                        Some(v) => v,
                        None => break,
                    };
                    let position = if fractional {
                        coords
                    } else {
                        lat.cart_to_frac([
                            coords[0] * alat_ang,
                            coords[1] * alat_ang,
                            coords[2] * alat_ang,
                        ])
                    };
                    atoms.push(Atom::new(parts[1], position));
                    j += 1;
                }

                if !atoms.is_empty() {
                    traj.frames.push(Crystal::new(name, lat.clone(), atoms));
                }
                i = j;
                continue;
            }
        }

        // 每个离子步收敛后的总能量
        // "!    total energy              =     -22.83407176 Ry"
        if line.starts_with('!') && line.contains("total energy") {
            if let Some(val) = extract_value_after_eq(line) {
                energy = Some(val);
            }
        }

        // vc-relax 离子步更新晶胞
        // "CELL_PARAMETERS (angstrom)"
        if line.starts_with("CELL_PARAMETERS") && i + 3 < lines.len() {
            let factor = cell_unit_factor(line, alat_ang);
            let mut matrix = [[0.0; 3]; 3];
            let mut complete = true;
            for row in 0..3 {
                match parse_vec3(lines[i + 1 + row]) {
                    Some(v) => matrix[row] = [v[0] * factor, v[1] * factor, v[2] * factor],
                    None => {
                        complete = false;
                        break;
                    }
                }
            }
            if complete {
                cell = Some(Lattice::from_vectors(matrix));
                i += 4;
                continue;
            }
        }

        // 离子步原子位置
        // "ATOMIC_POSITIONS (crystal)"
        if line.starts_with("ATOMIC_POSITIONS") {
            let lat = match cell {
                Some(ref l) => l.clone(),
                None => {
                    return Err(PwstrainError::ParseError {
                        format: "pwo".to_string(),
                        path: name.to_string(),
                        reason: format!("ATOMIC_POSITIONS before any cell at line {}", i + 1),
                    });
                }
            };
            let unit = position_unit(line);
            let mut atoms = Vec::new();
            let mut j = i + 1;

            while j < lines.len() {
                let atom_line = lines[j].trim();
                if atom_line.is_empty() || atom_line.starts_with("End") {
                    break;
                }

                let parts: Vec<&str> = atom_line.split_whitespace().collect();
                if parts.len() < 4 || !parts[0].chars().all(|c| c.is_ascii_alphabetic()) {
                    break;
                }
                let coords: Vec<f64> = parts[1..4].iter().filter_map(|s| s.parse().ok()).collect();
                if coords.len() < 3 {
                    break;
                }

                let position = match unit {
                    PositionUnit::Crystal => [coords[0], coords[1], coords[2]],
                    PositionUnit::Angstrom => {
                        lat.cart_to_frac([coords[0], coords[1], coords[2]])
                    }
                    PositionUnit::Alat => lat.cart_to_frac([
                        coords[0] * alat_ang,
                        coords[1] * alat_ang,
                        coords[2] * alat_ang,
                    ]),
                    PositionUnit::Bohr => lat.cart_to_frac([
                        coords[0] * BOHR_TO_ANG,
                        coords[1] * BOHR_TO_ANG,
                        coords[2] * BOHR_TO_ANG,
                    ]),
                };
                atoms.push(Atom::new(parts[0], position));
                j += 1;
            }

            if !atoms.is_empty() {
                let mut frame = Crystal::new(name, lat, atoms);
                frame.energy_ry = energy;
                traj.frames.push(frame);
            }
            i = j;
            continue;
        }

        if line.contains("JOB DONE") {
            traj.is_finished = true;
        }

        i += 1;
    }

    if traj.frames.is_empty() {
        return Err(PwstrainError::ParseError {
            format: "pwo".to_string(),
            path: name.to_string(),
            reason: "No atomic configurations found".to_string(),
        });
    }

    Ok(traj)
}

/// 提取等号后的数值
fn extract_value_after_eq(s: &str) -> Option<f64> {
    if let Some(pos) = s.find('=') {
        let after = &s[pos + 1..];
        after.trim().split_whitespace().next()?.parse().ok()
    } else {
        None
    }
}

/// 提取 "= ( x y z )" 形式行中括号内的三个数值
fn parse_paren_vec3(s: &str) -> Option<[f64; 3]> {
    let eq = s.find('=')?;
    let rest = &s[eq + 1..];
    let start = rest.find('(')?;
    let end = rest.rfind(')')?;
    if end <= start {
        return None;
    }

    parse_vec3(&rest[start + 1..end])
}

/// 提取行首的三个数值
fn parse_vec3(s: &str) -> Option<[f64; 3]> {
    let nums: Vec<f64> = s
        .split_whitespace()
        .take(3)
        .filter_map(|t| t.parse().ok())
        .collect();

    if nums.len() == 3 {
        Some([nums[0], nums[1], nums[2]])
    } else {
        None
    }
}

/// CELL_PARAMETERS 块头的单位换算因子（目标单位 Å）
///
/// 可能形式: "(angstrom)", "(bohr)", "(alat)", "(alat= 10.2622)"
fn cell_unit_factor(header: &str, alat_ang: f64) -> f64 {
    let lower = header.to_lowercase();

    if lower.contains("angstrom") {
        1.0
    } else if lower.contains("bohr") {
        BOHR_TO_ANG
    } else if lower.contains("alat=") || lower.contains("alat =") {
        match extract_value_after_eq(&lower.replace(')', " ")) {
            Some(val) => val * BOHR_TO_ANG,
            None => alat_ang,
        }
    } else {
        alat_ang
    }
}

/// ATOMIC_POSITIONS 块头的坐标单位，缺省按 alat 处理
fn position_unit(header: &str) -> PositionUnit {
    let lower = header.to_lowercase();

    if lower.contains("crystal") {
        PositionUnit::Crystal
    } else if lower.contains("angstrom") {
        PositionUnit::Angstrom
    } else if lower.contains("bohr") {
        PositionUnit::Bohr
    } else {
        PositionUnit::Alat
    }
}
