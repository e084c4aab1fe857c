//! Magic squares ("kameas") with fixed resident cells.

pub mod siamese;
pub mod solver;

pub use siamese::{construct, dihedral_variants, doubly_even, siamese};
pub use solver::{
    solve, solve_async, CancelToken, ResidentSolver, SearchStrategy, SolveBudget, SolveOutcome,
    SolveStatus,
};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest order accepted; keeps n² and every line sum well inside `u32`.
pub const MAX_SIZE: usize = 64;

pub type Grid = Vec<Vec<u32>>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KameaError {
    #[error("Square order must be between 1 and {max}, got {size}")]
    InvalidSize { size: usize, max: usize },
    #[error("Resident at ({row}, {col}) lies outside a {size}x{size} square")]
    ResidentOutOfBounds { row: usize, col: usize, size: usize },
    #[error("Resident value {value} is outside 1-{max}")]
    ResidentValueOutOfRange { value: u32, max: u32 },
    #[error("Two residents occupy cell ({row}, {col})")]
    DuplicateCell { row: usize, col: usize },
    #[error("Value {value} is assigned to more than one resident")]
    DuplicateValue { value: u32 },
    #[error("Grid is not square: row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },
    #[error("Solver worker failed: {0}")]
    Worker(String),
}

/// A cell whose value is fixed before solving. Row and column are 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resident {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

impl Resident {
    pub fn new(row: usize, col: usize, value: u32) -> Self {
        Self { row, col, value }
    }
}

impl FromStr for Resident {
    type Err = String;

    /// Parses `row,col,value`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("Resident must be 'row,col,value', got '{}'", s));
        }
        let row = parts[0].parse().map_err(|_| format!("Invalid row '{}'", parts[0]))?;
        let col = parts[1].parse().map_err(|_| format!("Invalid column '{}'", parts[1]))?;
        let value = parts[2]
            .parse()
            .map_err(|_| format!("Invalid value '{}'", parts[2]))?;
        Ok(Resident::new(row, col, value))
    }
}

/// A grid together with its magic check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicSquare {
    pub size: usize,
    pub grid: Grid,
    pub is_magic: bool,
    /// Magic constant n(n²+1)/2 every line must reach
    pub sum: u64,
}

impl MagicSquare {
    /// Whether every resident sits in its cell.
    pub fn honors(&self, residents: &[Resident]) -> bool {
        honors(&self.grid, residents)
    }
}

impl fmt::Display for MagicSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.size * self.size).to_string().len();
        for row in &self.grid {
            let cells: Vec<String> = row.iter().map(|v| format!("{:>width$}", v, width = width)).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

pub fn magic_constant(n: usize) -> u64 {
    let n = n as u64;
    n * (n * n + 1) / 2
}

/// Every row, column and both diagonals sum to the magic constant.
///
/// Only the sums are checked; a grid that repeats values can still pass.
pub fn is_magic(grid: &[Vec<u32>]) -> bool {
    let n = grid.len();
    if n == 0 || grid.iter().any(|row| row.len() != n) {
        return false;
    }
    let target = magic_constant(n);

    (0..n).all(|i| sums_to(grid[i].iter().copied(), target))
        && (0..n).all(|j| sums_to((0..n).map(|i| grid[i][j]), target))
        && sums_to((0..n).map(|i| grid[i][i]), target)
        && sums_to((0..n).map(|i| grid[i][n - 1 - i]), target)
}

fn sums_to(cells: impl Iterator<Item = u32>, target: u64) -> bool {
    cells.map(u64::from).sum::<u64>() == target
}

/// Check a caller-supplied grid.
pub fn evaluate(grid: Grid) -> Result<MagicSquare, KameaError> {
    let size = grid.len();
    check_size(size)?;
    if let Some((row, cells)) = grid.iter().enumerate().find(|(_, r)| r.len() != size) {
        return Err(KameaError::NotSquare {
            row,
            len: cells.len(),
            size,
        });
    }
    Ok(MagicSquare {
        size,
        is_magic: is_magic(&grid),
        sum: magic_constant(size),
        grid,
    })
}

/// Build a square from `n²` values listed row by row.
pub fn evaluate_flat(values: &[u32]) -> Result<MagicSquare, KameaError> {
    let size = (values.len() as f64).sqrt().round() as usize;
    if size * size != values.len() || size == 0 {
        return Err(KameaError::NotSquare {
            row: 0,
            len: values.len(),
            size: size.max(1),
        });
    }
    evaluate(values.chunks(size).map(<[u32]>::to_vec).collect())
}

pub(crate) fn check_size(size: usize) -> Result<(), KameaError> {
    if size == 0 || size > MAX_SIZE {
        return Err(KameaError::InvalidSize {
            size,
            max: MAX_SIZE,
        });
    }
    Ok(())
}

/// Reject resident sets that can never be satisfied.
pub fn validate_residents(size: usize, residents: &[Resident]) -> Result<(), KameaError> {
    check_size(size)?;
    let max = (size * size) as u32;
    let mut cells = HashSet::new();
    let mut values = HashSet::new();
    for r in residents {
        if r.row >= size || r.col >= size {
            return Err(KameaError::ResidentOutOfBounds {
                row: r.row,
                col: r.col,
                size,
            });
        }
        if r.value < 1 || r.value > max {
            return Err(KameaError::ResidentValueOutOfRange { value: r.value, max });
        }
        if !cells.insert((r.row, r.col)) {
            return Err(KameaError::DuplicateCell {
                row: r.row,
                col: r.col,
            });
        }
        if !values.insert(r.value) {
            return Err(KameaError::DuplicateValue { value: r.value });
        }
    }
    Ok(())
}

pub(crate) fn honors(grid: &[Vec<u32>], residents: &[Resident]) -> bool {
    residents
        .iter()
        .all(|r| grid.get(r.row).and_then(|row| row.get(r.col)) == Some(&r.value))
}

/// Traditional planetary kameas and their orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanetarySphere {
    Saturn,
    Jupiter,
    Mars,
    Sun,
    Venus,
    Mercury,
    Moon,
}

impl PlanetarySphere {
    pub const ALL: [PlanetarySphere; 7] = [
        PlanetarySphere::Saturn,
        PlanetarySphere::Jupiter,
        PlanetarySphere::Mars,
        PlanetarySphere::Sun,
        PlanetarySphere::Venus,
        PlanetarySphere::Mercury,
        PlanetarySphere::Moon,
    ];

    pub fn size(&self) -> usize {
        match self {
            PlanetarySphere::Saturn => 3,
            PlanetarySphere::Jupiter => 4,
            PlanetarySphere::Mars => 5,
            PlanetarySphere::Sun => 6,
            PlanetarySphere::Venus => 7,
            PlanetarySphere::Mercury => 8,
            PlanetarySphere::Moon => 9,
        }
    }
}

impl FromStr for PlanetarySphere {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        PlanetarySphere::ALL
            .iter()
            .find(|p| format!("{:?}", p).to_lowercase() == key)
            .copied()
            .ok_or_else(|| {
                format!(
                    "Unknown sphere '{}'. Valid spheres: saturn, jupiter, mars, sun, venus, mercury, moon",
                    s
                )
            })
    }
}

/// 32-byte RNG seed from the SHA-256 of an intent phrase.
pub fn seed_from_intent(text: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let result = hasher.finalize();
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&result);
    seed
}
