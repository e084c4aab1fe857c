//! Deterministic constructions used before falling back to random search.

use crate::Grid;

/// De la Loubère's method for odd orders: start mid top row, step up and
/// right with wraparound, drop one row when the target cell is taken.
pub fn siamese(n: usize) -> Option<Grid> {
    if n == 0 || n % 2 == 0 {
        return None;
    }
    let mut grid = vec![vec![0u32; n]; n];
    let (mut row, mut col) = (0usize, n / 2);
    for value in 1..=(n * n) as u32 {
        grid[row][col] = value;
        let up = (row + n - 1) % n;
        let right = (col + 1) % n;
        if grid[up][right] == 0 {
            row = up;
            col = right;
        } else {
            row = (row + 1) % n;
        }
    }
    Some(grid)
}

/// Orders divisible by four: fill 1..n² in reading order, then complement
/// the cells on the diagonals of each 4x4 block.
pub fn doubly_even(n: usize) -> Option<Grid> {
    if n == 0 || n % 4 != 0 {
        return None;
    }
    let top = (n * n + 1) as u32;
    let grid = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    let value = (i * n + j + 1) as u32;
                    let (a, b) = (i % 4, j % 4);
                    if a == b || a + b == 3 {
                        top - value
                    } else {
                        value
                    }
                })
                .collect()
        })
        .collect();
    Some(grid)
}

/// A constructed square for `n`, `None` for singly-even orders.
pub fn construct(n: usize) -> Option<Grid> {
    siamese(n).or_else(|| doubly_even(n))
}

fn rotate(grid: &Grid) -> Grid {
    let n = grid.len();
    (0..n)
        .map(|i| (0..n).map(|j| grid[n - 1 - j][i]).collect())
        .collect()
}

fn transpose(grid: &Grid) -> Grid {
    let n = grid.len();
    (0..n).map(|i| (0..n).map(|j| grid[j][i]).collect()).collect()
}

/// The four rotations of `grid` and of its transpose.
pub fn dihedral_variants(grid: &Grid) -> Vec<Grid> {
    let mut variants = Vec::with_capacity(8);
    for start in [grid.clone(), transpose(grid)] {
        let mut current = start;
        for _ in 0..4 {
            let next = rotate(&current);
            variants.push(current);
            current = next;
        }
    }
    variants
}
