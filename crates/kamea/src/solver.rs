//! Resident-constrained search.
//!
//! Random restart: residents are placed, the remaining numbers are shuffled
//! into the free cells and the result is tested. There is no backtracking,
//! so the chance of success collapses beyond order 3; the constructive
//! strategy covers larger orders when the residents fit a known square.

use crate::siamese::{construct, dihedral_variants};
use crate::{honors, is_magic, magic_constant, validate_residents, Grid, KameaError, MagicSquare, Resident};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_MAX_ATTEMPTS: u64 = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveBudget {
    pub max_attempts: u64,
    pub timeout: Option<Duration>,
}

impl Default for SolveBudget {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout: None,
        }
    }
}

impl SolveBudget {
    pub fn attempts(max_attempts: u64) -> Self {
        Self {
            max_attempts,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Shared flag that stops a running search at its next check.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    Solved,
    /// Attempt budget spent without a magic grid
    Exhausted,
    TimedOut,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    #[default]
    Random,
    /// Try the orientations of a constructed square first
    Constructive,
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(SearchStrategy::Random),
            "constructive" => Ok(SearchStrategy::Constructive),
            other => Err(format!(
                "Unknown strategy '{}'. Valid strategies: random, constructive",
                other
            )),
        }
    }
}

/// Result of one solve. The square is magic only when `status` is `Solved`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveOutcome {
    pub square: MagicSquare,
    pub status: SolveStatus,
    pub attempts: u64,
    pub elapsed_ms: u64,
}

pub struct ResidentSolver {
    size: usize,
    residents: Vec<Resident>,
    budget: SolveBudget,
    strategy: SearchStrategy,
    rng: ChaCha8Rng,
    cancel: CancelToken,
}

impl ResidentSolver {
    /// Validates the residents up front so the search never sees a
    /// contradictory set.
    pub fn new(size: usize, residents: Vec<Resident>) -> Result<Self, KameaError> {
        validate_residents(size, &residents)?;
        Ok(Self {
            size,
            residents,
            budget: SolveBudget::default(),
            strategy: SearchStrategy::default(),
            rng: ChaCha8Rng::from_entropy(),
            cancel: CancelToken::new(),
        })
    }

    pub fn with_budget(mut self, budget: SolveBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_seed(mut self, seed: [u8; 32]) -> Self {
        self.rng = ChaCha8Rng::from_seed(seed);
        self
    }

    pub fn with_seed_u64(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Handle for cancelling this solver from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn solve(&mut self) -> SolveOutcome {
        let started = Instant::now();

        if self.strategy == SearchStrategy::Constructive {
            if let Some(outcome) = self.try_constructed(started) {
                return outcome;
            }
            log::debug!(
                "no constructed {}x{} square fits {} residents, falling back to random search",
                self.size,
                self.size,
                self.residents.len()
            );
        }

        let free = self.free_values();
        let template = self.resident_template();
        let cells = self.free_cells();
        let mut attempts = 0u64;
        let mut last = None;

        // Budget, cancel and deadline are polled before every fill
        let status = loop {
            if attempts >= self.budget.max_attempts {
                break SolveStatus::Exhausted;
            }
            if self.cancel.is_cancelled() {
                break SolveStatus::Cancelled;
            }
            if self.budget.timeout.map_or(false, |t| started.elapsed() >= t) {
                break SolveStatus::TimedOut;
            }

            let grid = self.random_fill(&template, &cells, &free);
            attempts += 1;
            if is_magic(&grid) {
                return self.finish(grid, SolveStatus::Solved, attempts, started);
            }
            last = Some(grid);
        };

        // A zero budget still hands back one filled grid
        let grid = match last {
            Some(grid) => grid,
            None => self.random_fill(&template, &cells, &free),
        };
        let status = if is_magic(&grid) { SolveStatus::Solved } else { status };
        if status != SolveStatus::Solved {
            log::warn!(
                "no {}x{} magic square after {} attempts ({:?})",
                self.size,
                self.size,
                attempts,
                status
            );
        }
        self.finish(grid, status, attempts, started)
    }

    fn try_constructed(&self, started: Instant) -> Option<SolveOutcome> {
        let base = construct(self.size)?;
        let variants = dihedral_variants(&base);
        let tried = variants.len() as u64;
        variants
            .into_iter()
            .find(|grid| honors(grid, &self.residents))
            .map(|grid| self.finish(grid, SolveStatus::Solved, tried, started))
    }

    fn free_values(&self) -> Vec<u32> {
        let taken: HashSet<u32> = self.residents.iter().map(|r| r.value).collect();
        (1..=(self.size * self.size) as u32)
            .filter(|v| !taken.contains(v))
            .collect()
    }

    /// Empty grid with every resident in place.
    fn resident_template(&self) -> Grid {
        let mut grid = vec![vec![0u32; self.size]; self.size];
        for r in &self.residents {
            grid[r.row][r.col] = r.value;
        }
        grid
    }

    /// Cells not held by a resident, row by row.
    fn free_cells(&self) -> Vec<(usize, usize)> {
        let fixed: HashSet<(usize, usize)> = self.residents.iter().map(|r| (r.row, r.col)).collect();
        (0..self.size)
            .flat_map(|i| (0..self.size).map(move |j| (i, j)))
            .filter(|cell| !fixed.contains(cell))
            .collect()
    }

    fn random_fill(&mut self, template: &Grid, cells: &[(usize, usize)], free: &[u32]) -> Grid {
        let mut shuffled = free.to_vec();
        shuffled.shuffle(&mut self.rng);

        let mut grid = template.clone();
        for (&(i, j), value) in cells.iter().zip(shuffled) {
            grid[i][j] = value;
        }
        grid
    }

    fn finish(&self, grid: Grid, status: SolveStatus, attempts: u64, started: Instant) -> SolveOutcome {
        let elapsed_ms = started.elapsed().as_millis() as u64;
        log::debug!(
            "{}x{} solve finished {:?} after {} attempts in {} ms",
            self.size,
            self.size,
            status,
            attempts,
            elapsed_ms
        );
        SolveOutcome {
            square: MagicSquare {
                size: self.size,
                is_magic: is_magic(&grid),
                sum: magic_constant(self.size),
                grid,
            },
            status,
            attempts,
            elapsed_ms,
        }
    }
}

/// Random-restart solve with an entropy-seeded generator.
pub fn solve(size: usize, residents: &[Resident], budget: SolveBudget) -> Result<SolveOutcome, KameaError> {
    let mut solver = ResidentSolver::new(size, residents.to_vec())?.with_budget(budget);
    Ok(solver.solve())
}

/// Run a solver on the blocking pool so an async caller's runtime keeps
/// serving other tasks.
pub async fn solve_async(mut solver: ResidentSolver) -> Result<SolveOutcome, KameaError> {
    tokio::task::spawn_blocking(move || solver.solve())
        .await
        .map_err(|e| KameaError::Worker(e.to_string()))
}
