use kamea::{
    evaluate, seed_from_intent, solve, solve_async, CancelToken, KameaError, Resident, ResidentSolver,
    SearchStrategy, SolveBudget, SolveStatus,
};
use std::time::{Duration, Instant};

#[test]
fn test_lo_shu_with_center_resident() {
    let residents = [Resident::new(1, 1, 5)];
    let mut solver = ResidentSolver::new(3, residents.to_vec())
        .unwrap()
        .with_seed_u64(7)
        .with_budget(SolveBudget::attempts(200_000));
    let outcome = solver.solve();

    assert_eq!(outcome.status, SolveStatus::Solved);
    assert!(outcome.square.is_magic);
    assert_eq!(outcome.square.sum, 15);
    assert_eq!(outcome.square.grid[1][1], 5);
    assert!(outcome.square.honors(&residents));
}

#[test]
fn test_seeded_solves_are_reproducible() {
    let run = || {
        ResidentSolver::new(3, vec![Resident::new(0, 0, 2)])
            .unwrap()
            .with_seed(seed_from_intent("steady hands"))
            .with_budget(SolveBudget::attempts(500))
            .solve()
    };
    let a = run();
    let b = run();
    assert_eq!(a.square.grid, b.square.grid);
    assert_eq!(a.attempts, b.attempts);
}

#[test]
fn test_exhausted_returns_last_grid() {
    // Corner value 5 can never be magic for order 3
    let residents = [Resident::new(0, 0, 5)];
    let outcome = solve(3, &residents, SolveBudget::attempts(100)).unwrap();
    assert_eq!(outcome.status, SolveStatus::Exhausted);
    assert!(!outcome.square.is_magic);
    assert_eq!(outcome.attempts, 100);
    assert!(outcome.square.honors(&residents));

    let mut values: Vec<u32> = outcome.square.grid.concat();
    values.sort_unstable();
    assert_eq!(values, (1..=9).collect::<Vec<u32>>());
}

#[test]
fn test_zero_budget_still_fills_grid() {
    let outcome = solve(4, &[], SolveBudget::attempts(0)).unwrap();
    assert_eq!(outcome.attempts, 0);
    assert_eq!(outcome.square.grid.len(), 4);
    assert!(outcome.square.grid.iter().flatten().all(|&v| (1..=16).contains(&v)));
}

#[test]
fn test_invalid_residents_rejected() {
    assert_eq!(
        solve(3, &[Resident::new(0, 0, 3), Resident::new(1, 1, 3)], SolveBudget::default()).unwrap_err(),
        KameaError::DuplicateValue { value: 3 }
    );
    assert!(matches!(
        solve(0, &[], SolveBudget::default()),
        Err(KameaError::InvalidSize { .. })
    ));
}

#[test]
fn test_order_one() {
    let outcome = solve(1, &[], SolveBudget::attempts(1)).unwrap();
    assert_eq!(outcome.status, SolveStatus::Solved);
    assert_eq!(outcome.square.grid, vec![vec![1]]);
}

#[test]
fn test_constructive_strategy_large_order() {
    // Siamese 7x7 has 25 in the centre; 1 sits mid top row
    let residents = vec![Resident::new(3, 3, 25), Resident::new(0, 3, 1)];
    let mut solver = ResidentSolver::new(7, residents.clone())
        .unwrap()
        .with_strategy(SearchStrategy::Constructive)
        .with_budget(SolveBudget::attempts(10));
    let outcome = solver.solve();
    assert_eq!(outcome.status, SolveStatus::Solved);
    assert!(outcome.square.is_magic);
    assert!(outcome.square.honors(&residents));
    assert!(outcome.attempts <= 8);
}

#[test]
fn test_constructive_falls_back_to_random() {
    let residents = vec![Resident::new(0, 0, 5)];
    let mut solver = ResidentSolver::new(3, residents)
        .unwrap()
        .with_strategy(SearchStrategy::Constructive)
        .with_seed_u64(1)
        .with_budget(SolveBudget::attempts(50));
    assert_eq!(solver.solve().status, SolveStatus::Exhausted);
}

#[test]
fn test_timeout_stops_search() {
    let mut solver = ResidentSolver::new(6, vec![])
        .unwrap()
        .with_seed_u64(3)
        .with_budget(SolveBudget::attempts(u64::MAX).with_timeout(Duration::from_millis(50)));
    let outcome = solver.solve();
    assert_eq!(outcome.status, SolveStatus::TimedOut);
    assert!(!outcome.square.is_magic);
}

#[test]
fn test_timeout_honoured_at_large_order() {
    // Half of a 64x64 square pinned; every fill still touches 4096 cells
    let residents: Vec<Resident> = (0..2048)
        .map(|i| Resident::new(i / 64, i % 64, i as u32 + 1))
        .collect();
    let mut solver = ResidentSolver::new(64, residents)
        .unwrap()
        .with_seed_u64(5)
        .with_budget(SolveBudget::attempts(u64::MAX).with_timeout(Duration::from_millis(20)));

    let started = Instant::now();
    let outcome = solver.solve();
    assert_eq!(outcome.status, SolveStatus::TimedOut);
    assert!(
        started.elapsed() < Duration::from_secs(2),
        "took {:?} for a 20 ms timeout",
        started.elapsed()
    );
    assert_eq!(outcome.square.grid[31][63], 2048);
}

#[test]
fn test_cancelled_before_start() {
    let token = CancelToken::new();
    token.cancel();
    let mut solver = ResidentSolver::new(5, vec![])
        .unwrap()
        .with_budget(SolveBudget::attempts(u64::MAX))
        .with_cancel_token(token);

    let outcome = solver.solve();
    assert_eq!(outcome.status, SolveStatus::Cancelled);
    assert_eq!(outcome.attempts, 0);
    assert_eq!(outcome.square.grid.len(), 5);
}

#[test]
fn test_lo_shu_literal_grid() {
    let lo_shu = vec![vec![2, 7, 6], vec![9, 5, 1], vec![4, 3, 8]];
    let square = evaluate(lo_shu.clone()).unwrap();
    assert!(square.is_magic);
    assert_eq!(square.sum, 15);

    // Two residents pin this orientation among the eight
    let residents = vec![Resident::new(0, 0, 2), Resident::new(0, 1, 7), Resident::new(1, 1, 5)];
    let mut solver = ResidentSolver::new(3, residents)
        .unwrap()
        .with_strategy(SearchStrategy::Constructive);
    let outcome = solver.solve();
    assert_eq!(outcome.status, SolveStatus::Solved);
    assert_eq!(outcome.square.grid, lo_shu);
}

#[tokio::test]
async fn test_solve_async_lo_shu() {
    let solver = ResidentSolver::new(3, vec![Resident::new(1, 1, 5)])
        .unwrap()
        .with_seed_u64(11)
        .with_budget(SolveBudget::attempts(200_000));
    let outcome = solve_async(solver).await.unwrap();
    assert!(outcome.square.is_magic);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cancel_token_stops_async_solve() {
    let token = CancelToken::new();
    let solver = ResidentSolver::new(6, vec![])
        .unwrap()
        .with_budget(SolveBudget::attempts(u64::MAX))
        .with_cancel_token(token.clone());

    let handle = tokio::spawn(solve_async(solver));
    tokio::time::sleep(Duration::from_millis(20)).await;
    token.cancel();

    let outcome = handle.await.unwrap().unwrap();
    assert_eq!(outcome.status, SolveStatus::Cancelled);
    assert!(outcome.attempts > 0);
}
