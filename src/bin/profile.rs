//! Benchmarking binary, ported from `mazest::bin::profile`: generate N
//! mazes and report the full solver's wall-clock time and score
//! distribution across them, instead of `mazest`'s generator/solver
//! combination timings (this crate has one generator and one scoring
//! search, not a menu of interchangeable algorithms).

use std::time::Instant;

use maze_solver::maze::generator;
use maze_solver::solver::{self, SolverConfig};

const DEFAULT_ITERS: usize = 20;
const WIDTH: u8 = 31;
const HEIGHT: u8 = 21;

fn main() {
    let mut args = std::env::args();
    args.next();
    let iterations = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_ITERS);

    let config = SolverConfig::from_env();
    let mut total_elapsed = std::time::Duration::ZERO;
    let mut best_score = i64::MIN;
    let mut worst_score = i64::MAX;
    let mut empty_runs = 0usize;

    for i in 0..iterations {
        let maze = generator::generate(WIDTH, HEIGHT, Some(i as u64));
        let started = Instant::now();
        let path = solver::solve(&maze, &config);
        let elapsed = started.elapsed();
        total_elapsed += elapsed;

        if path.is_empty() {
            empty_runs += 1;
            println!("run {i}: no path found ({elapsed:?})");
            continue;
        }

        let score = path.score();
        best_score = best_score.max(score);
        worst_score = worst_score.min(score);
        println!("run {i}: score={score} len={} ({elapsed:?})", path.len());
    }

    println!("---");
    println!("iterations: {iterations}");
    println!("empty runs: {empty_runs}");
    if empty_runs < iterations {
        println!("best score: {best_score}");
        println!("worst score: {worst_score}");
    }
    println!("total time: {total_elapsed:?}");
    println!(
        "average time: {:?}",
        total_elapsed / iterations.max(1) as u32
    );
}
