//! The scoring-aware full search (`spec.md` §4.4), ported from
//! `original_source/libs/solver/solver.c::solver_execute_full`.
//!
//! Unlike [`astar`], this search does not stop at the first route to `end`:
//! it keeps a pool of still-growing partial paths (`open`) and a pool of
//! paths that have already reached `end` (`ended`), always expanding the
//! partial path with the fewest accumulated steps. A path that has
//! collected at least as many coins as [`estimate::estimate_coins`]
//! predicts is spliced straight to `end` via A* rather than grown cell by
//! cell. Search stops early once a path meeting that estimate is found
//! (`aspiration`), or once it runs past its configured wall-clock budget.

pub mod astar;
pub mod estimate;

use std::time::{Duration, Instant};

use crate::geometry::{self, Move};
use crate::maze::{Maze, Tile};
use crate::path::Path;

const MOVES: [Move; 4] = [Move::Left, Move::Up, Move::Right, Move::Down];

/// Tuning knobs for [`solve`], overridable via environment variables so a
/// slow machine (or a test) can shrink the budget without touching code.
/// Mirrors `original_source/libs/configuration.h`.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Wall-clock budget for the full search. `original_source` default: 35s.
    pub timeout: Duration,
    /// When `true`, never stop early just because the aspiration coin
    /// count was reached — keep searching until `open` is exhausted or the
    /// timeout fires.
    pub full_precision: bool,
    /// When `true`, the timeout is never checked.
    pub ignore_timeout: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            timeout: Duration::from_secs(35),
            full_precision: false,
            ignore_timeout: false,
        }
    }
}

impl SolverConfig {
    /// Builds a config from `MAZE_SOLVER_TIMEOUT_SECS`, `MAZE_SOLVER_FULL_PRECISION`,
    /// and `MAZE_SOLVER_IGNORE_TIMEOUT`, falling back to [`Default`] for any
    /// variable that is unset or fails to parse.
    pub fn from_env() -> Self {
        let defaults = SolverConfig::default();
        let timeout = std::env::var("MAZE_SOLVER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        let full_precision = std::env::var("MAZE_SOLVER_FULL_PRECISION")
            .ok()
            .map(|v| parse_bool(&v))
            .unwrap_or(defaults.full_precision);
        let ignore_timeout = std::env::var("MAZE_SOLVER_IGNORE_TIMEOUT")
            .ok()
            .map(|v| parse_bool(&v))
            .unwrap_or(defaults.ignore_timeout);

        SolverConfig {
            timeout,
            full_precision,
            ignore_timeout,
        }
    }
}

fn parse_bool(v: &str) -> bool {
    matches!(v.trim(), "1" | "true" | "TRUE" | "True")
}

fn score_of(path: &Path) -> i64 {
    path.score()
}

/// Runs the full scoring-aware search and returns the best path found, or
/// an empty path if `end` was never reached within the budget.
pub fn solve(maze: &Maze, config: &SolverConfig) -> Path {
    let total_coins = estimate::estimate_coins(maze);
    tracing::debug!("[solver] aspiration set to {total_coins} coins");

    let mut start = crate::geometry::Location::new(maze.start().0, maze.start().1);
    start.steps = 2;

    let mut open: Vec<Path> = vec![Path::single(start)];
    let mut ended: Vec<Path> = Vec::new();
    let mut path_score = i64::MIN;
    let started_at = Instant::now();

    while !open.is_empty() {
        if !config.ignore_timeout && started_at.elapsed() >= config.timeout {
            tracing::info!("[solver] timeout reached with {} partial paths open", open.len());
            break;
        }

        let mut index_current = 0;
        let mut current = open[0].last().expect("paths are never empty");
        for (i, candidate_path) in open.iter().enumerate() {
            let t = candidate_path.last().expect("paths are never empty");
            if t.steps < current.steps {
                current = t;
                index_current = i;
            }
        }

        let mut current_path = open.remove(index_current);

        if current.coins as u32 >= total_coins {
            let splice = astar::astar(maze, current.coord(), maze.end(), Some(&current_path), false);
            if !splice.is_empty() {
                current_path.extend_from_tail(&splice);
                let mut spliced_end = splice.last().expect("splice is non-empty");
                spliced_end.coins = current.coins;
                spliced_end.drills = current.drills;
                spliced_end.dangers = current.dangers;
                current_path.set_last(spliced_end);
                current = spliced_end;
            }
        }

        if current.coord() == maze.end() {
            let current_score = score_for(current.coins, current_path.len());

            if current_score >= path_score {
                ended.push(current_path.clone());
                path_score = current_score;
            } else {
                continue;
            }

            if current.coins as u32 >= total_coins && !config.full_precision {
                tracing::debug!("[solver] aspiration met, stopping early with score {current_score}");
                break;
            }
        }

        for &m in &MOVES {
            if m == current.comes_from {
                continue;
            }

            let neighbor = geometry::neighbor(current, m, 1);
            if !maze.in_bounds_loc(neighbor) {
                continue;
            }
            if current_path.contains_coord(neighbor.coord()) {
                continue;
            }

            let mut neighbor = neighbor;
            neighbor.drills = current.drills;
            neighbor.steps = current.steps + 2;

            match maze.get(neighbor.coord()) {
                Tile::Danger => {
                    neighbor.coins /= 2;
                    neighbor.dangers += 1;
                }
                Tile::Coin => {
                    neighbor.steps -= 1;
                    neighbor.coins += 1;
                }
                Tile::Drill => neighbor.drills += 3,
                Tile::Wall => {
                    if neighbor.drills > 0 {
                        neighbor.drills -= 1;
                    } else {
                        continue;
                    }
                }
                _ => {}
            }

            let mut branch = current_path.clone();
            branch.push(neighbor);
            open.push(branch);
        }
    }

    // `ended` only ever grows with scores `>= ` the running best at push time,
    // so it is non-decreasing in score; scanning in reverse with a strict `>`
    // keeps the latest-inserted path among any tie at the maximum (spec.md
    // §4.4 termination: "ties: later wins").
    let mut best: Option<Path> = None;
    let mut max_score = i64::MIN;
    for candidate in ended.iter().rev() {
        let s = score_of(candidate);
        if s > max_score {
            max_score = s;
            best = Some(candidate.clone());
        }
    }

    best.unwrap_or_default()
}

fn score_for(coins: u16, steps: usize) -> i64 {
    1000 - steps as i64 + 10 * coins as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maze(text: &str) -> Maze {
        Maze::parse(text.as_bytes()).unwrap()
    }

    #[test]
    fn solves_a_trivial_corridor() {
        let m = maze("5\n3\n#####\no  _#\n#####\n");
        let path = solve(&m, &SolverConfig::default());
        assert!(!path.is_empty());
        assert_eq!(path.first().unwrap().coord(), m.start());
        assert_eq!(path.last().unwrap().coord(), m.end());
        // spec.md S1: a 4-step path with score 1000 - 4 + 0 = 996. Catches
        // the goal-splice from duplicating its seed cell onto `current_path`.
        assert_eq!(path.len(), 4);
        assert_eq!(path.score(), 996);
    }

    #[test]
    fn collects_a_reachable_coin() {
        let m = maze("7\n3\n#######\no  $ _#\n#######\n");
        let path = solve(&m, &SolverConfig::default());
        assert!(!path.is_empty());
        assert_eq!(path.last().unwrap().coins, 1);
    }

    #[test]
    fn is_deterministic() {
        let m = maze("9\n5\n#########\n#o   $  #\n# # ### #\n#      _#\n#########\n");
        let a = solve(&m, &SolverConfig::default());
        let b = solve(&m, &SolverConfig::default());
        assert_eq!(a, b);
    }

    #[test]
    fn returns_empty_path_when_end_is_unreachable() {
        let m = maze("5\n3\n#####\no#_ #\n#####\n");
        let path = solve(&m, &SolverConfig::default());
        assert!(path.is_empty());
    }
}
