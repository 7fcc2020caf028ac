//! Coin-count estimation (`spec.md` §4.3), ported from
//! `original_source/libs/solver/solver.c::estimate_coins`.
//!
//! The full search (`solver::solve`) uses this estimate as its aspiration
//! target: once a candidate path has collected at least this many coins it
//! stops exploring and splices straight to the exit. The estimate itself is
//! deliberately optimistic-then-corrected: a coin first passes a cheap DFS
//! (or, failing that, an A*) reachability check, then every surviving
//! candidate is re-examined pairwise against both the start and the end to
//! rule out coins that can only be picked up by paths that cross each other
//! or that pay for the coin with a Danger tile.

use std::collections::HashSet;

use crate::maze::{Maze, Tile};
use crate::path::Path;

use super::astar::astar;

fn dfs_reachable(maze: &Maze, from: (u8, u8), to: (u8, u8)) -> bool {
    let mut stack = vec![from];
    let mut visited = HashSet::new();

    while let Some(current) = stack.pop() {
        if current == to {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }

        for (dx, dy) in [(-1i16, 0i16), (1, 0), (0, -1), (0, 1)] {
            let nx = current.0 as i16 + dx;
            let ny = current.1 as i16 + dy;
            if nx < 0 || ny < 0 {
                continue;
            }
            let neighbor = (nx as u8, ny as u8);
            if !maze.is_in_bounds(neighbor) {
                continue;
            }
            if maze.get(neighbor) == Tile::Wall {
                continue;
            }
            stack.push(neighbor);
        }
    }

    false
}

/// Two paths "overlay" when an interior cell of one (excluding its own
/// endpoints) coincides with an interior cell of the other.
fn path_overlay(a: &Path, b: &Path) -> bool {
    let interior = |p: &Path| -> Vec<(u8, u8)> {
        let slice = p.as_slice();
        if slice.len() < 3 {
            Vec::new()
        } else {
            slice[1..slice.len() - 1].iter().map(|l| l.coord()).collect()
        }
    };
    let a_interior = interior(a);
    let b_interior = interior(b);
    a_interior.iter().any(|c| b_interior.contains(c))
}

/// Whether `coin` needs a second opinion before it is counted: the two
/// candidate routes cross, either failed to actually reach the coin, or
/// either paid for it with a Danger tile along the way.
fn test_coin_estimation(start_path: &Path, end_path: &Path, coin: (u8, u8)) -> bool {
    let overlay = path_overlay(start_path, end_path);
    let has_end_path = end_path.last().is_some_and(|l| l.coord() == coin);
    let has_start_path = start_path.last().is_some_and(|l| l.coord() == coin);
    let end_took_dangers = has_end_path && end_path.last().unwrap().dangers > 0;
    let start_took_dangers = has_start_path && start_path.last().unwrap().dangers > 0;

    overlay || end_took_dangers || start_took_dangers || !has_end_path || !has_start_path
}

/// Estimates how many coins a single path can plausibly collect on its way
/// from `start` to `end`, without yet running the full scoring search.
pub fn estimate_coins(maze: &Maze) -> u32 {
    let mut points = Vec::new();

    for y in 0..maze.height() {
        for x in 0..maze.width() {
            let coord = (x, y);
            if maze.get(coord) != Tile::Coin {
                continue;
            }

            if dfs_reachable(maze, maze.end(), coord) {
                points.push(coord);
            } else {
                let p = astar(maze, maze.start(), coord, None, true);
                if !p.is_empty() {
                    points.push(coord);
                }
            }
        }
    }

    let mut size = points.len();
    for point in points {
        let end_to_point = astar(maze, maze.end(), point, None, true);
        let start_to_point = astar(maze, maze.start(), point, Some(&end_to_point), true);
        let mut needs_verify = test_coin_estimation(&start_to_point, &end_to_point, point);

        if needs_verify {
            let start_to_point = astar(maze, maze.start(), point, None, true);
            let end_to_point = astar(maze, maze.end(), point, Some(&start_to_point), true);
            needs_verify = test_coin_estimation(&start_to_point, &end_to_point, point);
        }

        if needs_verify {
            size -= 1;
        }
    }

    tracing::debug!("[estimate] {size} coin(s) pass the mutual-exclusion probe");
    size as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maze(text: &str) -> Maze {
        Maze::parse(text.as_bytes()).unwrap()
    }

    #[test]
    fn estimates_zero_coins_in_an_empty_maze() {
        let m = maze("5\n3\n#####\no  _#\n#####\n");
        assert_eq!(estimate_coins(&m), 0);
    }

    #[test]
    fn counts_a_coin_reachable_from_both_ends() {
        let m = maze("7\n3\n#######\no  $ _#\n#######\n");
        assert_eq!(estimate_coins(&m), 1);
    }

    #[test]
    fn excludes_a_coin_behind_a_danger_tile() {
        let m = maze("9\n3\n#########\no !$!  _#\n#########\n");
        assert_eq!(estimate_coins(&m), 0);
    }
}
