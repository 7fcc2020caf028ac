//! Maze generation: randomized DFS (recursive backtracker).
//!
//! `spec.md` lists the generator as an out-of-scope external collaborator
//! but still specifies its contract (§4.5): odd-forced dimensions, carving
//! two cells at a time, random item placement while carving, and a fixed
//! `start`/`end`. The control flow (an explicit stack rather than recursion,
//! an optionally-seeded RNG) is ported from `mazest::generators::recur_backtrack`;
//! the carving and item-placement probabilities match
//! `original_source/libs/generator/generator.c::generator_run` exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Maze, Tile};

const MOVES: [(i16, i16); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Generates a maze of (approximately) `width` x `height`, forcing both
/// dimensions odd as the recursive-backtracker needs a cell/wall lattice.
/// `start = (0, 1)`, `end = (width - 1, height - 2)`.
pub fn generate(width: u8, height: u8, seed: Option<u64>) -> Maze {
    let width = if width % 2 == 0 { width - 1 } else { width };
    let height = if height % 2 == 0 { height - 1 } else { height };

    let start = (0, 1);
    let end = (width - 1, height - 2);
    let mut maze = Maze::blank(width, height, Tile::Wall, start, end);

    let mut rng = rng_from_seed(seed);
    carve(&mut maze, (1, 1), &mut rng);

    maze[start] = Tile::Start;
    maze[end] = Tile::End;
    tracing::debug!("[generator] carved a {width}x{height} maze, start={start:?} end={end:?}");
    maze
}

fn carve(maze: &mut Maze, from: (u8, u8), rng: &mut StdRng) {
    let mut stack = vec![from];
    maze[from] = Tile::Open;

    while let Some(current) = stack.pop() {
        let mut moves = MOVES;
        shuffle(&mut moves, rng);

        for (dx, dy) in moves {
            let Some(nx) = step(current.0, dx * 2) else {
                continue;
            };
            let Some(ny) = step(current.1, dy * 2) else {
                continue;
            };
            if !is_wall_cell(maze, (nx, ny)) {
                continue;
            }

            let between = (
                step(current.0, dx).expect("midpoint in bounds"),
                step(current.1, dy).expect("midpoint in bounds"),
            );
            place_item(maze, between, rng);
            maze[(nx, ny)] = Tile::Open;

            stack.push(current);
            stack.push((nx, ny));
            break;
        }
    }
}

fn step(v: u8, delta: i16) -> Option<u8> {
    let result = v as i16 + delta;
    if result < 0 { None } else { Some(result as u8) }
}

fn is_wall_cell(maze: &Maze, coord: (u8, u8)) -> bool {
    if coord.0 == 0 || coord.1 == 0 || coord.0 >= maze.width() - 1 || coord.1 >= maze.height() - 1
    {
        return false;
    }
    maze.get(coord) == Tile::Wall
}

fn place_item(maze: &mut Maze, coord: (u8, u8), rng: &mut StdRng) {
    let roll: u32 = rng.random();
    maze[coord] = if roll % 4 == 0 {
        Tile::Coin
    } else if roll % 11 == 0 {
        Tile::Danger
    } else {
        Tile::Open
    };
}

fn shuffle<T>(slice: &mut [T], rng: &mut StdRng) {
    for i in (1..slice.len()).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forces_odd_dimensions() {
        let maze = generate(10, 10, Some(1));
        assert_eq!(maze.width() % 2, 1);
        assert_eq!(maze.height() % 2, 1);
    }

    #[test]
    fn places_start_and_end() {
        let maze = generate(15, 9, Some(42));
        assert_eq!(maze.get(maze.start()), Tile::Start);
        assert_eq!(maze.get(maze.end()), Tile::End);
        assert_eq!(maze.start(), (0, 1));
        assert_eq!(maze.end(), (maze.width() - 1, maze.height() - 2));
    }

    #[test]
    fn is_deterministic_given_a_seed() {
        let a = generate(21, 15, Some(7));
        let b = generate(21, 15, Some(7));
        assert_eq!(a, b);
    }
}
