//! The interactive "snake" mode (`spec.md` §4.6), ported from
//! `original_source/libs/runtime/runtime.c::runtime_interactive`.
//!
//! Single-threaded and synchronous, as the teacher's own threaded
//! input/render split has no counterpart in this spec: a move is read from
//! stdin, applied, and the maze is redrawn, once per turn.
//!
//! `original_source` tracks the board as a single mutable character grid:
//! once the snake's body or head passes over a coin, danger, or drill, that
//! cell is overwritten and can never trigger again. Since [`Maze`] here is
//! immutable, the same one-shot behavior is reproduced with a `consumed`
//! set checked ahead of the real tile.

use std::collections::HashSet;
use std::io::{BufRead, Write};

use tracing::info;

use crate::app::renderer;
use crate::geometry::Move;
use crate::maze::{Maze, Tile};

/// The outcome of a finished interactive session: the body length (doubling
/// as the player's point total, per `original_source`) and move count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub points: usize,
    pub moves: u32,
}

enum Effect {
    Collision(usize),
    Wall,
    Danger,
    Coin,
    Drill,
    None,
}

/// Runs the snake loop to completion: `maze.end()` reached, or the input
/// stream closes.
pub fn play_interactive(
    maze: &Maze,
    input: &mut impl BufRead,
    stdout: &mut impl Write,
) -> std::io::Result<GameSummary> {
    let mut position = maze.start();
    let mut body: Vec<(u8, u8)> = Vec::new();
    let mut consumed: HashSet<(u8, u8)> = HashSet::new();
    let mut drills: u32 = 0;
    let mut moves: u32 = 0;

    while position != maze.end() {
        renderer::render_with_snake(maze, &body, position, stdout)?;
        write!(stdout, "\r\n(n, e, s, o): ")?;
        stdout.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let direction = match line.trim().chars().next() {
            Some('n' | 'N') => Move::Up,
            Some('e' | 'E') => Move::Right,
            Some('o' | 'O') => Move::Left,
            Some('s' | 'S') => Move::Down,
            _ => continue,
        };

        let attempt = crate::geometry::neighbor(
            crate::geometry::Location::new(position.0, position.1),
            direction,
            1,
        );
        if !maze.in_bounds_loc(attempt) || attempt.coord() == position {
            continue;
        }
        let attempt = attempt.coord();

        let effect = if let Some(index) = body.iter().position(|&cell| cell == attempt) {
            Effect::Collision(index)
        } else if consumed.contains(&attempt) {
            Effect::None
        } else {
            match maze.get(attempt) {
                Tile::Wall => Effect::Wall,
                Tile::Danger => Effect::Danger,
                Tile::Coin => Effect::Coin,
                Tile::Drill => Effect::Drill,
                _ => Effect::None,
            }
        };

        if matches!(effect, Effect::Wall) && drills == 0 {
            continue;
        }

        let mut body_extended = false;
        match effect {
            Effect::Collision(index) => {
                body = body.split_off(index);
            }
            Effect::Wall => {
                drills -= 1;
                consumed.insert(attempt);
            }
            Effect::Danger => {
                let keep_from = body.len() / 2;
                body = body.split_off(keep_from);
                consumed.insert(attempt);
            }
            Effect::Coin => {
                body_extended = true;
                body.push(position);
                consumed.insert(attempt);
            }
            Effect::Drill => {
                drills += 3;
                consumed.insert(attempt);
            }
            Effect::None => {}
        }

        if !body_extended && !body.is_empty() {
            body.push(position);
            body.remove(0);
        }

        position = attempt;
        moves += 1;
    }

    let summary = GameSummary {
        points: body.len(),
        moves,
    };
    info!(
        points = summary.points,
        moves = summary.moves,
        "interactive session ended"
    );
    writeln!(
        stdout,
        "\r\nYour game ended with {} points and {} moves",
        summary.points, summary.moves
    )?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maze(text: &str) -> Maze {
        Maze::parse(text.as_bytes()).unwrap()
    }

    #[test]
    fn walking_the_direct_route_reaches_the_end() {
        let m = maze("5\n3\n#####\no  _#\n#####\n");
        let mut input = "e\ne\ne\n".as_bytes();
        let mut out = Vec::new();
        let summary = play_interactive(&m, &mut input, &mut out).unwrap();
        assert_eq!(summary.points, 0);
        assert_eq!(summary.moves, 3);
    }

    #[test]
    fn collecting_a_coin_grows_the_body() {
        let m = maze("7\n3\n#######\no  $ _#\n#######\n");
        let mut input = "e\ne\ne\ne\n".as_bytes();
        let mut out = Vec::new();
        let summary = play_interactive(&m, &mut input, &mut out).unwrap();
        assert_eq!(summary.points, 1);
    }

    #[test]
    fn a_closed_input_stream_ends_the_session_early() {
        let m = maze("5\n3\n#####\no  _#\n#####\n");
        let mut input: &[u8] = b"";
        let mut out = Vec::new();
        let summary = play_interactive(&m, &mut input, &mut out).unwrap();
        assert_eq!(summary.moves, 0);
    }

    #[test]
    fn a_wall_without_a_drill_blocks_movement() {
        let m = maze("5\n3\n#####\no#_ #\n#####\n");
        let mut input = "e\n".as_bytes();
        let mut out = Vec::new();
        let summary = play_interactive(&m, &mut input, &mut out).unwrap();
        assert_eq!(summary.moves, 0);
    }
}
