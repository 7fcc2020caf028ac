//! Drawing the maze with an overlay (a solved path, or a live snake body),
//! without mutating the underlying [`Maze`] (ported from
//! `mazest::app::App::process_events`'s cell-by-cell redraw, with the
//! overlay character choice grounded on
//! `original_source/libs/core/core.h`'s `SNAKE_PATH_CHAR`/`SNAKE_BODY_CHAR`/
//! `SNAKE_PLAYER_CHAR`).

use std::io::Write;

use crossterm::style::{Color, Stylize};
use crossterm::{cursor, execute, terminal};

use crate::maze::Maze;
use crate::path::Path;

/// Clears the terminal and draws `maze` with `path`'s cells picked out as
/// `.`, in cyan, leaving start/end/coin/danger/drill tiles visible as-is.
pub fn render_with_path(maze: &Maze, path: &Path, stdout: &mut impl Write) -> std::io::Result<()> {
    let on_path: Vec<(u8, u8)> = path.iter().map(|l| l.coord()).collect();
    render(maze, stdout, |coord| {
        if on_path.contains(&coord) && coord != maze.start() && coord != maze.end() {
            Some(".".with(Color::Cyan))
        } else {
            None
        }
    })
}

/// Clears the terminal and draws `maze` with the snake's trailing `body`
/// segments as `*` and the live head as `o` (both yellow), overriding
/// whatever tile sits underneath.
pub fn render_with_snake(
    maze: &Maze,
    body: &[(u8, u8)],
    head: (u8, u8),
    stdout: &mut impl Write,
) -> std::io::Result<()> {
    render(maze, stdout, |coord| {
        if coord == head {
            Some("o".with(Color::Yellow))
        } else if body.contains(&coord) {
            Some("*".with(Color::Yellow))
        } else {
            None
        }
    })
}

fn render(
    maze: &Maze,
    stdout: &mut impl Write,
    overlay: impl Fn((u8, u8)) -> Option<crossterm::style::StyledContent<&'static str>>,
) -> std::io::Result<()> {
    execute!(
        stdout,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0),
    )?;
    for y in 0..maze.height() {
        for x in 0..maze.width() {
            match overlay((x, y)) {
                Some(styled) => write!(stdout, "{styled}")?,
                None => write!(stdout, "{}", maze.get((x, y)))?,
            }
        }
        write!(stdout, "\r\n")?;
    }
    stdout.flush()
}
