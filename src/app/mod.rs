//! Terminal menu and the two playable modes (`spec.md` §6, §4.5), ported
//! from `mazest::app`'s `App::setup_terminal`/`App::restore_terminal`/
//! `select_from_menu` and `original_source/main.c`'s top-level menu loop
//! (`1. Exit`, `2. Play`, `3. Computer mode`) and
//! `libs/runtime/runtime.c::runtime_ai`'s post-solve report.

pub mod renderer;

use std::io::{BufRead, Stdout, Write};
use std::time::Instant;

use crossterm::event::{self, Event, KeyCode};
use crossterm::style::{Attribute, Color, Stylize};
use crossterm::{cursor, execute, queue, terminal};
use tracing::info;
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

use crate::geometry::{self, Move};
use crate::maze::Maze;
use crate::solver::{self, SolverConfig};

/// Writes `text` clipped to the terminal's current width (falling back to
/// 80 columns if it cannot be queried), appending a `~` marker when it had
/// to cut something off. Mirrors `mazest::app::log_terminal`'s own
/// `unicode_truncate`-based clipping of over-long status lines.
fn write_status_line(stdout: &mut impl Write, text: &str) -> std::io::Result<()> {
    let term_width = terminal::size().map(|(w, _)| w as usize).unwrap_or(80);
    if text.width() > term_width {
        let (truncated, printed_width) = text.unicode_truncate(term_width.saturating_sub(1));
        write!(stdout, "{truncated}")?;
        if term_width.saturating_sub(printed_width) >= 1 {
            write!(stdout, "~")?;
        }
    } else {
        write!(stdout, "{text}")?;
    }
    Ok(())
}

/// The three options `original_source/main.c` offers at its top-level menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    Play,
    Computer,
}

impl std::fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuChoice::Exit => write!(f, "Exit"),
            MenuChoice::Play => write!(f, "Play"),
            MenuChoice::Computer => write!(f, "Computer mode"),
        }
    }
}

const MENU: [MenuChoice; 3] = [MenuChoice::Exit, MenuChoice::Play, MenuChoice::Computer];

/// Sets a panic hook that restores the terminal before the default hook
/// runs, so a panic mid-render never leaves the user's shell in raw mode.
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout());
        hook(panic_info);
    }));
}

/// Enables raw mode, enters the alternate screen, and installs the panic
/// hook above. Call once before any menu/rendering and pair with
/// [`restore_terminal`].
pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    set_panic_hook();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(terminal::ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0),
    )?;
    Ok(())
}

/// Leaves the alternate screen and disables raw mode.
pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    execute!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// Arrow-key/Enter menu selection, ported from `mazest::app::select_from_menu`.
/// `Esc` is treated the same as selecting [`MenuChoice::Exit`].
fn select_from_menu(stdout: &mut impl Write) -> std::io::Result<MenuChoice> {
    queue!(stdout, cursor::Hide, cursor::SavePosition)?;

    let mut selected = 0usize;
    let choice = loop {
        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(terminal::ClearType::FromCursorDown),
        )?;
        write!(
            stdout,
            "{}",
            "Select one option (arrow keys and Enter):".with(Color::Yellow)
        )?;
        for (i, option) in MENU.iter().enumerate() {
            if i == selected {
                stdout.queue(crossterm::style::SetAttribute(Attribute::Reverse))?;
            }
            write!(stdout, "\r\n{}. {option}", i + 1)?;
            if i == selected {
                stdout.queue(crossterm::style::SetAttribute(Attribute::NoReverse))?;
            }
        }
        write!(stdout, "\r\n")?;
        stdout.flush()?;

        if let Event::Key(key) = event::read()? {
            if key.kind != event::KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Up => selected = if selected == 0 { MENU.len() - 1 } else { selected - 1 },
                KeyCode::Down => selected = (selected + 1) % MENU.len(),
                KeyCode::Enter => break MENU[selected],
                KeyCode::Esc => break MenuChoice::Exit,
                _ => {}
            }
        }
    };

    queue!(
        stdout,
        cursor::RestorePosition,
        terminal::Clear(terminal::ClearType::FromCursorDown),
        cursor::Show,
    )?;
    stdout.flush()?;
    Ok(choice)
}

/// Parses a maze pasted on `input`, per the §6 text format, re-prompting
/// (as `original_source/main.c`'s interactive loop does) until a maze with
/// non-zero dimensions is read.
fn prompt_for_maze(input: &mut impl BufRead, stdout: &mut impl Write) -> std::io::Result<Maze> {
    loop {
        write!(
            stdout,
            "\r\nPaste your maze using the format:\r\nwidth\r\nheight\r\nmatrix\r\n"
        )?;
        stdout.flush()?;
        match Maze::parse(&mut *input) {
            Ok(maze) if !maze.is_empty() => return Ok(maze),
            _ => continue,
        }
    }
}

/// Drives the top-level menu until [`MenuChoice::Exit`] is chosen (or the
/// input stream closes). `maze` is the maze preloaded from `--file`/
/// `--generate`, if any; if neither mode has one yet when the user picks
/// `Play`/`Computer mode`, one is read from `input` first.
pub fn run_menu(
    mut maze: Option<Maze>,
    input: &mut impl BufRead,
    stdout: &mut impl Write,
) -> std::io::Result<()> {
    loop {
        match select_from_menu(stdout)? {
            MenuChoice::Exit => return Ok(()),
            MenuChoice::Play => {
                // Both maze-pasting and the snake loop read whole lines, which
                // needs canonical-mode input (newline translation, local
                // echo) rather than the menu's raw single-keypress reads.
                terminal::disable_raw_mode()?;
                if maze.is_none() {
                    maze = Some(prompt_for_maze(input, stdout)?);
                }
                execute!(stdout, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
                let result = crate::game::play_interactive(maze.as_ref().unwrap(), input, stdout);
                terminal::enable_raw_mode()?;
                result?;
            }
            MenuChoice::Computer => {
                if maze.is_none() {
                    terminal::disable_raw_mode()?;
                    let prompted = prompt_for_maze(input, stdout);
                    terminal::enable_raw_mode()?;
                    maze = Some(prompted?);
                }
                execute!(stdout, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
                run_automatic(maze.as_ref().unwrap(), &SolverConfig::from_env(), stdout)?;
                write!(stdout, "\r\nPress any key to return to the menu...")?;
                stdout.flush()?;
                event::read()?;
            }
        }
    }
}

/// Runs the full search once and prints its colored path, score, and
/// movement letters, matching `original_source/libs/runtime/runtime.c::runtime_ai`
/// (`O`/`N`/`E`/`S` for Left/Up/Right/Down, matching the interactive
/// mode's own `o`/`n`/`e`/`s` command letters).
pub fn run_automatic(
    maze: &Maze,
    config: &SolverConfig,
    stdout: &mut impl Write,
) -> std::io::Result<()> {
    let started = Instant::now();
    let path = solver::solve(maze, config);
    let elapsed = started.elapsed();

    renderer::render_with_path(maze, &path, stdout)?;
    write!(stdout, "\r\n")?;

    if path.len() > 2 {
        let score = path.score();
        write!(stdout, "Score: {}\r\n", score.to_string().with(Color::Green))?;

        let prefix = "Movements: ";
        write!(stdout, "{prefix}")?;

        let mut current = maze.start();
        let movement_letters: String = path
            .iter()
            .filter_map(|loc| {
                let letter = match geometry::transition(current, loc.coord()) {
                    Move::Left => Some('O'),
                    Move::Up => Some('N'),
                    Move::Right => Some('E'),
                    Move::Down => Some('S'),
                    Move::Empty => None,
                };
                current = loc.coord();
                letter
            })
            .collect();

        let term_width = terminal::size().map(|(w, _)| w as usize).unwrap_or(80);
        if prefix.width() + movement_letters.width() > term_width {
            write_status_line(stdout, &movement_letters)?;
        } else {
            for letter in movement_letters.chars() {
                let color = if matches!(letter, 'N' | 'S') {
                    Color::Cyan
                } else {
                    Color::Magenta
                };
                write!(stdout, "{}", letter.to_string().with(color))?;
            }
        }
        write!(stdout, "\r\n")?;
    } else {
        let err = crate::error::MazeError::NoPath;
        tracing::warn!(error = %err, "[solver] automatic mode found no path");
        write_status_line(stdout, "No path found!")?;
        write!(stdout, "\r\n")?;
    }

    let seconds = elapsed.as_secs();
    let time_color = if seconds > 20 { Color::Red } else { Color::Green };
    write!(
        stdout,
        "Calculated in {} seconds and {} milliseconds\r\n",
        seconds.to_string().with(time_color),
        elapsed.subsec_millis().to_string().with(time_color),
    )?;
    stdout.flush()?;

    info!(
        score = path.score(),
        elapsed_ms = elapsed.as_millis() as u64,
        "[solver] automatic mode finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maze(text: &str) -> Maze {
        Maze::parse(text.as_bytes()).unwrap()
    }

    #[test]
    fn run_automatic_reports_a_found_path() {
        let m = maze("7\n3\n#######\no  $ _#\n#######\n");
        let mut out = Vec::new();
        run_automatic(&m, &SolverConfig::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Score:"));
        assert!(text.contains("Calculated in"));
    }

    #[test]
    fn run_automatic_reports_no_path() {
        let m = maze("5\n3\n#####\no#_ #\n#####\n");
        let mut out = Vec::new();
        run_automatic(&m, &SolverConfig::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No path found!"));
    }
}
