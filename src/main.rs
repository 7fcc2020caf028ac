//! CLI entry point (`spec.md` §6), ported from `original_source/main.c`'s
//! argument handling (`--file`, `--generate [W H]`, `--challenge`) and
//! `mazest::main`'s terminal setup/teardown.

use std::io::Write;

use maze_solver::app;
use maze_solver::maze::{self, Maze};
use maze_solver::solver::SolverConfig;

/// `original_source/main.c` seeds its default maze at 50x15 before any
/// flag is parsed.
const DEFAULT_WIDTH: u8 = 49;
const DEFAULT_HEIGHT: u8 = 15;

fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", "maze-solver.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    guard
}

/// Parses `--file <path>`/`--generate [W H]`/`--challenge` the way
/// `original_source/main.c::get_input` walks `argv`: first match wins, and
/// an unrecognized argument is simply skipped rather than rejected.
enum Input {
    /// `--challenge`: solve once against a maze read from stdin, then exit.
    Challenge,
    /// `--file <path>` or `--generate [W H]` (or neither): run the menu
    /// with this maze preloaded, if any.
    Menu(Option<Maze>),
}

fn parse_args(args: &[String]) -> Input {
    for (i, arg) in args.iter().enumerate() {
        match arg.as_str() {
            "--challenge" => return Input::Challenge,
            "--file" => {
                if let Some(path) = args.get(i + 1) {
                    let parsed = std::fs::File::open(path)
                        .ok()
                        .map(std::io::BufReader::new)
                        .and_then(|r| Maze::parse(r).ok());
                    if let Some(maze) = parsed {
                        return Input::Menu(Some(maze));
                    }
                }
            }
            "--generate" => {
                // A bare `--generate` with no `<W> <H>` pair leaves width/height
                // at 0 rather than substituting a hidden default size, matching
                // `original_source/main.c::get_input`'s caller-initialized
                // out-params when `i + 2 < size` is false.
                let (width, height) = match (args.get(i + 1), args.get(i + 2)) {
                    (Some(w), Some(h)) => (
                        w.parse().unwrap_or(DEFAULT_WIDTH),
                        h.parse().unwrap_or(DEFAULT_HEIGHT),
                    ),
                    _ => (0, 0),
                };
                // Sizes <= 3 leave the flag inert (spec.md §6): fall through
                // to the unpreloaded menu instead of generating a degenerate maze.
                if width <= 3 && height <= 3 {
                    continue;
                }
                return Input::Menu(Some(maze::generator::generate(width, height, None)));
            }
            _ => continue,
        }
    }
    Input::Menu(None)
}

fn main() -> std::io::Result<()> {
    let _logging_guard = init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match parse_args(&args) {
        Input::Challenge => {
            let stdin = std::io::stdin();
            let maze = Maze::parse(stdin.lock())?;
            let mut stdout = std::io::stdout();
            app::run_automatic(&maze, &SolverConfig::from_env(), &mut stdout)?;
            stdout.flush()?;
            Ok(())
        }
        Input::Menu(maze) => {
            let mut stdout = std::io::stdout();
            app::setup_terminal(&mut stdout)?;
            let stdin = std::io::stdin();
            let result = app::run_menu(maze, &mut stdin.lock(), &mut stdout);
            app::restore_terminal(&mut stdout)?;
            result
        }
    }
}
