use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use serde::Serialize;

use rusty_maze::maze::ascii_utils::{format_route, render_maze};
use rusty_maze::maze::progress::SolvedRoute;
use rusty_maze::maze::source::DataDir;
use rusty_maze::maze::symbols::{default_symbols, load_symbols};
use rusty_maze::{MazeInterface, DATA_DIR};

#[derive(Parser, Debug)]
#[command(name = "rusty-maze")]
#[command(about = "Shortest route through text mazes, by breadth-first search", long_about = None)]
struct Cli {
    /// Directory holding the maze files
    #[arg(long, env = "MAZE_DATA_DIR", default_value = DATA_DIR)]
    data_dir: PathBuf,

    /// JSON symbol map, e.g. {"#": "Solid", " ": "Open", "^": "Start", "E": "Exit"}
    #[arg(long)]
    symbols: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the mazes found in the data directory
    List,
    /// Build a maze and search its shortest route
    Solve {
        /// Maze file name inside the data directory
        name: String,

        /// Longest route to look for, 0 for no limit
        #[arg(long, default_value_t = 0)]
        max_length: usize,

        /// Pause between cells to watch the search progress
        #[arg(long)]
        slow_down: bool,

        /// Polling interval in milliseconds
        #[arg(long, default_value_t = 20)]
        refresh_ms: u64,

        /// Print a JSON report instead of the ASCII maze
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct SolveReport<'a> {
    maze: &'a str,
    status: &'static str,
    route: Vec<[usize; 2]>,
    visited: usize,
}

fn init_logger() {
    if std::env::var("MAZE_LOG").is_ok() {
        let e = env_logger::Env::new()
            .filter("MAZE_LOG")
            .write_style("MAZE_LOG_STYLE");
        env_logger::init_from_env(e);
    }
}

fn main() -> Result<()> {
    init_logger();
    let cli = Cli::parse();
    debug!("{:?}", cli);

    let symbols = match &cli.symbols {
        Some(path) => load_symbols(path)
            .with_context(|| format!("Failed to load symbol map {}", path.display()))?,
        None => default_symbols(),
    };
    let mut interface = MazeInterface::new(DataDir::new(&cli.data_dir), symbols);

    match cli.command {
        Command::List => {
            let names = interface
                .available_mazes()
                .with_context(|| format!("Failed to list mazes in {}", cli.data_dir.display()))?;
            for name in names {
                println!("{}", name);
            }
        }
        Command::Solve {
            name,
            max_length,
            slow_down,
            refresh_ms,
            json,
        } => {
            let layout = interface
                .build_maze(&name)
                .with_context(|| format!("Failed to build maze '{}'", name))?;
            interface
                .solve_maze(max_length, slow_down)
                .with_context(|| format!("Failed to start solving '{}'", name))?;

            let refresh = Duration::from_millis(refresh_ms);
            let mut visited = Vec::new();
            let route = loop {
                visited.extend(interface.new_visited_cells());
                let route = interface.solved_route();
                if !route.is_pending() {
                    // La recherche a tout signalé avant d'écrire le résultat.
                    visited.extend(interface.new_visited_cells());
                    break route;
                }
                thread::sleep(refresh);
            };
            interface.wait();
            info!("'{}' solved after visiting {} cells", name, visited.len());

            if json {
                let report = SolveReport {
                    maze: &name,
                    status: match route {
                        SolvedRoute::Found(_) => "found",
                        _ => "no_solution",
                    },
                    route: route
                        .cells()
                        .unwrap_or_default()
                        .iter()
                        .map(|index| [index.row, index.column])
                        .collect(),
                    visited: visited.len(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_maze(&layout, &visited, &route));
                println!("Route: {}", format_route(&route));
                if let Some(cells) = route.cells() {
                    println!("Length: {} cells between start and exit", cells.len());
                }
            }
        }
    }

    Ok(())
}
