use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use log::debug;

pub mod maze;

use crate::maze::builder::MazeBuilder;
use crate::maze::cell::{CellIndex, CellType, CellView};
use crate::maze::error::{MazeError, Result};
use crate::maze::map::{MazeMap, SolveHandle};
use crate::maze::progress::{SolvedRoute, VisitedBuffer};
use crate::maze::route_finder::{BfsRouteFinder, SearchState};
use crate::maze::source::MazeSource;

pub use crate::maze::source::DATA_DIR;

// -----------------------------------------------------------------------------
// MazeInterface
// -----------------------------------------------------------------------------
/// Point d'entrée de l'affichage : construire, résoudre, interroger.
///
/// Garde le tampon des cellules visitées, partagé avec la recherche.
pub struct MazeInterface<S: MazeSource> {
    maze: MazeMap<S>,
    visited: Arc<VisitedBuffer>,
}

impl<S> MazeInterface<S>
where
    S: MazeSource,
    S::Symbol: Eq + Hash + Debug,
{
    pub fn new(source: S, symbols: HashMap<S::Symbol, CellType>) -> Self {
        let visited = Arc::new(VisitedBuffer::new());
        let solver = BfsRouteFinder::with_observer(visited.clone());
        let maze = MazeMap::new(source, MazeBuilder::new(symbols)).with_solver(Arc::new(solver));
        Self { maze, visited }
    }

    pub fn available_mazes(&self) -> Result<Vec<String>> {
        self.maze.available()
    }

    /// Construit le labyrinthe `name` et renvoie sa grille pour l'affichage.
    pub fn build_maze(&mut self, name: &str) -> Result<Vec<Vec<CellView>>> {
        self.maze.build(name)?;
        Ok(self.maze.snapshot().to_vec())
    }

    /// Lance la résolution sans attendre ; voir `solved_route`.
    pub fn solve_maze(&mut self, max_length: usize, slow_down: bool) -> Result<SolveHandle> {
        if self.maze.is_solving() {
            return Err(MazeError::SolveInProgress);
        }
        // Les cellules d'une recherche précédente ne doivent pas ressortir.
        self.visited.clear();
        self.maze.solve(max_length, slow_down)
    }

    pub fn solved_route(&self) -> SolvedRoute {
        self.maze.route()
    }

    /// Cellules visitées depuis le dernier appel.
    pub fn new_visited_cells(&self) -> Vec<CellIndex> {
        let cells = self.visited.drain();
        if !cells.is_empty() {
            debug!("{} new visited cells", cells.len());
        }
        cells
    }

    pub fn is_solving(&self) -> bool {
        self.maze.is_solving()
    }

    /// Attend la fin de la recherche en cours.
    pub fn wait(&mut self) -> Option<SearchState> {
        self.maze.wait()
    }

    pub fn maze(&self) -> &MazeMap<S> {
        &self.maze
    }
}

// -----------------------------------------------------------------------------
// TEST
// -----------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::source::MemorySource;
    use crate::maze::symbols::default_symbols;
    use std::collections::HashSet;
    use std::thread;
    use std::time::Duration;

    fn interface() -> MazeInterface<MemorySource> {
        let source = MemorySource::new()
            .with_maze("dummy_maze.txt", &["#E#", "^ #", "# #"])
            .with_maze("open_field.txt", &["^    ", "     ", "     ", "#####", "   E "])
            .with_maze("loop.txt", &["^   #", " ## #", "    E"]);
        MazeInterface::new(source, default_symbols())
    }

    #[test]
    fn test_dummy_maze_end_to_end() {
        let mut ui = interface();
        assert_eq!(
            ui.available_mazes().unwrap(),
            vec!["dummy_maze.txt", "loop.txt", "open_field.txt"]
        );

        let grid = ui.build_maze("dummy_maze.txt").unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[1][0].cell_type, CellType::Start);

        ui.solve_maze(0, false).unwrap();
        ui.wait();
        assert_eq!(
            ui.solved_route(),
            SolvedRoute::Found(vec![CellIndex::new(1, 1)])
        );
        assert_eq!(ui.new_visited_cells(), vec![CellIndex::new(1, 1)]);
        assert!(ui.new_visited_cells().is_empty());
    }

    #[test]
    fn test_polling_collects_every_open_cell_once() {
        let mut ui = interface();
        let grid = ui.build_maze("open_field.txt").unwrap();
        ui.solve_maze(0, true).unwrap();

        let mut seen = Vec::new();
        while ui.solved_route().is_pending() {
            seen.extend(ui.new_visited_cells());
            thread::sleep(Duration::from_millis(3));
        }
        seen.extend(ui.new_visited_cells());
        ui.wait();

        // Sortie inaccessible : toutes les cellules ouvertes de la zone du départ.
        assert_eq!(ui.solved_route(), SolvedRoute::NoSolution);
        let unique: HashSet<_> = seen.iter().copied().collect();
        assert_eq!(unique.len(), seen.len());
        assert_eq!(seen.len(), 14);
        for index in &seen {
            assert_eq!(grid[index.row][index.column].cell_type, CellType::Open);
            assert!(index.row < 3);
        }
        // Ordre du parcours en largeur : distance au départ croissante.
        let distances: Vec<usize> = seen.iter().map(|i| i.row + i.column).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_second_solve_starts_with_empty_buffer() {
        let mut ui = interface();
        ui.build_maze("loop.txt").unwrap();
        ui.solve_maze(0, false).unwrap();
        ui.wait();
        let first_route = ui.solved_route();
        assert_eq!(first_route.cells().map(<[CellIndex]>::len), Some(5));

        // Les cellules de la première recherche ne sont pas relues.
        ui.solve_maze(0, false).unwrap();
        ui.wait();
        let second = ui.new_visited_cells();
        let unique: HashSet<_> = second.iter().copied().collect();
        assert_eq!(unique.len(), second.len());
        assert_eq!(ui.solved_route(), first_route);
    }

    #[test]
    fn test_max_length_through_interface() {
        let mut ui = interface();
        ui.build_maze("loop.txt").unwrap();
        ui.solve_maze(4, false).unwrap();
        ui.wait();
        assert_eq!(ui.solved_route(), SolvedRoute::NoSolution);

        ui.solve_maze(5, false).unwrap();
        ui.wait();
        assert!(ui.solved_route().cells().is_some());
    }

    #[test]
    fn test_build_errors_surface() {
        let mut ui = interface();
        assert!(matches!(
            ui.build_maze("missing.txt"),
            Err(MazeError::ResourceNotFound(_))
        ));
        assert!(matches!(ui.solve_maze(0, false), Err(MazeError::EmptyMaze)));
    }
}
