use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

use crate::maze::builder::MazeBuilder;
use crate::maze::cell::{CellIndex, CellView};
use crate::maze::error::{MazeError, Result};
use crate::maze::grid::Grid;
use crate::maze::progress::{RouteSlot, SolvedRoute};
use crate::maze::route_finder::{RouteFinder, SearchOptions, SearchState};
use crate::maze::source::MazeSource;

/// Suivi d'une recherche lancée par [`MazeMap::solve`].
#[derive(Debug, Clone)]
pub struct SolveHandle {
    route: RouteSlot,
    finished: Arc<AtomicBool>,
}

impl SolveHandle {
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    pub fn route(&self) -> SolvedRoute {
        self.route.get()
    }
}

/// Le labyrinthe courant : sa grille, son départ et la recherche en cours.
///
/// La grille est modifiée uniquement par le thread de recherche ; l'affichage
/// lit `snapshot()`, copié à la construction, et le `SolvedRoute` partagé.
pub struct MazeMap<S: MazeSource> {
    source: S,
    builder: MazeBuilder<S::Symbol>,
    grid: Arc<Mutex<Grid>>,
    layout: Vec<Vec<CellView>>,
    start: Option<CellIndex>,
    solver: Option<Arc<dyn RouteFinder>>,
    route: RouteSlot,
    solver_has_run: bool,
    worker: Option<JoinHandle<SearchState>>,
}

impl<S> MazeMap<S>
where
    S: MazeSource,
    S::Symbol: Eq + Hash + Debug,
{
    /// Crée une carte vide, sans algorithme de recherche.
    pub fn new(source: S, builder: MazeBuilder<S::Symbol>) -> Self {
        Self {
            source,
            builder,
            grid: Arc::new(Mutex::new(Grid::default())),
            layout: Vec::new(),
            start: None,
            solver: None,
            route: RouteSlot::new(),
            solver_has_run: false,
            worker: None,
        }
    }

    pub fn with_solver(mut self, solver: Arc<dyn RouteFinder>) -> Self {
        self.solver = Some(solver);
        self
    }

    pub fn set_solver(&mut self, solver: Option<Arc<dyn RouteFinder>>) {
        self.solver = solver;
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn available(&self) -> Result<Vec<String>> {
        self.source.available()
    }

    /// Remplace la grille par le labyrinthe `name`.
    ///
    /// En cas d'erreur, la grille précédente est conservée.
    pub fn build(&mut self, name: &str) -> Result<()> {
        self.ensure_idle()?;

        let rows = self.source.rows(name)?;
        let (grid, start) = self.builder.build(rows)?;
        info!("maze '{}' loaded: {} rows, start at {}", name, grid.len(), start);

        self.layout = grid.views();
        *self.lock_grid() = grid;
        self.start = Some(start);
        self.solver_has_run = false;
        self.worker = None;
        self.route.reset();
        Ok(())
    }

    /// Grille courante, en lecture seule.
    pub fn snapshot(&self) -> &[Vec<CellView>] {
        &self.layout
    }

    pub fn start(&self) -> Option<CellIndex> {
        self.start
    }

    pub fn route(&self) -> SolvedRoute {
        self.route.get()
    }

    pub fn is_solving(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }

    /// Lance la recherche dans un thread et rend la main tout de suite.
    ///
    /// Une recherche précédente terminée est d'abord effacée de la grille.
    /// Une seule recherche à la fois : `SolveInProgress` sinon.
    pub fn solve(&mut self, max_length: usize, slow_down: bool) -> Result<SolveHandle> {
        self.ensure_idle()?;

        if self.solver_has_run {
            self.clear();
        }
        let solver = self.solver.clone().ok_or(MazeError::NoSolverConfigured)?;
        if self.layout.is_empty() {
            return Err(MazeError::EmptyMaze);
        }
        let start = self.start.ok_or(MazeError::NoStartBlock)?;

        let options = SearchOptions {
            max_length,
            slow_down,
        };
        let handle = SolveHandle {
            route: self.route.clone(),
            finished: Arc::new(AtomicBool::new(false)),
        };

        let grid = Arc::clone(&self.grid);
        let route = self.route.clone();
        let finished = Arc::clone(&handle.finished);
        let worker = thread::Builder::new()
            .name("maze-solver".to_string())
            .spawn(move || {
                let mut grid = grid.lock().unwrap_or_else(PoisonError::into_inner);
                let state = solver.find_route(&mut grid, start, options, &route);
                finished.store(true, Ordering::Release);
                state
            })?;

        debug!("solver started from {} with {:?}", start, options);
        self.solver_has_run = true;
        self.worker = Some(worker);
        Ok(handle)
    }

    /// Attend la fin de la recherche en cours, s'il y en a une.
    pub fn wait(&mut self) -> Option<SearchState> {
        let worker = self.worker.take()?;
        match worker.join() {
            Ok(state) => Some(state),
            Err(_) => {
                warn!("solver thread panicked");
                None
            }
        }
    }

    fn ensure_idle(&mut self) -> Result<()> {
        if self.is_solving() {
            return Err(MazeError::SolveInProgress);
        }
        // Thread terminé : on récupère son état pour ne pas le laisser traîner.
        if let Some(state) = self.wait() {
            debug!("previous solve ended as {:?}", state);
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.route.reset();
        self.lock_grid().clear();
        self.solver_has_run = false;
    }

    fn lock_grid(&self) -> std::sync::MutexGuard<'_, Grid> {
        self.grid.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
