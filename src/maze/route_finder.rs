use std::collections::VecDeque;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use crate::maze::cell::{CellIndex, CellType};
use crate::maze::grid::Grid;
use crate::maze::progress::{RouteSlot, SolvedRoute, VisitObserver};

/// Pause avant chaque cellule quand la recherche est ralentie pour l'affichage.
pub const SLOW_DOWN_DELAY: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Longueur maximale du chemin ; 0 pour aucune limite.
    pub max_length: usize,
    pub slow_down: bool,
}

/// Exploring tant que la recherche tourne ; Solved et Exhausted sont finaux.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Exploring,
    Solved,
    Exhausted,
}

/// Algorithme de recherche branché sur un `MazeMap`.
pub trait RouteFinder: Send + Sync {
    fn find_route(
        &self,
        grid: &mut Grid,
        start: CellIndex,
        options: SearchOptions,
        route: &RouteSlot,
    ) -> SearchState;
}

/// Plus court chemin par parcours en largeur.
#[derive(Clone, Default)]
pub struct BfsRouteFinder {
    observer: Option<Arc<dyn VisitObserver>>,
}

impl BfsRouteFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(observer: Arc<dyn VisitObserver>) -> Self {
        Self {
            observer: Some(observer),
        }
    }
}

impl RouteFinder for BfsRouteFinder {
    fn find_route(
        &self,
        grid: &mut Grid,
        start: CellIndex,
        options: SearchOptions,
        route: &RouteSlot,
    ) -> SearchState {
        bfs_search(grid, start, options, route, self.observer.as_deref())
    }
}

/// Parcours en largeur depuis `start` jusqu'à la première sortie.
///
/// Écrit `SolvedRoute::Found` avec les cellules intermédiaires si une sortie
/// est atteinte, sinon `SolvedRoute::NoSolution`. Les cellules ouvertes sont
/// signalées à `observer` dans l'ordre où elles sont traitées.
///
/// La grille garde l'état de la recherche (`visited`, `route_to_start`) ; il
/// faut la remettre à zéro avec [`Grid::clear`] avant une nouvelle recherche.
pub fn bfs_search(
    grid: &mut Grid,
    start: CellIndex,
    options: SearchOptions,
    route: &RouteSlot,
    observer: Option<&dyn VisitObserver>,
) -> SearchState {
    let mut state = SearchState::Exploring;
    let mut frontier = VecDeque::new();

    match grid.cell_mut(start) {
        Some(cell) => {
            cell.visited = true;
            frontier.push_back(start);
        }
        None => warn!("start {} is outside of the grid", start),
    }

    while let Some(current) = frontier.pop_front() {
        let Some(cell) = grid.cell(current) else {
            continue;
        };

        // Les longueurs sortent de la file dans l'ordre croissant.
        if options.max_length != 0 && cell.route_to_start.len() > options.max_length {
            debug!(
                "route to {} exceeds max length {}",
                current, options.max_length
            );
            break;
        }

        if options.slow_down {
            thread::sleep(SLOW_DOWN_DELAY);
        }

        let cell_type = cell.cell_type;
        if cell_type == CellType::Open {
            if let Some(observer) = observer {
                observer.visited(current);
            }
        }

        if cell_type == CellType::Exit {
            let cells = cell.route_to_start.clone();
            info!("exit {} reached through {} cells", current, cells.len());
            route.set(SolvedRoute::Found(cells));
            state = SearchState::Solved;
            break;
        }

        let mut next_route = cell.route_to_start.clone();
        if current != start {
            next_route.push(current);
        }
        for next in grid.next_available_cells(current) {
            if let Some(next_cell) = grid.cell_mut(next) {
                next_cell.route_to_start = next_route.clone();
                next_cell.visited = true;
                frontier.push_back(next);
            }
        }
    }

    if state == SearchState::Exploring {
        info!("no route from {} found", start);
        route.set(SolvedRoute::NoSolution);
        state = SearchState::Exhausted;
    }
    state
}
