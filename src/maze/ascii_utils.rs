/*!
 * # Affichage texte du labyrinthe
 *
 * Ce module convertit une grille de `CellView` en texte, avec les cellules
 * visitées et le chemin trouvé par-dessus. Il sert au programme en ligne de
 * commande, à la place de l'affichage graphique.
 */

use std::collections::HashSet;

use crate::maze::cell::{CellIndex, CellType, CellView};
use crate::maze::progress::SolvedRoute;

const SOLID: char = '#';
const START: char = '^';
const EXIT: char = 'E';
const OPEN: char = ' ';
const VISITED: char = '.';
const ROUTE: char = 'o';

/// Génère une représentation ASCII du labyrinthe.
///
/// # Arguments
///
/// * `layout` - La grille à dessiner, ligne par ligne.
/// * `visited` - Les cellules ouvertes déjà explorées, marquées `.`.
/// * `route` - Le chemin trouvé, marqué `o` ; ignoré s'il n'y en a pas.
///
/// # Retour
///
/// Une `String` avec une ligne de texte par ligne de la grille.
pub fn render_maze(layout: &[Vec<CellView>], visited: &[CellIndex], route: &SolvedRoute) -> String {
    let visited: HashSet<CellIndex> = visited.iter().copied().collect();
    let route: HashSet<CellIndex> = route.cells().unwrap_or_default().iter().copied().collect();

    let mut out = String::new();
    for row in layout {
        let line: String = row
            .iter()
            .map(|cell| match cell.cell_type {
                CellType::Solid => SOLID,
                CellType::Start => START,
                CellType::Exit => EXIT,
                CellType::Open if route.contains(&cell.index) => ROUTE,
                CellType::Open if visited.contains(&cell.index) => VISITED,
                CellType::Open => OPEN,
            })
            .collect();
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Formate un chemin sous la forme `(1, 1) -> (2, 1)`.
pub fn format_route(route: &SolvedRoute) -> String {
    match route {
        SolvedRoute::Pending => "pending".to_string(),
        SolvedRoute::NoSolution => "no solution".to_string(),
        SolvedRoute::Found(cells) if cells.is_empty() => "exit next to start".to_string(),
        SolvedRoute::Found(cells) => cells
            .iter()
            .map(CellIndex::to_string)
            .collect::<Vec<_>>()
            .join(" -> "),
    }
}
