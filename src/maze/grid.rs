use crate::maze::cell::{Cell, CellIndex, CellView};
use crate::maze::direction::Direction;

/// Grille de cellules, lignes puis colonnes.
///
/// Les lignes peuvent avoir des longueurs différentes.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub(crate) fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Nombre de lignes.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, index: CellIndex) -> Option<&Cell> {
        self.rows.get(index.row)?.get(index.column)
    }

    pub fn cell_mut(&mut self, index: CellIndex) -> Option<&mut Cell> {
        self.rows.get_mut(index.row)?.get_mut(index.column)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    /// Voisines non visitées et traversables, dans l'ordre gauche, droite,
    /// haut, bas.
    pub fn next_available_cells(&self, index: CellIndex) -> Vec<CellIndex> {
        let Some(cell) = self.cell(index) else {
            return Vec::new();
        };
        Direction::SEARCH_ORDER
            .iter()
            .filter_map(|&direction| cell.links.get(direction))
            .filter(|&next| {
                self.cell(next)
                    .is_some_and(|c| c.cell_type.is_passable() && !c.visited)
            })
            .collect()
    }

    /// Remet à zéro l'état de recherche de toutes les cellules.
    pub fn clear(&mut self) {
        self.rows.iter_mut().flatten().for_each(Cell::clear);
    }

    pub fn views(&self) -> Vec<Vec<CellView>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(CellView::from).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::cell::CellType;

    fn corridor() -> Grid {
        // ^ E
        let mut cells: Vec<Cell> = [CellType::Start, CellType::Open, CellType::Exit]
            .into_iter()
            .enumerate()
            .map(|(column, t)| Cell::new(t, CellIndex::new(0, column)))
            .collect();
        for column in 1..cells.len() {
            let (west, east) = cells.split_at_mut(column);
            west[column - 1].links.set(Direction::East, east[0].index);
            east[0].links.set(Direction::West, west[column - 1].index);
        }
        Grid::from_rows(vec![cells])
    }

    #[test]
    fn test_next_available_skips_visited() {
        let mut grid = corridor();
        let middle = CellIndex::new(0, 1);
        assert_eq!(
            grid.next_available_cells(middle),
            vec![CellIndex::new(0, 0), CellIndex::new(0, 2)]
        );

        grid.cell_mut(CellIndex::new(0, 0)).unwrap().visited = true;
        assert_eq!(grid.next_available_cells(middle), vec![CellIndex::new(0, 2)]);

        grid.clear();
        assert_eq!(grid.next_available_cells(middle).len(), 2);
    }

    #[test]
    fn test_out_of_bounds_lookup() {
        let grid = corridor();
        assert!(grid.cell(CellIndex::new(1, 0)).is_none());
        assert!(grid.cell(CellIndex::new(0, 3)).is_none());
        assert!(grid.next_available_cells(CellIndex::new(5, 5)).is_empty());
    }
}
