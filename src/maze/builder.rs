use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::debug;

use crate::maze::cell::{Cell, CellIndex, CellType};
use crate::maze::direction::Direction;
use crate::maze::error::{MazeError, Result};
use crate::maze::grid::Grid;

/// Construit une grille liée à partir de lignes de symboles.
///
/// La table `symbols` associe chaque symbole brut à un type de cellule. Le
/// constructeur ne garde aucun état entre deux appels à [`MazeBuilder::build`].
#[derive(Debug)]
pub struct MazeBuilder<S> {
    symbols: HashMap<S, CellType>,
    rows: Vec<Vec<Cell>>,
    start: Option<CellIndex>,
}

impl<S> MazeBuilder<S>
where
    S: Eq + Hash + Debug,
{
    pub fn new(symbols: HashMap<S, CellType>) -> Self {
        Self {
            symbols,
            rows: Vec::new(),
            start: None,
        }
    }

    pub fn symbols(&self) -> &HashMap<S, CellType> {
        &self.symbols
    }

    /// Crée la grille et renvoie la cellule de départ.
    ///
    /// Chaque cellule est liée à sa voisine de gauche et à celle du dessus au
    /// moment de sa création, dans les deux sens.
    pub fn build<I, R>(&mut self, rows: I) -> Result<(Grid, CellIndex)>
    where
        I: IntoIterator<Item = Result<R>>,
        R: IntoIterator<Item = S>,
    {
        let outcome = self.create_rows(rows);
        let rows = std::mem::take(&mut self.rows);
        let start = self.start.take();
        outcome?;

        let start = start.ok_or(MazeError::MissingStartBlock)?;
        debug!("built maze of {} rows, start at {}", rows.len(), start);
        Ok((Grid::from_rows(rows), start))
    }

    fn create_rows<I, R>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<R>>,
        R: IntoIterator<Item = S>,
    {
        for row_data in rows {
            let row = self.create_row(row_data?)?;
            self.rows.push(row);
        }
        Ok(())
    }

    fn create_row<R>(&mut self, row_data: R) -> Result<Vec<Cell>>
    where
        R: IntoIterator<Item = S>,
    {
        let row_index = self.rows.len();
        let mut row: Vec<Cell> = Vec::new();

        for (column, symbol) in row_data.into_iter().enumerate() {
            let index = CellIndex::new(row_index, column);
            let cell_type = self.cell_type(&symbol, index)?;

            if cell_type == CellType::Start {
                if let Some(first) = self.start {
                    return Err(MazeError::MultipleStartBlocks {
                        first,
                        second: index,
                    });
                }
                self.start = Some(index);
            }

            let mut cell = Cell::new(cell_type, index);
            if Direction::West.step(index).is_some() {
                if let Some(west) = row.last_mut() {
                    link(&mut cell, west, Direction::West);
                }
            }
            if let Some(north_index) = Direction::North.step(index) {
                // Une ligne plus courte au-dessus ne donne pas de voisine.
                if let Some(north) = self.rows[north_index.row].get_mut(column) {
                    link(&mut cell, north, Direction::North);
                }
            }
            row.push(cell);
        }

        Ok(row)
    }

    fn cell_type(&self, symbol: &S, index: CellIndex) -> Result<CellType> {
        self.symbols
            .get(symbol)
            .copied()
            .ok_or_else(|| MazeError::InvalidSymbol {
                symbol: format!("{:?}", symbol),
                index,
            })
    }
}

fn link(cell: &mut Cell, neighbour: &mut Cell, towards: Direction) {
    cell.links.set(towards, neighbour.index);
    neighbour.links.set(towards.turn_back(), cell.index);
}
