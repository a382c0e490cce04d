use std::fmt;

use serde::{Deserialize, Serialize};

use crate::maze::direction::Direction;

/// Position d'une cellule dans la grille.
///
/// Les lignes sont comptées depuis le haut, les colonnes depuis la gauche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellIndex {
    pub row: usize,
    pub column: usize,
}

impl CellIndex {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Nature d'une cellule du labyrinthe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    Open,
    Start,
    Exit,
    Solid,
}

impl CellType {
    /// Une cellule `Solid` ne peut jamais être traversée.
    pub fn is_passable(self) -> bool {
        self != CellType::Solid
    }
}

/// Liens vers les quatre voisines d'une cellule.
///
/// Les liens sont des index dans la même grille, jamais des références.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    pub north: Option<CellIndex>,
    pub east: Option<CellIndex>,
    pub south: Option<CellIndex>,
    pub west: Option<CellIndex>,
}

impl Links {
    pub fn get(&self, direction: Direction) -> Option<CellIndex> {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    pub fn set(&mut self, direction: Direction, index: CellIndex) {
        let slot = match direction {
            Direction::North => &mut self.north,
            Direction::East => &mut self.east,
            Direction::South => &mut self.south,
            Direction::West => &mut self.west,
        };
        *slot = Some(index);
    }
}

/// Représente une cellule du labyrinthe.
///
/// Une cellule possède un type, ses liens vers ses voisines et l'état laissé
/// par la dernière recherche (visitée ou pas, chemin depuis le départ).
#[derive(Debug, Clone)]
pub struct Cell {
    pub cell_type: CellType,
    pub index: CellIndex,
    pub visited: bool,
    pub links: Links,
    /// Cellules intermédiaires entre le départ et cette cellule, départ exclu.
    pub route_to_start: Vec<CellIndex>,
}

impl Cell {
    /// Crée une cellule non visitée et sans voisines.
    pub fn new(cell_type: CellType, index: CellIndex) -> Self {
        Self {
            cell_type,
            index,
            visited: false,
            links: Links::default(),
            route_to_start: Vec::new(),
        }
    }

    /// Efface l'état de recherche ; le type et les liens sont conservés.
    pub fn clear(&mut self) {
        self.visited = false;
        self.route_to_start.clear();
    }
}

/// Vue d'une cellule destinée à l'affichage : ni liens, ni état de recherche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub cell_type: CellType,
    pub index: CellIndex,
}

impl From<&Cell> for CellView {
    fn from(cell: &Cell) -> Self {
        Self {
            cell_type: cell.cell_type,
            index: cell.index,
        }
    }
}
