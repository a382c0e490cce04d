use crate::maze::cell::CellIndex;

/// Les quatre directions de la grille.
///
/// `North` est la ligne du dessus, `West` la colonne de gauche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Ordre d'expansion du parcours en largeur : gauche, droite, haut, bas.
    ///
    /// Cet ordre départage les chemins de même longueur.
    pub const SEARCH_ORDER: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    /// Fait demi tour (par ex. North -> South)
    pub fn turn_back(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Position voisine dans cette direction, `None` si on sort de la grille
    /// par le haut ou par la gauche.
    pub fn step(self, index: CellIndex) -> Option<CellIndex> {
        match self {
            Direction::North => index
                .row
                .checked_sub(1)
                .map(|row| CellIndex::new(row, index.column)),
            Direction::South => Some(CellIndex::new(index.row + 1, index.column)),
            Direction::West => index
                .column
                .checked_sub(1)
                .map(|column| CellIndex::new(index.row, column)),
            Direction::East => Some(CellIndex::new(index.row, index.column + 1)),
        }
    }
}
