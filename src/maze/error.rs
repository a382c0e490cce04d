use std::io;

use thiserror::Error;

use crate::maze::cell::CellIndex;

/// Erreurs de construction et de lancement de la résolution.
///
/// L'absence de solution n'est pas une erreur : c'est `SolvedRoute::NoSolution`.
#[derive(Debug, Error)]
pub enum MazeError {
    #[error("maze '{0}' not found")]
    ResourceNotFound(String),
    #[error("cannot read maze data: {0}")]
    Io(#[from] io::Error),
    #[error("invalid symbol {symbol} at {index}")]
    InvalidSymbol { symbol: String, index: CellIndex },
    #[error("invalid symbol map: {0}")]
    InvalidSymbolMap(String),
    #[error("maze has no start block")]
    MissingStartBlock,
    #[error("maze has more than one start block: {first} and {second}")]
    MultipleStartBlocks { first: CellIndex, second: CellIndex },
    #[error("empty maze cannot be solved")]
    EmptyMaze,
    #[error("no start block to solve from")]
    NoStartBlock,
    #[error("no solver configured")]
    NoSolverConfigured,
    #[error("a solve is already running on this maze")]
    SolveInProgress,
}

pub type Result<T> = std::result::Result<T, MazeError>;
