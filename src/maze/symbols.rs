use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::maze::cell::CellType;
use crate::maze::error::{MazeError, Result};

/// Table symbole -> type de cellule pour les fichiers texte.
pub type SymbolMap = HashMap<char, CellType>;

/// Table utilisée par les fichiers du dossier `data`.
pub fn default_symbols() -> SymbolMap {
    HashMap::from([
        ('#', CellType::Solid),
        ('E', CellType::Exit),
        ('^', CellType::Start),
        (' ', CellType::Open),
    ])
}

/// Lit une table depuis un objet JSON, par ex. `{"#": "Solid", ".": "Open"}`.
///
/// Chaque clé doit être un seul caractère.
pub fn parse_symbols(json: &str) -> Result<SymbolMap> {
    let raw: HashMap<String, CellType> =
        serde_json::from_str(json).map_err(|e| MazeError::InvalidSymbolMap(e.to_string()))?;

    raw.into_iter()
        .map(|(key, cell_type)| {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(symbol), None) => Ok((symbol, cell_type)),
                _ => Err(MazeError::InvalidSymbolMap(format!(
                    "key {:?} is not a single character",
                    key
                ))),
            }
        })
        .collect()
}

pub fn load_symbols(path: &Path) -> Result<SymbolMap> {
    let json = fs::read_to_string(path)?;
    parse_symbols(&json)
}
