use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use log::debug;

use crate::maze::error::{MazeError, Result};

/// Dossier par défaut des fichiers de labyrinthe.
pub const DATA_DIR: &str = "data";

/// Fournit les lignes d'un labyrinthe à partir de son nom.
pub trait MazeSource: Send {
    type Symbol;
    type Rows: Iterator<Item = Result<Vec<Self::Symbol>>>;

    /// Noms disponibles, triés.
    fn available(&self) -> Result<Vec<String>>;

    /// Lignes du labyrinthe `name`, lues à la demande.
    fn rows(&self, name: &str) -> Result<Self::Rows>;
}

/// Labyrinthes stockés sous forme de fichiers texte dans un dossier.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for DataDir {
    fn default() -> Self {
        Self::new(DATA_DIR)
    }
}

impl MazeSource for DataDir {
    type Symbol = char;
    type Rows = MazeLines;

    fn available(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                MazeError::ResourceNotFound(self.root.display().to_string())
            }
            _ => MazeError::Io(e),
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn rows(&self, name: &str) -> Result<MazeLines> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(MazeError::ResourceNotFound(name.to_string()));
        }
        debug!("reading maze file {}", path.display());
        let file = File::open(&path)?;
        Ok(MazeLines {
            lines: BufReader::new(file).lines(),
        })
    }
}

/// Lignes d'un fichier de labyrinthe, sans le retour à la ligne final.
#[derive(Debug)]
pub struct MazeLines {
    lines: Lines<BufReader<File>>,
}

impl Iterator for MazeLines {
    type Item = Result<Vec<char>>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        Some(
            line.map(|line| strip_line_end(&line).chars().collect())
                .map_err(MazeError::from),
        )
    }
}

/// `lines()` enlève déjà `\n` et `\r\n` ; reste un `\r` isolé en fin de fichier.
fn strip_line_end(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Labyrinthes gardés en mémoire, ligne par ligne.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    mazes: BTreeMap<String, Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, lines: &[&str]) {
        self.mazes.insert(
            name.to_string(),
            lines.iter().map(|line| line.to_string()).collect(),
        );
    }

    pub fn with_maze(mut self, name: &str, lines: &[&str]) -> Self {
        self.insert(name, lines);
        self
    }
}

impl MazeSource for MemorySource {
    type Symbol = char;
    type Rows = std::vec::IntoIter<Result<Vec<char>>>;

    fn available(&self) -> Result<Vec<String>> {
        Ok(self.mazes.keys().cloned().collect())
    }

    fn rows(&self, name: &str) -> Result<Self::Rows> {
        let lines = self
            .mazes
            .get(name)
            .ok_or_else(|| MazeError::ResourceNotFound(name.to_string()))?;
        let rows: Vec<Result<Vec<char>>> = lines
            .iter()
            .map(|line| Ok(line.chars().collect()))
            .collect();
        Ok(rows.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Dossier temporaire propre à chaque test.
    fn scratch_dir() -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let dir = std::env::temp_dir().join(format!(
            "rusty-maze-{}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn collect(rows: MazeLines) -> Vec<String> {
        rows.map(|row| row.unwrap().into_iter().collect()).collect()
    }

    #[test]
    fn test_reads_rows_and_strips_line_ends() {
        let dir = scratch_dir();
        let mut file = File::create(dir.join("dummy_maze.txt")).unwrap();
        file.write_all(b"#E#\r\n^  \n# #\r").unwrap();

        let source = DataDir::new(&dir);
        let rows = collect(source.rows("dummy_maze.txt").unwrap());
        // Les espaces en fin de ligne sont des cellules ouvertes.
        assert_eq!(rows, vec!["#E#", "^  ", "# #"]);

        // Chaque appel relit le fichier depuis le début.
        assert_eq!(collect(source.rows("dummy_maze.txt").unwrap()).len(), 3);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let dir = scratch_dir();
        let source = DataDir::new(&dir);
        assert!(matches!(
            source.rows("nope.txt"),
            Err(MazeError::ResourceNotFound(name)) if name == "nope.txt"
        ));
        fs::create_dir(dir.join("sub")).unwrap();
        assert!(matches!(
            source.rows("sub"),
            Err(MazeError::ResourceNotFound(_))
        ));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_available_lists_files_sorted() {
        let dir = scratch_dir();
        File::create(dir.join("b.txt")).unwrap();
        File::create(dir.join("a.txt")).unwrap();
        fs::create_dir(dir.join("nested")).unwrap();

        let source = DataDir::new(&dir);
        assert_eq!(source.available().unwrap(), vec!["a.txt", "b.txt"]);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_available_without_directory() {
        let source = DataDir::new(scratch_dir().join("missing"));
        assert!(matches!(
            source.available(),
            Err(MazeError::ResourceNotFound(_))
        ));
    }

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new()
            .with_maze("small", &["^E"])
            .with_maze("corridor", &["^  E"]);
        assert_eq!(source.available().unwrap(), vec!["corridor", "small"]);
        let rows: Vec<_> = source.rows("small").unwrap().map(Result::unwrap).collect();
        assert_eq!(rows, vec![vec!['^', 'E']]);
        assert!(matches!(
            source.rows("other"),
            Err(MazeError::ResourceNotFound(_))
        ));
    }
}
