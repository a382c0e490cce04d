use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::Serialize;

use crate::maze::cell::CellIndex;

/// Résultat d'une recherche, lu par l'affichage pendant qu'elle tourne.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum SolvedRoute {
    /// La recherche n'est pas terminée.
    #[default]
    Pending,
    /// La recherche est terminée sans atteindre de sortie.
    NoSolution,
    /// Cellules entre le départ et la sortie, toutes deux exclues.
    Found(Vec<CellIndex>),
}

impl SolvedRoute {
    pub fn is_pending(&self) -> bool {
        matches!(self, SolvedRoute::Pending)
    }

    pub fn cells(&self) -> Option<&[CellIndex]> {
        match self {
            SolvedRoute::Found(cells) => Some(cells),
            _ => None,
        }
    }
}

/// Emplacement partagé entre le thread de recherche et celui qui l'interroge.
#[derive(Debug, Clone, Default)]
pub struct RouteSlot {
    inner: Arc<RwLock<SolvedRoute>>,
}

impl RouteSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> SolvedRoute {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, route: SolvedRoute) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = route;
    }

    pub fn reset(&self) {
        self.set(SolvedRoute::Pending);
    }
}

/// Reçoit les cellules ouvertes au fur et à mesure de la recherche.
pub trait VisitObserver: Send + Sync {
    fn visited(&self, index: CellIndex);
}

/// Tampon des cellules nouvellement visitées.
///
/// Le thread de recherche y ajoute, l'affichage vide le tout d'un coup avec
/// [`VisitedBuffer::drain`], à son propre rythme.
#[derive(Debug, Default)]
pub struct VisitedBuffer {
    cells: Mutex<Vec<CellIndex>>,
}

impl VisitedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, index: CellIndex) {
        self.cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(index);
    }

    /// Lit et vide le tampon sous un seul verrou.
    pub fn drain(&self) -> Vec<CellIndex> {
        std::mem::take(&mut *self.cells.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn clear(&self) {
        self.cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.cells.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VisitObserver for VisitedBuffer {
    fn visited(&self, index: CellIndex) {
        self.push(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_route_slot_is_shared() {
        let slot = RouteSlot::new();
        let writer = slot.clone();
        assert!(slot.get().is_pending());

        writer.set(SolvedRoute::Found(vec![CellIndex::new(1, 1)]));
        assert_eq!(slot.get().cells(), Some(&[CellIndex::new(1, 1)][..]));

        writer.set(SolvedRoute::NoSolution);
        assert_eq!(slot.get(), SolvedRoute::NoSolution);
        assert_eq!(slot.get().cells(), None);

        slot.reset();
        assert!(writer.get().is_pending());
    }

    #[test]
    fn test_drain_empties_buffer() {
        let buffer = VisitedBuffer::new();
        buffer.visited(CellIndex::new(0, 1));
        buffer.visited(CellIndex::new(0, 2));
        assert_eq!(buffer.len(), 2);

        assert_eq!(
            buffer.drain(),
            vec![CellIndex::new(0, 1), CellIndex::new(0, 2)]
        );
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_empty());
    }

    #[test]
    fn test_concurrent_drains_lose_nothing() {
        let buffer = Arc::new(VisitedBuffer::new());
        let writer = Arc::clone(&buffer);
        let producer = thread::spawn(move || {
            for column in 0..1000 {
                writer.visited(CellIndex::new(0, column));
            }
        });

        let mut seen = Vec::new();
        while !producer.is_finished() {
            seen.extend(buffer.drain());
        }
        producer.join().unwrap();
        seen.extend(buffer.drain());

        let expected: Vec<_> = (0..1000).map(|column| CellIndex::new(0, column)).collect();
        assert_eq!(seen, expected);
    }
}
