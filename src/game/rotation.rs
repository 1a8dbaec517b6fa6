use std::collections::VecDeque;

use crate::error::RotationError;

/// Turn order as a FIFO: the head moves next, and after its turn it goes to
/// the back of the queue.
///
/// A rotation is never empty and never holds the same entry twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation<T> {
    entries: VecDeque<T>,
}

impl<T: PartialEq> Rotation<T> {
    pub fn new(entries: impl IntoIterator<Item = T>) -> Result<Self, RotationError> {
        let entries: VecDeque<T> = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(RotationError::Empty);
        }
        for (index, entry) in entries.iter().enumerate() {
            if entries.iter().take(index).any(|earlier| earlier == entry) {
                return Err(RotationError::Duplicate { index });
            }
        }
        Ok(Rotation { entries })
    }
}

impl<T> Rotation<T> {
    /// Whose turn it is
    pub fn current(&self) -> &T {
        &self.entries[0]
    }

    /// Move the head to the back
    pub fn advance(&mut self) {
        self.entries.rotate_left(1);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Same order, different entries. `f` must keep entries distinct.
    pub(crate) fn map<U>(&self, f: impl FnMut(&T) -> U) -> Rotation<U> {
        Rotation {
            entries: self.entries.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Rotation<T> {
    /// Copy of this rotation advanced by one turn
    pub fn advanced(&self) -> Self {
        let mut next = self.clone();
        next.advance();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            Rotation::<char>::new(Vec::new()).unwrap_err(),
            RotationError::Empty
        );
    }

    #[test]
    fn test_rejects_duplicates() {
        assert_eq!(
            Rotation::new(['x', 'o', 'x']).unwrap_err(),
            RotationError::Duplicate { index: 2 }
        );
    }

    #[test]
    fn test_advance_moves_head_to_back() {
        let mut rotation = Rotation::new(['x', 'o', 'z']).unwrap();
        assert_eq!(*rotation.current(), 'x');
        rotation.advance();
        assert_eq!(rotation.iter().copied().collect::<Vec<_>>(), vec!['o', 'z', 'x']);
        rotation.advance();
        rotation.advance();
        assert_eq!(*rotation.current(), 'x');
    }

    #[test]
    fn test_advanced_leaves_original() {
        let rotation = Rotation::new(['x', 'o']).unwrap();
        let next = rotation.advanced();
        assert_eq!(*rotation.current(), 'x');
        assert_eq!(*next.current(), 'o');
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_map_keeps_order() {
        let rotation = Rotation::new([1, 2, 3]).unwrap().advanced();
        let mapped = rotation.map(|n| n * 10);
        assert_eq!(mapped.iter().copied().collect::<Vec<_>>(), vec![20, 30, 10]);
    }
}
