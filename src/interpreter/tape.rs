//! Fixed-length byte tape

/// The machine's memory: a fixed number of byte cells, all zero at creation.
///
/// Cell arithmetic wraps modulo 256. Index validity is the caller's concern;
/// [`crate::interpreter::engine::Machine`] keeps its data pointer in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Box<[u8]>,
}

impl Tape {
    /// Create a zeroed tape. A length of zero is raised to one cell.
    pub fn new(len: usize) -> Self {
        Tape {
            cells: vec![0; len.max(1)].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub(crate) fn set(&mut self, index: usize, value: u8) {
        self.cells[index] = value;
    }

    pub(crate) fn increment(&mut self, index: usize) {
        self.cells[index] = self.cells[index].wrapping_add(1);
    }

    pub(crate) fn decrement(&mut self, index: usize) {
        self.cells[index] = self.cells[index].wrapping_sub(1);
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Cells within `radius` of `center`, clamped to the tape, paired with their index.
    pub fn window(&self, center: usize, radius: usize) -> impl Iterator<Item = (usize, u8)> + '_ {
        let start = center.saturating_sub(radius);
        let end = center.saturating_add(radius).saturating_add(1).min(self.len());
        (start..end).map(move |i| (i, self.cells[i]))
    }

    /// True when every cell is zero.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tape_is_zeroed() {
        let tape = Tape::new(16);
        assert_eq!(tape.len(), 16);
        assert!(tape.is_blank());
    }

    #[test]
    fn test_zero_length_is_raised() {
        assert_eq!(Tape::new(0).len(), 1);
    }

    #[test]
    fn test_cells_wrap() {
        let mut tape = Tape::new(2);
        tape.decrement(0);
        assert_eq!(tape.get(0), Some(255));
        tape.increment(0);
        assert_eq!(tape.get(0), Some(0));
        tape.set(1, 255);
        tape.increment(1);
        assert_eq!(tape.get(1), Some(0));
    }

    #[test]
    fn test_window_clamps_to_tape() {
        let mut tape = Tape::new(5);
        tape.set(4, 7);
        let cells: Vec<_> = tape.window(4, 2).collect();
        assert_eq!(cells, vec![(2, 0), (3, 0), (4, 7)]);
        let cells: Vec<_> = tape.window(0, 1).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0)]);
    }
}
