//! A single right-infinite tape. Cells past the stored end read as blank, and touching them
//! materialises them.

use crate::types::{Symbol, BLANK_SYMBOL};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<Symbol>,
}

impl Tape {
    pub fn new(cells: Vec<Symbol>) -> Self {
        Self { cells }
    }

    /// Returns the symbol at `index`, first extending the tape with blanks up to and including
    /// `index` if it lies past the current end. The engine never lets `index` get further than
    /// [`MAX_TAPE_GAP`](crate::types::MAX_TAPE_GAP) cells past the end.
    pub fn read(&mut self, index: usize) -> &str {
        self.ensure(index);
        &self.cells[index]
    }

    /// Writes `symbol` at `index`, extending the tape with blanks if needed.
    pub fn write(&mut self, index: usize, symbol: Symbol) {
        self.ensure(index);
        self.cells[index] = symbol;
    }

    pub fn cells(&self) -> &[Symbol] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn ensure(&mut self, index: usize) {
        if index >= self.cells.len() {
            self.cells.resize(index + 1, BLANK_SYMBOL.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tape(s: &[&str]) -> Tape {
        Tape::new(s.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_read_within_bounds_does_not_grow() {
        let mut t = tape(&["a", "b"]);
        assert_eq!(t.read(1), "b");
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_read_at_end_appends_one_blank() {
        let mut t = tape(&["a"]);
        assert_eq!(t.read(1), BLANK_SYMBOL);
        assert_eq!(t.cells(), &["a".to_string(), String::new()][..]);
    }

    #[test]
    fn test_read_far_past_end_fills_gap_with_blanks() {
        let mut t = Tape::default();
        assert_eq!(t.read(3), BLANK_SYMBOL);
        assert_eq!(t.len(), 4);
        assert!(t.cells().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_write_extends() {
        let mut t = tape(&["a"]);
        t.write(2, "z".to_string());
        assert_eq!(t, tape(&["a", "", "z"]));
    }
}
