use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use itertools::Itertools;

use crate::board::Point;

/// A logical statement about the board: exactly `count` of `cells` are mines.
///
/// Two sentences are equal when they cover the same cells; the count is a fact
/// about those cells, so a consistent knowledge base never holds two sentences
/// that differ only in count.
#[derive(Debug, Clone)]
pub struct Sentence {
    cells: BTreeSet<Point>,
    count: usize
}

impl PartialEq for Sentence {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Sentence {}

impl Hash for Sentence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state)
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self.cells.iter().map(|p| format!("({}, {})", p.0, p.1)).join(", ");
        write!(f, "{{{}}} = {}", cells, self.count)
    }
}

impl Sentence {
    pub fn new<I: IntoIterator<Item = Point>>(cells: I, count: usize) -> Sentence {
        let cells: BTreeSet<Point> = cells.into_iter().collect();
        assert!(count <= cells.len(), "sentence claims {} mines among {} cells", count, cells.len());
        Sentence{cells, count}
    }

    pub fn cells(&self) -> &BTreeSet<Point> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn known_mines(&self) -> BTreeSet<Point> {
        if self.count == self.cells.len() {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    pub fn known_safes(&self) -> BTreeSet<Point> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Removes a cell known to be a mine. No-op when the cell is not covered.
    pub fn mark_mine(&mut self, cell: &Point) {
        if self.cells.remove(cell) {
            self.count = self.count.checked_sub(1)
                .unwrap_or_else(|| panic!("mine {:?} marked in a sentence with no mines left", cell));
        }
    }

    /// Removes a cell known to be safe. No-op when the cell is not covered.
    pub fn mark_safe(&mut self, cell: &Point) {
        self.cells.remove(cell);
    }

    pub fn is_strict_subset_of(&self, other: &Sentence) -> bool {
        self.cells.len() < other.cells.len() && self.cells.is_subset(&other.cells)
    }

    /// The subset rule: when `self` is a subset of `superset`, the cells only
    /// `superset` covers hold the difference of the two counts.
    pub fn difference(&self, superset: &Sentence) -> Sentence {
        let count = superset.count.checked_sub(self.count)
            .unwrap_or_else(|| panic!("inconsistent sentences: {} is a subset of {}", self, superset));
        Sentence::new(superset.cells.difference(&self.cells).copied(), count)
    }
}

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardSize;

    fn sentence_strategy() -> impl Strategy<Value = Sentence> {
        prop::collection::btree_set((0..4usize, 0..4usize), 0..10)
            .prop_flat_map(|cells| {
                let len = cells.len();
                (Just(cells), 0..=len)
            })
            .prop_map(|(cells, count)| Sentence::new(cells.into_iter().map(|(r, c)| Point(r, c)), count))
    }

    proptest! {
        #[test]
        fn zero_count_means_all_safe(sentence in sentence_strategy()) {
            if sentence.count() == 0 {
                prop_assert_eq!(&sentence.known_safes(), sentence.cells());
                prop_assert!(sentence.known_mines().is_empty());
            }
        }

        #[test]
        fn full_count_means_all_mines(sentence in sentence_strategy()) {
            if !sentence.is_empty() && sentence.count() == sentence.len() {
                prop_assert_eq!(&sentence.known_mines(), sentence.cells());
                prop_assert!(sentence.known_safes().is_empty());
            }
        }

        #[test]
        fn marking_absent_cell_changes_nothing(sentence in sentence_strategy(), r in 4..8usize, c in 0..8usize) {
            let mut marked = sentence.clone();
            marked.mark_mine(&Point(r, c));
            marked.mark_safe(&Point(r, c));
            prop_assert_eq!(marked.cells(), sentence.cells());
            prop_assert_eq!(marked.count(), sentence.count());
        }
    }

    #[test]
    fn empty_sentence_knows_nothing() {
        let sentence = Sentence::new(vec![], 0);
        assert!(sentence.known_mines().is_empty());
        assert!(sentence.known_safes().is_empty());
    }

    #[test]
    fn mark_mine_decrements_count() {
        let mut sentence = Sentence::new(vec![Point(0, 0), Point(0, 1), Point(1, 0)], 2);
        sentence.mark_mine(&Point(0, 1));
        assert_eq!(sentence.count(), 1);
        assert_eq!(sentence.len(), 2);
        sentence.mark_safe(&Point(0, 0));
        assert_eq!(sentence.count(), 1);
        assert_eq!(sentence.known_mines().into_iter().collect::<Vec<_>>(), vec![Point(1, 0)]);
    }

    #[test]
    #[should_panic]
    fn mark_mine_below_zero_panics() {
        let mut sentence = Sentence::new(vec![Point(0, 0), Point(0, 1)], 0);
        sentence.mark_mine(&Point(0, 0));
    }

    #[test]
    fn equality_ignores_count() {
        let cells = BoardSize::new(2, 2).points();
        assert_eq!(Sentence::new(cells.clone(), 1), Sentence::new(cells, 3));
    }

    #[test]
    fn difference_applies_subset_rule() {
        let a = Sentence::new(vec![Point(0, 0), Point(0, 1)], 1);
        let b = Sentence::new(vec![Point(0, 0), Point(0, 1), Point(0, 2)], 1);
        assert!(a.is_strict_subset_of(&b));
        assert!(!b.is_strict_subset_of(&a));
        assert!(!a.is_strict_subset_of(&a));
        let derived = a.difference(&b);
        assert_eq!(derived.cells().iter().copied().collect::<Vec<_>>(), vec![Point(0, 2)]);
        assert_eq!(derived.count(), 0);
    }

    #[test]
    fn display_lists_cells_and_count() {
        let sentence = Sentence::new(vec![Point(1, 2), Point(0, 3)], 1);
        assert_eq!(sentence.to_string(), "{(0, 3), (1, 2)} = 1");
    }
}
