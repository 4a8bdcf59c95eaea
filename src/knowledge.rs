//! The knowledge base: certainty sets plus the live sentences, and the
//! deduction that turns revealed hints into known mines and known safe cells.

use std::collections::BTreeSet;
use itertools::iproduct;
use log::{debug, trace};

use crate::board::{BoardSize, Point};
use crate::error::{Error, Result};
use crate::sentence::Sentence;

/// Largest hint a cell can show.
pub const MAX_HINT: usize = 8;

pub struct KnowledgeBase {
    size: BoardSize,
    moves_made: BTreeSet<Point>,
    mines: BTreeSet<Point>,
    safes: BTreeSet<Point>,
    sentences: Vec<Sentence>,
}

impl KnowledgeBase {
    pub fn new(size: BoardSize) -> KnowledgeBase {
        KnowledgeBase {
            size,
            moves_made: BTreeSet::new(),
            mines: BTreeSet::new(),
            safes: BTreeSet::new(),
            sentences: Vec::new(),
        }
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn moves_made(&self) -> &BTreeSet<Point> {
        &self.moves_made
    }

    pub fn mines(&self) -> &BTreeSet<Point> {
        &self.mines
    }

    pub fn safes(&self) -> &BTreeSet<Point> {
        &self.safes
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    fn check_bounds(&self, point: &Point) -> Result<()> {
        if self.size.contains(point) {
            Ok(())
        } else {
            Err(Error::OutOfBounds{point: *point, height: self.size.height, width: self.size.width})
        }
    }

    /// Records an externally asserted mine, e.g. a flag, and deduces what follows.
    ///
    /// Rejected when the cell is known safe or a held sentence already leaves
    /// no mines for it.
    pub fn mark_mine(&mut self, cell: Point) -> Result<()> {
        self.check_bounds(&cell)?;
        let implied_safe = self.sentences.iter()
            .any(|sentence| sentence.count() == 0 && sentence.cells().contains(&cell));
        if self.safes.contains(&cell) || implied_safe {
            return Err(Error::ConflictingMark{point: cell, requested: "mine", known: "safe"});
        }
        self.record_mine(cell);
        self.infer();
        Ok(())
    }

    /// Records an externally asserted safe cell and deduces what follows.
    ///
    /// Rejected when the cell is a known mine or a held sentence needs every
    /// one of its cells to be a mine.
    pub fn mark_safe(&mut self, cell: Point) -> Result<()> {
        self.check_bounds(&cell)?;
        let implied_mine = self.sentences.iter()
            .any(|sentence| sentence.count() == sentence.len() && sentence.cells().contains(&cell));
        if self.mines.contains(&cell) || implied_mine {
            return Err(Error::ConflictingMark{point: cell, requested: "safe cell", known: "mine"});
        }
        self.record_safe(cell);
        self.infer();
        Ok(())
    }

    fn record_mine(&mut self, cell: Point) -> bool {
        assert!(!self.safes.contains(&cell), "{:?} deduced to be a mine but is known safe", cell);
        for sentence in self.sentences.iter_mut() {
            sentence.mark_mine(&cell);
        }
        self.mines.insert(cell)
    }

    fn record_safe(&mut self, cell: Point) -> bool {
        assert!(!self.mines.contains(&cell), "{:?} deduced to be safe but is a known mine", cell);
        for sentence in self.sentences.iter_mut() {
            sentence.mark_safe(&cell);
        }
        self.safes.insert(cell)
    }

    /// Integrates the hint revealed at `cell` and deduces everything that follows.
    ///
    /// Fails without touching any state when `cell` is off the board, was
    /// already played, is a known mine, or when `count` cannot be right given
    /// the cell's neighbors and what is already known about them.
    pub fn add_knowledge(&mut self, cell: Point, count: usize) -> Result<()> {
        self.check_bounds(&cell)?;
        if self.moves_made.contains(&cell) {
            return Err(Error::AlreadyPlayed{point: cell});
        }
        if self.mines.contains(&cell) {
            return Err(Error::ConflictingMark{point: cell, requested: "safe cell", known: "mine"});
        }

        let neighbors = self.size.neighbor_points(&cell);
        if count > MAX_HINT || count > neighbors.len() {
            return Err(Error::CountOutOfRange{point: cell, count, neighbors: neighbors.len()});
        }
        let known_mines = neighbors.iter().filter(|p| self.mines.contains(*p)).count();
        let undecided = neighbors.iter()
            .filter(|p| !self.mines.contains(*p) && !self.safes.contains(*p))
            .count();
        if count < known_mines || count > known_mines + undecided {
            return Err(Error::InconsistentHint{point: cell, count});
        }

        self.moves_made.insert(cell);
        self.record_safe(cell);

        let mut sentence = Sentence::new(neighbors, count);
        for safe in &self.safes {
            sentence.mark_safe(safe);
        }
        for mine in &self.mines {
            sentence.mark_mine(mine);
        }
        trace!("hint at {:?} gives {}", cell, sentence);
        self.insert_sentence(sentence);

        let passes = self.infer();
        debug!("added {:?} = {}: {} passes, {} mines, {} safe, {} sentences",
               cell, count, passes, self.mines.len(), self.safes.len(), self.sentences.len());
        Ok(())
    }

    /// Inserts `sentence` unless one over the same cells is already held.
    fn insert_sentence(&mut self, sentence: Sentence) -> bool {
        match self.sentences.iter().find(|held| **held == sentence) {
            Some(held) => {
                assert_eq!(held.count(), sentence.count(),
                           "contradicting sentences {} and {}", held, sentence);
                false
            }
            None => {
                self.sentences.push(sentence);
                true
            }
        }
    }

    /// Runs both deduction passes until neither changes anything. Returns the
    /// number of passes made.
    pub fn infer(&mut self) -> usize {
        let mut passes = 0;
        loop {
            passes += 1;
            let resolved = self.resolve_known();
            let derived = self.resolve_subsets();
            trace!("pass {}: resolved={} derived={} sentences={}",
                   passes, resolved, derived, self.sentences.len());
            if !resolved && !derived {
                return passes;
            }
        }
    }

    /// Moves every certainty a sentence implies into the global sets, then
    /// drops the sentences left with no cells.
    fn resolve_known(&mut self) -> bool {
        let mut changed = false;
        for i in 0..self.sentences.len() {
            let safes = self.sentences[i].known_safes();
            let mines = self.sentences[i].known_mines();
            for cell in safes {
                changed |= self.record_safe(cell);
            }
            for cell in mines {
                changed |= self.record_mine(cell);
            }
        }

        let before = self.sentences.len();
        self.sentences.retain(|sentence| !sentence.is_empty());
        changed || self.sentences.len() != before
    }

    /// Replaces every sentence that strictly contains another with the
    /// difference of the two. Pairs are taken from the collection as it stood
    /// at the start of the pass; removals and insertions happen afterwards.
    fn resolve_subsets(&mut self) -> bool {
        let mut derived = Vec::new();
        let mut subsumed = BTreeSet::new();
        let n = self.sentences.len();
        for (a, b) in iproduct!(0..n, 0..n) {
            let (subset, superset) = (&self.sentences[a], &self.sentences[b]);
            if a == b || subset.is_empty() || !subset.is_strict_subset_of(superset) {
                continue;
            }
            derived.push(subset.difference(superset));
            subsumed.insert(b);
        }

        let mut index = 0;
        self.sentences.retain(|_| {
            let keep = !subsumed.contains(&index);
            index += 1;
            keep
        });

        let mut inserted = false;
        for sentence in derived {
            inserted |= self.insert_sentence(sentence);
        }
        !subsumed.is_empty() || inserted
    }
}

#[cfg(test)]
use proptest::prelude::*;
