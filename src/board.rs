use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;
use itertools::{iproduct, Itertools};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    Mine,
    Empty
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnowledgeState {
    Unknown,
    Flag,
    Known
}

impl KnowledgeState {
    pub fn is_known(&self) -> bool{
        match *self {
            KnowledgeState::Known => true,
            _ => false
        }
    }

    pub fn is_flag(&self) -> bool{
        match *self {
            KnowledgeState::Flag => true,
            _ => false
        }
    }
}

#[derive(Debug)]
pub struct Cell {
    pub content: Content,
    pub mined_neighbor_count: usize,
    pub knowledge: KnowledgeState,
    pub point: Point
}

impl Cell {
    fn create_empty(point: Point) -> Cell {
        Cell{content: Content::Empty, mined_neighbor_count: 0, knowledge: KnowledgeState::Unknown, point}
    }

    pub fn toggle_flag(&mut self){
        let new_state = match self.knowledge {
            KnowledgeState::Known => KnowledgeState::Known,
            KnowledgeState::Flag => KnowledgeState::Unknown,
            KnowledgeState::Unknown => KnowledgeState::Flag
        };
        self.knowledge = new_state;
    }

    pub fn is_mine(&self) -> bool {
        self.content == Content::Mine
    }

    fn to_str(&self) -> String {
        match (&self.knowledge, &self.content) {
            (KnowledgeState::Flag, _) => String::from("▶"),
            (KnowledgeState::Unknown, _) => String::from("□"),
            (_, Content::Mine) => String::from("X"),
            (_, Content::Empty) => {
                if self.mined_neighbor_count == 0{
                    String::from("_")
                }
                else{
                    self.mined_neighbor_count.to_string()
                }
            }
        }
    }
}

/// A cell coordinate, `(row, col)`. Ordered row-major.
#[derive(Debug, Eq, PartialEq, Clone, Hash, Copy, PartialOrd, Ord)]
pub struct Point(pub usize, pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    pub height: usize,
    pub width: usize
}

impl BoardSize {
    pub fn new(height: usize, width: usize) -> BoardSize {
        BoardSize{height, width}
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.0 < self.height && point.1 < self.width
    }

    pub fn points(&self) -> Vec<Point> {
        (0..self.area()).filter_map(|x| self.point_from_integer(x)).collect()
    }

    pub fn point_from_integer(&self, x: usize) -> Option<Point> {
        if x >= self.area() {
            return None
        }
        Some(Point(x/self.width, x%self.width))
    }

    /// The 8-neighborhood of `point`, clipped to the board, excluding `point` itself.
    pub fn neighbor_points(&self, point: &Point) -> Vec<Point>{
        iproduct!(-1i64..2, -1i64..2)
            .filter(|&(i, j)| i != 0 || j != 0)
            .map(|(i, j)| (i + point.0 as i64, j + point.1 as i64))
            .filter(|&(r, c)| r >= 0 && r < self.height as i64 && c >= 0 && c < self.width as i64)
            .map(|(r, c)| Point(r as usize, c as usize))
            .collect()
    }
}

fn sample_points<R: Rng + ?Sized>(size: &BoardSize, n: usize, rng: &mut R) -> Option<Vec<Point>>{
    if n > size.area() {
        return None
    }
    let mut possible: Vec<usize> = (0..size.area()).collect();
    possible.shuffle(rng);
    Some(possible.into_iter().take(n).filter_map(|x| size.point_from_integer(x)).collect())
}

/// Result of revealing a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Hint(usize),
    Mine
}

pub struct Board {
    pub size: BoardSize,
    field: Vec<Vec<Cell>>,
    pub mine_count: usize,
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for j in 0..self.size.width {
            write!(f, "{}", j % 10)?;
        }
        writeln!(f)?;
        for (i, row) in self.field.iter().enumerate() {
            writeln!(f, "{:>2} {}", i, row.iter().map(Cell::to_str).join(""))?;
        }
        Ok(())
    }
}

impl Board {
    /// Places `mine_count` mines uniformly at random.
    pub fn new<R: Rng + ?Sized>(size: BoardSize, mine_count: usize, rng: &mut R) -> Result<Board> {
        let mines = sample_points(&size, mine_count, rng)
            .ok_or(Error::TooManyMines{mines: mine_count, area: size.area()})?;
        Ok(Board::with_mines(size, &mines))
    }

    /// Builds a board with mines at `mines`. Points off the board are ignored.
    pub fn with_mines(size: BoardSize, mines: &[Point]) -> Board {
        let mut field = Vec::with_capacity(size.height);
        for i in 0..size.height {
            let mut row_vec = Vec::with_capacity(size.width);
            for j in 0..size.width {
                row_vec.push(Cell::create_empty(Point(i, j)));
            }
            field.push(row_vec);
        }

        let mut board = Board {size, field, mine_count: 0};
        for point in mines.iter().filter(|point| size.contains(point)) {
            board.place_mine(point);
        }
        board
    }

    fn place_mine(&mut self, point: &Point) {
        if self.retrieve_cell(point).is_mine() {
            return
        }
        self.retrieve_cell_mutable(point).content = Content::Mine;
        self.mine_count += 1;
        for neighbor in self.size.neighbor_points(point){
            self.retrieve_cell_mutable(&neighbor).mined_neighbor_count += 1;
        }
    }

    pub fn retrieve_cell(&self, point: &Point) -> &Cell{
        &self.field[point.0][point.1]
    }

    fn retrieve_cell_mutable(&mut self, point: &Point) -> &mut Cell{
        &mut self.field[point.0][point.1]
    }

    pub fn is_mine(&self, point: &Point) -> bool {
        self.retrieve_cell(point).is_mine()
    }

    /// Number of mines among the neighbors of `point`, not counting the point itself.
    pub fn nearby_mines(&self, point: &Point) -> usize {
        self.retrieve_cell(point).mined_neighbor_count
    }

    pub fn is_flagged(&self, point: &Point) -> bool {
        self.retrieve_cell(point).knowledge.is_flag()
    }

    pub fn toggle_flag(&mut self, point: &Point){
        self.retrieve_cell_mutable(point).toggle_flag()
    }

    pub fn flag(&mut self, point: &Point) {
        let cell = self.retrieve_cell_mutable(point);
        if !cell.knowledge.is_known() {
            cell.knowledge = KnowledgeState::Flag;
        }
    }

    pub fn probe(&mut self, point: &Point) -> Probe {
        let cell = self.retrieve_cell_mutable(point);
        cell.knowledge = KnowledgeState::Known;
        match cell.content {
            Content::Mine => Probe::Mine,
            Content::Empty => Probe::Hint(cell.mined_neighbor_count)
        }
    }

    pub fn mines_found(&self) -> usize {
        self.field.iter().flatten()
            .filter(|cell| cell.knowledge.is_flag() && cell.is_mine())
            .count()
    }

    /// Won once every safe cell has been revealed.
    pub fn is_won(&self) -> bool {
        self.field.iter().flatten()
            .filter(|cell| !cell.is_mine())
            .all(|cell| cell.knowledge.is_known())
    }
}

#[cfg(test)]
use proptest::prelude::*;
