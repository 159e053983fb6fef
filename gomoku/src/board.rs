mod error;

pub use error::*;
use serde::{Deserialize, Serialize};

/// The side length of a standard Gomoku board.
pub const DEFAULT_BOARD_SIZE: usize = 15;

/// A cell coordinate on a square board.
///
/// Coordinates can also be represented as a single flattened index in
/// row-major order, which is what the hub protocol uses. See
/// [`Self::to_index()`] and [`Self::from_index()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

/// Whose stone occupies a cell, from the point of view of the local agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Owner {
    Own,
    Opponent,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Own,
    Opponent,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the row-major index of this coordinate, or `None` if it is not
    /// on a board of the given size.
    pub fn to_index(self, board_size: usize) -> Option<usize> {
        if self.row < board_size && self.col < board_size {
            Some(self.row * board_size + self.col)
        } else {
            None
        }
    }

    /// The inverse of [`Self::to_index()`].
    pub fn from_index(index: usize, board_size: usize) -> Option<Self> {
        if index < board_size * board_size {
            Some(Self {
                row: index / board_size,
                col: index % board_size,
            })
        } else {
            None
        }
    }

    /// Moves `steps` cells into direction `(d_row, d_col)`.
    ///
    /// Returns `None` when this leaves a board of the given size.
    pub fn step(self, (d_row, d_col): (isize, isize), steps: usize, board_size: usize) -> Option<Self> {
        let steps = isize::try_from(steps).ok()?;
        let row = self.row.checked_add_signed(d_row.checked_mul(steps)?)?;
        let col = self.col.checked_add_signed(d_col.checked_mul(steps)?)?;
        let coord = Self { row, col };
        coord.to_index(board_size).map(|_| coord)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<Owner> for Cell {
    fn from(owner: Owner) -> Self {
        match owner {
            Owner::Own => Cell::Own,
            Owner::Opponent => Cell::Opponent,
        }
    }
}

/// The local replica of a square Gomoku board.
///
/// Every cell starts out empty and can be occupied exactly once. There is no
/// way to clear a cell again; a new game gets a new board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Row-major.
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board with `size` x `size` cells.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// The side length.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn flatten(&self, coord: Coord) -> Option<usize> {
        coord.to_index(self.size)
    }

    pub fn unflatten(&self, index: usize) -> Option<Coord> {
        Coord::from_index(index, self.size)
    }

    /// Returns the state of the cell, or `None` if it is out of bounds.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.flatten(coord).map(|idx| self.cells[idx])
    }

    pub fn get_index(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Puts a stone on the cell with the given flattened index.
    ///
    /// The cell must be empty. On error, the board is unchanged.
    pub fn place(&mut self, index: usize, owner: Owner) -> Result<Coord, IllegalPlacement> {
        let coord = self.unflatten(index).ok_or(IllegalPlacement::OutOfBounds {
            index,
            board_size: self.size,
        })?;
        match self.cells[index] {
            Cell::Empty => {
                self.cells[index] = Cell::from(owner);
                Ok(coord)
            }
            existing => Err(IllegalPlacement::Occupied { index, existing }),
        }
    }

    /// All cells with their coordinates, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &cell)| (Coord::new(idx / size, idx % size), cell))
    }

    /// The empty cells, in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.iter()
            .filter(|&(_, cell)| cell == Cell::Empty)
            .map(|(coord, _)| coord)
    }

    pub fn num_stones(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != Cell::Empty).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Empty)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::{BoardSize, PlacementSequence};

    quickcheck! {
        fn flattened_index_round_trips(size: BoardSize) -> bool {
            let size = size.0;
            let board = Board::new(size);
            (0..size).all(|row| {
                (0..size).all(|col| {
                    let coord = Coord::new(row, col);
                    board.flatten(coord).and_then(|idx| board.unflatten(idx)) == Some(coord)
                })
            })
        }
    }

    quickcheck! {
        fn indices_outside_the_board_do_not_wrap(size: BoardSize, excess: u8) -> bool {
            let size = size.0;
            let board = Board::new(size);
            board.unflatten(size * size + excess as usize).is_none()
                && board.flatten(Coord::new(size, excess as usize % size)).is_none()
                && board.flatten(Coord::new(excess as usize % size, size)).is_none()
        }
    }

    quickcheck! {
        fn cells_are_written_at_most_once(input: PlacementSequence) -> bool {
            let mut board = Board::new(input.size);
            let mut occupied = BTreeSet::new();
            for &(index, owner) in &input.placements {
                let before = board.clone();
                match board.place(index, owner) {
                    Ok(_) => {
                        // Succeeds exactly when the cell was not written before
                        if !occupied.insert(index) {
                            return false;
                        }
                        if board.get_index(index) != Some(Cell::from(owner)) {
                            return false;
                        }
                    }
                    Err(IllegalPlacement::Occupied { existing, .. }) => {
                        if !occupied.contains(&index) || existing == Cell::Empty || board != before {
                            return false;
                        }
                    }
                    Err(IllegalPlacement::OutOfBounds { .. }) => {
                        if index < input.size * input.size || board != before {
                            return false;
                        }
                    }
                }
            }
            board.num_stones() == occupied.len()
        }
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::new(5);
        assert_eq!(board.num_cells(), 25);
        assert_eq!(board.num_stones(), 0);
        assert_eq!(board.empty_cells().count(), 25);
        assert!(board.iter().all(|(_, cell)| cell == Cell::Empty));
    }

    #[test]
    fn occupied_cell_is_rejected_without_changes() {
        let mut board = Board::new(3);
        assert_eq!(board.place(4, Owner::Opponent), Ok(Coord::new(1, 1)));
        let before = board.clone();
        assert_eq!(
            board.place(4, Owner::Own),
            Err(IllegalPlacement::Occupied {
                index: 4,
                existing: Cell::Opponent
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn empty_cells_are_row_major() {
        let mut board = Board::new(3);
        board.place(0, Owner::Own).unwrap();
        board.place(4, Owner::Opponent).unwrap();
        let empty: Vec<usize> = board
            .empty_cells()
            .map(|coord| board.flatten(coord).unwrap())
            .collect();
        assert_eq!(empty, vec![1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn step_stays_on_board() {
        let coord = Coord::new(1, 3);
        assert_eq!(coord.step((1, -1), 2, 5), Some(Coord::new(3, 1)));
        assert_eq!(coord.step((-1, 0), 1, 5), Some(Coord::new(0, 3)));
        assert_eq!(coord.step((-1, 0), 2, 5), None);
        assert_eq!(coord.step((0, 1), 2, 5), None);
    }

    #[test]
    fn full_board() {
        let mut board = Board::new(2);
        for idx in 0..4 {
            assert!(!board.is_full());
            board.place(idx, Owner::Own).unwrap();
        }
        assert!(board.is_full());
        assert_eq!(board.empty_cells().next(), None);
    }
}
