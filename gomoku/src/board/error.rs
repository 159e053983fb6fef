use crate::Cell;

/// The error type for [`Board::place()`](crate::Board::place), i.e. for putting a single stone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalPlacement {
    OutOfBounds { index: usize, board_size: usize },
    Occupied { index: usize, existing: Cell },
}

impl std::error::Error for IllegalPlacement {}

impl std::fmt::Display for IllegalPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalPlacement::OutOfBounds { index, board_size } => write!(
                f,
                "Cell index {} is outside of the {}x{} board",
                index, board_size, board_size
            ),
            IllegalPlacement::Occupied { index, existing } => write!(
                f,
                "Cell index {} is already occupied by {} stone",
                index,
                match existing {
                    Cell::Own => "an own",
                    Cell::Opponent => "an opponent",
                    Cell::Empty => "no",
                }
            ),
        }
    }
}
