use crate::{Board, Cell};

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '·',
            Cell::Own => '●',
            Cell::Opponent => '○',
        }
    }
}

/// Draws the board in a box, with column numbers on top and row numbers on
/// the left. Own stones are `●`, opponent stones `○`.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size = self.size();
        // Only the last digit fits above a cell
        write!(f, "     ")?;
        for col in 0..size {
            write!(f, "{} ", col % 10)?;
        }
        write!(f, "\n    ╭")?;
        for _ in 0..size {
            write!(f, "──")?;
        }
        write!(f, "╮")?;

        for (coord, cell) in self.iter() {
            if coord.col == 0 {
                write!(f, "\n{:>3} │", coord.row)?;
            }
            write!(f, "{} ", cell.symbol())?;
            if coord.col + 1 == size {
                write!(f, "│")?;
            }
        }

        write!(f, "\n    ╰")?;
        for _ in 0..size {
            write!(f, "──")?;
        }
        write!(f, "╯")
    }
}

#[cfg(test)]
mod tests {
    use crate::{Board, Owner};

    #[test]
    fn render_small_board() {
        let mut board = Board::new(3);
        board.place(0, Owner::Own).unwrap();
        board.place(5, Owner::Opponent).unwrap();
        let expected = [
            "     0 1 2 ",
            "    ╭──────╮",
            "  0 │● · · │",
            "  1 │· · ○ │",
            "  2 │· · · │",
            "    ╰──────╯",
        ]
        .join("\n");
        assert_eq!(board.to_string(), expected);
    }
}
