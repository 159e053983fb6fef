use std::cmp::Ordering;
use std::time::{Duration, Instant};

use crate::{Board, Cell, Coord};

/// The eight neighbor directions as `(d_row, d_col)`.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Picks the empty cell that extends the longest run of own stones.
///
/// Candidates are the empty cells in row-major order. A candidate only
/// replaces the current selection if its score is strictly higher, so ties
/// go to the earlier cell.
///
/// The time limit is checked before each candidate is scored. When it has run
/// out, the selection so far is returned, or the last empty cell if no
/// candidate was scored at all. Returns `None` only if the board is full.
pub fn select_move(board: &Board, time_limit: Duration) -> Option<Coord> {
    let start = Instant::now();
    let candidates: Vec<Coord> = board.empty_cells().collect();
    // A poor but legal first guess
    let fallback = *candidates.last()?;

    let mut selection: Option<(Coord, usize)> = None;
    for coord in candidates {
        if start.elapsed() >= time_limit {
            break;
        }
        let score = longest_own_run(board, coord);
        if selection.map_or(true, |(_, best_score)| score > best_score) {
            selection = Some((coord, score));
        }
    }

    Some(selection.map_or(fallback, |(coord, _)| coord))
}

/// The score of a candidate cell: the longest run of own stones that starts
/// right next to it, over all eight directions.
pub fn longest_own_run(board: &Board, coord: Coord) -> usize {
    DIRECTIONS
        .iter()
        .map(|&direction| own_run(board, coord, direction))
        .max()
        .unwrap_or(0)
}

fn own_run(board: &Board, coord: Coord, direction: (isize, isize)) -> usize {
    let limit = steps_to_edge(board.size(), coord, direction);
    (1..=limit)
        .take_while(|&steps| {
            coord
                .step(direction, steps, board.size())
                .and_then(|neighbor| board.get(neighbor))
                == Some(Cell::Own)
        })
        .count()
}

// How many steps can be taken from `coord` before leaving the board.
fn steps_to_edge(board_size: usize, coord: Coord, (d_row, d_col): (isize, isize)) -> usize {
    let along_axis = |pos: usize, delta: isize| match delta.cmp(&0) {
        Ordering::Less => pos,
        Ordering::Greater => board_size - 1 - pos,
        Ordering::Equal => usize::MAX,
    };
    along_axis(coord.row, d_row).min(along_axis(coord.col, d_col))
}
