use quickcheck::Arbitrary;

use crate::{Board, Owner};

/// A board side length that is small enough to enumerate.
#[derive(Clone, Copy, Debug)]
pub struct BoardSize(pub usize);

impl quickcheck::Arbitrary for BoardSize {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        BoardSize(1 + usize::arbitrary(g) % 19)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new((1..self.0).rev().map(BoardSize))
    }
}

/// Placements on a board, including some repeated and some out-of-bounds
/// indices.
#[derive(Clone, Debug)]
pub struct PlacementSequence {
    pub size: usize,
    pub placements: Vec<(usize, Owner)>,
}

impl quickcheck::Arbitrary for PlacementSequence {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let size = BoardSize::arbitrary(g).0;
        // A few indices past the end of the board
        let index_range = size * size + 3;
        let num_placements = usize::arbitrary(g) % (2 * index_range);
        let placements = (0..num_placements)
            .map(|_| (usize::arbitrary(g) % index_range, Owner::arbitrary(g)))
            .collect();
        PlacementSequence { size, placements }
    }
}

/// A board with a random filling.
#[derive(Clone, Debug)]
pub struct RandomBoard(pub Board);

impl quickcheck::Arbitrary for RandomBoard {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let size = BoardSize::arbitrary(g).0;
        let mut board = Board::new(size);
        for idx in 0..size * size {
            match u8::arbitrary(g) % 3 {
                0 => {
                    board.place(idx, Owner::Own).unwrap();
                }
                1 => {
                    board.place(idx, Owner::Opponent).unwrap();
                }
                _ => {}
            }
        }
        RandomBoard(board)
    }
}

impl quickcheck::Arbitrary for Owner {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Owner::Own, Owner::Opponent]).unwrap()
    }
}
