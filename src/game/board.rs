use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Character used for an unmarked cell in the textual board form.
pub const EMPTY_SYMBOL: char = '.';

/// Line directions checked around a move: horizontal, vertical, diagonal ↘, diagonal ↙.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// The symbol a player places in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mark(char);

impl Mark {
    pub const fn new(symbol: char) -> Self {
        Mark(symbol)
    }

    pub fn symbol(self) -> char {
        self.0
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A board coordinate. Row 0 is the top, column 0 is the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Rectangular grid of cells, each unmarked (`None`) or holding a player's mark.
///
/// Cells are stored row-major in a single vector, so every row has the same
/// length. Cloning copies the whole grid, which is how the search gives each
/// branch its own board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Option<Mark>>,
}

impl Board {
    /// Create a new board with every cell unmarked
    pub fn new(height: usize, width: usize) -> Self {
        Board {
            height,
            width,
            cells: vec![None; height * width],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Get the cell at a position, `None` when the position is off the board
    pub fn get(&self, pos: Pos) -> Option<Option<Mark>> {
        self.contains(pos)
            .then(|| self.cells[pos.row * self.width + pos.col])
    }

    /// Get the mark at a position, `None` when unmarked or off the board
    pub fn mark_at(&self, pos: Pos) -> Option<Mark> {
        self.get(pos).flatten()
    }

    /// Mark an unmarked cell. Returns `false` and leaves the board untouched
    /// when the cell is off the board or already marked.
    pub fn place(&mut self, pos: Pos, mark: Mark) -> bool {
        if !self.contains(pos) {
            return false;
        }
        let cell = &mut self.cells[pos.row * self.width + pos.col];
        if cell.is_some() {
            return false;
        }
        *cell = Some(mark);
        true
    }

    /// Copy of this board with one more mark.
    pub(crate) fn with_mark(&self, pos: Pos, mark: Mark) -> Board {
        let mut next = self.clone();
        let placed = next.place(pos, mark);
        debug_assert!(placed, "with_mark on unavailable cell {pos}");
        next
    }

    /// Check if every cell is marked (vacuously true for an empty board)
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Unmarked coordinates in row-major order
    pub fn empty_cells(&self) -> Vec<Pos> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(idx, _)| Pos::new(idx / self.width, idx % self.width))
            .collect()
    }

    /// Check if the move at `pos` completed a run of `streak` equal marks.
    ///
    /// Each of the four lines through `pos` is scanned over a window of
    /// `2 * streak - 1` cells centred on the move. Window positions that fall
    /// off the board are skipped without breaking the run.
    pub fn check_win(&self, pos: Pos, streak: usize) -> bool {
        if self.height == 0 || streak == 0 {
            return false;
        }

        DIRECTIONS
            .iter()
            .any(|&(d_row, d_col)| self.check_line(pos, d_row, d_col, streak))
    }

    fn check_line(&self, pos: Pos, d_row: isize, d_col: isize, streak: usize) -> bool {
        let reach = streak as isize - 1;
        let mut run = 0;
        let mut previous: Option<Mark> = None;

        for step in -reach..=reach {
            let Some(cell) = self.cell_at(
                pos.row as isize + d_row * step,
                pos.col as isize + d_col * step,
            ) else {
                continue;
            };

            match cell {
                Some(mark) if previous == Some(mark) => run += 1,
                _ => run = 0,
            }

            // `run` counts equal neighbours, so the first cell of a run is the +1
            if run + 1 == streak {
                return true;
            }

            previous = cell;
        }

        false
    }

    fn cell_at(&self, row: isize, col: isize) -> Option<Option<Mark>> {
        if row < 0 || col < 0 {
            return None;
        }
        self.get(Pos::new(row as usize, col as usize))
    }

    /// Board reflected left to right
    pub fn mirrored(&self) -> Board {
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in self.cells.chunks(self.width.max(1)) {
            cells.extend(row.iter().rev().copied());
        }
        Board {
            height: self.height,
            width: self.width,
            cells,
        }
    }
}

/// Parses rows separated by `/` or newlines, with `.` for unmarked cells,
/// e.g. `"xxo/xoo/.x."`.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<Option<Mark>>> = s
            .split(['/', '\n'])
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .map(|row| {
                row.chars()
                    .map(|c| (c != EMPTY_SYMBOL).then_some(Mark(c)))
                    .collect()
            })
            .collect();

        let width = rows.first().map_or(0, Vec::len);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(BoardError::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }

        Ok(Board {
            height: rows.len(),
            width,
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            if row > 0 {
                write!(f, "/")?;
            }
            for col in 0..self.width {
                match self.cells[row * self.width + col] {
                    Some(mark) => write!(f, "{mark}")?,
                    None => write!(f, "{EMPTY_SYMBOL}")?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Mark = Mark::new('x');
    const O: Mark = Mark::new('o');

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_board_has_no_marks() {
        let board = Board::new(3, 4);
        assert_eq!(board.height(), 3);
        assert_eq!(board.width(), 4);
        for row in 0..3 {
            for col in 0..4 {
                assert_eq!(board.get(Pos::new(row, col)), Some(None));
            }
        }
        assert_eq!(board.get(Pos::new(3, 0)), None);
    }

    #[test]
    fn test_parse_and_display() {
        let b = board("xxo/xoo/.x.");
        assert_eq!(b.height(), 3);
        assert_eq!(b.width(), 3);
        assert_eq!(b.mark_at(Pos::new(0, 2)), Some(O));
        assert_eq!(b.mark_at(Pos::new(2, 0)), None);
        assert_eq!(b.to_string(), "xxo/xoo/.x.");
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let err = "xx/x".parse::<Board>().unwrap_err();
        assert_eq!(
            err,
            BoardError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_place_only_on_unmarked_cells() {
        let mut b = Board::new(2, 2);
        assert!(b.place(Pos::new(1, 1), X));
        assert!(!b.place(Pos::new(1, 1), O));
        assert_eq!(b.mark_at(Pos::new(1, 1)), Some(X));
        assert!(!b.place(Pos::new(2, 0), X));
    }

    #[test]
    fn test_with_mark_leaves_original_untouched() {
        let b = Board::new(1, 2);
        let child = b.with_mark(Pos::new(0, 1), X);
        assert_eq!(b.mark_at(Pos::new(0, 1)), None);
        assert_eq!(child.mark_at(Pos::new(0, 1)), Some(X));
    }

    // --- is_full / empty_cells ---

    #[test]
    fn test_empty_board_is_full() {
        assert!(Board::new(0, 0).is_full());
        assert!("".parse::<Board>().unwrap().is_full());
    }

    #[test]
    fn test_is_full() {
        assert!(board("x").is_full());
        assert!(!board(".").is_full());
        assert!(board("xo/ox").is_full());
    }

    #[test]
    fn test_empty_cells_row_major() {
        assert!(Board::new(0, 0).empty_cells().is_empty());
        assert!(board("x").empty_cells().is_empty());
        assert_eq!(
            board("..").empty_cells(),
            vec![Pos::new(0, 0), Pos::new(0, 1)]
        );
        assert_eq!(
            board("x.o/.x./o..").empty_cells(),
            vec![
                Pos::new(0, 1),
                Pos::new(1, 0),
                Pos::new(1, 2),
                Pos::new(2, 1),
                Pos::new(2, 2)
            ]
        );
    }

    #[test]
    fn test_marking_every_empty_cell_fills_board() {
        let mut b = board("x.o/.x./o..");
        assert!(!b.is_full());
        for pos in b.empty_cells() {
            assert!(b.place(pos, O));
        }
        assert!(b.is_full());
        assert!(b.empty_cells().is_empty());
    }

    // --- check_win ---

    #[test]
    fn test_zero_row_board_never_wins() {
        let b = Board::new(0, 0);
        assert!(!b.check_win(Pos::new(0, 0), 3));
        assert!(!b.check_win(Pos::new(5, 7), 1));
    }

    #[test]
    fn test_two_plus_one_is_not_over() {
        let b = board(".xx/x..");
        assert!(!b.check_win(Pos::new(0, 1), 3));
    }

    #[test]
    fn test_horizontal_win() {
        assert!(board("xxx").check_win(Pos::new(0, 0), 3));
        assert!(board("oxxx.").check_win(Pos::new(0, 2), 3));
    }

    #[test]
    fn test_vertical_win() {
        let b = board("x../x../x..");
        assert!(b.check_win(Pos::new(0, 0), 3));
        assert!(b.check_win(Pos::new(2, 0), 3));
    }

    #[test]
    fn test_diagonal_down_win() {
        let b = board("x../.x./..x");
        assert!(b.check_win(Pos::new(0, 0), 3));
        assert!(b.check_win(Pos::new(1, 1), 3));
    }

    #[test]
    fn test_diagonal_up_win() {
        let b = board("..x/.x./x..");
        assert!(b.check_win(Pos::new(0, 2), 3));
        assert!(b.check_win(Pos::new(2, 0), 3));
    }

    #[test]
    fn test_mixed_marks_do_not_win() {
        let b = board("xxo/oox/xox");
        for row in 0..3 {
            for col in 0..3 {
                assert!(!b.check_win(Pos::new(row, col), 3));
            }
        }
    }

    #[test]
    fn test_run_must_pass_through_move() {
        // x x x . o : the run at columns 0..=2 is out of reach of column 4
        let b = board("xxx.o");
        assert!(!b.check_win(Pos::new(0, 4), 3));
        assert!(b.check_win(Pos::new(0, 2), 3));
    }

    #[test]
    fn test_longer_board_needs_full_streak() {
        let b = board("oxxxxo....");
        assert!(b.check_win(Pos::new(0, 3), 4));
        assert!(!b.check_win(Pos::new(0, 3), 5));
    }

    #[test]
    fn test_streak_of_one_wins_on_any_mark() {
        assert!(board("...x").check_win(Pos::new(0, 3), 1));
    }

    #[test]
    fn test_window_straddles_edges() {
        // 2x2 board, streak 2: window reaches off the board on every side
        let b = board("x./.x");
        assert!(b.check_win(Pos::new(1, 1), 2));
        assert!(!board("x./..").check_win(Pos::new(0, 0), 2));
    }

    #[test]
    fn test_mirrored() {
        let b = board("xo./..o");
        assert_eq!(b.mirrored().to_string(), ".ox/o..");
        assert_eq!(b.mirrored().mirrored(), b);
    }
}
