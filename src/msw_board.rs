// Minefield data: cell grid, mine placement and neighbor counting

use rand::Rng;

/// Board dimensions and mine budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setup {
    pub w: usize,
    pub h: usize,
    pub mines: usize,
}

impl Default for Setup {
    fn default() -> Self {
        Setup {
            w: 10,
            h: 10,
            mines: 15,
        }
    }
}

impl Setup {
    /// Check the mine budget against the board size once, before play begins.
    /// A violation is a configuration error, not something to recover from mid-game.
    pub fn validate(&self) -> Result<(), String> {
        if self.w == 0 || self.h == 0 {
            return Err(format!("board size {}x{} has no cells", self.w, self.h));
        }
        if self.mines > self.w * self.h {
            return Err(format!(
                "{} mines cannot fit on a {}x{} board",
                self.mines, self.w, self.h
            ));
        }
        Ok(())
    }
}

/// A single cell of the minefield
#[derive(Debug, Clone, Copy, Default)]
pub struct Cell {
    pub mine: bool,
    pub opened: bool,
    pub flagged: bool,
    pub neighbor_mines: u8, // mines among the up-to-8 adjacent cells, fixed after placement
}

/// Fixed-size grid of cells, stored row-major
pub struct Board {
    pub w: usize,
    pub h: usize,
    pub mines: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Allocate an empty board: no mines, nothing opened or flagged
    pub fn new(setup: Setup) -> Self {
        Board {
            w: setup.w,
            h: setup.h,
            mines: setup.mines,
            cells: vec![Cell::default(); setup.w * setup.h],
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    pub(crate) fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let i = self.index(x, y);
        &mut self.cells[i]
    }

    /// Coordinates of the existing neighbors of (x, y), clipped at the edges
    pub fn neighbors(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(8);
        for ny in y.saturating_sub(1)..=(y + 1).min(self.h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(self.w - 1) {
                if nx == x && ny == y {
                    continue;
                }
                out.push((nx, ny));
            }
        }
        out
    }

    /// Mark exactly `mines` distinct random cells as mined.
    /// Rejection sampling: re-roll any cell that is already a mine.
    /// Requires `mines <= w * h`, guaranteed by `Setup::validate`.
    pub fn place_mines(&mut self, rng: &mut impl Rng) {
        let n = self.w * self.h;
        debug_assert!(self.mines <= n);
        let mut placed = 0;
        while placed < self.mines {
            let i = rng.gen_range(0..n);
            if self.cells[i].mine {
                continue;
            }
            self.cells[i].mine = true;
            placed += 1;
        }
    }

    /// Store the adjacent-mine count for every non-mine cell
    pub fn compute_neighbor_counts(&mut self) {
        for y in 0..self.h {
            for x in 0..self.w {
                if self.cell(x, y).mine {
                    continue;
                }
                let mut adj = 0u8;
                for (nx, ny) in self.neighbors(x, y) {
                    if self.cell(nx, ny).mine {
                        adj += 1;
                    }
                }
                let i = self.index(x, y);
                self.cells[i].neighbor_mines = adj;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn plant_mines(&mut self, at: &[(usize, usize)]) {
        for &(x, y) in at {
            let i = self.index(x, y);
            self.cells[i].mine = true;
        }
        self.compute_neighbor_counts();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn mine_count(board: &Board) -> usize {
        let mut n = 0;
        for y in 0..board.h {
            for x in 0..board.w {
                if board.cell(x, y).mine {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn validate_accepts_default_setup() {
        assert!(Setup::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_overfull_board() {
        let setup = Setup {
            w: 10,
            h: 10,
            mines: 101,
        };
        assert!(setup.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_board() {
        let setup = Setup {
            w: 0,
            h: 10,
            mines: 0,
        };
        assert!(setup.validate().is_err());
    }

    #[test]
    fn place_mines_puts_exactly_the_requested_count() {
        let mut board = Board::new(Setup::default());
        let mut rng = StdRng::seed_from_u64(7);
        board.place_mines(&mut rng);
        assert_eq!(mine_count(&board), 15);
    }

    #[test]
    fn place_mines_handles_a_nearly_full_board() {
        // 8 mines on 9 cells: rejection sampling must still terminate
        // with exactly 8 distinct mines
        let setup = Setup {
            w: 3,
            h: 3,
            mines: 8,
        };
        let mut board = Board::new(setup);
        let mut rng = StdRng::seed_from_u64(42);
        board.place_mines(&mut rng);
        assert_eq!(mine_count(&board), 8);
    }

    #[test]
    fn neighbor_counts_match_a_known_layout() {
        // 3x3 board, mines at (0,0) and (2,1):
        //   * 2 1
        //   1 2 *
        //   0 1 1
        let setup = Setup {
            w: 3,
            h: 3,
            mines: 2,
        };
        let mut board = Board::new(setup);
        board.plant_mines(&[(0, 0), (2, 1)]);

        assert_eq!(board.cell(1, 0).neighbor_mines, 2);
        assert_eq!(board.cell(2, 0).neighbor_mines, 1);
        assert_eq!(board.cell(0, 1).neighbor_mines, 1);
        assert_eq!(board.cell(1, 1).neighbor_mines, 2);
        assert_eq!(board.cell(0, 2).neighbor_mines, 0);
        assert_eq!(board.cell(1, 2).neighbor_mines, 1);
        assert_eq!(board.cell(2, 2).neighbor_mines, 1);
    }

    #[test]
    fn neighbors_are_clipped_at_the_edges() {
        let board = Board::new(Setup::default());
        assert_eq!(board.neighbors(0, 0).len(), 3);
        assert_eq!(board.neighbors(5, 0).len(), 5);
        assert_eq!(board.neighbors(5, 5).len(), 8);
        assert_eq!(board.neighbors(9, 9).len(), 3);
    }
}
