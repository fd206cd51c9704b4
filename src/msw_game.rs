// Game state and reveal engine on top of the minefield, plus user
// configuration persistence

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::msw_board::{Board, Setup};

/// Lifecycle of one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    Playing,
    Won,
    Lost,
}

/// What a primary activation on a cell did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    NoOp,
    Opened,
    HitMine,
}

/// Renderable state of one cell, the only board view the presentation sees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellView {
    Covered,
    Flagged,
    /// Opened safe cell with its neighbor count; 0 renders as blank
    Open(u8),
    /// Mine shown by the end-of-round reveal, had no flag on it
    Mine,
    /// Mine shown by the end-of-round reveal, correctly flagged by the player
    FlaggedMine,
}

/// One round of Minesweeper: owns the board, tracks derived counters and
/// the win/loss state. Board and counters are recreated together on `start`.
pub struct Game {
    setup: Setup,
    board: Board,
    opened_safe: usize,
    flagged: usize,
    status: Status,
}

impl Game {
    pub fn new(setup: Setup) -> Self {
        Game {
            setup,
            board: Board::new(setup),
            opened_safe: 0,
            flagged: 0,
            status: Status::NotStarted,
        }
    }

    /// Begin a fresh round: new minefield, zeroed counters.
    /// This is the only way back to `Playing` from a finished round.
    pub fn start(&mut self, rng: &mut impl Rng) {
        let mut board = Board::new(self.setup);
        board.place_mines(rng);
        board.compute_neighbor_counts();
        self.board = board;
        self.opened_safe = 0;
        self.flagged = 0;
        self.status = Status::Playing;
    }

    pub fn w(&self) -> usize {
        self.board.w
    }

    pub fn h(&self) -> usize {
        self.board.h
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, Status::Won | Status::Lost)
    }

    /// Mine counter for the status bar: total mines minus placed flags.
    /// Goes negative when the player flags too much.
    pub fn remaining_mines(&self) -> isize {
        self.board.mines as isize - self.flagged as isize
    }

    /// Primary activation. Opened and flagged cells are left alone; a mine
    /// loses the round; a safe cell opens, flood-filling zero-neighbor
    /// regions, and may win it.
    pub fn open(&mut self, x: usize, y: usize) -> OpenOutcome {
        if self.status != Status::Playing {
            return OpenOutcome::NoOp;
        }
        let cell = self.board.cell(x, y);
        if cell.opened || cell.flagged {
            return OpenOutcome::NoOp;
        }
        if cell.mine {
            self.finish(false);
            return OpenOutcome::HitMine;
        }
        self.flood_open(x, y);
        self.check_win();
        OpenOutcome::Opened
    }

    // The `opened` flag doubles as the visited set: it is raised before
    // recursing, so every cell opens at most once and the fill terminates.
    fn flood_open(&mut self, x: usize, y: usize) {
        let cell = self.board.cell(x, y);
        if cell.opened || cell.flagged || cell.mine {
            return;
        }
        let adj = cell.neighbor_mines;
        self.board.cell_mut(x, y).opened = true;
        self.opened_safe += 1;
        if adj == 0 {
            for (nx, ny) in self.board.neighbors(x, y) {
                self.flood_open(nx, ny);
            }
        }
    }

    /// Secondary activation. Only legal on unopened cells while playing;
    /// returns whether anything changed.
    pub fn toggle_flag(&mut self, x: usize, y: usize) -> bool {
        if self.status != Status::Playing {
            return false;
        }
        if self.board.cell(x, y).opened {
            return false;
        }
        let cell = self.board.cell_mut(x, y);
        cell.flagged = !cell.flagged;
        let placed = cell.flagged;
        if placed {
            self.flagged += 1;
        } else {
            self.flagged -= 1;
        }
        self.check_win();
        true
    }

    // Evaluated after every open or flag action. Two independent win paths:
    // every safe cell opened, or every mine flagged with no flag misplaced.
    // A matching flag count with a single false flag does not end the round.
    fn check_win(&mut self) {
        let total = self.board.w * self.board.h;
        let all_safe_opened = self.opened_safe == total - self.board.mines;
        let all_mines_flagged = self.flagged == self.board.mines && self.all_flags_correct();
        if all_safe_opened || all_mines_flagged {
            self.finish(true);
        }
    }

    fn all_flags_correct(&self) -> bool {
        for y in 0..self.board.h {
            for x in 0..self.board.w {
                let cell = self.board.cell(x, y);
                if cell.flagged && !cell.mine {
                    return false;
                }
            }
        }
        true
    }

    // Terminal transition. Cells are left untouched; `cell_view` derives the
    // full-board mine reveal from the finished status, so flag state survives
    // for the correctly-flagged distinction.
    fn finish(&mut self, won: bool) {
        self.status = if won { Status::Won } else { Status::Lost };
    }

    /// Read-only snapshot of one cell for the presentation layer
    pub fn cell_view(&self, x: usize, y: usize) -> CellView {
        let cell = self.board.cell(x, y);
        if cell.opened {
            return if cell.mine {
                CellView::Mine
            } else {
                CellView::Open(cell.neighbor_mines)
            };
        }
        if self.is_over() && cell.mine {
            return if cell.flagged {
                CellView::FlaggedMine
            } else {
                CellView::Mine
            };
        }
        if cell.flagged {
            CellView::Flagged
        } else {
            CellView::Covered
        }
    }

    #[cfg(test)]
    pub(crate) fn start_with_mines(&mut self, at: &[(usize, usize)]) {
        let mut board = Board::new(self.setup);
        board.plant_mines(at);
        self.board = board;
        self.opened_safe = 0;
        self.flagged = 0;
        self.status = Status::Playing;
    }
}

/// User preferences, persisted as TOML
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub language: String,     // "en" or "ru"
    pub ascii_icons: bool,    // ASCII fallback glyphs
    pub show_indicator: bool, // cursor position marker on the board
}

impl Default for Config {
    fn default() -> Self {
        // Auto-detect system language on first run
        let system_lang = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
        let lang = if system_lang.to_lowercase().starts_with("ru") {
            "ru".to_string()
        } else {
            "en".to_string()
        };

        Config {
            language: lang,
            ascii_icons: false,
            show_indicator: false,
        }
    }
}

/// Get the configuration file path under the platform config directory,
/// falling back to the current directory if ProjectDirs is unavailable
pub fn config_path() -> Option<PathBuf> {
    if let Ok(exe) = env::current_exe() {
        if let Some(name) = exe.file_stem().and_then(|s| s.to_str()) {
            if let Some(proj) = ProjectDirs::from("com", "mswpr", name) {
                let mut path = proj.config_dir().to_path_buf();
                path.push(format!("{}.toml", name));
                return Some(path);
            } else if let Ok(mut path) = env::current_dir() {
                path.push(format!("{}.toml", name));
                return Some(path);
            }
        }
    }
    None
}

/// Load configuration from disk, or create the default file if missing
pub fn load_or_create_config() -> Config {
    if let Some(path) = config_path() {
        if path.exists() {
            if let Ok(s) = fs::read_to_string(&path) {
                if let Ok(cfg) = toml::from_str::<Config>(&s) {
                    return cfg;
                }
            }
        }
        let cfg = Config::default();
        save_config(&cfg);
        return cfg;
    }
    Config::default()
}

/// Save configuration to disk as TOML; unwritable locations are ignored
pub fn save_config(cfg: &Config) {
    if let Some(path) = config_path() {
        if let Ok(s) = toml::to_string(cfg) {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = fs::write(&path, s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn setup(w: usize, h: usize, mines: usize) -> Setup {
        Setup { w, h, mines }
    }

    fn views(game: &Game) -> Vec<CellView> {
        let mut out = Vec::new();
        for y in 0..game.h() {
            for x in 0..game.w() {
                out.push(game.cell_view(x, y));
            }
        }
        out
    }

    #[test]
    fn moves_are_rejected_before_the_first_start() {
        let mut game = Game::new(Setup::default());
        assert_eq!(game.status(), Status::NotStarted);
        assert_eq!(game.open(0, 0), OpenOutcome::NoOp);
        assert!(!game.toggle_flag(0, 0));
    }

    #[test]
    fn opening_a_zero_region_on_an_all_safe_board_opens_everything() {
        let mut game = Game::new(setup(5, 5, 0));
        game.start_with_mines(&[]);
        assert_eq!(game.open(2, 2), OpenOutcome::Opened);
        assert_eq!(game.opened_safe, 25);
        // opening every safe cell is itself the win condition
        assert_eq!(game.status(), Status::Won);
    }

    #[test]
    fn flood_fill_stops_at_the_numbered_boundary() {
        // A full column of mines at x=2 splits the board; opening the left
        // half must reveal exactly the ten cells at x=0 and x=1 (the x=1
        // column carries the boundary numbers) and never cross the wall.
        let mut game = Game::new(setup(5, 5, 5));
        game.start_with_mines(&[(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)]);
        assert_eq!(game.open(0, 0), OpenOutcome::Opened);
        assert_eq!(game.opened_safe, 10);
        assert_eq!(game.status(), Status::Playing);
        for y in 0..5 {
            assert_eq!(game.cell_view(0, y), CellView::Open(0));
            assert!(matches!(game.cell_view(1, y), CellView::Open(n) if n > 0));
            assert_eq!(game.cell_view(3, y), CellView::Covered);
            assert_eq!(game.cell_view(4, y), CellView::Covered);
        }
    }

    #[test]
    fn opening_a_mine_loses_and_reveals_every_mine() {
        let mut game = Game::new(setup(4, 4, 2));
        game.start_with_mines(&[(0, 0), (3, 3)]);
        assert!(game.toggle_flag(3, 3));
        assert_eq!(game.open(0, 0), OpenOutcome::HitMine);
        assert_eq!(game.status(), Status::Lost);
        assert_eq!(game.cell_view(0, 0), CellView::Mine);
        assert_eq!(game.cell_view(3, 3), CellView::FlaggedMine);
        // safe cells stay covered, the reveal only exposes mines
        assert_eq!(game.cell_view(1, 1), CellView::Covered);
    }

    #[test]
    fn flagged_cells_are_immune_to_opening() {
        let mut game = Game::new(setup(3, 3, 1));
        game.start_with_mines(&[(2, 0)]);
        assert!(game.toggle_flag(2, 2));
        // direct open is a no-op on the flag
        assert_eq!(game.open(2, 2), OpenOutcome::NoOp);
        assert_eq!(game.cell_view(2, 2), CellView::Flagged);
        // the flood fill walks around it too
        assert_eq!(game.open(0, 0), OpenOutcome::Opened);
        assert_eq!(game.opened_safe, 7);
        assert_eq!(game.cell_view(2, 2), CellView::Flagged);
        assert_eq!(game.status(), Status::Playing);
        // unflagging and opening the last safe cell completes the round
        assert!(game.toggle_flag(2, 2));
        assert_eq!(game.open(2, 2), OpenOutcome::Opened);
        assert_eq!(game.status(), Status::Won);
    }

    #[test]
    fn flagging_exactly_the_mines_wins() {
        let mut game = Game::new(setup(3, 3, 2));
        game.start_with_mines(&[(0, 0), (1, 2)]);
        assert!(game.toggle_flag(0, 0));
        assert_eq!(game.status(), Status::Playing);
        assert!(game.toggle_flag(1, 2));
        assert_eq!(game.status(), Status::Won);
        assert_eq!(game.cell_view(0, 0), CellView::FlaggedMine);
        assert_eq!(game.cell_view(1, 2), CellView::FlaggedMine);
    }

    #[test]
    fn a_misplaced_flag_blocks_the_flagging_win() {
        let mut game = Game::new(setup(3, 3, 2));
        game.start_with_mines(&[(0, 0), (1, 2)]);
        assert!(game.toggle_flag(0, 0));
        assert!(game.toggle_flag(2, 2));
        // count matches the mine budget but one flag is wrong
        assert_eq!(game.remaining_mines(), 0);
        assert_eq!(game.status(), Status::Playing);
    }

    #[test]
    fn opening_every_safe_cell_wins_regardless_of_flags() {
        let mut game = Game::new(setup(3, 3, 2));
        game.start_with_mines(&[(0, 0), (2, 0)]);
        assert!(game.toggle_flag(0, 0));
        assert_eq!(game.open(0, 2), OpenOutcome::Opened);
        assert_eq!(game.status(), Status::Playing);
        assert_eq!(game.open(1, 0), OpenOutcome::Opened);
        assert_eq!(game.status(), Status::Won);
        // the unflagged mine is revealed, the flagged one keeps its mark
        assert_eq!(game.cell_view(2, 0), CellView::Mine);
        assert_eq!(game.cell_view(0, 0), CellView::FlaggedMine);
    }

    #[test]
    fn toggling_a_flag_twice_is_the_identity() {
        let mut game = Game::new(setup(3, 3, 1));
        game.start_with_mines(&[(1, 1)]);
        assert!(game.toggle_flag(0, 0));
        assert_eq!(game.remaining_mines(), 0);
        assert!(game.toggle_flag(0, 0));
        assert_eq!(game.remaining_mines(), 1);
        assert_eq!(game.cell_view(0, 0), CellView::Covered);
    }

    #[test]
    fn flags_are_rejected_on_opened_cells() {
        let mut game = Game::new(setup(3, 3, 1));
        game.start_with_mines(&[(1, 1)]);
        assert_eq!(game.open(0, 0), OpenOutcome::Opened);
        assert!(!game.toggle_flag(0, 0));
        assert_eq!(game.remaining_mines(), 1);
    }

    #[test]
    fn a_finished_round_is_frozen_until_restarted() {
        let mut game = Game::new(setup(2, 2, 1));
        game.start_with_mines(&[(0, 0)]);
        assert_eq!(game.open(0, 0), OpenOutcome::HitMine);
        assert_eq!(game.status(), Status::Lost);
        assert_eq!(game.open(1, 1), OpenOutcome::NoOp);
        assert!(!game.toggle_flag(1, 1));
        assert_eq!(game.status(), Status::Lost);
    }

    #[test]
    fn restart_resets_counters_and_every_cell() {
        let mut game = Game::new(Setup::default());
        let mut rng = StdRng::seed_from_u64(99);
        game.start(&mut rng);
        // play an arbitrary prefix of a round
        game.toggle_flag(0, 0);
        game.open(5, 5);
        game.open(9, 9);

        game.start(&mut rng);
        assert_eq!(game.status(), Status::Playing);
        assert_eq!(game.opened_safe, 0);
        assert_eq!(game.remaining_mines(), 15);
        assert_eq!(views(&game), vec![CellView::Covered; 100]);
    }

    #[test]
    fn a_seeded_round_is_reproducible() {
        let mut a = Game::new(Setup::default());
        let mut b = Game::new(Setup::default());
        let mut rng_a = StdRng::seed_from_u64(123);
        let mut rng_b = StdRng::seed_from_u64(123);
        a.start(&mut rng_a);
        b.start(&mut rng_b);
        a.open(4, 4);
        b.open(4, 4);
        assert_eq!(views(&a), views(&b));
        assert_eq!(a.opened_safe, b.opened_safe);
    }
}
