// Entry point for the Minesweeper TUI application
// Validates the board setup, loads configuration and language resources,
// then launches the main UI loop

use std::error::Error;

// Module declarations
mod msw_board; // Minefield grid, mine placement, neighbor counts
mod msw_color; // Terminal-capability-aware palette
mod msw_game;  // Reveal engine, win/loss state, configuration
mod msw_lang;  // Multi-language string resources
mod msw_ui;    // Terminal UI rendering and event handling

use msw_board::Setup;
use msw_game::load_or_create_config;
use msw_lang::Lang;
use msw_ui::run as run_ui;

fn main() -> Result<(), Box<dyn Error>> {
    // The board is compiled in; a mine budget that cannot fit is a fatal
    // configuration error, caught before anything is drawn
    let setup = Setup::default();
    setup.validate()?;

    // Load or create user configuration (language, icon preferences)
    let mut cfg = load_or_create_config();

    // Initialize language resources based on saved or system language
    let mut lang = Lang::new(&cfg.language);

    // Launch the main UI loop
    run_ui(setup, &mut cfg, &mut lang)
}
