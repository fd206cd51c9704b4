// Terminal UI rendering and event handling
// Consumes read-only cell snapshots from the game core and forwards
// primary/secondary activations back to it

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, KeyCode, MouseButton,
    MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Span, Spans, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::error::Error;
use std::io;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

use crate::msw_board::Setup;
use crate::msw_color::Palette;
use crate::msw_game::{CellView, Config, Game, Status, save_config};
use crate::msw_lang::Lang;

// Runtime UI variables grouped into one structure to simplify passing around
#[derive(Debug)]
struct UiState {
    cursor: (usize, usize),
    left_press: Option<(usize, usize)>,
    hover_index: Option<usize>,
    clicked_index: Option<usize>,
    click_instant: Option<Instant>,
    modal_rect: Option<Rect>,
    modal_close_rect: Option<Rect>,
    modal_close_hovered: bool,
    modal_close_pressed: bool,
    showing_help: bool,
    showing_about: bool,
    showing_options: bool,
    showing_win: bool,
    showing_loss: bool,
    options_indicator: bool,
    options_ascii: bool,
    options_russian: bool,
    options_focus: Option<u8>,
    options_indicator_rect: Option<Rect>,
    options_ascii_rect: Option<Rect>,
    options_russian_rect: Option<Rect>,
    exit_menu_item_down: bool,
    exit_status_hovered: bool,
}

impl UiState {
    fn new() -> Self {
        UiState {
            cursor: (0, 0),
            left_press: None,
            hover_index: None,
            clicked_index: None,
            click_instant: None,
            modal_rect: None,
            modal_close_rect: None,
            modal_close_hovered: false,
            modal_close_pressed: false,
            showing_help: false,
            showing_about: false,
            showing_options: false,
            showing_win: false,
            showing_loss: false,
            options_indicator: false,
            options_ascii: false,
            options_russian: false,
            options_focus: None,
            options_indicator_rect: None,
            options_ascii_rect: None,
            options_russian_rect: None,
            exit_menu_item_down: false,
            exit_status_hovered: false,
        }
    }

    fn any_modal(&self) -> bool {
        self.showing_help
            || self.showing_about
            || self.showing_options
            || self.showing_win
            || self.showing_loss
    }

    fn close_modal(&mut self) {
        self.showing_help = false;
        self.showing_about = false;
        self.showing_options = false;
        self.showing_win = false;
        self.showing_loss = false;
        self.modal_rect = None;
        self.modal_close_rect = None;
        self.modal_close_hovered = false;
        self.modal_close_pressed = false;
        self.options_focus = None;
        self.hover_index = None;
    }

    fn reset_after_new_game(&mut self) {
        let cursor = self.cursor;
        *self = UiState::new();
        self.cursor = cursor;
    }

    fn step_cursor(&mut self, dx: isize, dy: isize, w: usize, h: usize) {
        let nx = (self.cursor.0 as isize + dx).clamp(0, (w - 1) as isize) as usize;
        let ny = (self.cursor.1 as isize + dy).clamp(0, (h - 1) as isize) as usize;
        self.cursor = (nx, ny);
    }
}

fn hit(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column <= rect.x + rect.width.saturating_sub(1)
        && row >= rect.y
        && row <= rect.y + rect.height.saturating_sub(1)
}

fn new_game(
    game: &mut Game,
    rng: &mut StdRng,
    ui: &mut UiState,
    seconds_elapsed: &mut u64,
    last_second: &mut Instant,
) {
    game.start(rng);
    ui.reset_after_new_game();
    *seconds_elapsed = 0;
    *last_second = Instant::now();
}

// Primary activation: open the cell and surface a finished round as a modal
fn activate(game: &mut Game, ui: &mut UiState, x: usize, y: usize) {
    game.open(x, y);
    match game.status() {
        Status::Lost => ui.showing_loss = true,
        Status::Won => ui.showing_win = true,
        _ => {}
    }
}

// Secondary activation: toggle the flag; an all-correct flagging wins
fn flag(game: &mut Game, ui: &mut UiState, x: usize, y: usize) {
    if game.toggle_flag(x, y) && game.status() == Status::Won {
        ui.showing_win = true;
    }
}

fn open_options(cfg: &Config, lang: &Lang, ui: &mut UiState) {
    ui.options_indicator = cfg.show_indicator;
    ui.options_ascii = cfg.ascii_icons;
    ui.options_russian = lang.current_lang == "ru";
    ui.options_focus = Some(0);
    ui.showing_options = true;
}

fn apply_options(cfg: &mut Config, lang: &mut Lang, ui: &mut UiState) {
    cfg.show_indicator = ui.options_indicator;
    cfg.ascii_icons = ui.options_ascii;
    cfg.language = if ui.options_russian {
        "ru".to_string()
    } else {
        "en".to_string()
    };
    lang.switch_to(&cfg.language);
    save_config(cfg);
    ui.close_modal();
}

fn center_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn bottom_centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + r.height.saturating_sub(height);
    Rect::new(x, y, width, height)
}

// Render the modal's OK/CLOSE button and return its rect for mouse mapping
fn modal_button<B: Backend>(
    f: &mut ratatui::Frame<'_, B>,
    pal: &Palette,
    label: &str,
    inner: Rect,
    hovered: bool,
    pressed: bool,
) -> Rect {
    let btn_w = label.width() as u16;
    let bx = inner.x + (inner.width.saturating_sub(btn_w)) / 2;
    let by = inner.y + inner.height.saturating_sub(1);
    let btn_rect = Rect::new(bx, by, btn_w, 1);
    let style = if pressed {
        Style::default()
            .bg(pal.btn_pressed_bg)
            .fg(pal.btn_fg)
            .add_modifier(Modifier::BOLD)
    } else if hovered {
        Style::default()
            .bg(pal.btn_hover_bg)
            .fg(pal.btn_fg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(pal.btn_bg)
            .fg(pal.btn_fg)
            .add_modifier(Modifier::BOLD)
    };
    let btn = Paragraph::new(Spans::from(Span::styled(label.to_string(), style)))
        .alignment(Alignment::Center);
    f.render_widget(btn, btn_rect);
    btn_rect
}

pub fn run(setup: Setup, cfg: &mut Config, lang: &mut Lang) -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnableMouseCapture, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let palette = Palette::detect();
    let mut rng = StdRng::from_entropy();
    let mut game = Game::new(setup);
    game.start(&mut rng);

    let mut ui = UiState::new();
    let mut menu_rect: Option<Rect> = None;
    let mut board_rect: Option<Rect> = None;
    let mut status_rect: Option<Rect> = None;
    let mut exit_requested = false;

    // Clock display: plain seconds counter driven at 1 Hz below, no game effect
    let mut seconds_elapsed: u64 = 0;
    let mut last_second = Instant::now();

    // Glyph computation helper based on the ascii_icons setting
    let make_glyphs = |ascii: bool| {
        (
            if ascii { "#" } else { "■" },
            if ascii { "*" } else { "☼" },
            if ascii { "F" } else { "⚑" },
        )
    };
    let g_init = make_glyphs(cfg.ascii_icons);
    let mut glyph_covered = g_init.0;
    let mut glyph_mine = g_init.1;
    let mut glyph_flag = g_init.2;

    let indicator_char = "▸";
    let tick_rate = Duration::from_millis(200);

    loop {
        // Menu/key items; Esc lives here so the status bar can reuse it
        let menu_items = [
            ("F1", lang.assets.menu_help),
            ("F2", lang.assets.menu_new),
            ("F7", lang.assets.menu_options),
            ("F9", lang.assets.menu_about),
            ("Esc", lang.assets.menu_exit),
        ];
        let (status_text, status_color) = match game.status() {
            Status::Won => (lang.assets.status_won, palette.status_won),
            Status::Lost => (lang.assets.status_lost, palette.status_lost),
            _ => (lang.assets.status_playing, palette.status_playing),
        };

        terminal.draw(|f| {
            let size = f.size();
            let min_twidth = 60u16;
            let min_theight = 20u16;
            // If the terminal is too small, render a centered warning and skip the UI
            if size.width < min_twidth || size.height < min_theight {
                let size_line = lang
                    .assets
                    .tsmsg_line2
                    .replacen("{}", &min_twidth.to_string(), 1)
                    .replacen("{}", &min_theight.to_string(), 1);
                let warn_lines = vec![
                    Spans::from(Span::raw(lang.assets.tsmsg_line1)),
                    Spans::from(Span::raw(size_line)),
                ];
                let warn = Paragraph::new(Text::from(warn_lines))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(lang.assets.tsmsg_title),
                    )
                    .alignment(Alignment::Center);
                f.render_widget(Clear, size);
                let w = 44u16.min(size.width.saturating_sub(2));
                let h = 5u16.min(size.height.saturating_sub(2));
                f.render_widget(warn, center_rect(w, h, size));
                return;
            }

            // layout: top menu row, center board, bottom status
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(0)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(6),
                    Constraint::Length(3),
                ].as_ref())
                .split(size);

            // menu row, per-item styled so hover/click mapping aligns with mouse offsets
            let mut spans_vec: Vec<Span> = Vec::new();
            for (i, (label_key, label_rest)) in menu_items.iter().take(4).enumerate() {
                if i > 0 {
                    spans_vec.push(Span::raw("   "));
                }
                let (key_style, rest_style) = if Some(i) == ui.clicked_index {
                    (
                        Style::default()
                            .bg(palette.menu_pressed_bg)
                            .fg(palette.menu_pressed_fg)
                            .add_modifier(Modifier::BOLD),
                        Style::default()
                            .bg(palette.menu_pressed_bg)
                            .fg(palette.menu_pressed_fg),
                    )
                } else if Some(i) == ui.hover_index {
                    (
                        Style::default()
                            .bg(palette.menu_hover_bg)
                            .fg(palette.menu_pressed_fg)
                            .add_modifier(Modifier::BOLD),
                        Style::default()
                            .bg(palette.menu_hover_bg)
                            .fg(palette.menu_pressed_fg),
                    )
                } else {
                    (
                        Style::default()
                            .fg(palette.menu_key_fg)
                            .add_modifier(Modifier::BOLD),
                        Style::default(),
                    )
                };
                spans_vec.push(Span::styled(label_key.to_string(), key_style));
                spans_vec.push(Span::styled(format!(": {}", label_rest), rest_style));
            }
            spans_vec.insert(0, Span::raw(" "));
            spans_vec.push(Span::raw(" "));
            let menu = Paragraph::new(Spans::from(spans_vec))
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Left);
            f.render_widget(menu, chunks[0]);
            menu_rect = Some(chunks[0]);

            // status row: colored game status, counters, right-aligned Esc: Exit
            let status_part = format!(" {} ", status_text);
            let rest_part = format!(
                "  {}: {}   {}: {} ",
                lang.assets.status_mines_label,
                game.remaining_mines(),
                lang.assets.status_time_label,
                seconds_elapsed
            );
            let esc_key = menu_items[4].0;
            let esc_rest = menu_items[4].1;
            let inner_w = chunks[2].width.saturating_sub(2) as usize;
            let left_w = status_part.as_str().width() + rest_part.as_str().width();
            let right_w = esc_key.width() + 2 + esc_rest.width();
            let mid_spaces = if inner_w > left_w + right_w + 1 {
                inner_w - left_w - right_w - 1
            } else {
                1
            };
            let mut status_spans: Vec<Span> = Vec::new();
            status_spans.push(Span::styled(
                status_part,
                Style::default().fg(status_color).add_modifier(Modifier::BOLD),
            ));
            status_spans.push(Span::raw(rest_part));
            status_spans.push(Span::raw(" ".repeat(mid_spaces)));
            let (esc_key_style, esc_rest_style) = if ui.exit_menu_item_down {
                (
                    Style::default()
                        .bg(palette.menu_pressed_bg)
                        .fg(palette.menu_pressed_fg)
                        .add_modifier(Modifier::BOLD),
                    Style::default()
                        .bg(palette.menu_pressed_bg)
                        .fg(palette.menu_pressed_fg),
                )
            } else if ui.exit_status_hovered {
                (
                    Style::default()
                        .bg(palette.menu_hover_bg)
                        .fg(palette.menu_pressed_fg)
                        .add_modifier(Modifier::BOLD),
                    Style::default()
                        .bg(palette.menu_hover_bg)
                        .fg(palette.menu_pressed_fg),
                )
            } else {
                (
                    Style::default()
                        .fg(palette.menu_key_fg)
                        .add_modifier(Modifier::BOLD),
                    Style::default(),
                )
            };
            status_spans.push(Span::styled(esc_key.to_string(), esc_key_style));
            status_spans.push(Span::styled(format!(": {}", esc_rest), esc_rest_style));
            status_spans.push(Span::raw(" "));
            let status = Paragraph::new(Text::from(Spans::from(status_spans)))
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Left);
            f.render_widget(status, chunks[2]);
            status_rect = Some(chunks[2]);

            // board area, rendered purely from cell snapshots
            let board_area = center_rect(
                (game.w() * 2) as u16 + 3,
                game.h() as u16 + 2,
                chunks[1],
            );
            board_rect = Some(board_area);
            let mut lines = vec![];
            for y in 0..game.h() {
                let mut spans = vec![];
                for x in 0..game.w() {
                    let view = game.cell_view(x, y);
                    let (s, mut style) = match view {
                        CellView::Covered => (
                            glyph_covered.to_string(),
                            Style::default()
                                .fg(palette.covered_fg)
                                .bg(palette.board_bg),
                        ),
                        CellView::Flagged => (
                            glyph_flag.to_string(),
                            Style::default().fg(palette.flag_fg).bg(palette.board_bg),
                        ),
                        CellView::Open(0) => {
                            (" ".to_string(), Style::default().bg(palette.open_bg))
                        }
                        CellView::Open(n) => (
                            n.to_string(),
                            Style::default().fg(palette.number(n)).bg(palette.open_bg),
                        ),
                        CellView::Mine => (
                            glyph_mine.to_string(),
                            Style::default().fg(palette.mine_fg).bg(palette.mine_bg),
                        ),
                        CellView::FlaggedMine => (
                            glyph_flag.to_string(),
                            Style::default()
                                .fg(palette.mine_fg)
                                .bg(palette.safe_mine_bg),
                        ),
                    };
                    if ui.cursor == (x, y) && !game.is_over() {
                        style = style.bg(palette.cursor_bg);
                    }
                    // press feedback on the cell under the held button
                    if ui.left_press == Some((x, y)) && view == CellView::Covered {
                        style = style.bg(palette.open_bg).fg(palette.open_bg);
                    }
                    if cfg.show_indicator && ui.cursor == (x, y) {
                        let indicator_style = style
                            .fg(palette.indicator_fg)
                            .add_modifier(Modifier::BOLD);
                        spans.push(Span::styled(indicator_char.to_string(), indicator_style));
                        spans.push(Span::styled(s, style));
                    } else {
                        spans.push(Span::styled(format!(" {}", s), style));
                    }
                }
                // one padding column so the right edge shares the board background
                spans.push(Span::styled(" ", Style::default().bg(palette.board_bg)));
                lines.push(Spans::from(spans));
            }
            let board = Paragraph::new(Text::from(lines))
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Left);
            f.render_widget(board, board_area);

            // modals
            ui.modal_close_rect = None;
            if ui.showing_help {
                let mrect = center_rect(46, 10, size);
                ui.modal_rect = Some(mrect);
                f.render_widget(Clear, mrect);
                f.render_widget(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(menu_items[0].1),
                    mrect,
                );
                let inner = Rect::new(
                    mrect.x + 1,
                    mrect.y + 1,
                    mrect.width.saturating_sub(2),
                    mrect.height.saturating_sub(2),
                );
                let help_lines = vec![
                    Spans::from(Span::raw("")),
                    Spans::from(Span::raw(lang.assets.help_controls)),
                    Spans::from(Span::raw(lang.assets.help_move)),
                    Spans::from(Span::raw(lang.assets.help_reveal)),
                    Spans::from(Span::raw(lang.assets.help_flag)),
                    Spans::from(Span::raw(lang.assets.help_new)),
                ];
                let p = Paragraph::new(Text::from(help_lines)).alignment(Alignment::Left);
                f.render_widget(p, inner);
                ui.modal_close_rect = Some(modal_button(
                    f,
                    &palette,
                    lang.assets.btn_close,
                    inner,
                    ui.modal_close_hovered,
                    ui.modal_close_pressed,
                ));
            }

            if ui.showing_about {
                let mrect = center_rect(52, 8, size);
                ui.modal_rect = Some(mrect);
                f.render_widget(Clear, mrect);
                f.render_widget(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(menu_items[3].1),
                    mrect,
                );
                let inner = Rect::new(
                    mrect.x + 1,
                    mrect.y + 1,
                    mrect.width.saturating_sub(2),
                    mrect.height.saturating_sub(2),
                );
                let lines = vec![
                    Spans::from(Span::raw("")),
                    Spans::from(Span::raw(env!("CARGO_PKG_DESCRIPTION"))),
                    Spans::from(Span::raw("")),
                    Spans::from(Span::raw(format!("v{}", env!("CARGO_PKG_VERSION")))),
                ];
                let p = Paragraph::new(Text::from(lines)).alignment(Alignment::Center);
                f.render_widget(p, inner);
                ui.modal_close_rect = Some(modal_button(
                    f,
                    &palette,
                    lang.assets.btn_close,
                    inner,
                    ui.modal_close_hovered,
                    ui.modal_close_pressed,
                ));
            }

            if ui.showing_options {
                let mrect = center_rect(32, 9, size);
                ui.modal_rect = Some(mrect);
                f.render_widget(Clear, mrect);
                f.render_widget(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(menu_items[2].1),
                    mrect,
                );
                let inner = Rect::new(
                    mrect.x + 1,
                    mrect.y + 1,
                    mrect.width.saturating_sub(2),
                    mrect.height.saturating_sub(2),
                );
                let cb0 = if ui.options_indicator { "[x]" } else { "[ ]" };
                let cb1 = if ui.options_ascii { "[x]" } else { "[ ]" };
                let cb2 = if ui.options_russian { "[x]" } else { "[ ]" };
                let labels = [
                    format!("{} {}", cb0, lang.assets.opt_show_indicator),
                    format!("{} {}", cb1, lang.assets.opt_ascii_icons),
                    format!("{} {}", cb2, lang.assets.opt_russian),
                ];
                let focus_style = Style::default()
                    .bg(palette.menu_hover_bg)
                    .fg(palette.menu_pressed_fg)
                    .add_modifier(Modifier::BOLD);
                let mut lines = vec![Spans::from(Span::raw(""))];
                for (i, label) in labels.iter().enumerate() {
                    let span = if ui.options_focus == Some(i as u8) {
                        Span::styled(label.clone(), focus_style)
                    } else {
                        Span::raw(label.clone())
                    };
                    lines.push(Spans::from(vec![Span::raw(" "), span]));
                }
                let p = Paragraph::new(Text::from(lines)).alignment(Alignment::Left);
                f.render_widget(p, inner);
                // checkbox rects cover the visible label text only
                ui.options_indicator_rect =
                    Some(Rect::new(inner.x + 1, inner.y + 1, labels[0].width() as u16, 1));
                ui.options_ascii_rect =
                    Some(Rect::new(inner.x + 1, inner.y + 2, labels[1].width() as u16, 1));
                ui.options_russian_rect =
                    Some(Rect::new(inner.x + 1, inner.y + 3, labels[2].width() as u16, 1));
                ui.modal_close_rect = Some(modal_button(
                    f,
                    &palette,
                    lang.assets.btn_ok,
                    inner,
                    ui.modal_close_hovered,
                    ui.modal_close_pressed,
                ));
            }

            if ui.showing_win {
                let mrect = bottom_centered_rect(40, 8, size);
                ui.modal_rect = Some(mrect);
                f.render_widget(Clear, mrect);
                f.render_widget(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(lang.assets.win_title),
                    mrect,
                );
                let inner = Rect::new(
                    mrect.x + 1,
                    mrect.y + 1,
                    mrect.width.saturating_sub(2),
                    mrect.height.saturating_sub(2),
                );
                let time_line = lang
                    .assets
                    .win_time_fmt
                    .replacen("{}", &seconds_elapsed.to_string(), 1);
                let lines = vec![
                    Spans::from(Span::raw("")),
                    Spans::from(Span::raw(lang.assets.win_message)),
                    Spans::from(Span::raw(time_line)),
                ];
                let p = Paragraph::new(Text::from(lines)).alignment(Alignment::Center);
                f.render_widget(p, inner);
                ui.modal_close_rect = Some(modal_button(
                    f,
                    &palette,
                    lang.assets.btn_close,
                    inner,
                    ui.modal_close_hovered,
                    ui.modal_close_pressed,
                ));
            }

            if ui.showing_loss {
                let mrect = bottom_centered_rect(44, 8, size);
                ui.modal_rect = Some(mrect);
                f.render_widget(Clear, mrect);
                f.render_widget(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(lang.assets.loss_title),
                    mrect,
                );
                let inner = Rect::new(
                    mrect.x + 1,
                    mrect.y + 1,
                    mrect.width.saturating_sub(2),
                    mrect.height.saturating_sub(2),
                );
                let lines = vec![
                    Spans::from(Span::raw("")),
                    Spans::from(Span::raw(lang.assets.loss_message)),
                    Spans::from(Span::raw(lang.assets.loss_better_luck)),
                ];
                let p = Paragraph::new(Text::from(lines)).alignment(Alignment::Center);
                f.render_widget(p, inner);
                ui.modal_close_rect = Some(modal_button(
                    f,
                    &palette,
                    lang.assets.btn_close,
                    inner,
                    ui.modal_close_hovered,
                    ui.modal_close_pressed,
                ));
            }
        })?;

        // If no modal was rendered this frame, clear the close button state
        if ui.modal_rect.is_none() {
            ui.modal_close_hovered = false;
            ui.modal_close_pressed = false;
        }

        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if ui.showing_options {
                        match key.code {
                            KeyCode::Esc => ui.close_modal(),
                            KeyCode::Enter => {
                                apply_options(cfg, lang, &mut ui);
                                let g = make_glyphs(cfg.ascii_icons);
                                glyph_covered = g.0;
                                glyph_mine = g.1;
                                glyph_flag = g.2;
                            }
                            KeyCode::Up => {
                                let focus = ui.options_focus.unwrap_or(0);
                                ui.options_focus = Some(if focus == 0 { 2 } else { focus - 1 });
                            }
                            KeyCode::Down => {
                                let focus = ui.options_focus.unwrap_or(0);
                                ui.options_focus = Some((focus + 1) % 3);
                            }
                            KeyCode::Char(' ') => match ui.options_focus.unwrap_or(0) {
                                0 => ui.options_indicator = !ui.options_indicator,
                                1 => ui.options_ascii = !ui.options_ascii,
                                _ => ui.options_russian = !ui.options_russian,
                            },
                            _ => {}
                        }
                    } else if ui.showing_help || ui.showing_about {
                        ui.close_modal();
                    } else if ui.showing_win || ui.showing_loss {
                        ui.close_modal();
                        new_game(
                            &mut game,
                            &mut rng,
                            &mut ui,
                            &mut seconds_elapsed,
                            &mut last_second,
                        );
                    } else {
                        match key.code {
                            KeyCode::Esc => break,
                            KeyCode::F(1) => ui.showing_help = true,
                            KeyCode::F(2) => new_game(
                                &mut game,
                                &mut rng,
                                &mut ui,
                                &mut seconds_elapsed,
                                &mut last_second,
                            ),
                            KeyCode::F(7) => open_options(cfg, lang, &mut ui),
                            KeyCode::F(9) => ui.showing_about = true,
                            KeyCode::Left => ui.step_cursor(-1, 0, game.w(), game.h()),
                            KeyCode::Right => ui.step_cursor(1, 0, game.w(), game.h()),
                            KeyCode::Up => ui.step_cursor(0, -1, game.w(), game.h()),
                            KeyCode::Down => ui.step_cursor(0, 1, game.w(), game.h()),
                            KeyCode::Char(' ') => {
                                let (cx, cy) = ui.cursor;
                                activate(&mut game, &mut ui, cx, cy);
                            }
                            KeyCode::Char('f') | KeyCode::Char('F') => {
                                let (cx, cy) = ui.cursor;
                                flag(&mut game, &mut ui, cx, cy);
                            }
                            _ => {}
                        }
                    }
                }
                Event::Mouse(me) => {
                    if let Some(mrect) = ui.modal_rect {
                        match me.kind {
                            MouseEventKind::Moved => {
                                ui.modal_close_hovered = ui
                                    .modal_close_rect
                                    .map(|btn| hit(btn, me.column, me.row))
                                    .unwrap_or(false);
                                if ui.showing_options && hit(mrect, me.column, me.row) {
                                    for (i, rect) in [
                                        ui.options_indicator_rect,
                                        ui.options_ascii_rect,
                                        ui.options_russian_rect,
                                    ]
                                    .iter()
                                    .enumerate()
                                    {
                                        if let Some(rect) = rect {
                                            if hit(*rect, me.column, me.row) {
                                                ui.options_focus = Some(i as u8);
                                            }
                                        }
                                    }
                                }
                            }
                            MouseEventKind::Down(MouseButton::Left) => {
                                if !hit(mrect, me.column, me.row) {
                                    // clicks outside the modal are ignored
                                } else if ui
                                    .modal_close_rect
                                    .map(|btn| hit(btn, me.column, me.row))
                                    .unwrap_or(false)
                                {
                                    ui.modal_close_pressed = true;
                                } else if ui.showing_options {
                                    if let Some(rect) = ui.options_indicator_rect {
                                        if hit(rect, me.column, me.row) {
                                            ui.options_indicator = !ui.options_indicator;
                                            ui.options_focus = Some(0);
                                        }
                                    }
                                    if let Some(rect) = ui.options_ascii_rect {
                                        if hit(rect, me.column, me.row) {
                                            ui.options_ascii = !ui.options_ascii;
                                            ui.options_focus = Some(1);
                                        }
                                    }
                                    if let Some(rect) = ui.options_russian_rect {
                                        if hit(rect, me.column, me.row) {
                                            ui.options_russian = !ui.options_russian;
                                            ui.options_focus = Some(2);
                                        }
                                    }
                                }
                            }
                            MouseEventKind::Up(_) => {
                                if ui.modal_close_pressed {
                                    let released_on_btn = ui
                                        .modal_close_rect
                                        .map(|btn| hit(btn, me.column, me.row))
                                        .unwrap_or(false);
                                    ui.modal_close_pressed = false;
                                    if released_on_btn {
                                        let was_finished = ui.showing_win || ui.showing_loss;
                                        if ui.showing_options {
                                            apply_options(cfg, lang, &mut ui);
                                            let g = make_glyphs(cfg.ascii_icons);
                                            glyph_covered = g.0;
                                            glyph_mine = g.1;
                                            glyph_flag = g.2;
                                        } else {
                                            ui.close_modal();
                                        }
                                        if was_finished {
                                            new_game(
                                                &mut game,
                                                &mut rng,
                                                &mut ui,
                                                &mut seconds_elapsed,
                                                &mut last_second,
                                            );
                                        }
                                    }
                                }
                            }
                            MouseEventKind::Down(MouseButton::Right) => {
                                // right-click closes any modal, like Esc
                                let was_finished = ui.showing_win || ui.showing_loss;
                                ui.close_modal();
                                if was_finished {
                                    new_game(
                                        &mut game,
                                        &mut rng,
                                        &mut ui,
                                        &mut seconds_elapsed,
                                        &mut last_second,
                                    );
                                }
                            }
                            _ => {}
                        }
                    } else {
                        // no modal: menu row first, then status bar, then the board
                        let menu_handled = if let Some(rect) = menu_rect {
                            let start_x = rect.x + 2;
                            let y = rect.y + 1;
                            if me.row == y {
                                match me.kind {
                                    MouseEventKind::Moved => {
                                        let mut offset = start_x;
                                        let mut found: Option<usize> = None;
                                        for (i, (k, r)) in
                                            menu_items.iter().take(4).enumerate()
                                        {
                                            if i > 0 {
                                                offset += 3;
                                            }
                                            let full_len = (k.width() + 2 + r.width()) as u16;
                                            let end = offset + full_len - 1;
                                            if me.column >= offset && me.column <= end {
                                                found = Some(i);
                                                break;
                                            }
                                            offset = end + 1;
                                        }
                                        ui.hover_index = found;
                                        true
                                    }
                                    MouseEventKind::Down(MouseButton::Left) => {
                                        let mut consumed = false;
                                        let mut offset = start_x;
                                        for (i, (k, r)) in
                                            menu_items.iter().take(4).enumerate()
                                        {
                                            if i > 0 {
                                                offset += 3;
                                            }
                                            let full_len = (k.width() + 2 + r.width()) as u16;
                                            let end = offset + full_len - 1;
                                            if me.column >= offset && me.column <= end {
                                                ui.clicked_index = Some(i);
                                                ui.click_instant = Some(Instant::now());
                                                match i {
                                                    0 => ui.showing_help = true,
                                                    1 => new_game(
                                                        &mut game,
                                                        &mut rng,
                                                        &mut ui,
                                                        &mut seconds_elapsed,
                                                        &mut last_second,
                                                    ),
                                                    2 => open_options(cfg, lang, &mut ui),
                                                    3 => ui.showing_about = true,
                                                    _ => {}
                                                }
                                                consumed = true;
                                                break;
                                            }
                                            offset = end + 1;
                                        }
                                        consumed
                                    }
                                    MouseEventKind::Up(_) => true,
                                    _ => false,
                                }
                            } else {
                                if let MouseEventKind::Moved = me.kind {
                                    ui.hover_index = None;
                                }
                                false
                            }
                        } else {
                            false
                        };

                        if !menu_handled {
                            // status bar Esc: Exit interactions, right-aligned label
                            if let Some(srect) = status_rect {
                                let status_row = srect.y + 1;
                                if me.row == status_row {
                                    let esc_key = menu_items[4].0;
                                    let esc_rest = menu_items[4].1;
                                    let right_w =
                                        (esc_key.width() + 2 + esc_rest.width()) as u16;
                                    let end_x = srect.x + srect.width.saturating_sub(3);
                                    let start_x = end_x.saturating_sub(right_w - 1);
                                    match me.kind {
                                        MouseEventKind::Moved => {
                                            ui.exit_status_hovered =
                                                me.column >= start_x && me.column <= end_x;
                                        }
                                        MouseEventKind::Down(MouseButton::Left) => {
                                            if me.column >= start_x && me.column <= end_x {
                                                ui.exit_menu_item_down = true;
                                            }
                                        }
                                        MouseEventKind::Up(MouseButton::Left) => {
                                            if ui.exit_menu_item_down {
                                                ui.exit_menu_item_down = false;
                                                if me.column >= start_x && me.column <= end_x {
                                                    exit_requested = true;
                                                }
                                            }
                                        }
                                        _ => {}
                                    }
                                } else {
                                    ui.exit_status_hovered = false;
                                }
                            }

                            if let Some(brect) = board_rect {
                                let inner = Rect::new(
                                    brect.x + 1,
                                    brect.y + 1,
                                    brect.width.saturating_sub(2),
                                    brect.height.saturating_sub(2),
                                );
                                let cell_under = if hit(inner, me.column, me.row) {
                                    let local_x = (me.column - inner.x) as usize;
                                    let cx = local_x / 2;
                                    let cy = (me.row - inner.y) as usize;
                                    if cx < game.w() && cy < game.h() {
                                        Some((cx, cy))
                                    } else {
                                        None
                                    }
                                } else {
                                    None
                                };
                                match me.kind {
                                    MouseEventKind::Moved => {
                                        if let Some(cell) = cell_under {
                                            ui.cursor = cell;
                                        }
                                    }
                                    MouseEventKind::Down(MouseButton::Left) => {
                                        ui.left_press = cell_under;
                                    }
                                    MouseEventKind::Up(MouseButton::Left) => {
                                        if let (Some(press), Some(cell)) =
                                            (ui.left_press, cell_under)
                                        {
                                            if press == cell {
                                                activate(&mut game, &mut ui, cell.0, cell.1);
                                            }
                                        }
                                        ui.left_press = None;
                                    }
                                    MouseEventKind::Down(MouseButton::Right) => {
                                        if let Some((cx, cy)) = cell_under {
                                            flag(&mut game, &mut ui, cx, cy);
                                        }
                                    }
                                    _ => {}
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
            if exit_requested {
                break;
            }
        }

        // 1 Hz clock for the status bar; display only, frozen once the round
        // ends and paused while a dialog covers the board
        if game.status() == Status::Playing && !ui.any_modal() {
            if last_second.elapsed() >= Duration::from_secs(1) {
                seconds_elapsed += 1;
                last_second += Duration::from_secs(1);
            }
        } else {
            last_second = Instant::now();
        }

        // clear menu click feedback after a short moment
        if let Some(t0) = ui.click_instant {
            if t0.elapsed() > Duration::from_millis(200) {
                ui.clicked_index = None;
                ui.click_instant = None;
            }
        }
    }

    save_config(cfg);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}
