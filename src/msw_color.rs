// Palette resolution for cross-terminal consistency: the desktop original's
// RGB colors, degraded to whatever the running terminal can show

use ratatui::style::Color;
use term_color_support::ColorSupport;

/// Every color the UI draws with, resolved once at startup.
/// Truecolor terminals get the sampled RGB values, 256-color terminals get
/// stable indexed approximations, basic terminals get ANSI fallbacks.
pub struct Palette {
    pub board_bg: Color,
    pub open_bg: Color,
    pub covered_fg: Color,
    pub cursor_bg: Color,
    pub indicator_fg: Color,
    pub flag_fg: Color,
    pub mine_fg: Color,
    pub mine_bg: Color,
    pub safe_mine_bg: Color, // correctly flagged mines at the end-of-round reveal
    pub numbers: [Color; 8], // digit colors for neighbor counts 1 through 8
    pub status_playing: Color,
    pub status_won: Color,
    pub status_lost: Color,
    pub menu_key_fg: Color,
    pub menu_hover_bg: Color,
    pub menu_pressed_bg: Color,
    pub menu_pressed_fg: Color,
    pub btn_bg: Color,
    pub btn_fg: Color,
    pub btn_hover_bg: Color,
    pub btn_pressed_bg: Color,
}

impl Palette {
    pub fn detect() -> Self {
        let support = ColorSupport::stdout();
        let pick = |rgb: (u8, u8, u8), index256: u8, ansi: Color| {
            if support.has_16m {
                Color::Rgb(rgb.0, rgb.1, rgb.2)
            } else if support.has_256 {
                Color::Indexed(index256)
            } else {
                ansi
            }
        };

        Palette {
            board_bg: pick((62, 62, 66), 237, Color::DarkGray),
            open_bg: pick((37, 37, 38), 235, Color::Black),
            covered_fg: pick((204, 204, 204), 250, Color::Gray),
            cursor_bg: pick((59, 120, 255), 63, Color::LightBlue),
            indicator_fg: pick((193, 156, 0), 178, Color::Yellow),
            flag_fg: pick((244, 71, 71), 203, Color::Red),
            mine_fg: pick((30, 30, 30), 234, Color::Black),
            mine_bg: pick((244, 71, 71), 203, Color::Red),
            safe_mine_bg: pick((78, 201, 176), 43, Color::Cyan),
            numbers: [
                pick((78, 201, 176), 43, Color::Cyan),
                pick((156, 220, 254), 153, Color::LightBlue),
                pick((206, 145, 120), 180, Color::Yellow),
                pick((197, 134, 192), 175, Color::Magenta),
                pick((220, 220, 170), 187, Color::LightYellow),
                pick((86, 156, 214), 74, Color::Blue),
                pick((181, 206, 168), 151, Color::Green),
                pick((212, 212, 212), 252, Color::Gray),
            ],
            status_playing: pick((206, 145, 120), 180, Color::Yellow),
            status_won: pick((78, 201, 176), 43, Color::Cyan),
            status_lost: pick((244, 71, 71), 203, Color::LightRed),
            menu_key_fg: pick((193, 156, 0), 178, Color::Yellow),
            menu_hover_bg: pick((59, 120, 255), 63, Color::LightBlue),
            menu_pressed_bg: pick((19, 161, 14), 28, Color::Green),
            menu_pressed_fg: pick((12, 12, 12), 232, Color::Black),
            btn_bg: pick((204, 204, 204), 250, Color::Gray),
            btn_fg: pick((12, 12, 12), 232, Color::Black),
            btn_hover_bg: pick((242, 242, 242), 255, Color::White),
            btn_pressed_bg: pick((19, 161, 14), 28, Color::Green),
        }
    }

    /// Foreground for a revealed neighbor count, 1-based
    pub fn number(&self, n: u8) -> Color {
        let i = (n as usize).saturating_sub(1).min(7);
        self.numbers[i]
    }
}
