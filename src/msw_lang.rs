// Multi-language support module
// Localized UI strings for English and Russian

#[derive(Clone)]
pub struct Assets {
    // Menu items
    pub menu_help: &'static str,
    pub menu_new: &'static str,
    pub menu_options: &'static str,
    pub menu_about: &'static str,
    pub menu_exit: &'static str,

    // Status bar
    pub status_playing: &'static str,
    pub status_won: &'static str,
    pub status_lost: &'static str,
    pub status_mines_label: &'static str,
    pub status_time_label: &'static str,

    // Help modal
    pub help_controls: &'static str,
    pub help_move: &'static str,
    pub help_reveal: &'static str,
    pub help_flag: &'static str,
    pub help_new: &'static str,

    // Options modal
    pub opt_show_indicator: &'static str,
    pub opt_ascii_icons: &'static str,
    pub opt_russian: &'static str,

    // Win/Loss modals
    pub win_title: &'static str,
    pub win_message: &'static str,
    pub win_time_fmt: &'static str, // "Time: {} seconds"
    pub loss_title: &'static str,
    pub loss_message: &'static str,
    pub loss_better_luck: &'static str,

    // Buttons
    pub btn_ok: &'static str,
    pub btn_close: &'static str,

    // Terminal size messages
    pub tsmsg_line1: &'static str,
    pub tsmsg_line2: &'static str, // "Minimum size required: {} x {}"
    pub tsmsg_title: &'static str,
}

/// Returns English language assets
pub fn english_assets() -> Assets {
    Assets {
        menu_help: "Help",
        menu_new: "New",
        menu_options: "Options",
        menu_about: "About",
        menu_exit: "Exit",

        status_playing: "Game on",
        status_won: "🎉 Victory! 😊",
        status_lost: "💥 Defeat",
        status_mines_label: "Mines",
        status_time_label: "Time",

        help_controls: " Controls:",
        help_move: "  Mouse | Arrows  - move cursor",
        help_reveal: "  L-Click | Space - open cell",
        help_flag: "  R-Click | F     - toggle flag",
        help_new: "  F2              - new game",

        opt_show_indicator: "Show indicator",
        opt_ascii_icons: "ASCII icons",
        opt_russian: "Русский язык",

        win_title: "Success",
        win_message: "All mines cleared, you win!",
        win_time_fmt: "Time: {} seconds",
        loss_title: "Failure",
        loss_message: "A mine went off, you lose!",
        loss_better_luck: "Better luck next time.",

        btn_ok: " OK ",
        btn_close: " CLOSE ",

        tsmsg_line1: "Terminal layout too small",
        tsmsg_line2: "Minimum size required: {} x {}",
        tsmsg_title: "Resize needed",
    }
}

/// Returns Russian language assets, matching the original desktop wording
pub fn russian_assets() -> Assets {
    Assets {
        menu_help: "Помощь",
        menu_new: "Новая",
        menu_options: "Настройки",
        menu_about: "О программе",
        menu_exit: "Выход",

        status_playing: "Игра идёт",
        status_won: "🎉 Победа! 😊",
        status_lost: "💥 Поражение",
        status_mines_label: "Мины",
        status_time_label: "Время",

        help_controls: " Управление:",
        help_move: "  Мышь | Стрелки    - курсор",
        help_reveal: "  ЛКМ | Пробел      - открыть",
        help_flag: "  ПКМ | F           - флажок",
        help_new: "  F2                - новая игра",

        opt_show_indicator: "Показывать курсор",
        opt_ascii_icons: "ASCII значки",
        opt_russian: "Русский язык",

        win_title: "Успех",
        win_message: "Все мины обезврежены, победа!",
        win_time_fmt: "Время: {} с",
        loss_title: "Неудача",
        loss_message: "Мина взорвалась, поражение!",
        loss_better_luck: "Повезёт в следующий раз.",

        btn_ok: " ОК ",
        btn_close: " ЗАКРЫТЬ ",

        tsmsg_line1: "Экран терминала слишком мал",
        tsmsg_line2: "Минимальный размер: {} x {}",
        tsmsg_title: "Нужно больше места",
    }
}

/// Current language code plus its active string assets
pub struct Lang {
    pub current_lang: String,
    pub assets: Assets,
}

impl Lang {
    /// Create from a language code, normalizing region suffixes
    /// ("ru-RU" becomes "ru") and defaulting to English
    pub fn new(lang_code: &str) -> Self {
        let normalized = lang_code.to_lowercase();
        let code = if normalized.starts_with("ru") {
            "ru"
        } else {
            "en"
        };

        Lang {
            current_lang: code.to_string(),
            assets: if code == "ru" {
                russian_assets()
            } else {
                english_assets()
            },
        }
    }

    /// Switch the current language and reload all string assets
    pub fn switch_to(&mut self, lang_code: &str) {
        let fresh = Lang::new(lang_code);
        self.current_lang = fresh.current_lang;
        self.assets = fresh.assets;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_suffixes_are_normalized() {
        let lang = Lang::new("ru-RU");
        assert_eq!(lang.current_lang, "ru");
        assert_eq!(lang.assets.status_playing, "Игра идёт");
    }

    #[test]
    fn unsupported_languages_fall_back_to_english() {
        let lang = Lang::new("de-DE");
        assert_eq!(lang.current_lang, "en");
    }

    #[test]
    fn switching_replaces_the_assets() {
        let mut lang = Lang::new("en");
        lang.switch_to("ru");
        assert_eq!(lang.assets.menu_exit, "Выход");
        lang.switch_to("en");
        assert_eq!(lang.assets.menu_exit, "Exit");
    }
}
