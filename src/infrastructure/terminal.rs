//! Terminal capabilities and colors shared by the prompter and console sink

use is_terminal::IsTerminal;

use crossterm::style::{Color, Stylize};

pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

/// Whether stderr should receive ANSI colors
pub fn stderr_supports_color() -> bool {
    supports_color_impl(
        |key| std::env::var(key).ok(),
        std::io::stderr().is_terminal(),
    )
}

pub fn stdout_supports_color() -> bool {
    supports_color_impl(
        |key| std::env::var(key).ok(),
        std::io::stdout().is_terminal(),
    )
}

fn supports_color_impl(get_env: impl Fn(&str) -> Option<String>, is_tty: bool) -> bool {
    let term_is_dumb = get_env("TERM").is_some_and(|t| t.eq_ignore_ascii_case("dumb"));
    is_tty && !term_is_dumb && get_env("NO_COLOR").is_none()
}

/// Color a change line by its leading sigil (`+`, `~`, `-`)
pub fn paint_change_line(line: &str, color: bool) -> String {
    if !color {
        return line.to_string();
    }
    let tint = match line.chars().next() {
        Some('+') => colors::SUCCESS,
        Some('-') => colors::ERROR,
        Some('~') => colors::WARNING,
        _ => colors::DIM,
    };
    format!("{}", line.with(tint))
}

pub fn paint(text: &str, tint: Color, color: bool) -> String {
    if color {
        format!("{}", text.with(tint))
    } else {
        text.to_string()
    }
}
