//! User-facing status lines. Colours are dropped when `NO_COLOR` is set.

use ansi_term::{Colour, Style};
use std::fmt;

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn paint_icon(colour: Colour, icon: &str) -> String {
    if colors_enabled() {
        Style::new().bold().fg(colour).paint(icon).to_string()
    } else {
        icon.to_string()
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", paint_icon(Colour::Blue, ICON_INFO), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", paint_icon(Colour::Green, ICON_OK), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{} {}", paint_icon(Colour::Yellow, ICON_WARN), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", paint_icon(Colour::Red, ICON_ERR), msg);
}

/// Formatted section header
pub fn header<T: fmt::Display>(msg: T) {
    let line = format!("==================== {}", msg);
    if colors_enabled() {
        println!("{}\n", Style::new().bold().fg(Colour::Blue).paint(line));
    } else {
        println!("{}\n", line);
    }
}
