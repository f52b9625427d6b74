//! Colors and glyphs for terminal output.

use colored::Color;
use comfy_table::Color as TableColor;
use domo::MismatchKind;
use once_cell::sync::Lazy;

pub struct Palette {
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub heading: Color,
    pub muted: Color,
}

pub static PALETTE: Lazy<Palette> = Lazy::new(|| Palette {
    success: Color::Green,
    error: Color::Red,
    warning: Color::Yellow,
    info: Color::Blue,
    heading: Color::BrightBlue,
    muted: Color::BrightBlack,
});

pub struct Glyphs {
    pub success: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub info: &'static str,
    pub arrow: &'static str,
    pub bullet: &'static str,
    pub file: &'static str,
}

pub const GLYPHS: Glyphs = Glyphs {
    success: "✓",
    error: "✗",
    warning: "⚠",
    info: "ℹ",
    arrow: "→",
    bullet: "•",
    file: "📄",
};

pub const TABLE_HEADER: TableColor = TableColor::Cyan;

/// Row color for one kind of schema difference.
pub fn mismatch_color(kind: MismatchKind) -> TableColor {
    match kind {
        MismatchKind::ColumnName | MismatchKind::ColumnType => TableColor::Yellow,
        MismatchKind::DeleteFromRemote => TableColor::Red,
        MismatchKind::AddToRemote => TableColor::Green,
    }
}

pub fn drift_color(changed: bool) -> TableColor {
    if changed { TableColor::Yellow } else { TableColor::Green }
}
