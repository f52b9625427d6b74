use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{Attribute, Cell, Table};
use serde::Serialize;

use crate::theme::{GLYPHS, PALETTE, TABLE_HEADER};

/// Output format options for CLI commands
#[derive(Clone, Debug, ValueEnum, Default, PartialEq)]
pub enum OutputFormat {
    /// Formatted table output (default)
    #[default]
    Table,
    /// JSON output for scripting
    Json,
    /// Compact single-line output
    Compact,
}

/// Global CLI options that affect output and behavior
#[derive(Clone, Debug, Default)]
pub struct GlobalOptions {
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub no_color: bool,
}

/// Trait for data that can be displayed as a table
pub trait TableDisplay {
    fn to_table(&self, options: &GlobalOptions) -> Table;
    fn to_compact(&self) -> String;
}

/// Output manager handles formatting and display
pub struct OutputManager {
    pub options: GlobalOptions,
}

impl OutputManager {
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }

    pub fn is_json(&self) -> bool {
        self.options.output_format == OutputFormat::Json
    }

    /// Display data according to the configured output format
    pub fn display<T>(&self, data: &T) -> Result<()>
    where
        T: Serialize + TableDisplay,
    {
        if self.options.quiet {
            return Ok(());
        }

        match self.options.output_format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(data)?;
                println!("{json}");
            }
            OutputFormat::Table => {
                let table = data.to_table(&self.options);
                println!("{table}");
            }
            OutputFormat::Compact => {
                println!("{}", data.to_compact());
            }
        }
        Ok(())
    }

    /// Display a success message with color and icon
    pub fn success(&self, message: &str) {
        if !self.options.quiet {
            println!("{}", self.decorate(GLYPHS.success, message, PALETTE.success));
        }
    }

    /// Display an error message with color and icon
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.decorate(GLYPHS.error, message, PALETTE.error));
    }

    /// Display a warning message
    pub fn warning(&self, message: &str) {
        if !self.options.quiet {
            println!("{}", self.decorate(GLYPHS.warning, message, PALETTE.warning));
        }
    }

    /// Display info message with color and icon
    pub fn info(&self, message: &str) {
        if !self.options.quiet {
            println!("{}", self.decorate(GLYPHS.info, message, PALETTE.info));
        }
    }

    /// Display verbose information (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.options.verbose && !self.options.quiet {
            eprintln!("{}", self.decorate(GLYPHS.arrow, message, PALETTE.muted));
        }
    }

    /// Display a heading
    pub fn heading(&self, text: &str) {
        if self.options.quiet || self.is_json() {
            return;
        }
        let output = if self.options.no_color {
            format!("\n{text}\n{}", "=".repeat(text.chars().count()))
        } else {
            format!("\n{}", text.color(PALETTE.heading).bold())
        };
        println!("{output}");
    }

    /// Display a bullet list item
    pub fn bullet(&self, text: &str) {
        if !self.options.quiet {
            let output = if self.options.no_color {
                format!("  {} {text}", GLYPHS.bullet)
            } else {
                format!("  {} {text}", GLYPHS.bullet.color(PALETTE.muted))
            };
            println!("{output}");
        }
    }

    fn decorate(&self, icon: &str, message: &str, color: colored::Color) -> String {
        if self.options.no_color {
            format!("{icon} {message}")
        } else {
            format!("{} {}", icon.color(color), message.color(color))
        }
    }
}

/// Create a themed table
pub fn create_table(options: &GlobalOptions) -> Table {
    let mut table = Table::new();
    if options.no_color {
        table.load_preset(comfy_table::presets::ASCII_FULL);
    } else {
        table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
    }
    table
}

/// Add themed header to table
pub fn add_table_header(options: &GlobalOptions, table: &mut Table, headers: &[&str]) {
    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| {
            let cell = Cell::new(h).add_attribute(Attribute::Bold);
            if options.no_color {
                cell
            } else {
                cell.fg(TABLE_HEADER)
            }
        })
        .collect();
    table.set_header(header_cells);
}
