// Sat Oct 17 2026 - Alex

use colored::*;

const TAB_STOP: usize = 8;
const DEFAULT_DESCRIPTION_WIDTH: usize = 100;

/// The per-unit size table: offset, description and byte size, with padded
/// rows highlighted.
pub struct SizeTable {
    rows: Vec<SizeRow>,
    description_width: usize,
    use_color: bool,
}

struct SizeRow {
    offset: u64,
    description: String,
    byte_size: u64,
    padded: bool,
}

impl SizeTable {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            description_width: DEFAULT_DESCRIPTION_WIDTH,
            use_color: true,
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_description_width(mut self, width: usize) -> Self {
        self.description_width = width;
        self
    }

    pub fn add_row(&mut self, offset: u64, description: String, byte_size: u64, padded: bool) {
        self.rows.push(SizeRow {
            offset,
            description,
            byte_size,
            padded,
        });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self) -> String {
        format!("{:<4} |\t{:<width$} |\t{}", "#", "type", "size", width = self.description_width)
    }

    /// A dash rule as wide as the header once its tabs are expanded.
    pub fn rule(&self) -> String {
        "-".repeat(expanded_width(&self.header()))
    }

    pub fn build(&self) -> String {
        let rule = self.rule();
        let mut lines = Vec::with_capacity(self.rows.len() + 3);

        lines.push(self.header());
        lines.push(rule.clone());
        for row in &self.rows {
            lines.push(self.render_row(row));
        }
        lines.push(rule);

        lines.join("\n")
    }

    fn render_row(&self, row: &SizeRow) -> String {
        let cell = format!("{:<width$}", row.description, width = self.description_width);
        let cell = if row.padded && self.use_color {
            cell.red().to_string()
        } else {
            cell
        };
        format!("{:04x} |\t{} |\t{}", row.offset, cell, row.byte_size)
    }
}

impl Default for SizeTable {
    fn default() -> Self {
        Self::new()
    }
}

fn expanded_width(line: &str) -> usize {
    line.chars().fold(0, |column, c| {
        if c == '\t' {
            (column / TAB_STOP + 1) * TAB_STOP
        } else {
            column + 1
        }
    })
}
