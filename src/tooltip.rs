/// Cells between the pointer and the tooltip's top-left corner.
const OFFSET_COLUMNS: u16 = 2;
const OFFSET_ROWS: u16 = 1;

/// Hover overlay shared by both charts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tooltip {
    visible: bool,
    lines: Vec<String>,
    anchor: (u16, u16),
}

impl Tooltip {
    pub fn show(&mut self, lines: Vec<String>) {
        self.visible = true;
        self.lines = lines;
    }

    /// Follows the pointer at (`column`, `row`).
    pub fn move_to(&mut self, column: u16, row: u16) {
        self.anchor = (column.saturating_add(OFFSET_COLUMNS), row.saturating_sub(OFFSET_ROWS));
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn anchor(&self) -> (u16, u16) {
        self.anchor
    }
}
