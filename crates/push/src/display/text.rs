//! Character display buffer for the Push 1.

use keystone_core::TextDisplay;

/// Number of text rows
pub const ROWS: usize = 4;
/// Characters per row
pub const COLUMNS: usize = 68;
/// Characters per block, one block spans two cells
const BLOCK_WIDTH: usize = 17;
const BLOCKS: usize = 4;
const CELLS: usize = 8;

/// Characters used by modes for markers and bar graphs.
pub mod glyphs {
    pub const SELECT_ARROW: char = '>';
    pub const BARS_ONE: char = '|';
    pub const BARS_TWO: char = '#';
    pub const BARS_NON: char = '_';
}

/// In-memory 4x68 character display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDisplayBuffer {
    rows: [[char; COLUMNS]; ROWS],
}

impl TextDisplayBuffer {
    pub fn new() -> Self {
        Self {
            rows: [[' '; COLUMNS]; ROWS],
        }
    }

    /// Text of `row`, always `COLUMNS` characters long
    pub fn row(&self, row: usize) -> String {
        self.rows
            .get(row)
            .map(|r| r.iter().collect())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        (0..ROWS).map(|row| self.row(row)).collect()
    }

    /// Column where cell `cell` starts. Cells alternate between 8 and 9
    /// characters so that two of them fill a block.
    fn cell_start(cell: usize) -> usize {
        cell * BLOCK_WIDTH / 2
    }

    /// Write `text` at `start`, padded with spaces or truncated to `width`.
    fn write(&mut self, row: usize, start: usize, width: usize, text: &str) {
        let Some(line) = self.rows.get_mut(row) else {
            return;
        };
        let mut chars = text.chars();
        for slot in line.iter_mut().skip(start).take(width) {
            *slot = chars.next().unwrap_or(' ');
        }
    }
}

impl Default for TextDisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDisplay for TextDisplayBuffer {
    fn rows(&self) -> usize {
        ROWS
    }

    fn cells(&self) -> usize {
        CELLS
    }

    fn clear(&mut self) -> &mut dyn TextDisplay {
        self.rows = [[' '; COLUMNS]; ROWS];
        self
    }

    fn set_row(&mut self, row: usize, text: &str) -> &mut dyn TextDisplay {
        self.write(row, 0, COLUMNS, text);
        self
    }

    fn set_block(&mut self, row: usize, block: usize, text: &str) -> &mut dyn TextDisplay {
        if block < BLOCKS {
            self.write(row, block * BLOCK_WIDTH, BLOCK_WIDTH, text);
        }
        self
    }

    fn set_cell(&mut self, row: usize, cell: usize, text: &str) -> &mut dyn TextDisplay {
        if cell < CELLS {
            let start = Self::cell_start(cell);
            let width = Self::cell_start(cell + 1) - start;
            self.write(row, start, width, text);
        }
        self
    }

    fn set_message(&mut self, row: usize, text: &str) -> &mut dyn TextDisplay {
        self.clear();
        let len = text.chars().count().min(COLUMNS);
        let start = (COLUMNS - len) / 2;
        self.write(row, start, COLUMNS - start, text);
        self
    }
}
