use std::fmt;


/// Kind of interaction reported for a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonEvent {
    Down,
    Up,
    /// Button has been held past the long-press threshold
    Long,
}

/// Partition of feature groups with a single active instance each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Mode,
    View,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Mode => write!(f, "mode"),
            Category::View => write!(f, "view"),
        }
    }
}

/// Dedicated function buttons that sit outside the button rows and pad grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionButton {
    Volume,
    Pan,
    Track,
    Device,
    Metronome,
}

impl FunctionButton {
    pub const COUNT: usize = 5;
    pub const ALL: [FunctionButton; Self::COUNT] = [
        FunctionButton::Volume,
        FunctionButton::Pan,
        FunctionButton::Track,
        FunctionButton::Device,
        FunctionButton::Metronome,
    ];
}

/// Logical identifier of a button on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    /// Button `index` of the display-aligned button row `row`
    Row { row: u8, index: u8 },
    /// Pad of the main grid, row 0 is the bottom row
    Pad { row: u8, col: u8 },
    Function(FunctionButton),
}

impl ButtonId {
    pub const fn row(row: u8, index: u8) -> Self {
        ButtonId::Row { row, index }
    }

    pub const fn pad(row: u8, col: u8) -> Self {
        ButtonId::Pad { row, col }
    }
}

/// Returns the index of `button` within button row `row`, if it belongs to it.
pub fn button_row_index(row: u8, button: ButtonId) -> Option<u8> {
    match button {
        ButtonId::Row { row: r, index } if r == row => Some(index),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_row_index() {
        assert_eq!(button_row_index(0, ButtonId::row(0, 5)), Some(5));
        assert_eq!(button_row_index(1, ButtonId::row(0, 5)), None);
        assert_eq!(button_row_index(0, ButtonId::pad(0, 5)), None);
        assert_eq!(
            button_row_index(0, ButtonId::Function(FunctionButton::Track)),
            None
        );
    }
}
