//! LED feedback for Push pads and buttons.
//!
//! Keeps the color state of every LED and generates MIDI messages for the
//! ones that changed since the last flush.

use keystone_core::{ButtonId, ColorIndex, FunctionButton};

use super::mapping::PushMapping;

/// Push color palette indices.
///
/// Push uses a velocity-based color palette for pads and RGB buttons.
pub mod colors {
    use keystone_core::ColorIndex;

    pub const OFF: ColorIndex = ColorIndex(0);
    pub const WHITE_DIM: ColorIndex = ColorIndex(1);
    pub const WHITE: ColorIndex = ColorIndex(3);
    pub const RED: ColorIndex = ColorIndex(5);
    pub const RED_DIM: ColorIndex = ColorIndex(6);
    pub const ORANGE: ColorIndex = ColorIndex(9);
    pub const ORANGE_DIM: ColorIndex = ColorIndex(10);
    pub const YELLOW: ColorIndex = ColorIndex(13);
    pub const YELLOW_DIM: ColorIndex = ColorIndex(14);
    pub const GREEN: ColorIndex = ColorIndex(21);
    pub const GREEN_DIM: ColorIndex = ColorIndex(22);
    pub const CYAN: ColorIndex = ColorIndex(33);
    pub const CYAN_DIM: ColorIndex = ColorIndex(34);
    pub const BLUE: ColorIndex = ColorIndex(45);
    pub const BLUE_DIM: ColorIndex = ColorIndex(46);
    pub const PURPLE: ColorIndex = ColorIndex(49);
    pub const PURPLE_DIM: ColorIndex = ColorIndex(50);
    pub const PINK: ColorIndex = ColorIndex(57);
    pub const PINK_DIM: ColorIndex = ColorIndex(58);

    /// Colors a track or layer can be given, in pad order
    pub const PALETTE: [ColorIndex; 16] = [
        RED, ORANGE, YELLOW, GREEN, CYAN, BLUE, PURPLE, PINK, RED_DIM, ORANGE_DIM, YELLOW_DIM,
        GREEN_DIM, CYAN_DIM, BLUE_DIM, PURPLE_DIM, PINK_DIM,
    ];

    /// Generic button states shared by all modes
    pub mod button {
        use super::*;

        pub const OFF: ColorIndex = super::OFF;
        pub const ON: ColorIndex = WHITE_DIM;
        pub const HI: ColorIndex = WHITE;
        pub const COLOR2_ON: ColorIndex = ORANGE_DIM;
        pub const COLOR2_HI: ColorIndex = ORANGE;
    }
}

const ROWS: usize = 8;
const COLS: usize = 8;
const BUTTON_ROWS: usize = 2;

/// LED state for the pad grid, the two button rows and the function buttons.
pub struct LedState {
    /// 8x8 grid of pad colors (64 pads, notes 36-99)
    pads: [[ColorIndex; COLS]; ROWS],
    pads_dirty: [[bool; COLS]; ROWS],

    /// Display-aligned button rows (CC 20-27 and CC 102-109)
    buttons: [[ColorIndex; COLS]; BUTTON_ROWS],
    buttons_dirty: [[bool; COLS]; BUTTON_ROWS],

    functions: [ColorIndex; FunctionButton::COUNT],
    functions_dirty: [bool; FunctionButton::COUNT],
}

fn led_index(function: FunctionButton) -> usize {
    match function {
        FunctionButton::Volume => 0,
        FunctionButton::Pan => 1,
        FunctionButton::Track => 2,
        FunctionButton::Device => 3,
        FunctionButton::Metronome => 4,
    }
}

impl LedState {
    /// Create a new LED state with all LEDs off. Everything is marked dirty
    /// so the first flush initializes the device.
    pub fn new() -> Self {
        Self {
            pads: [[colors::OFF; COLS]; ROWS],
            pads_dirty: [[true; COLS]; ROWS],
            buttons: [[colors::OFF; COLS]; BUTTON_ROWS],
            buttons_dirty: [[true; COLS]; BUTTON_ROWS],
            functions: [colors::OFF; FunctionButton::COUNT],
            functions_dirty: [true; FunctionButton::COUNT],
        }
    }

    /// Every button with an LED
    pub fn buttons() -> impl Iterator<Item = ButtonId> {
        let pads = (0..ROWS as u8).flat_map(|row| (0..COLS as u8).map(move |col| ButtonId::pad(row, col)));
        let rows = (0..BUTTON_ROWS as u8)
            .flat_map(|row| (0..COLS as u8).map(move |index| ButtonId::row(row, index)));
        let functions = FunctionButton::ALL.into_iter().map(ButtonId::Function);
        pads.chain(rows).chain(functions)
    }

    /// Set the color of a button. Returns false if the button has no LED.
    pub fn set_color(&mut self, button: ButtonId, color: ColorIndex) -> bool {
        let (slot, dirty) = match button {
            ButtonId::Pad { row, col } if (row as usize) < ROWS && (col as usize) < COLS => (
                &mut self.pads[row as usize][col as usize],
                &mut self.pads_dirty[row as usize][col as usize],
            ),
            ButtonId::Row { row, index } if (row as usize) < BUTTON_ROWS && (index as usize) < COLS => (
                &mut self.buttons[row as usize][index as usize],
                &mut self.buttons_dirty[row as usize][index as usize],
            ),
            ButtonId::Function(function) => (
                &mut self.functions[led_index(function)],
                &mut self.functions_dirty[led_index(function)],
            ),
            _ => return false,
        };

        if *slot != color {
            *slot = color;
            *dirty = true;
        }
        true
    }

    pub fn color(&self, button: ButtonId) -> Option<ColorIndex> {
        match button {
            ButtonId::Pad { row, col } => self.pads.get(row as usize)?.get(col as usize).copied(),
            ButtonId::Row { row, index } => {
                self.buttons.get(row as usize)?.get(index as usize).copied()
            }
            ButtonId::Function(function) => Some(self.functions[led_index(function)]),
        }
    }

    /// Clear all LEDs.
    pub fn clear(&mut self) {
        for button in Self::buttons() {
            self.set_color(button, colors::OFF);
        }
    }

    /// Generate MIDI messages for all dirty LEDs.
    pub fn to_midi_messages(&mut self) -> Vec<[u8; 3]> {
        let mut messages = Vec::new();

        for row in 0..ROWS {
            for col in 0..COLS {
                if self.pads_dirty[row][col] {
                    let note = PushMapping::pad_note(row as u8, col as u8);
                    messages.push([0x90, note, self.pads[row][col].index()]);
                    self.pads_dirty[row][col] = false;
                }
            }
        }

        for row in 0..BUTTON_ROWS {
            for index in 0..COLS {
                if self.buttons_dirty[row][index] {
                    let cc = PushMapping::row_button_cc(row as u8, index as u8);
                    messages.push([0xB0, cc, self.buttons[row][index].index()]);
                    self.buttons_dirty[row][index] = false;
                }
            }
        }

        for function in FunctionButton::ALL {
            let i = led_index(function);
            if self.functions_dirty[i] {
                let cc = PushMapping::function_cc(function);
                messages.push([0xB0, cc, self.functions[i].index()]);
                self.functions_dirty[i] = false;
            }
        }

        messages
    }
}

impl Default for LedState {
    fn default() -> Self {
        Self::new()
    }
}
