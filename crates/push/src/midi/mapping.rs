//! Push MIDI mapping.
//!
//! Translates raw Push MIDI messages into surface input.
//!
//! # Layout
//!
//! ```text
//! Pads (8x8 grid, notes 36-99): row 0 is the bottom row (36-43)
//! Button row 0 (above the display): CC 20-27
//! Button row 1 (below the display): CC 102-109
//! Encoders: CC 71-78, relative two's complement
//! Encoder touch: notes 0-7
//! Function buttons: Volume 114, Pan 115, Track 112, Device 110, Metronome 9
//! ```

use keystone_core::{ButtonEvent, FunctionButton};

use crate::error::{PushError, Result};

/// Input decoded from a single MIDI message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceInput {
    Pad { row: u8, col: u8, event: ButtonEvent },
    RowButton { row: u8, index: u8, event: ButtonEvent },
    Function { button: FunctionButton, event: ButtonEvent },
    Knob { index: usize, value: u8 },
    KnobTouch { index: usize, touched: bool },
}

/// Push MIDI mapping constants and translation.
pub struct PushMapping;

impl PushMapping {
    // === Pad Notes (8x8 grid) ===
    pub const PAD_FIRST: u8 = 36;
    pub const PAD_LAST: u8 = 99;

    // === Encoder touch (notes 0-7) ===
    pub const KNOB_TOUCH_FIRST: u8 = 0;
    pub const KNOB_TOUCH_LAST: u8 = 7;

    // === Display button rows ===
    pub const ROW1_FIRST: u8 = 20;
    pub const ROW1_LAST: u8 = 27;
    pub const ROW2_FIRST: u8 = 102;
    pub const ROW2_LAST: u8 = 109;

    // === Encoders (CC 71-78) ===
    pub const ENCODER_1: u8 = 71;
    pub const ENCODER_8: u8 = 78;

    // === Function buttons ===
    pub const BUTTON_METRONOME: u8 = 9;
    pub const BUTTON_DEVICE: u8 = 110;
    pub const BUTTON_TRACK: u8 = 112;
    pub const BUTTON_VOLUME: u8 = 114;
    pub const BUTTON_PAN: u8 = 115;

    /// Note of the pad at `row`/`col`, row 0 being the bottom row.
    pub fn pad_note(row: u8, col: u8) -> u8 {
        Self::PAD_FIRST + row * 8 + col
    }

    pub fn row_button_cc(row: u8, index: u8) -> u8 {
        if row == 0 {
            Self::ROW1_FIRST + index
        } else {
            Self::ROW2_FIRST + index
        }
    }

    pub fn function_cc(button: FunctionButton) -> u8 {
        match button {
            FunctionButton::Volume => Self::BUTTON_VOLUME,
            FunctionButton::Pan => Self::BUTTON_PAN,
            FunctionButton::Track => Self::BUTTON_TRACK,
            FunctionButton::Device => Self::BUTTON_DEVICE,
            FunctionButton::Metronome => Self::BUTTON_METRONOME,
        }
    }

    fn function_for_cc(cc: u8) -> Option<FunctionButton> {
        match cc {
            Self::BUTTON_VOLUME => Some(FunctionButton::Volume),
            Self::BUTTON_PAN => Some(FunctionButton::Pan),
            Self::BUTTON_TRACK => Some(FunctionButton::Track),
            Self::BUTTON_DEVICE => Some(FunctionButton::Device),
            Self::BUTTON_METRONOME => Some(FunctionButton::Metronome),
            _ => None,
        }
    }

    /// Decode a raw MIDI message.
    ///
    /// Messages the Push layout does not use decode to `None`. Messages that
    /// are too short for their status byte are an error.
    pub fn parse(message: &[u8]) -> Result<Option<SurfaceInput>> {
        let Some(&first) = message.first() else {
            return Ok(None);
        };

        let status = first & 0xF0;
        if !matches!(status, 0x80 | 0x90 | 0xB0) {
            return Ok(None);
        }
        if message.len() < 3 {
            return Err(PushError::Truncated {
                status: first,
                len: message.len(),
            });
        }

        Ok(match status {
            0x90 => Self::translate_note(message[1], message[2]),
            0x80 => Self::translate_note(message[1], 0),
            _ => Self::translate_cc(message[1], message[2]),
        })
    }

    /// Translate a note message. Velocity 0 is a release.
    pub fn translate_note(note: u8, velocity: u8) -> Option<SurfaceInput> {
        let pressed = velocity > 0;
        match note {
            Self::PAD_FIRST..=Self::PAD_LAST => {
                let offset = note - Self::PAD_FIRST;
                Some(SurfaceInput::Pad {
                    row: offset / 8,
                    col: offset % 8,
                    event: if pressed { ButtonEvent::Down } else { ButtonEvent::Up },
                })
            }
            Self::KNOB_TOUCH_FIRST..=Self::KNOB_TOUCH_LAST => Some(SurfaceInput::KnobTouch {
                index: (note - Self::KNOB_TOUCH_FIRST) as usize,
                touched: pressed,
            }),
            _ => None,
        }
    }

    /// Translate a control change. Buttons send 127 on press and 0 on release.
    pub fn translate_cc(cc: u8, value: u8) -> Option<SurfaceInput> {
        let event = if value > 0 { ButtonEvent::Down } else { ButtonEvent::Up };
        match cc {
            Self::ENCODER_1..=Self::ENCODER_8 => Some(SurfaceInput::Knob {
                index: (cc - Self::ENCODER_1) as usize,
                value,
            }),
            Self::ROW1_FIRST..=Self::ROW1_LAST => Some(SurfaceInput::RowButton {
                row: 0,
                index: cc - Self::ROW1_FIRST,
                event,
            }),
            Self::ROW2_FIRST..=Self::ROW2_LAST => Some(SurfaceInput::RowButton {
                row: 1,
                index: cc - Self::ROW2_FIRST,
                event,
            }),
            _ => Self::function_for_cc(cc).map(|button| SurfaceInput::Function { button, event }),
        }
    }

    /// Get the Push device name for MIDI port matching.
    pub fn device_name() -> &'static str {
        "Ableton Push"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_mapping() {
        let input = PushMapping::parse(&[0x90, 36, 100]).unwrap();
        assert_eq!(
            input,
            Some(SurfaceInput::Pad {
                row: 0,
                col: 0,
                event: ButtonEvent::Down
            })
        );

        // Note on with velocity 0 is a release
        let input = PushMapping::parse(&[0x90, 99, 0]).unwrap();
        assert_eq!(
            input,
            Some(SurfaceInput::Pad {
                row: 7,
                col: 7,
                event: ButtonEvent::Up
            })
        );

        let input = PushMapping::parse(&[0x80, 45]).unwrap();
        assert_eq!(
            input,
            Some(SurfaceInput::Pad {
                row: 1,
                col: 1,
                event: ButtonEvent::Up
            })
        );
    }

    #[test]
    fn test_button_rows_and_functions() {
        assert_eq!(
            PushMapping::translate_cc(23, 127),
            Some(SurfaceInput::RowButton {
                row: 0,
                index: 3,
                event: ButtonEvent::Down
            })
        );
        assert_eq!(
            PushMapping::translate_cc(109, 0),
            Some(SurfaceInput::RowButton {
                row: 1,
                index: 7,
                event: ButtonEvent::Up
            })
        );
        assert_eq!(
            PushMapping::translate_cc(PushMapping::BUTTON_PAN, 127),
            Some(SurfaceInput::Function {
                button: FunctionButton::Pan,
                event: ButtonEvent::Down
            })
        );
        assert_eq!(PushMapping::translate_cc(1, 127), None);
    }

    #[test]
    fn test_encoders_and_touch() {
        assert_eq!(
            PushMapping::parse(&[0xB0, 72, 127]).unwrap(),
            Some(SurfaceInput::Knob { index: 1, value: 127 })
        );
        assert_eq!(
            PushMapping::parse(&[0x90, 4, 127]).unwrap(),
            Some(SurfaceInput::KnobTouch {
                index: 4,
                touched: true
            })
        );
    }

    #[test]
    fn test_led_addresses_match_input() {
        for row in 0..2 {
            for index in 0..8 {
                let cc = PushMapping::row_button_cc(row, index);
                assert!(matches!(
                    PushMapping::translate_cc(cc, 127),
                    Some(SurfaceInput::RowButton { row: r, index: i, .. }) if r == row && i == index
                ));
            }
        }
        for button in FunctionButton::ALL {
            let cc = PushMapping::function_cc(button);
            assert!(matches!(
                PushMapping::translate_cc(cc, 127),
                Some(SurfaceInput::Function { button: b, .. }) if b == button
            ));
        }
    }

    #[test]
    fn test_truncated_and_unknown_messages() {
        assert!(matches!(
            PushMapping::parse(&[0x90, 36]),
            Err(PushError::Truncated { status: 0x90, len: 2 })
        ));
        assert!(matches!(
            PushMapping::parse(&[0x80, 36]),
            Err(PushError::Truncated { status: 0x80, len: 2 })
        ));
        assert_eq!(PushMapping::parse(&[]).unwrap(), None);
        // Pitch bend is not used
        assert_eq!(PushMapping::parse(&[0xE0, 0, 64]).unwrap(), None);
    }
}
