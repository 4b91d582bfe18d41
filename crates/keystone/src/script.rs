//! Line based simulator scripts.
//!
//! ```text
//! # comments start with '#'
//! button metronome press
//! pad 0 2 hold
//! row 0 3 press
//! knob 4 -2
//! touch 4 on
//! fader 3 down
//! wait 500
//! midi 90 24 7f
//! mode volume
//! view session
//! show
//! leds
//! ```

use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use keystone_core::{ButtonEvent, FunctionButton};
use keystone_push::{Modes, Views};

/// How a button is operated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Down,
    Up,
    /// Down and up again right away
    Press,
    /// Down, held past the long press threshold, then up
    Hold,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pad { row: u8, col: u8, action: Action },
    Row { row: u8, index: u8, action: Action },
    Button { button: FunctionButton, action: Action },
    /// Turn encoder `index` by `delta` steps
    Knob { index: u8, delta: i8 },
    Touch { index: u8, touched: bool },
    Fader { index: usize, event: ButtonEvent },
    Wait(Duration),
    Midi(Vec<u8>),
    Mode(Modes),
    View(Views),
    Show,
    Leds,
}

/// Parse one script line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match (keyword, args.as_slice()) {
        ("pad", [row, col, action]) => Command::Pad {
            row: parse_index(row, 8)?,
            col: parse_index(col, 8)?,
            action: parse_action(action)?,
        },
        ("row", [row, index, action]) => Command::Row {
            row: parse_index(row, 2)?,
            index: parse_index(index, 8)?,
            action: parse_action(action)?,
        },
        ("button", [name, action]) => Command::Button {
            button: parse_function(name)?,
            action: parse_action(action)?,
        },
        ("knob", [index, delta]) => Command::Knob {
            index: parse_index(index, 8)?,
            delta: parse_delta(delta)?,
        },
        ("touch", [index, state]) => Command::Touch {
            index: parse_index(index, 8)?,
            touched: match *state {
                "on" => true,
                "off" => false,
                other => bail!("Expected 'on' or 'off', got '{}'", other),
            },
        },
        ("fader", [index, state]) => Command::Fader {
            index: index
                .parse()
                .with_context(|| format!("Invalid fader index '{}'", index))?,
            event: match *state {
                "down" => ButtonEvent::Down,
                "up" => ButtonEvent::Up,
                other => bail!("Expected 'down' or 'up', got '{}'", other),
            },
        },
        ("wait", [ms]) => Command::Wait(Duration::from_millis(
            ms.parse()
                .with_context(|| format!("Invalid duration '{}'", ms))?,
        )),
        ("midi", bytes) if !bytes.is_empty() => Command::Midi(
            bytes
                .iter()
                .map(|b| u8::from_str_radix(b, 16).with_context(|| format!("Invalid byte '{}'", b)))
                .collect::<anyhow::Result<_>>()?,
        ),
        ("mode", [name]) => Command::Mode(parse_mode(name)?),
        ("view", [name]) => Command::View(parse_view(name)?),
        ("show", []) => Command::Show,
        ("leds", []) => Command::Leds,
        _ => bail!("Unknown command '{}'", line),
    };
    Ok(Some(command))
}

fn parse_index(value: &str, count: u8) -> anyhow::Result<u8> {
    let index: u8 = value
        .parse()
        .with_context(|| format!("Invalid index '{}'", value))?;
    if index >= count {
        bail!("Index {} out of range 0..{}", index, count);
    }
    Ok(index)
}

fn parse_delta(value: &str) -> anyhow::Result<i8> {
    let delta: i8 = value
        .parse()
        .with_context(|| format!("Invalid knob delta '{}'", value))?;
    if !(-64..=63).contains(&delta) {
        bail!("Knob delta {} out of range -64..=63", delta);
    }
    Ok(delta)
}

fn parse_action(value: &str) -> anyhow::Result<Action> {
    match value {
        "down" => Ok(Action::Down),
        "up" => Ok(Action::Up),
        "press" => Ok(Action::Press),
        "hold" => Ok(Action::Hold),
        other => Err(anyhow!("Unknown button action '{}'", other)),
    }
}

fn parse_function(value: &str) -> anyhow::Result<FunctionButton> {
    match value {
        "volume" => Ok(FunctionButton::Volume),
        "pan" => Ok(FunctionButton::Pan),
        "track" => Ok(FunctionButton::Track),
        "device" => Ok(FunctionButton::Device),
        "metronome" => Ok(FunctionButton::Metronome),
        other => Err(anyhow!("Unknown button '{}'", other)),
    }
}

fn parse_mode(value: &str) -> anyhow::Result<Modes> {
    match value {
        "track" => Ok(Modes::Track),
        "volume" => Ok(Modes::Volume),
        "pan" => Ok(Modes::Pan),
        "transport" => Ok(Modes::Transport),
        "layer" => Ok(Modes::LayerDetails),
        other => Err(anyhow!("Unknown mode '{}'", other)),
    }
}

fn parse_view(value: &str) -> anyhow::Result<Views> {
    match value {
        "session" => Ok(Views::Session),
        "track-color" => Ok(Views::ColorTrack),
        "layer-color" => Ok(Views::ColorLayer),
        other => Err(anyhow!("Unknown view '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   # just a comment").unwrap(), None);
        assert_eq!(parse_line("show # trailing").unwrap(), Some(Command::Show));
    }

    #[test]
    fn test_button_commands() {
        assert_eq!(
            parse_line("pad 0 2 hold").unwrap(),
            Some(Command::Pad {
                row: 0,
                col: 2,
                action: Action::Hold
            })
        );
        assert_eq!(
            parse_line("button metronome press").unwrap(),
            Some(Command::Button {
                button: FunctionButton::Metronome,
                action: Action::Press
            })
        );
        assert!(parse_line("row 2 0 press").is_err());
        assert!(parse_line("pad 0 8 down").is_err());
        assert!(parse_line("button shift press").is_err());
    }

    #[test]
    fn test_values() {
        assert_eq!(
            parse_line("knob 4 -2").unwrap(),
            Some(Command::Knob { index: 4, delta: -2 })
        );
        assert!(parse_line("knob 4 100").is_err());
        assert_eq!(
            parse_line("midi 90 24 7f").unwrap(),
            Some(Command::Midi(vec![0x90, 0x24, 0x7F]))
        );
        assert_eq!(
            parse_line("wait 250").unwrap(),
            Some(Command::Wait(Duration::from_millis(250)))
        );
        assert_eq!(parse_line("mode layer").unwrap(), Some(Command::Mode(Modes::LayerDetails)));
        assert!(parse_line("frobnicate").is_err());
    }
}
