use std::time::{Duration, Instant};

use keystone_core::model::MemoryModel;
use keystone_core::{ButtonId, DisplayKind, Settings};
use keystone_push::display::{Element, GraphicDisplayModel, TextDisplayBuffer};
use keystone_push::midi::PushMapping;
use keystone_push::PushController;

use crate::script::{parse_line, Action, Command};

/// Runs script commands against a Push controller over an in-memory model.
///
/// Time is simulated: it only advances with `wait` and held buttons.
pub struct Simulator {
    push: PushController<MemoryModel>,
    start: Instant,
    elapsed: Duration,
}

impl Simulator {
    pub fn new(model: MemoryModel, settings: Settings) -> anyhow::Result<Self> {
        Ok(Self {
            push: PushController::new(model, settings)?,
            start: Instant::now(),
            elapsed: Duration::ZERO,
        })
    }

    pub fn controller(&self) -> &PushController<MemoryModel> {
        &self.push
    }

    fn now(&self) -> Instant {
        self.start + self.elapsed
    }

    /// Execute one command and return the lines it prints.
    pub fn execute(&mut self, command: Command) -> anyhow::Result<Vec<String>> {
        log::debug!("Executing {:?}", command);
        match command {
            Command::Pad { row, col, action } => {
                let note = PushMapping::pad_note(row, col);
                self.operate(action, [0x90, note, 127], [0x80, note, 0])?;
            }
            Command::Row { row, index, action } => {
                let cc = PushMapping::row_button_cc(row, index);
                self.operate(action, [0xB0, cc, 127], [0xB0, cc, 0])?;
            }
            Command::Button { button, action } => {
                let cc = PushMapping::function_cc(button);
                self.operate(action, [0xB0, cc, 127], [0xB0, cc, 0])?;
            }
            Command::Knob { index, delta } => {
                // 7-bit two's complement
                let value = (delta as u8) & 0x7F;
                self.send(&[0xB0, PushMapping::ENCODER_1 + index, value])?;
            }
            Command::Touch { index, touched } => {
                let velocity = if touched { 127 } else { 0 };
                self.send(&[0x90, PushMapping::KNOB_TOUCH_FIRST + index, velocity])?;
            }
            Command::Fader { index, event } => self.push.handle_fader_touch(index, event)?,
            Command::Wait(duration) => self.advance(duration)?,
            Command::Midi(bytes) => self.send(&bytes)?,
            Command::Mode(mode) => self.push.surface_mut().set_active_mode(mode)?,
            Command::View(view) => self.push.surface_mut().set_active_view(view)?,
            Command::Show => return Ok(self.show()),
            Command::Leds => return Ok(self.leds()),
        }
        Ok(Vec::new())
    }

    /// Parse and execute script line `number`. Lines that do not parse or
    /// fail to run are logged and skipped.
    pub fn run_line(&mut self, number: usize, line: &str) -> Vec<String> {
        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Line {}: {:#}", number, e);
                return Vec::new();
            }
        };

        match self.execute(command) {
            Ok(output) => output,
            Err(e) => {
                log::warn!("Line {}: {:#}", number, e);
                Vec::new()
            }
        }
    }

    fn send(&mut self, message: &[u8]) -> anyhow::Result<()> {
        let now = self.now();
        self.push.handle_midi(message, now)?;
        Ok(())
    }

    fn advance(&mut self, duration: Duration) -> anyhow::Result<()> {
        self.elapsed += duration;
        let now = self.now();
        self.push.tick(now)?;
        Ok(())
    }

    fn operate(&mut self, action: Action, down: [u8; 3], up: [u8; 3]) -> anyhow::Result<()> {
        match action {
            Action::Down => self.send(&down),
            Action::Up => self.send(&up),
            Action::Press => {
                self.send(&down)?;
                self.send(&up)
            }
            Action::Hold => {
                self.send(&down)?;
                let threshold = Duration::from_millis(self.push.settings().long_press_ms);
                self.advance(threshold)?;
                self.send(&up)
            }
        }
    }

    /// Header with the active mode and view, then the display content.
    fn show(&self) -> Vec<String> {
        let surface = self.push.surface();
        let mut lines = vec![format!(
            "mode: {:?}  view: {:?}",
            surface.modes().active_id(),
            surface.views().active_id()
        )];

        match self.push.settings().display {
            DisplayKind::Text => {
                let mut display = TextDisplayBuffer::new();
                self.push.render_text(&mut display);
                lines.extend(display.lines().into_iter().map(|l| format!("|{}|", l)));
            }
            DisplayKind::Graphic => {
                let mut display = GraphicDisplayModel::new();
                self.push.render_graphic(&mut display);
                lines.extend(describe_graphic(&display));
            }
        }
        lines
    }

    /// LED messages for everything that changed since the last call.
    fn leds(&mut self) -> Vec<String> {
        self.push
            .refresh_leds()
            .into_iter()
            .map(|[status, address, color]| {
                format!("{:02x} {:02x} {:02x}", status, address, color)
            })
            .collect()
    }

    /// Color currently shown by `button`
    pub fn led(&self, button: ButtonId) -> Option<u8> {
        self.push.leds().color(button).map(|c| c.index())
    }
}

fn describe_graphic(display: &GraphicDisplayModel) -> Vec<String> {
    if let Some((column, text)) = display.message() {
        return vec![format!("message @{}: {}", column, text)];
    }

    let mark = |selected: bool| if selected { "*" } else { "" };
    display
        .elements()
        .iter()
        .enumerate()
        .map(|(i, element)| match element {
            Element::Option(o) => format!(
                "{}: [{}] top '{}'{} bottom '{}'{}",
                i,
                o.header,
                o.top_label,
                mark(o.top_selected),
                o.bottom_label,
                mark(o.bottom_selected)
            ),
            Element::Parameter(p) => format!(
                "{}: {} = {} ({}){}",
                i,
                p.name,
                p.displayed_value,
                p.value,
                if p.touched { " touched" } else { "" }
            ),
            Element::Empty => format!("{}: -", i),
        })
        .collect()
}
