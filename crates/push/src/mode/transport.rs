use keystone_core::model::{Model, Preroll, Transport, MAX_TEMPO, MIN_TEMPO};
use keystone_core::{
    button_row_index, ButtonEvent, ButtonId, ColorIndex, Context, Display, FeatureGroup,
    FunctionButton, OptionElement, ParameterElement, Result,
};

use super::{function_color, selectable, KnobTouch};
use crate::display::glyphs;
use crate::midi::colors::button;
use crate::Push;

/// Editing of transport parameters: pre-roll length and the pre-roll
/// metronome.
///
/// Knob values are ignored so the small knobs cannot change the transport by
/// accident. Knob touch is still tracked for the display.
#[derive(Debug, Default)]
pub struct TransportMode {
    touched: KnobTouch,
}

impl TransportMode {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Tempo as an eight character bar graph
fn format_tempo_bars(tempo: f64) -> String {
    let v = tempo - MIN_TEMPO;
    let bars = (16.0 * v / (MAX_TEMPO - MIN_TEMPO)).round() as usize;

    let mut n = String::new();
    for _ in 0..bars / 2 {
        n.push(glyphs::BARS_TWO);
    }
    if bars % 2 == 1 {
        n.push(glyphs::BARS_ONE);
    }
    while n.chars().count() < 8 {
        n.push(glyphs::BARS_NON);
    }
    n
}

impl<M: Model + 'static> FeatureGroup<Push<M>> for TransportMode {
    fn name(&self) -> &str {
        "Transport"
    }

    fn on_event(
        &mut self,
        cx: &mut Context<'_, Push<M>>,
        row: u8,
        index: u8,
        event: ButtonEvent,
    ) -> Result<()> {
        if event != ButtonEvent::Up {
            return Ok(());
        }

        let transport = cx.model.transport_mut();
        match (row, index) {
            (0, i) => {
                if let Some(&preroll) = Preroll::ALL.get(i as usize) {
                    transport.set_preroll(preroll);
                }
            }
            (1, 0) => transport.toggle_preroll_metronome(),
            _ => {}
        }
        Ok(())
    }

    fn on_knob(&mut self, _cx: &mut Context<'_, Push<M>>, _index: usize, _value: u8) -> Result<()> {
        Ok(())
    }

    fn on_knob_touch(
        &mut self,
        _cx: &mut Context<'_, Push<M>>,
        index: usize,
        touched: bool,
    ) -> Result<()> {
        self.touched.set(index, touched);
        Ok(())
    }

    fn button_color(&self, model: &M, id: ButtonId) -> Option<ColorIndex> {
        if let Some(color) = function_color(FunctionButton::Metronome, id) {
            return Some(color);
        }

        let transport = model.transport();
        if let Some(index) = button_row_index(0, id) {
            return Some(match Preroll::ALL.get(index as usize) {
                Some(&preroll) if preroll == transport.preroll() => button::HI,
                Some(_) => button::ON,
                None => button::OFF,
            });
        }

        match button_row_index(1, id)? {
            0 if transport.is_preroll_metronome_enabled() => Some(button::COLOR2_HI),
            0 => Some(button::ON),
            _ => Some(button::OFF),
        }
    }

    fn update_display(&self, model: &M, display: Display<'_>) {
        let transport = model.transport();
        let preroll = transport.preroll();
        let tempo = transport.tempo();
        let metronome = transport.is_preroll_metronome_enabled();
        let time_signature = format!("{} / {}", transport.numerator(), transport.denominator());

        match display {
            Display::Text(d) => {
                d.clear();
                d.set_block(2, 0, "Pre-roll");
                for (i, option) in Preroll::ALL.iter().enumerate() {
                    d.set_cell(3, i, &selectable(option.label(), *option == preroll));
                }
                d.set_block(0, 0, "Play Metro during").set_block(0, 1, "Pre-roll?");
                d.set_cell(1, 0, if metronome { " Yes" } else { " No" });
                d.set_cell(0, 4, "Tempo")
                    .set_cell(1, 4, &Transport::format_tempo(tempo))
                    .set_cell(2, 4, &format_tempo_bars(tempo));
                d.set_cell(0, 5, "Time Sig.").set_cell(1, 5, &time_signature);
                d.set_block(0, 3, "Play Position")
                    .set_block(1, 3, &transport.position_text());
            }
            Display::Graphic(d) => {
                d.clear();
                d.add_option(
                    OptionElement::new("Play Metronome during Pre-Roll?")
                        .top(if metronome { "Yes" } else { "No" }, metronome)
                        .bottom(Preroll::None.label(), preroll == Preroll::None),
                );
                for option in &Preroll::ALL[1..] {
                    d.add_option(OptionElement::new("").bottom(option.label(), *option == preroll));
                }
                d.add_option(OptionElement::new("Time Sig.").bottom(time_signature, false));
                d.add_option(
                    OptionElement::new("Play Position")
                        .bottom(transport.position_text(), false)
                        .touched(self.touched.is_touched(6)),
                );
                d.add_empty();
                let upper_bound = model.value_changer().upper_bound();
                d.add_parameter(
                    ParameterElement::new(
                        "Tempo",
                        Transport::rescale_tempo(tempo, upper_bound),
                        Transport::format_tempo(tempo),
                    )
                    .touched(self.touched.is_touched(4)),
                );
            }
        }
    }
}
