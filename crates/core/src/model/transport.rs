use std::fmt;

pub const MIN_TEMPO: f64 = 20.0;
pub const MAX_TEMPO: f64 = 666.0;

/// Count-in length before recording starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preroll {
    #[default]
    None,
    OneBar,
    TwoBars,
    FourBars,
}

impl Preroll {
    pub const ALL: [Preroll; 4] = [
        Preroll::None,
        Preroll::OneBar,
        Preroll::TwoBars,
        Preroll::FourBars,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Preroll::None => "None",
            Preroll::OneBar => "1 Bar",
            Preroll::TwoBars => "2 Bars",
            Preroll::FourBars => "4 Bars",
        }
    }
}

impl fmt::Display for Preroll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mirror of the host transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Transport {
    preroll: Preroll,
    preroll_metronome: bool,
    tempo: f64,
    numerator: u8,
    denominator: u8,
    /// Play position in quarter notes
    position: f64,
}

impl Transport {
    pub fn preroll(&self) -> Preroll {
        self.preroll
    }

    pub fn set_preroll(&mut self, preroll: Preroll) {
        self.preroll = preroll;
    }

    pub fn is_preroll_metronome_enabled(&self) -> bool {
        self.preroll_metronome
    }

    pub fn toggle_preroll_metronome(&mut self) {
        self.preroll_metronome = !self.preroll_metronome;
    }

    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    pub fn set_tempo(&mut self, tempo: f64) {
        self.tempo = tempo.clamp(MIN_TEMPO, MAX_TEMPO);
    }

    pub fn format_tempo(tempo: f64) -> String {
        format!("{:.2}", tempo)
    }

    /// Scale a tempo into the integer range `0..upper_bound`.
    pub fn rescale_tempo(tempo: f64, upper_bound: u32) -> u32 {
        let normalized = (tempo - MIN_TEMPO) / (MAX_TEMPO - MIN_TEMPO);
        (normalized.clamp(0.0, 1.0) * (upper_bound.saturating_sub(1)) as f64).round() as u32
    }

    pub fn numerator(&self) -> u8 {
        self.numerator
    }

    pub fn denominator(&self) -> u8 {
        self.denominator
    }

    pub fn set_time_signature(&mut self, numerator: u8, denominator: u8) {
        self.numerator = numerator.max(1);
        self.denominator = denominator.max(1);
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn set_position(&mut self, quarters: f64) {
        self.position = quarters.max(0.0);
    }

    /// Position as `bars.beats.sixteenths`, counting from 1.
    pub fn position_text(&self) -> String {
        let beat_length = 4.0 / self.denominator as f64;
        let beats = self.position / beat_length;
        let bar = (beats / self.numerator as f64).floor() as u64;
        let beat = (beats % self.numerator as f64).floor() as u64;
        let sixteenth = ((self.position % beat_length) * 4.0).floor() as u64;
        format!("{}.{}.{}", bar + 1, beat + 1, sixteenth + 1)
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            preroll: Preroll::None,
            preroll_metronome: false,
            tempo: 120.0,
            numerator: 4,
            denominator: 4,
            position: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_text() {
        let mut transport = Transport::default();
        assert_eq!(transport.position_text(), "1.1.1");

        transport.set_position(5.25);
        assert_eq!(transport.position_text(), "2.2.2");
    }

    #[test]
    fn test_tempo_clamped_and_rescaled() {
        let mut transport = Transport::default();
        transport.set_tempo(1000.0);
        assert_eq!(transport.tempo(), MAX_TEMPO);

        assert_eq!(Transport::rescale_tempo(MIN_TEMPO, 128), 0);
        assert_eq!(Transport::rescale_tempo(MAX_TEMPO, 128), 127);
    }
}
