/// Converts between integer controller values, normalized values and knob deltas.
///
/// Integer values run from 0 to `upper_bound - 1`. Relative knobs send 7-bit
/// two's complement deltas: 1..=63 increase, 64..=127 decrease.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueChanger {
    upper_bound: u32,
    sensitivity: f64,
}

impl ValueChanger {
    pub fn new(upper_bound: u32, sensitivity: f64) -> Self {
        Self {
            upper_bound: upper_bound.max(2),
            sensitivity,
        }
    }

    pub fn upper_bound(&self) -> u32 {
        self.upper_bound
    }

    pub fn max_value(&self) -> u32 {
        self.upper_bound - 1
    }

    pub fn to_normalized(&self, value: u32) -> f64 {
        value.min(self.max_value()) as f64 / self.max_value() as f64
    }

    pub fn from_normalized(&self, normalized: f64) -> u32 {
        (normalized.clamp(0.0, 1.0) * self.max_value() as f64).round() as u32
    }

    /// Decode a relative knob value into signed encoder steps.
    pub fn decode_relative(value: u8) -> i32 {
        let value = (value & 0x7F) as i32;
        if value < 64 {
            value
        } else {
            value - 128
        }
    }

    /// Amount a knob value moves a parameter, in integer value units.
    pub fn calc_knob_change(&self, value: u8) -> f64 {
        let step = (self.upper_bound as f64 / 128.0).max(1.0);
        Self::decode_relative(value) as f64 * step * self.sensitivity
    }
}

impl Default for ValueChanger {
    fn default() -> Self {
        Self::new(1024, 1.0)
    }
}

/// How a ranged value is formatted for displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Percent,
    /// Bipolar value centered on the middle of the range
    Pan,
}

/// A named parameter with an integer value bounded by a [`ValueChanger`].
#[derive(Debug, Clone, PartialEq)]
pub struct RangedValue {
    name: String,
    normalized: f64,
    default: f64,
    format: ValueFormat,
}

impl RangedValue {
    pub fn new(name: impl Into<String>, default: f64, format: ValueFormat) -> Self {
        let default = default.clamp(0.0, 1.0);
        Self {
            name: name.into(),
            normalized: default,
            default,
            format,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn normalized(&self) -> f64 {
        self.normalized
    }

    pub fn set_normalized(&mut self, normalized: f64) {
        self.normalized = normalized.clamp(0.0, 1.0);
    }

    pub fn value(&self, changer: &ValueChanger) -> u32 {
        changer.from_normalized(self.normalized)
    }

    pub fn set_value(&mut self, value: u32, changer: &ValueChanger) {
        self.normalized = changer.to_normalized(value);
    }

    /// Move the value by `increment` integer units, clamped to the range.
    pub fn inc(&mut self, increment: f64, changer: &ValueChanger) {
        let value = self.value(changer) as f64 + increment;
        let value = value.round().clamp(0.0, changer.max_value() as f64);
        self.set_value(value as u32, changer);
    }

    /// Apply a relative knob value.
    pub fn change_value(&mut self, knob_value: u8, changer: &ValueChanger) {
        self.inc(changer.calc_knob_change(knob_value), changer);
    }

    pub fn reset_value(&mut self) {
        self.normalized = self.default;
    }

    pub fn displayed_value(&self) -> String {
        match self.format {
            ValueFormat::Percent => format!("{:.0}%", self.normalized * 100.0),
            ValueFormat::Pan => {
                let offset = ((self.normalized - 0.5) * 200.0).round() as i32;
                match offset {
                    0 => "C".to_string(),
                    o if o < 0 => format!("L{}", -o),
                    o => format!("R{}", o),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_relative() {
        assert_eq!(ValueChanger::decode_relative(1), 1);
        assert_eq!(ValueChanger::decode_relative(63), 63);
        assert_eq!(ValueChanger::decode_relative(127), -1);
        assert_eq!(ValueChanger::decode_relative(64), -64);
        assert_eq!(ValueChanger::decode_relative(0), 0);
    }

    #[test]
    fn test_knob_change_scales_with_upper_bound() {
        let changer = ValueChanger::new(1024, 1.0);
        assert_eq!(changer.calc_knob_change(1), 8.0);
        assert_eq!(changer.calc_knob_change(127), -8.0);

        let changer = ValueChanger::new(128, 0.5);
        assert_eq!(changer.calc_knob_change(2), 1.0);
    }

    #[test]
    fn test_inc_clamps_to_range() {
        let changer = ValueChanger::new(128, 1.0);
        let mut value = RangedValue::new("Volume", 1.0, ValueFormat::Percent);
        value.change_value(10, &changer);
        assert_eq!(value.value(&changer), 127);

        value.set_value(3, &changer);
        value.change_value(120, &changer);
        assert_eq!(value.value(&changer), 0);
    }

    #[test]
    fn test_reset_and_display() {
        let changer = ValueChanger::default();
        let mut pan = RangedValue::new("Pan", 0.5, ValueFormat::Pan);
        assert_eq!(pan.displayed_value(), "C");

        pan.set_normalized(0.25);
        assert_eq!(pan.displayed_value(), "L50");
        pan.set_normalized(1.0);
        assert_eq!(pan.displayed_value(), "R100");

        pan.reset_value();
        assert_eq!(pan.value(&changer), changer.from_normalized(0.5));
    }
}
