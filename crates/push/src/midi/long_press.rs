use std::time::{Duration, Instant};

use keystone_core::ButtonId;

#[derive(Debug, Clone, Copy)]
struct Press {
    button: ButtonId,
    since: Instant,
    reported: bool,
}

/// Synthesizes long press events from button down/up timing.
///
/// There is no timer: the owner calls [`tick`](Self::tick) with the current
/// time and gets back the buttons that crossed the threshold since the last
/// call. Each press is reported at most once.
#[derive(Debug, Clone)]
pub struct LongPressDetector {
    threshold: Duration,
    pressed: Vec<Press>,
}

impl LongPressDetector {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            pressed: Vec::new(),
        }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: Duration) {
        self.threshold = threshold;
    }

    /// Start timing `button`. A repeated press restarts the timer.
    pub fn press(&mut self, button: ButtonId, now: Instant) {
        self.pressed.retain(|p| p.button != button);
        self.pressed.push(Press {
            button,
            since: now,
            reported: false,
        });
    }

    /// Stop timing `button`. Returns true if a long press was reported for it.
    pub fn release(&mut self, button: ButtonId) -> bool {
        match self.pressed.iter().position(|p| p.button == button) {
            Some(i) => self.pressed.remove(i).reported,
            None => false,
        }
    }

    pub fn is_pressed(&self, button: ButtonId) -> bool {
        self.pressed.iter().any(|p| p.button == button)
    }

    /// Buttons held for at least the threshold and not yet reported, in
    /// press order.
    pub fn tick(&mut self, now: Instant) -> Vec<ButtonId> {
        let threshold = self.threshold;
        self.pressed
            .iter_mut()
            .filter(|p| !p.reported && now.saturating_duration_since(p.since) >= threshold)
            .map(|p| {
                p.reported = true;
                p.button
            })
            .collect()
    }
}

impl Default for LongPressDetector {
    fn default() -> Self {
        Self::new(Duration::from_millis(400))
    }
}
