//! Busy indicator: a braille-dot spinner advanced once per tick.

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spinner {
    /// Monotonically increasing tick counter (drives the spinner frame).
    tick: u64,
}

impl Spinner {
    pub fn advance(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn frame(&self) -> &'static str {
        SPINNER_FRAMES[(self.tick as usize) % SPINNER_FRAMES.len()]
    }

    pub fn reset(&mut self) {
        self.tick = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_cycle() {
        let mut s = Spinner::default();
        let first = s.frame();
        for _ in 0..SPINNER_FRAMES.len() {
            s.advance();
        }
        assert_eq!(s.frame(), first);
        s.advance();
        assert_ne!(s.frame(), first);
        s.reset();
        assert_eq!(s.frame(), first);
    }
}
