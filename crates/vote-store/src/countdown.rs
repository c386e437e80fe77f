//! Header countdown clock.

use std::fmt;

/// Seconds left in the voting round, floored at zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self { remaining: seconds }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// One second passes
    pub fn tick(self) -> Self {
        Self {
            remaining: self.remaining.saturating_sub(1),
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min {:02} s", self.remaining / 60, self.remaining % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(Countdown::new(57 * 60 + 6).to_string(), "57 min 06 s");
        assert_eq!(Countdown::new(59).to_string(), "0 min 59 s");
    }

    #[test]
    fn test_tick_floors_at_zero() {
        let clock = Countdown::new(1).tick();
        assert!(clock.is_finished());
        assert_eq!(clock.tick().remaining(), 0);
    }
}
