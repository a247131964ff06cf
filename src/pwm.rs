//! PWM on/off register pairs
//!
//! Every channel switches on at its `on` tick and off at its `off` tick
//! within a 4096-tick cycle. Shifting both edges by the same phase keeps the
//! duty cycle while moving the moment the channel starts drawing current.

/// Ticks in one PWM cycle
pub const PWM_PERIOD: u16 = 4096;

/// Largest PWM count (full duty)
pub const PWM_MAX: u16 = PWM_PERIOD - 1;

/// On and off tick counts of one PWM channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PwmPair {
    /// Tick at which the output switches on
    pub on: u16,
    /// Tick at which the output switches off
    pub off: u16,
}

impl PwmPair {
    /// Pair for a corrected `count`, switched on at `phase`
    ///
    /// The off edge wraps around the end of the cycle.
    pub const fn staggered(phase: u16, count: u16) -> Self {
        let on = phase % PWM_PERIOD;
        let off = (on + count % PWM_PERIOD) % PWM_PERIOD;
        Self { on, off }
    }

    /// Register bytes in chip order: `on_lo, on_hi, off_lo, off_hi`
    pub const fn to_bytes(self) -> [u8; 4] {
        let [on_lo, on_hi] = self.on.to_le_bytes();
        let [off_lo, off_hi] = self.off.to_le_bytes();
        [on_lo, on_hi, off_lo, off_hi]
    }

    /// Ticks per cycle the output is on
    pub const fn duty(self) -> u16 {
        (self.off + PWM_PERIOD - self.on) % PWM_PERIOD
    }

    /// Whether the output is on at `tick`
    pub const fn is_on_at(self, tick: u16) -> bool {
        let tick = tick % PWM_PERIOD;
        if self.on <= self.off {
            tick >= self.on && tick < self.off
        } else {
            tick >= self.on || tick < self.off
        }
    }
}
