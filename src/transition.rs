//! Timed transitions between colors
//!
//! A transition runs one or more legs. A fade is a single leg from the
//! current value to the target. A blink runs out to the target and back
//! again, once per repetition, with each leg taking the full duration.

use embassy_time::{Duration, Instant};

use crate::color::{Rgb, blend_colors};
use crate::math8::{Envelope, cosine8, linear8, progress8};

/// Blends two values of type `T` using a progress value (0-255)
pub type ValueBlender<T> = fn(T, T, u8) -> T;

/// Time based transition between two values of type `T`
#[derive(Debug, Clone)]
pub struct ValueTransition<T: Copy> {
    blend: ValueBlender<T>,
    envelope: Envelope,
    /// Current interpolated value
    current: T,
    /// Value at the start of the running leg
    source: T,
    /// End of the running leg (None if idle)
    target: Option<T>,
    /// Legs still to run after this one, each reversing the previous
    legs_left: u16,
    /// Length of one leg
    duration: Duration,
    /// Start of the running leg
    start_time: Instant,
}

impl<T: Copy> ValueTransition<T> {
    /// Idle transition at `initial` with a linear envelope
    pub const fn new(initial: T, blend: ValueBlender<T>) -> Self {
        Self {
            blend,
            envelope: linear8,
            current: initial,
            source: initial,
            target: None,
            legs_left: 0,
            duration: Duration::from_millis(0),
            start_time: Instant::from_millis(0),
        }
    }

    #[must_use]
    pub const fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }

    pub const fn current(&self) -> T {
        self.current
    }

    /// Check if a transition is in progress
    pub const fn is_transitioning(&self) -> bool {
        self.target.is_some()
    }

    /// Move towards `value` over `duration`, starting at `start_time`
    ///
    /// A zero duration jumps straight to `value`. Any running fade or
    /// blink is replaced, starting from the current value.
    pub fn set(&mut self, value: T, duration: Duration, start_time: Instant) {
        self.start_time = start_time;
        self.legs_left = 0;
        if duration.as_ticks() == 0 {
            self.current = value;
            self.source = value;
            self.target = None;
            self.duration = Duration::from_millis(0);
        } else {
            self.source = self.current;
            self.target = Some(value);
            self.duration = duration;
        }
    }

    /// Go to `value` and back to the current value, `count` times
    ///
    /// Each way takes `duration`. With a zero `count` or `duration` nothing
    /// would be visible, so the transition only stops where it is.
    pub fn blink(&mut self, value: T, duration: Duration, count: u16, start_time: Instant) {
        if count == 0 || duration.as_ticks() == 0 {
            let current = self.current;
            self.set(current, Duration::from_millis(0), start_time);
            return;
        }
        self.set(value, duration, start_time);
        self.legs_left = count.saturating_mul(2) - 1;
    }

    /// Update the current value for time `now`
    ///
    /// Legs that ended before `now` are skipped, so a late tick lands on the
    /// same value a timely one would have.
    pub fn tick(&mut self, now: Instant) {
        while let Some(target) = self.target {
            let elapsed = now.saturating_duration_since(self.start_time);
            if elapsed < self.duration {
                let progress = (self.envelope)(progress8(elapsed, self.duration));
                self.current = (self.blend)(self.source, target, progress);
                return;
            }

            self.current = target;
            if self.legs_left == 0 {
                self.source = target;
                self.target = None;
                return;
            }
            self.legs_left -= 1;
            self.target = Some(self.source);
            self.source = target;
            self.start_time += self.duration;
        }
    }
}

impl ValueTransition<Rgb> {
    /// Color transition with the cosine envelope
    pub const fn new_rgb(initial: Rgb) -> Self {
        Self::new(initial, blend_colors).with_envelope(cosine8)
    }
}
