//! Timed color fades for output groups
//!
//! The fader keeps one color transition per group and, on every `tick`,
//! writes the groups whose color moved since the last write. Time is
//! supplied by the caller, who is also responsible for pacing the ticks.
//! Fades and blinks follow a cosine envelope.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{Intensity, Rgb};
use crate::driver::{GroupLayout, Pca9685Rgb};
use crate::error::Error;
use crate::transition::ValueTransition;
use crate::transport::Transport;

const OFF: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Per-group color fades on top of a [`Pca9685Rgb`]
#[derive(Debug, Clone)]
pub struct Fader<const GROUPS: usize> {
    layout: GroupLayout,
    groups: [ValueTransition<Rgb>; GROUPS],
    /// Last color written to each group, `None` if it must be rewritten
    written: [Option<Rgb>; GROUPS],
}

impl<const GROUPS: usize> Fader<GROUPS> {
    /// Create a fader for groups of `layout`, with every group off
    ///
    /// Nothing is assumed about the chip: the first `tick` writes all groups.
    pub fn new(layout: GroupLayout) -> Self {
        Self {
            layout,
            groups: core::array::from_fn(|_| ValueTransition::new_rgb(OFF)),
            written: [None; GROUPS],
        }
    }

    /// Fade one group to `target` over `duration`
    ///
    /// The fade starts from the group's current color. A zero duration
    /// changes the color on the next tick.
    pub fn fade_group(
        &mut self,
        index: usize,
        target: impl Into<Intensity>,
        duration: Duration,
        now: Instant,
    ) -> Result<(), Error> {
        let target = self.accepted(target)?;
        let group = self.group_mut(index)?;
        #[cfg(feature = "esp32-log")]
        println!(
            "[Fader.fade_group] group {} to {:?} over {}ms",
            index,
            target,
            duration.as_millis()
        );
        group.set(target, duration, now);
        Ok(())
    }

    /// Fade every group to `target` over `duration`
    pub fn fade_all(
        &mut self,
        target: impl Into<Intensity>,
        duration: Duration,
        now: Instant,
    ) -> Result<(), Error> {
        let target = self.accepted(target)?;
        for group in &mut self.groups {
            group.set(target, duration, now);
        }
        Ok(())
    }

    /// Blink one group to `target` and back, `count` times
    ///
    /// Each way takes `duration`, so one blink lasts twice as long.
    pub fn blink_group(
        &mut self,
        index: usize,
        target: impl Into<Intensity>,
        duration: Duration,
        count: u16,
        now: Instant,
    ) -> Result<(), Error> {
        let target = self.accepted(target)?;
        let group = self.group_mut(index)?;
        #[cfg(feature = "esp32-log")]
        println!(
            "[Fader.blink_group] group {} to {:?} {} times",
            index, target, count
        );
        group.blink(target, duration, count, now);
        Ok(())
    }

    /// Blink every group to `target` and back, `count` times
    pub fn blink_all(
        &mut self,
        target: impl Into<Intensity>,
        duration: Duration,
        count: u16,
        now: Instant,
    ) -> Result<(), Error> {
        let target = self.accepted(target)?;
        for group in &mut self.groups {
            group.blink(target, duration, count, now);
        }
        Ok(())
    }

    /// Advance all fades to `now` and write the groups that changed
    ///
    /// Returns how many groups were written. A failed write does not stop
    /// the other groups; the first error is returned after all groups were
    /// tried, and the failed groups are written again on the next tick.
    pub fn tick<T: Transport>(
        &mut self,
        now: Instant,
        driver: &mut Pca9685Rgb<T, GROUPS>,
    ) -> Result<usize, Error> {
        let mut count = 0;
        let mut first_error = None;
        for (index, (group, written)) in self
            .groups
            .iter_mut()
            .zip(self.written.iter_mut())
            .enumerate()
        {
            group.tick(now);
            let color = group.current();
            if *written == Some(color) {
                continue;
            }
            match driver.set_group(index, color) {
                Ok(()) => {
                    *written = Some(color);
                    count += 1;
                }
                Err(error) => {
                    #[cfg(feature = "esp32-log")]
                    println!("[Fader.tick] group {} failed: {}", index, error);
                    *written = None;
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
            }
        }
        match first_error {
            Some(error) => Err(error),
            None => Ok(count),
        }
    }

    /// Forget what was written, so the next tick rewrites every group
    ///
    /// Call this after the chip lost its registers (reset, power cycle).
    pub fn invalidate(&mut self) {
        self.written = [None; GROUPS];
    }

    /// Check if any group is still fading
    pub fn is_transitioning(&self) -> bool {
        self.groups.iter().any(ValueTransition::is_transitioning)
    }

    /// Current color of a group
    pub fn color(&self, index: usize) -> Option<Rgb> {
        self.groups.get(index).map(ValueTransition::current)
    }

    fn accepted(&self, target: impl Into<Intensity>) -> Result<Rgb, Error> {
        let target = target.into();
        if !self.layout.accepts(target) {
            return Err(Error::ShapeMismatch);
        }
        Ok(target.to_rgb())
    }

    fn group_mut(&mut self, index: usize) -> Result<&mut ValueTransition<Rgb>, Error> {
        self.groups
            .get_mut(index)
            .ok_or(Error::GroupOutOfRange(index))
    }
}
