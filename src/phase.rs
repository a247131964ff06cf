//! Per-group phase offsets
//!
//! Each output group switches on at its own tick of the PWM cycle so that
//! groups do not all draw inrush current on the same clock edge. The exact
//! spacing is a hardware tuning choice; offsets only have to be distinct,
//! increasing and inside the cycle.

use core::fmt;

use crate::pwm::{PWM_MAX, PWM_PERIOD};
use crate::registers::CHANNEL_COUNT;

/// Ticks between the starts of two neighbouring channels in `per_channel` spacing
const TICKS_PER_CHANNEL: u16 = PWM_PERIOD / CHANNEL_COUNT as u16;

/// Rejected phase offset table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseError {
    /// Offset does not fit in the PWM cycle
    OutOfRange { index: usize, ticks: u16 },
    /// Offset is not greater than the previous group's offset
    NotIncreasing { index: usize },
}

impl fmt::Display for PhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, ticks } => {
                write!(f, "phase offset {ticks} of group {index} exceeds {PWM_MAX}")
            }
            Self::NotIncreasing { index } => {
                write!(f, "phase offset of group {index} is not increasing")
            }
        }
    }
}

impl core::error::Error for PhaseError {}

/// Phase offset, in PWM ticks, of each of `GROUPS` output groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseOffsets<const GROUPS: usize> {
    ticks: [u16; GROUPS],
}

impl<const GROUPS: usize> PhaseOffsets<GROUPS> {
    /// Spread the groups evenly over the cycle
    #[allow(clippy::cast_possible_truncation)]
    pub const fn evenly_spaced() -> Self {
        let mut ticks = [0u16; GROUPS];
        let mut index = 0;
        while index < GROUPS {
            ticks[index] = (index * PWM_PERIOD as usize / GROUPS) as u16;
            index += 1;
        }
        Self { ticks }
    }

    /// Start every group at the slot of its first channel
    ///
    /// The cycle is divided into one slot per chip channel, so a group of
    /// `channels_per_group` channels starting at channel `c` is offset by
    /// `c * 256` ticks. Fails like [`from_ticks`](Self::from_ticks) when a
    /// group would start past the end of the cycle, or when
    /// `channels_per_group` is zero and groups would share a slot.
    pub fn per_channel(channels_per_group: u8) -> Result<Self, PhaseError> {
        let mut ticks = [0u16; GROUPS];
        for (index, slot) in ticks.iter_mut().enumerate() {
            let start = index * usize::from(channels_per_group) * usize::from(TICKS_PER_CHANNEL);
            *slot = u16::try_from(start).unwrap_or(u16::MAX);
        }
        Self::from_ticks(ticks)
    }

    /// Use a hand-tuned table of offsets
    pub fn from_ticks(ticks: [u16; GROUPS]) -> Result<Self, PhaseError> {
        for (index, &value) in ticks.iter().enumerate() {
            if value > PWM_MAX {
                return Err(PhaseError::OutOfRange {
                    index,
                    ticks: value,
                });
            }
            if index > 0 && value <= ticks[index - 1] {
                return Err(PhaseError::NotIncreasing { index });
            }
        }
        Ok(Self { ticks })
    }

    /// Offset of a group, if it exists
    pub fn get(&self, index: usize) -> Option<u16> {
        self.ticks.get(index).copied()
    }

    pub const fn as_slice(&self) -> &[u16] {
        &self.ticks
    }
}

impl<const GROUPS: usize> Default for PhaseOffsets<GROUPS> {
    fn default() -> Self {
        Self::evenly_spaced()
    }
}
