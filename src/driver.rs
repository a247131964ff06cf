//! PCA9685 output driver
//!
//! Turns brightness requests for output groups into register-write
//! transactions. Each group is a run of consecutive chip channels; every
//! channel of a group switches on at the group's phase offset and off after
//! its lightness-corrected PWM count, wrapping around the end of the cycle.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::Intensity;
use crate::error::Error;
use crate::lightness::{correct, correct_rgb};
use crate::phase::PhaseOffsets;
use crate::pwm::PwmPair;
use crate::registers::{
    CHANNEL_COUNT, DEFAULT_ADDRESS, MODE1, MODE1_INIT, MODE2, MODE2_INIT, channel_register,
};
use crate::transport::Transport;

/// Output groups on a typical five RGB LED board
pub const DEFAULT_GROUPS: usize = 5;

/// How many chip channels make up one output group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupLayout {
    /// Red, green and blue channels
    #[default]
    Rgb,
    /// One single-intensity channel
    Single,
}

impl GroupLayout {
    /// Channels per group
    pub const fn channels(self) -> u8 {
        match self {
            Self::Rgb => 3,
            Self::Single => 1,
        }
    }

    /// Check if a group of this layout can show `intensity`
    ///
    /// Single channel groups only take grey levels, or colors whose three
    /// channels are equal.
    pub const fn accepts(self, intensity: Intensity) -> bool {
        matches!(
            (self, intensity.simplify()),
            (Self::Rgb, _) | (Self::Single, Intensity::Grey(_))
        )
    }
}

/// Configuration for the output driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig<const GROUPS: usize> {
    /// Bus address of the chip
    pub address: u8,
    /// Channels per output group
    pub layout: GroupLayout,
    /// Phase offset of every group
    pub phases: PhaseOffsets<GROUPS>,
}

impl<const GROUPS: usize> DriverConfig<GROUPS> {
    #[must_use]
    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    #[must_use]
    pub const fn with_layout(mut self, layout: GroupLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub const fn with_phases(mut self, phases: PhaseOffsets<GROUPS>) -> Self {
        self.phases = phases;
        self
    }
}

impl<const GROUPS: usize> Default for DriverConfig<GROUPS> {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            layout: GroupLayout::Rgb,
            phases: PhaseOffsets::evenly_spaced(),
        }
    }
}

/// Lightness-corrected, phase-staggered PCA9685 LED driver
///
/// Stateless apart from its configuration: every call computes its register
/// values from scratch and writes them in one transaction per group.
pub struct Pca9685Rgb<T, const GROUPS: usize = DEFAULT_GROUPS> {
    transport: T,
    config: DriverConfig<GROUPS>,
}

impl<T: Transport, const GROUPS: usize> Pca9685Rgb<T, GROUPS> {
    /// Create a driver
    ///
    /// Fails if `GROUPS` groups of the configured layout need more than the
    /// chip's 16 channels. Nothing is written to the bus.
    pub fn new(transport: T, config: DriverConfig<GROUPS>) -> Result<Self, Error> {
        let channels_per_group = config.layout.channels();
        if GROUPS * usize::from(channels_per_group) > usize::from(CHANNEL_COUNT) {
            return Err(Error::TooManyChannels {
                groups: GROUPS,
                channels_per_group,
            });
        }
        Ok(Self { transport, config })
    }

    pub const fn address(&self) -> u8 {
        self.config.address
    }

    pub const fn config(&self) -> &DriverConfig<GROUPS> {
        &self.config
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.transport
    }

    /// Write the mode registers
    ///
    /// Enables register auto-increment (required for group writes), wakes
    /// the oscillator and selects totem pole outputs that change on STOP.
    pub fn initialize(&mut self) -> Result<(), Error> {
        #[cfg(feature = "esp32-log")]
        println!(
            "[Pca9685Rgb.initialize] address {:#04x}, mode1 {:#010b}, mode2 {:#010b}",
            self.config.address, MODE1_INIT, MODE2_INIT
        );
        self.write_register(MODE1, MODE1_INIT)?;
        self.write_register(MODE2, MODE2_INIT)
    }

    /// Apply one request to every output group
    ///
    /// Writes one transaction per group, in group order. Stops at the first
    /// transport failure.
    pub fn set_all_groups(&mut self, intensity: impl Into<Intensity>) -> Result<(), Error> {
        let counts = self.corrected(intensity.into())?;
        for index in 0..GROUPS {
            self.write_group(index, counts)?;
        }
        Ok(())
    }

    /// Apply a request to a single output group
    pub fn set_group(&mut self, index: usize, intensity: impl Into<Intensity>) -> Result<(), Error> {
        if index >= GROUPS {
            return Err(Error::GroupOutOfRange(index));
        }
        let counts = self.corrected(intensity.into())?;
        self.write_group(index, counts)
    }

    /// Set one physical channel, regardless of grouping
    ///
    /// The channel keeps the phase of the group it belongs to, or phase 0 if
    /// no configured group covers it.
    pub fn set_channel(&mut self, channel: u8, level: u8) -> Result<(), Error> {
        if channel >= CHANNEL_COUNT {
            return Err(Error::ChannelOutOfRange(channel));
        }
        let group = usize::from(channel / self.config.layout.channels());
        let phase = self.config.phases.get(group).unwrap_or(0);
        let pair = PwmPair::staggered(phase, correct(level));
        self.write_pairs(channel_register(channel), &[pair])
    }

    /// Corrected PWM counts in channel order
    ///
    /// Single channel groups only use the first count.
    fn corrected(&self, intensity: Intensity) -> Result<[u16; 3], Error> {
        match (self.config.layout, intensity.simplify()) {
            (_, Intensity::Grey(level)) => Ok([correct(level); 3]),
            (GroupLayout::Rgb, Intensity::Rgb(color)) => Ok(correct_rgb(color)),
            (GroupLayout::Single, Intensity::Rgb(_)) => Err(Error::ShapeMismatch),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn write_group(&mut self, index: usize, counts: [u16; 3]) -> Result<(), Error> {
        let width = self.config.layout.channels();
        let phase = self.config.phases.get(index).unwrap_or(0);
        let first_channel = index as u8 * width;

        let mut pairs = [PwmPair::default(); 3];
        for (pair, &count) in pairs.iter_mut().zip(counts.iter()) {
            *pair = PwmPair::staggered(phase, count);
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[Pca9685Rgb.write_group] group {} phase {} pairs {:?}",
            index,
            phase,
            &pairs[..usize::from(width)]
        );
        self.write_pairs(
            channel_register(first_channel),
            &pairs[..usize::from(width)],
        )
    }

    /// One transaction: start register, then four bytes per pair
    fn write_pairs(&mut self, register: u8, pairs: &[PwmPair]) -> Result<(), Error> {
        self.transport.begin(self.config.address);
        self.transport.write(register);
        for pair in pairs {
            self.transport.write_all(&pair.to_bytes());
        }
        self.transport.end()?;
        Ok(())
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error> {
        self.transport.begin(self.config.address);
        self.transport.write_all(&[register, value]);
        self.transport.end()?;
        Ok(())
    }
}
