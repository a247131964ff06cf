//! PCA9685 register map and mode bits.

/// Default bus address (all address pins low)
pub const DEFAULT_ADDRESS: u8 = 0x40;

/// Mode register 1
pub const MODE1: u8 = 0x00;
/// Mode register 2
pub const MODE2: u8 = 0x01;
/// First byte (`LED0_ON_L`) of the channel register block
pub const LED0: u8 = 0x06;

/// MODE1: respond to the restart sequence
pub const MODE1_RESTART: u8 = 1 << 7;
/// MODE1: use the external clock input
pub const MODE1_EXTCLK: u8 = 1 << 6;
/// MODE1: auto-increment the register pointer after every byte
pub const MODE1_AUTO_INCREMENT: u8 = 1 << 5;
/// MODE1: low power mode, oscillator off
pub const MODE1_SLEEP: u8 = 1 << 4;

/// MODE2: invert output logic
pub const MODE2_INVERT: u8 = 1 << 4;
/// MODE2: outputs change on ACK instead of STOP
pub const MODE2_OUTPUT_CHANGE_ON_ACK: u8 = 1 << 3;
/// MODE2: totem pole outputs instead of open drain
pub const MODE2_TOTEM_POLE: u8 = 1 << 2;

/// MODE1 value written on initialization: auto-increment on, awake
pub const MODE1_INIT: u8 = MODE1_AUTO_INCREMENT;
/// MODE2 value written on initialization: totem pole, change on STOP
pub const MODE2_INIT: u8 = MODE2_TOTEM_POLE;

/// PWM channels on the chip
pub const CHANNEL_COUNT: u8 = 16;
/// Register bytes per channel (`ON_L`, `ON_H`, `OFF_L`, `OFF_H`)
pub const BYTES_PER_CHANNEL: u8 = 4;

/// Address of the first register of `channel`
pub const fn channel_register(channel: u8) -> u8 {
    LED0 + BYTES_PER_CHANNEL * channel
}
