#![no_std]

pub mod color;
pub mod driver;
pub mod error;
pub mod fader;
pub mod lightness;
pub mod math8;
pub mod phase;
pub mod pwm;
pub mod registers;
pub mod transition;
pub mod transport;

pub use driver::{DEFAULT_GROUPS, DriverConfig, GroupLayout, Pca9685Rgb};
pub use error::Error;
pub use fader::Fader;
pub use lightness::{LIGHTNESS_TABLE, correct, correct_rgb};
pub use phase::{PhaseError, PhaseOffsets};
pub use pwm::{PWM_MAX, PWM_PERIOD, PwmPair};
pub use transport::{I2cTransport, Transport, TransportError};

pub use color::{Intensity, Rgb};
pub use embassy_time::{Duration, Instant};
