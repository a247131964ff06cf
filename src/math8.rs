//! 8-bit fixed point helpers for fades
//!
//! Progress through a fade is an 8-bit fraction, `0` at the start and `255`
//! at the end.

use core::f32::consts::PI;

use embassy_time::Duration;

/// Blend two 8-bit values, `amount_of_b` of the way from `a` to `b`
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i32 - a as i32;
    // Scaling by 257 maps 255 onto 65535, so a full blend lands exactly on `b`
    let scaled = ((a as i32) << 16) + delta * amount_of_b as i32 * 257 + 0x8000;
    (scaled >> 16) as u8
}

/// Fraction (0-255) of `duration` covered by `elapsed`
///
/// A zero `duration` reports no progress.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn progress8(elapsed: Duration, duration: Duration) -> u8 {
    let total = duration.as_ticks();
    let done = elapsed.as_ticks();
    if total == 0 {
        0
    } else if done >= total {
        255
    } else {
        (done * 255 / total) as u8
    }
}

/// Shape of a fade: maps linear progress to eased progress
pub type Envelope = fn(progress: u8) -> u8;

/// Constant-speed fade
pub const fn linear8(progress: u8) -> u8 {
    progress
}

/// Half a cosine period: starts and ends slowly, fastest in the middle
///
/// `cosine8(255 - p) == 255 - cosine8(p)`.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn cosine8(progress: u8) -> u8 {
    let t = f32::from(progress) / 255.0;
    let eased = (1.0 - libm::cosf(PI * t)) / 2.0;
    libm::roundf(eased * 255.0) as u8
}
