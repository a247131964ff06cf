use super::Rgb;

/// Brightness request for one output group
///
/// Values are linear 8-bit intensities; perceptual correction happens when
/// the request is written to the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    /// Same level on every channel of the group
    Grey(u8),
    /// Independent red, green and blue levels
    Rgb(Rgb),
}

impl Intensity {
    /// Build an RGB request from separate channel levels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb { r, g, b })
    }

    /// Collapse an RGB request with three equal channels into `Grey`
    pub const fn simplify(self) -> Self {
        match self {
            Self::Rgb(Rgb { r, g, b }) if r == g && g == b => Self::Grey(r),
            other => other,
        }
    }

    /// Expand into per-channel levels in `[red, green, blue]` order
    pub const fn levels(self) -> [u8; 3] {
        match self {
            Self::Grey(level) => [level; 3],
            Self::Rgb(color) => [color.r, color.g, color.b],
        }
    }

    /// The request as a color, with `Grey` spread over all channels
    pub const fn to_rgb(self) -> Rgb {
        let [r, g, b] = self.levels();
        Rgb { r, g, b }
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::Grey(0)
    }
}

impl From<u8> for Intensity {
    fn from(level: u8) -> Self {
        Self::Grey(level)
    }
}

impl From<Rgb> for Intensity {
    fn from(color: Rgb) -> Self {
        Self::Rgb(color)
    }
}

impl From<(u8, u8, u8)> for Intensity {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}
