use core::fmt;

use crate::phase::PhaseError;
use crate::transport::TransportError;

/// Driver error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The bus rejected a transaction
    Transport(TransportError),
    /// Group index is not below the configured group count
    GroupOutOfRange(usize),
    /// Channel index is not below 16
    ChannelOutOfRange(u8),
    /// RGB request sent to a single channel group
    ShapeMismatch,
    /// Configured groups need more channels than the chip has
    TooManyChannels { groups: usize, channels_per_group: u8 },
    /// Rejected phase offsets
    Phase(PhaseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(error) => write!(f, "transport: {error}"),
            Self::GroupOutOfRange(index) => write!(f, "output group {index} does not exist"),
            Self::ChannelOutOfRange(channel) => write!(f, "channel {channel} does not exist"),
            Self::ShapeMismatch => f.write_str("RGB levels for a single channel group"),
            Self::TooManyChannels {
                groups,
                channels_per_group,
            } => write!(
                f,
                "{groups} groups of {channels_per_group} channels do not fit on the chip"
            ),
            Self::Phase(error) => write!(f, "phase: {error}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Transport(error) => Some(error),
            Self::Phase(error) => Some(error),
            _ => None,
        }
    }
}

impl From<TransportError> for Error {
    fn from(error: TransportError) -> Self {
        Self::Transport(error)
    }
}

impl From<PhaseError> for Error {
    fn from(error: PhaseError) -> Self {
        Self::Phase(error)
    }
}
