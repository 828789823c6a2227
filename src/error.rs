use thiserror::Error;

/// Errors produced while validating packing parameters or packing pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PackError {
    /// A channel spec character is not one of `A`, `R`, `G`, `B`.
    #[error("invalid channel '{symbol}' at position {position} in channel spec (expected A, R, G or B)")]
    InvalidChannel { symbol: char, position: usize },

    /// The channel spec has no channels.
    #[error("channel spec is empty")]
    EmptyChannelSpec,

    /// The channel spec names more channels than a pixel slot can hold.
    #[error("channel spec has {len} channels, at most 4 are allowed")]
    ChannelSpecTooLong { len: usize },

    /// Buffer width or height is zero or negative.
    #[error("invalid buffer geometry {width}x{height}: width and height must be at least 1")]
    InvalidGeometry { width: i64, height: i64 },

    /// The source image has no pixels.
    #[error("source image is empty ({width}x{height})")]
    EmptySource { width: usize, height: usize },

    /// `width * height * channels` overflows `usize`.
    #[error("output buffer {width}x{height} with {channels} bytes per pixel is too large")]
    OutputTooLarge {
        width: usize,
        height: usize,
        channels: usize,
    },

    /// A raw RGBA byte slice whose length is not a whole number of pixels.
    #[error("buffer of {len} bytes is not a whole number of 4-byte pixels")]
    NotPixelAligned { len: usize },

    /// The caller-provided destination is shorter than the packed output.
    #[error("destination holds {actual} bytes but {required} are required")]
    BufferTooSmall { required: usize, actual: usize },
}

impl PackError {
    /// True for every variant describing a malformed channel spec.
    pub fn is_channel_spec_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidChannel { .. } | Self::EmptyChannelSpec | Self::ChannelSpecTooLong { .. }
        )
    }

    /// True for errors caused by user configuration rather than by the data.
    pub fn is_config_error(&self) -> bool {
        self.is_channel_spec_error() || matches!(self, Self::InvalidGeometry { .. })
    }
}
