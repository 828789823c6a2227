//! Channel identifiers and channel-order specs.
//!
//! A [`ChannelSpec`] is the per-pixel byte layout of a framebuffer: `"RGB"`
//! emits three bytes per pixel, `"ARGB"` four, `"RRR"` three copies of red.
//!
//! ```rust
//! use fbpack::{Channel, ChannelSpec};
//!
//! let spec: ChannelSpec = "bgr".parse().unwrap();
//! assert_eq!(spec, ChannelSpec::BGR);
//! assert_eq!(spec.channels(), &[Channel::B, Channel::G, Channel::R]);
//! assert_eq!(spec.to_string(), "BGR");
//! ```

use core::fmt;
use core::str::FromStr;

use rgb::Rgba;

use crate::PackError;

/// Most channels a spec may name.
pub const MAX_CHANNELS: usize = 4;

/// One of the four channels of a decoded pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    A,
    R,
    G,
    B,
}

impl Channel {
    /// Byte offset of this channel inside an `Rgba<u8>` pixel.
    #[inline(always)]
    pub const fn rgba_offset(self) -> usize {
        match self {
            Channel::R => 0,
            Channel::G => 1,
            Channel::B => 2,
            Channel::A => 3,
        }
    }

    /// The value of this channel in `px`.
    #[inline(always)]
    pub const fn value(self, px: Rgba<u8>) -> u8 {
        match self {
            Channel::R => px.r,
            Channel::G => px.g,
            Channel::B => px.b,
            Channel::A => px.a,
        }
    }

    /// Parse a single channel symbol, ignoring ASCII case.
    pub const fn from_symbol(symbol: char) -> Option<Channel> {
        match symbol.to_ascii_uppercase() {
            'A' => Some(Channel::A),
            'R' => Some(Channel::R),
            'G' => Some(Channel::G),
            'B' => Some(Channel::B),
            _ => None,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Channel::A => 'A',
            Channel::R => 'R',
            Channel::G => 'G',
            Channel::B => 'B',
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Ordered list of 1 to [`MAX_CHANNELS`] channels; repeats are allowed.
///
/// Stored inline, so a spec is `Copy` and never allocates.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelSpec {
    channels: [Channel; MAX_CHANNELS],
    len: u8,
}

impl ChannelSpec {
    pub const RGB: ChannelSpec = ChannelSpec::fixed([Channel::R, Channel::G, Channel::B]);
    pub const BGR: ChannelSpec = ChannelSpec::fixed([Channel::B, Channel::G, Channel::R]);
    pub const RGBA: ChannelSpec =
        ChannelSpec::fixed([Channel::R, Channel::G, Channel::B, Channel::A]);
    pub const BGRA: ChannelSpec =
        ChannelSpec::fixed([Channel::B, Channel::G, Channel::R, Channel::A]);
    pub const ARGB: ChannelSpec =
        ChannelSpec::fixed([Channel::A, Channel::R, Channel::G, Channel::B]);
    pub const ABGR: ChannelSpec =
        ChannelSpec::fixed([Channel::A, Channel::B, Channel::G, Channel::R]);

    const fn fixed<const N: usize>(channels: [Channel; N]) -> ChannelSpec {
        assert!(N >= 1 && N <= MAX_CHANNELS);
        let mut out = [Channel::R; MAX_CHANNELS];
        let mut i = 0;
        while i < N {
            out[i] = channels[i];
            i += 1;
        }
        ChannelSpec {
            channels: out,
            len: N as u8,
        }
    }

    /// Build a spec from channel identifiers.
    pub fn new(channels: &[Channel]) -> Result<ChannelSpec, PackError> {
        if channels.is_empty() {
            return Err(PackError::EmptyChannelSpec);
        }
        if channels.len() > MAX_CHANNELS {
            return Err(PackError::ChannelSpecTooLong {
                len: channels.len(),
            });
        }
        let mut out = [Channel::R; MAX_CHANNELS];
        out[..channels.len()].copy_from_slice(channels);
        Ok(ChannelSpec {
            channels: out,
            len: channels.len() as u8,
        })
    }

    /// Parse a spec such as `"RGB"` or `"argb"`.
    ///
    /// Every character is validated before the spec is built, so an unknown
    /// symbol is reported even when the spec is also too long.
    pub fn parse(text: &str) -> Result<ChannelSpec, PackError> {
        let mut out = [Channel::R; MAX_CHANNELS];
        let mut len = 0;
        for (position, symbol) in text.chars().enumerate() {
            let channel =
                Channel::from_symbol(symbol).ok_or(PackError::InvalidChannel { symbol, position })?;
            if len < MAX_CHANNELS {
                out[len] = channel;
            }
            len += 1;
        }
        ChannelSpec::new(&out[..len.min(MAX_CHANNELS)]).and_then(|spec| {
            if len > MAX_CHANNELS {
                Err(PackError::ChannelSpecTooLong { len })
            } else {
                Ok(spec)
            }
        })
    }

    #[inline(always)]
    pub fn channels(&self) -> &[Channel] {
        &self.channels[..self.len as usize]
    }

    /// Bytes emitted per pixel.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false; a spec has at least one channel.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Source byte offsets for a spec of exactly `N` channels.
    #[inline(always)]
    pub(crate) fn offsets<const N: usize>(&self) -> [usize; N] {
        debug_assert_eq!(N, self.len());
        core::array::from_fn(|i| self.channels[i].rgba_offset())
    }

    /// Write this spec's bytes for one pixel into `out`.
    #[inline]
    pub fn write_pixel(&self, px: Rgba<u8>, out: &mut [u8]) {
        for (slot, channel) in out.iter_mut().zip(self.channels()) {
            *slot = channel.value(px);
        }
    }
}

impl Default for ChannelSpec {
    fn default() -> Self {
        ChannelSpec::RGB
    }
}

impl FromStr for ChannelSpec {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChannelSpec::parse(s)
    }
}

impl fmt::Display for ChannelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for channel in self.channels() {
            write!(f, "{channel}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ChannelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChannelSpec({self})")
    }
}
