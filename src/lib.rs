//! # fbpack
//!
//! *Fit any picture into a framebuffer.*
//!
//! Packs a decoded RGBA image into the raw byte stream a framebuffer device
//! expects: any channel order (`RGB`, `BGR`, `ARGB`, `RRR`, ...), any fixed
//! buffer size. Larger images are cropped from the right and bottom edges;
//! smaller ones are zero-padded. The output carries no header, so the
//! consumer must know the geometry and channel order out of band.
//!
//! ```rust
//! use fbpack::{BufferGeometry, ChannelSpec, pack};
//! use imgref::ImgVec;
//! use rgb::Rgba;
//!
//! let img = ImgVec::new(vec![Rgba::new(20u8, 30, 40, 10)], 1, 1);
//! let spec: ChannelSpec = "argb".parse().unwrap();
//! let fb = pack(img.as_ref(), BufferGeometry::new(1, 1).unwrap(), &spec).unwrap();
//! assert_eq!(fb, [10, 20, 30, 40]);
//! ```
//!
//! Row packing is compiled per CPU tier (x86-64-v3, ARM NEON, scalar) and
//! the tier is picked at runtime. Every tier runs the same portable row body.
//!
//! ## Feature flags
//!
//! - **`std`** (default): the [`convert`] module. Decodes image files
//!   through the `image` crate and writes framebuffer files atomically.
//! - **`cli`** (default): the `convertfb` binary.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod channel;
mod error;
mod geometry;
pub mod kernels;
mod pack;

#[cfg(feature = "std")]
pub mod convert;

pub use channel::{Channel, ChannelSpec, MAX_CHANNELS};
pub use error::PackError;
pub use geometry::BufferGeometry;
pub use pack::{PackPlan, pack, pack_into};

/// A decoded source image: row-major RGBA pixels.
pub type SourceImage = imgref::ImgVec<rgb::Rgba<u8>>;
