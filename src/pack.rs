//! Whole-image packing into a fixed-size framebuffer.
//!
//! The source is copied from its top-left corner. Columns and rows that do
//! not fit in the buffer are dropped; buffer slots the source does not
//! reach are zero-filled.

use alloc::vec::Vec;

use imgref::ImgRef;
use rgb::Rgba;

use crate::{BufferGeometry, ChannelSpec, PackError, kernels};

/// The part of the source that lands in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackPlan {
    source_width: usize,
    source_height: usize,
    geometry: BufferGeometry,
    copy_width: usize,
    copy_height: usize,
}

impl PackPlan {
    pub fn new(source_width: usize, source_height: usize, geometry: BufferGeometry) -> PackPlan {
        PackPlan {
            source_width,
            source_height,
            geometry,
            copy_width: source_width.min(geometry.width()),
            copy_height: source_height.min(geometry.height()),
        }
    }

    pub fn geometry(&self) -> BufferGeometry {
        self.geometry
    }

    /// Source columns copied into every buffer row.
    pub fn copy_width(&self) -> usize {
        self.copy_width
    }

    /// Source rows copied into the buffer.
    pub fn copy_height(&self) -> usize {
        self.copy_height
    }

    pub fn crops_width(&self) -> bool {
        self.source_width > self.geometry.width()
    }

    pub fn crops_height(&self) -> bool {
        self.source_height > self.geometry.height()
    }

    pub fn pads_width(&self) -> bool {
        self.source_width < self.geometry.width()
    }

    pub fn pads_height(&self) -> bool {
        self.source_height < self.geometry.height()
    }
}

fn check_source(source: &ImgRef<'_, Rgba<u8>>) -> Result<(), PackError> {
    if source.width() == 0 || source.height() == 0 {
        return Err(PackError::EmptySource {
            width: source.width(),
            height: source.height(),
        });
    }
    Ok(())
}

/// Pack `source` into a new buffer of exactly
/// `geometry.width() * geometry.height() * spec.len()` bytes.
///
/// ```rust
/// use fbpack::{BufferGeometry, ChannelSpec, pack};
/// use imgref::ImgVec;
/// use rgb::Rgba;
///
/// let img = ImgVec::new(vec![Rgba::new(1u8, 2, 3, 4)], 1, 1);
/// let geometry = BufferGeometry::new(2, 1).unwrap();
/// let fb = pack(img.as_ref(), geometry, &ChannelSpec::RGB).unwrap();
/// assert_eq!(fb, [1, 2, 3, 0, 0, 0]);
/// ```
pub fn pack(
    source: ImgRef<'_, Rgba<u8>>,
    geometry: BufferGeometry,
    spec: &ChannelSpec,
) -> Result<Vec<u8>, PackError> {
    check_source(&source)?;
    let total = geometry.output_len(spec)?;
    let mut out = Vec::new();
    out.try_reserve_exact(total)
        .map_err(|_| PackError::OutputTooLarge {
            width: geometry.width(),
            height: geometry.height(),
            channels: spec.len(),
        })?;
    out.resize(total, 0);
    pack_into(source, geometry, spec, &mut out)?;
    Ok(out)
}

/// Pack `source` into a caller-owned buffer. Returns the bytes written.
///
/// Padding slots are zeroed explicitly, so `dst` may hold stale data.
/// Bytes past the packed length are left alone.
pub fn pack_into(
    source: ImgRef<'_, Rgba<u8>>,
    geometry: BufferGeometry,
    spec: &ChannelSpec,
    dst: &mut [u8],
) -> Result<usize, PackError> {
    check_source(&source)?;
    let total = geometry.output_len(spec)?;
    if dst.len() < total {
        return Err(PackError::BufferTooSmall {
            required: total,
            actual: dst.len(),
        });
    }
    let dst = &mut dst[..total];

    let plan = PackPlan::new(source.width(), source.height(), geometry);
    let (cw, ch) = (plan.copy_width(), plan.copy_height());
    let row_len = geometry.row_len(spec)?;

    let region = source.sub_image(0, 0, cw, ch);
    let px: &[Rgba<u8>] = region.buf();
    let src: &[u8] = bytemuck::cast_slice(px);
    kernels::pack_strided(spec, src, dst, cw, ch, region.stride() * 4, row_len)?;

    let copied = cw * spec.len();
    if copied < row_len {
        for row in dst[..ch * row_len].chunks_exact_mut(row_len) {
            row[copied..].fill(0);
        }
    }
    dst[ch * row_len..].fill(0);
    Ok(total)
}
