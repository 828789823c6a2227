// ---------------------------------------------------------------------------
// Row-level RGBA → framebuffer packing, compiled per CPU tier.
//
// Architecture: the row bodies are #[inline(always)] generics, so each
// #[arcane] tier wrapper compiles them with its own target features and
// LLVM may vectorize the fixed-width shuffles. incant! picks the tier once per
// image, then the strided wrapper loops over rows.
// ---------------------------------------------------------------------------

use archmage::incant;

use crate::{ChannelSpec, PackError};

mod scalar;
use scalar::*;

#[cfg(target_arch = "x86_64")]
mod x86;
#[cfg(target_arch = "x86_64")]
use x86::*;

#[cfg(target_arch = "aarch64")]
mod arm;
#[cfg(target_arch = "aarch64")]
use arm::*;


/// Bytes per source pixel.
const SRC_BPP: usize = 4;

// ===========================================================================
// Validation
// ===========================================================================

#[inline]
fn check_strided(
    len: usize,
    width: usize,
    height: usize,
    stride: usize,
    bpp: usize,
) -> Result<(), PackError> {
    let too_small = |required| PackError::BufferTooSmall {
        required,
        actual: len,
    };
    let overflow = PackError::OutputTooLarge {
        width,
        height,
        channels: bpp,
    };
    let row_bytes = width.checked_mul(bpp).ok_or(overflow)?;
    if row_bytes > stride {
        return Err(too_small(row_bytes));
    }
    if width == 0 || height == 0 {
        return Ok(());
    }
    let total = (height - 1)
        .checked_mul(stride)
        .ok_or(overflow)?
        .checked_add(row_bytes)
        .ok_or(overflow)?;
    if len < total {
        return Err(too_small(total));
    }
    Ok(())
}

// ===========================================================================
// Row bodies (shared by every tier)
// ===========================================================================

#[inline(always)]
fn swap_br_u32(v: u32) -> u32 {
    (v & 0xFF00_FF00) | (v.rotate_left(16) & 0x00FF_00FF)
}

#[inline(always)]
fn shuffle_row<const N: usize>(src: &[u8], dst: &mut [u8], offsets: [usize; N]) {
    for (s, d) in bytemuck::cast_slice::<u8, [u8; SRC_BPP]>(src)
        .iter()
        .zip(dst.chunks_exact_mut(N))
    {
        for (slot, &off) in d.iter_mut().zip(offsets.iter()) {
            *slot = s[off];
        }
    }
}

#[inline(always)]
fn copy_swap_br_row(src: &[u8], dst: &mut [u8]) {
    for (s, d) in bytemuck::cast_slice::<u8, [u8; SRC_BPP]>(src)
        .iter()
        .zip(dst.chunks_exact_mut(4))
    {
        let v = swap_br_u32(u32::from_le_bytes(*s));
        d.copy_from_slice(&v.to_le_bytes());
    }
}

/// Pack one row of `src` (RGBA, `w * 4` bytes) into `dst` (`w * spec.len()` bytes).
#[inline(always)]
fn pack_row(spec: &ChannelSpec, src: &[u8], dst: &mut [u8]) {
    if *spec == ChannelSpec::RGBA {
        dst.copy_from_slice(src);
        return;
    }
    if *spec == ChannelSpec::BGRA {
        copy_swap_br_row(src, dst);
        return;
    }
    match spec.len() {
        1 => shuffle_row::<1>(src, dst, spec.offsets()),
        2 => shuffle_row::<2>(src, dst, spec.offsets()),
        3 => shuffle_row::<3>(src, dst, spec.offsets()),
        _ => shuffle_row::<4>(src, dst, spec.offsets()),
    }
}

#[inline(always)]
#[allow(clippy::too_many_arguments)]
fn pack_rows(
    spec: &ChannelSpec,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    let dst_row = w * spec.len();
    for y in 0..h {
        pack_row(spec, &src[y * ss..][..w * SRC_BPP], &mut dst[y * ds..][..dst_row]);
    }
}

// ===========================================================================
// Public entry points
// ===========================================================================

/// Pack a contiguous run of RGBA pixels into `dst` using `spec`'s layout.
///
/// `src.len()` must be a multiple of 4; `dst` must hold
/// `src.len() / 4 * spec.len()` bytes. Bytes past that are untouched.
pub fn pack_pixels(spec: &ChannelSpec, src: &[u8], dst: &mut [u8]) -> Result<(), PackError> {
    if !src.len().is_multiple_of(SRC_BPP) {
        return Err(PackError::NotPixelAligned { len: src.len() });
    }
    let pixels = src.len() / SRC_BPP;
    if pixels == 0 {
        return Ok(());
    }
    let row = pixels * spec.len();
    pack_strided(spec, src, dst, pixels, 1, src.len(), row)
}

/// Pack a strided RGBA region into a strided destination. One tier dispatch per call.
///
/// `src_stride` / `dst_stride` are byte distances between row starts. Bytes
/// between the end of a packed row and the next row start are never written.
pub fn pack_strided(
    spec: &ChannelSpec,
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), PackError> {
    check_strided(src.len(), width, height, src_stride, SRC_BPP)?;
    check_strided(dst.len(), width, height, dst_stride, spec.len())?;
    if width == 0 || height == 0 {
        return Ok(());
    }
    incant!(
        pack_strided_impl(spec, src, dst, width, height, src_stride, dst_stride),
        [v3, neon, scalar]
    );
    Ok(())
}
