use archmage::prelude::*;

use super::pack_rows;
use crate::ChannelSpec;

// ===========================================================================
// x86-64-v3 (AVX2) strided wrapper
// ===========================================================================

#[arcane]
#[allow(clippy::too_many_arguments)]
pub(super) fn pack_strided_impl_v3(
    _t: X64V3Token,
    spec: &ChannelSpec,
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    pack_rows(spec, src, dst, w, h, ss, ds);
}
