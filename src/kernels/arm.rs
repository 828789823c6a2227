use archmage::prelude::*;

use super::pack_rows;
use crate::ChannelSpec;

// ===========================================================================
// AArch64 NEON strided wrapper
// ===========================================================================

#[arcane]
#[allow(clippy::too_many_arguments)]
pub(super) fn pack_strided_impl_neon(
    _t: NeonToken,
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
