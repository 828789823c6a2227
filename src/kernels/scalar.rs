use archmage::prelude::*;

use super::pack_rows;
use crate::ChannelSpec;

// ===========================================================================
// Scalar strided wrapper (dispatch target for incant!)
// ===========================================================================

#[allow(clippy::too_many_arguments)]
pub(super) fn pack_strided_impl_scalar(
    _t: ScalarToken,
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
