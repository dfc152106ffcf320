//! 256-bit intermediates for fixed-point products

// required for clippy
#![allow(clippy::assign_op_pattern)]
#![allow(clippy::ptr_offset_with_cast)]
#![allow(clippy::manual_range_contains)]

use uint::construct_uint;

construct_uint! {
    pub struct U256(4);
}

/// Narrow a 256-bit value back to u128, `None` if it does not fit
pub fn to_u128(x: U256) -> Option<u128> {
    if x.bits() > 128 {
        None
    } else {
        Some(x.as_u128())
    }
}
