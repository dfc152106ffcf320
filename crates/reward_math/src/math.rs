//! Checked arithmetic helpers - no unwrap, no panics, no lossy casts

use crate::wide::{to_u128, U256};

/// Add u128, `None` on overflow
pub fn add_u128(a: u128, b: u128) -> Option<u128> {
    a.checked_add(b)
}

/// Subtract u128, `None` on underflow
pub fn sub_u128(a: u128, b: u128) -> Option<u128> {
    a.checked_sub(b)
}

/// Minimum of two u128
pub fn min_u128(a: u128, b: u128) -> u128 {
    if a < b { a } else { b }
}

/// floor(a * b / c) with a 256-bit product
///
/// Returns `None` when `c == 0` or the quotient does not fit in u128.
pub fn mul_div_floor(a: u128, b: u128, c: u128) -> Option<u128> {
    if c == 0 {
        return None;
    }
    let product = U256::from(a).checked_mul(U256::from(b))?;
    to_u128(product / U256::from(c))
}

/// floor(a * b * c / d) kept at full 256-bit width
pub fn mul3_div_floor_wide(a: u128, b: u128, c: u128, d: u128) -> Option<U256> {
    if d == 0 {
        return None;
    }
    let product = U256::from(a)
        .checked_mul(U256::from(b))?
        .checked_mul(U256::from(c))?;
    Some(product / U256::from(d))
}

/// floor(a * b * c / d) with 256-bit intermediates
pub fn mul3_div_floor(a: u128, b: u128, c: u128, d: u128) -> Option<u128> {
    to_u128(mul3_div_floor_wide(a, b, c, d)?)
}
