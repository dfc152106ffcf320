//! Identifiers, time and the per-call invocation context

use core::fmt;

pub use pinocchio::pubkey::Pubkey;

/// Seconds since the unix epoch
pub type UnixTimestamp = u64;

/// The all-zero identifier, never a valid asset or principal
pub const NULL_KEY: Pubkey = [0u8; 32];

#[inline]
pub fn is_null(key: &Pubkey) -> bool {
    *key == NULL_KEY
}

/// Who is calling and when
///
/// Stands in for signer verification and the clock sysvar: every operation
/// receives an already-authenticated caller and the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub caller: Pubkey,
    pub now: UnixTimestamp,
}

impl Context {
    pub fn new(caller: Pubkey, now: UnixTimestamp) -> Self {
        Self { caller, now }
    }
}

/// Base58 rendering of a key for logs
pub struct KeyDisplay<'a>(pub &'a Pubkey);

impl fmt::Display for KeyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(self.0).into_string())
    }
}
