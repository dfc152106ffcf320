pub mod state;
pub mod events;
pub mod transfer;
pub mod invariants;
pub mod instructions;

// Instruction dispatch for callers that hold packed instruction data
pub mod entrypoint;

pub use state::*;
pub use events::*;
pub use transfer::*;
pub use instructions::*;

pinocchio_pubkey::declare_id!("StakePoo1Ledger1111111111111111111111111111");

#[cfg(test)]
mod testing;
