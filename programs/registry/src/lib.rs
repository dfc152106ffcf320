//! Pool registry: creates independent pool instances and lists them

pub mod state;
pub mod instructions;

pub use state::*;
pub use instructions::*;

pinocchio_pubkey::declare_id!("StakeRegistry111111111111111111111111111111");
