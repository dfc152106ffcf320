pub mod types;
pub mod error;
pub mod instruction;

pub use types::*;
pub use error::*;
pub use instruction::*;
