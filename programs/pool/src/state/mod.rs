pub mod guard;
pub mod reward;
pub mod user;
pub mod ledger;

pub use guard::*;
pub use reward::*;
pub use user::*;
pub use ledger::*;
