pub mod initialize_ledger;
pub mod add_reply;
pub mod modify_reply;

pub use initialize_ledger::*;
pub use add_reply::*;
pub use modify_reply::*;
