pub mod create_profile;
pub mod update_profile;
pub mod add_delegate;
pub mod remove_delegate;
pub mod profile_lookups;

pub use create_profile::*;
pub use update_profile::*;
pub use add_delegate::*;
pub use remove_delegate::*;
pub use profile_lookups::*;
