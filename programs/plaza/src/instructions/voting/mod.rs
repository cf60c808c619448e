pub mod cast_vote;
pub mod vote_lookups;

pub use cast_vote::*;
pub use vote_lookups::*;
