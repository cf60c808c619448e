pub mod compute_entity_id;

pub use compute_entity_id::*;
