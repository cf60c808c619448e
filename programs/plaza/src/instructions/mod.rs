pub mod entity;
pub mod identity;
pub mod voting;
pub mod replies;

pub use entity::*;
pub use identity::*;
pub use voting::*;
pub use replies::*;
