//! Team entities.

pub mod model;
pub mod role;

pub use model::Team;
pub use role::TeamRole;
