//! Public runtime API surface.
//!
//! The behaviors depend only on the traits declared here. Adaptors for a
//! concrete robot middleware (topic subscribers, service clients) implement
//! them outside this crate; [`crate::sim`] implements them in memory.

pub mod behavior;
pub mod blackboard;
pub mod errors;
pub mod executor;
pub mod services;

pub use behavior::Behavior;
pub use blackboard::Blackboard;
pub use errors::{ServiceError, ServiceResult};
pub use executor::ChassisExecutor;
pub use services::SimServices;
