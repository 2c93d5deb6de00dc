//! Behavior lifecycle vocabulary shared by the decision layer.
//!
//! The top-level tree that selects a behavior and the chassis executor that
//! carries out motion goals both speak in terms of the types defined here:
//!
//! - [`BehaviorState`]: lifecycle of the goal currently held by an executor
//!   (Idle, Running, Success, Failure)
//! - [`BehaviorMode`]: which tactical behavior is currently driving the robot,
//!   announced on the blackboard so other components can react
//!
//! - **Zero dependencies**: Pure Rust with no external crates

pub mod mode;
pub mod status;

// Re-export core types for ergonomic API
pub use mode::BehaviorMode;
pub use status::BehaviorState;
