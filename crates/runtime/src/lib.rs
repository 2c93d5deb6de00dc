//! Behavior layer of the arena robot's decision stack.
//!
//! This crate turns a perception snapshot (the [`Blackboard`]) and a costmap
//! into motion goals for a [`ChassisExecutor`] and shoot/reload requests for
//! the simulator [`SimServices`]. The top-level tree that picks which
//! behavior to tick lives outside this crate; it drives one [`Behavior`] per
//! control period.
//!
//! Modules are organized by responsibility:
//! - [`api`] declares the collaborator interfaces and the [`Behavior`] trait
//! - [`behaviors`] hosts the chase, reload and shoot behaviors
//! - [`heat`] keeps the barrel heat fed from its streaming input
//! - [`sim`] provides in-memory collaborators for tests and local runs
pub mod api;
pub mod behaviors;
pub mod heat;
pub mod sim;

pub use api::{Behavior, Blackboard, ChassisExecutor, ServiceError, ServiceResult, SimServices};
pub use behaviors::{
    BARREL_HEAT_LIMIT, BARREL_HEAT_UPPERBOUND, ChaseBehavior, OpponentBuffer, PROJECTILE_SPEED,
    ReloadBehavior, ReloadCancel, ShootBehavior,
};
pub use heat::{BarrelHeat, RobotHeat, spawn_heat_listener};
pub use sim::{ArenaServices, ChassisCall, SharedBlackboard, SimChassis};

pub use behavior_tree::{BehaviorMode, BehaviorState};
