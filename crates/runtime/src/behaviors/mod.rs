//! Tactical behaviors.
//!
//! Each behavior owns only small private buffers and flags. The executor,
//! blackboard and services are shared handles that outlive every behavior.

pub mod chase;
pub mod reload;
pub mod shoot;

pub use chase::{ChaseBehavior, OpponentBuffer};
pub use reload::{ReloadBehavior, ReloadCancel};
pub use shoot::{BARREL_HEAT_LIMIT, BARREL_HEAT_UPPERBOUND, PROJECTILE_SPEED, ShootBehavior};

/// Height assigned to navigation goals produced by the chase and reload behaviors.
pub(crate) const GOAL_Z: f64 = 1.0;
