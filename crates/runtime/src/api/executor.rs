//! Chassis motion sink.
use behavior_tree::BehaviorState;
use decision_core::{Pose, Velocity};

/// Asynchronous motion executor for one robot.
///
/// Submissions return immediately; progress is observed through
/// [`ChassisExecutor::update`]. One executor serves one robot and the
/// behaviors that drive it are never ticked concurrently.
pub trait ChassisExecutor: Send + Sync {
    /// Submits a navigation goal (map frame), replacing any goal in flight.
    fn execute_goal(&self, goal: Pose);

    /// Submits a direct velocity command.
    fn execute_velocity(&self, velocity: Velocity);

    /// Aborts whatever the executor is doing.
    fn cancel(&self);

    /// Current lifecycle state of the last submission.
    fn update(&self) -> BehaviorState;
}
