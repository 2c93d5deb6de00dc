//! Perception snapshot shared by all behaviors.
use std::sync::Arc;

use behavior_tree::BehaviorMode;
use decision_core::{CostMap, Pose};

/// Read-mostly perception state populated outside the behavior layer.
///
/// Behaviors copy what they need at the start of a tick and treat those
/// copies as the snapshot for the rest of it. The only writes a behavior
/// performs are the mode announcement and the reload-in-progress flag.
pub trait Blackboard: Send + Sync {
    /// Robot pose in the map frame.
    fn robot_map_pose(&self) -> Pose;

    /// Last known opponent pose in the map frame.
    fn enemy(&self) -> Pose;

    fn is_enemy_detected(&self) -> bool;

    /// Current costmap. The returned handle stays valid for the whole tick.
    fn costmap(&self) -> Arc<dyn CostMap>;

    /// Announces which behavior is driving the robot.
    fn change_behavior(&self, mode: BehaviorMode);

    /// Raises the reload-in-progress flag.
    fn reloading(&self);

    /// Clears the reload-in-progress flag.
    fn un_reload(&self);
}
