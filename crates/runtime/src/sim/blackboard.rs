//! In-memory Blackboard implementation.
use std::sync::{Arc, RwLock};

use behavior_tree::BehaviorMode;
use decision_core::{CostMap, Pose};

use super::{read, write};
use crate::api::Blackboard;

#[derive(Debug, Default)]
struct Perception {
    robot: Pose,
    enemy: Pose,
    enemy_detected: bool,
    mode: BehaviorMode,
    reloading: bool,
    reload_raises: usize,
}

/// Blackboard backed by plain fields behind locks.
///
/// The costmap is swapped as a whole, so a behavior holding the `Arc` from
/// [`Blackboard::costmap`] keeps reading one consistent map for its tick.
pub struct SharedBlackboard {
    perception: RwLock<Perception>,
    costmap: RwLock<Arc<dyn CostMap>>,
}

impl SharedBlackboard {
    pub fn new(costmap: impl CostMap + 'static) -> Self {
        Self {
            perception: RwLock::new(Perception::default()),
            costmap: RwLock::new(Arc::new(costmap)),
        }
    }

    pub fn set_robot_pose(&self, pose: Pose) {
        write(&self.perception).robot = pose;
    }

    /// Records an opponent sighting at `pose`.
    pub fn set_enemy(&self, pose: Pose) {
        let mut perception = write(&self.perception);
        perception.enemy = pose;
        perception.enemy_detected = true;
    }

    /// Marks the opponent as lost; the last known pose is kept.
    pub fn lose_enemy(&self) {
        write(&self.perception).enemy_detected = false;
    }

    pub fn set_costmap(&self, costmap: impl CostMap + 'static) {
        *write(&self.costmap) = Arc::new(costmap);
    }

    /// Mode most recently announced by a behavior.
    pub fn mode(&self) -> BehaviorMode {
        read(&self.perception).mode
    }

    pub fn is_reloading(&self) -> bool {
        read(&self.perception).reloading
    }

    /// How many times the reloading flag has been raised.
    pub fn reload_raises(&self) -> usize {
        read(&self.perception).reload_raises
    }
}

impl Blackboard for SharedBlackboard {
    fn robot_map_pose(&self) -> Pose {
        read(&self.perception).robot.clone()
    }

    fn enemy(&self) -> Pose {
        read(&self.perception).enemy.clone()
    }

    fn is_enemy_detected(&self) -> bool {
        read(&self.perception).enemy_detected
    }

    fn costmap(&self) -> Arc<dyn CostMap> {
        Arc::clone(&read(&self.costmap))
    }

    fn change_behavior(&self, mode: BehaviorMode) {
        write(&self.perception).mode = mode;
    }

    fn reloading(&self) {
        let mut perception = write(&self.perception);
        perception.reloading = true;
        perception.reload_raises += 1;
    }

    fn un_reload(&self) {
        write(&self.perception).reloading = false;
    }
}
