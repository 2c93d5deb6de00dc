//! Pursuit of the detected opponent.
//!
//! Each re-plan projects a waypoint a fixed offset short of the opponent on
//! the robot→opponent line, holds position while already inside the
//! standoff band, and walks the costmap back toward the robot when the
//! projected waypoint falls on an obstacle footprint.
use std::sync::Arc;

use async_trait::async_trait;
use behavior_tree::{BehaviorMode, BehaviorState};
use decision_core::{Cell, ChaseConfig, CostMap, LineRaster, MAP_FRAME, Point, Pose, is_forbidden};

use super::GOAL_Z;
use crate::api::{Behavior, Blackboard, ChassisExecutor};

/// Two-slot ring of recent opponent poses.
///
/// Slot `count % 2` receives the next pose; the most recent one always sits
/// in slot `(count + 1) % 2`.
#[derive(Clone, Debug, Default)]
pub struct OpponentBuffer {
    slots: [Pose; 2],
    count: usize,
}

impl OpponentBuffer {
    /// Stores `pose` and returns the slot it was written to.
    pub fn push(&mut self, pose: Pose) -> &Pose {
        let slot = self.count % 2;
        self.slots[slot] = pose;
        self.count = (self.count + 1) % 2;
        &self.slots[slot]
    }

    /// Most recently written pose (the default pose before the first push).
    pub fn latest(&self) -> &Pose {
        &self.slots[(self.count + 1) % 2]
    }

    /// Slot the next push will write to.
    pub fn next_slot(&self) -> usize {
        self.count
    }
}

/// What a chase tick decided. Only used for logging.
#[derive(Debug)]
enum ChaseStep {
    Dispatched,
    Holding,
    OffMap,
    Blocked,
}

pub struct ChaseBehavior {
    executor: Arc<dyn ChassisExecutor>,
    blackboard: Arc<dyn Blackboard>,
    params: ChaseConfig,
    chase_goal: Pose,
    buffer: OpponentBuffer,
    cancel_pending: bool,
}

impl ChaseBehavior {
    pub fn new(
        executor: Arc<dyn ChassisExecutor>,
        blackboard: Arc<dyn Blackboard>,
        params: ChaseConfig,
    ) -> Self {
        Self {
            executor,
            blackboard,
            params,
            chase_goal: Pose::default(),
            buffer: OpponentBuffer::default(),
            cancel_pending: true,
        }
    }

    /// One control step.
    ///
    /// Re-plans only once the previous goal has finished (success or
    /// failure). While the executor is idle at most one cancel is forwarded;
    /// while it is running the current goal is left alone.
    pub fn tick(&mut self) {
        let executor_state = self.executor.update();
        self.blackboard.change_behavior(BehaviorMode::Chase);

        let robot = self.blackboard.robot_map_pose();
        let enemy = self.blackboard.enemy();
        let detected = self.blackboard.is_enemy_detected();

        tracing::debug!(
            "chase tick: executor={}, enemy detected={}, enemy at ({:.3}, {:.3})",
            executor_state,
            detected,
            enemy.x(),
            enemy.y()
        );

        if executor_state.is_terminal() {
            let step = self.replan(&robot, enemy);
            tracing::debug!("chase re-plan: {:?}", step);
        } else if executor_state.is_idle() {
            self.stand_still();
        } else {
            tracing::trace!("chase goal still running");
        }
    }

    /// Forwards a cancel to the executor regardless of the pending flag.
    pub fn cancel(&mut self) {
        self.executor.cancel();
        self.cancel_pending = false;
    }

    pub fn update(&self) -> BehaviorState {
        self.executor.update()
    }

    /// Overrides the stored chase goal.
    pub fn set_goal(&mut self, goal: Pose) {
        self.chase_goal = goal;
    }

    pub fn goal(&self) -> &Pose {
        &self.chase_goal
    }

    /// `true` while a dispatched goal has not yet been cancelled.
    pub fn cancel_pending(&self) -> bool {
        self.cancel_pending
    }

    pub fn opponent_buffer(&self) -> &OpponentBuffer {
        &self.buffer
    }

    fn replan(&mut self, robot: &Pose, enemy: Pose) -> ChaseStep {
        let latest = self.buffer.push(enemy).position;

        let dx = latest.x - robot.x();
        let dy = latest.y - robot.y();
        let yaw = dy.atan2(dx);
        let distance = dx.hypot(dy);

        if self.params.within_standoff(distance) {
            tracing::debug!("opponent at {:.3}m, inside standoff band", distance);
            self.stand_still();
            return ChaseStep::Holding;
        }

        let target = Point::new(
            latest.x - self.params.offset * yaw.cos(),
            latest.y - self.params.offset * yaw.sin(),
            GOAL_Z,
        );
        let mut goal = Pose {
            frame_id: MAP_FRAME.to_string(),
            position: target,
            orientation: robot.orientation,
        };

        let costmap = self.blackboard.costmap();
        let Some(goal_cell) = costmap.world_to_cell(target.x, target.y) else {
            tracing::debug!(
                "projected goal ({:.3}, {:.3}) is off the costmap",
                target.x,
                target.y
            );
            return ChaseStep::OffMap;
        };

        if is_forbidden(costmap.cost(goal_cell)) {
            match first_free_toward(costmap.as_ref(), goal_cell, robot) {
                Some((wx, wy)) => {
                    goal.position.x = wx;
                    goal.position.y = wy;
                }
                None => {
                    tracing::debug!("no free cell between projected goal and robot");
                    self.stand_still();
                    return ChaseStep::Blocked;
                }
            }
        }

        tracing::info!(
            "chasing: robot ({:.3}, {:.3}), opponent ({:.3}, {:.3}), goal ({:.3}, {:.3})",
            robot.x(),
            robot.y(),
            latest.x,
            latest.y,
            goal.x(),
            goal.y()
        );
        self.chase_goal = goal.clone();
        self.cancel_pending = true;
        self.executor.execute_goal(goal);
        ChaseStep::Dispatched
    }

    fn stand_still(&mut self) {
        if self.cancel_pending {
            self.executor.cancel();
            self.cancel_pending = false;
        }
    }
}

/// Walks the cells from `goal_cell` toward the robot's cell and returns the
/// world centre of the first one that is not an obstacle footprint.
fn first_free_toward(costmap: &dyn CostMap, goal_cell: Cell, robot: &Pose) -> Option<(f64, f64)> {
    let robot_cell = costmap.world_to_cell(robot.x(), robot.y())?;

    LineRaster::new(
        goal_cell.x as i32,
        goal_cell.y as i32,
        robot_cell.x as i32,
        robot_cell.y as i32,
    )
    .map(|(x, y)| Cell::new(x as u32, y as u32))
    .find(|&cell| !is_forbidden(costmap.cost(cell)))
    .map(|cell| costmap.cell_to_world(cell))
}

#[async_trait]
impl Behavior for ChaseBehavior {
    fn mode(&self) -> BehaviorMode {
        BehaviorMode::Chase
    }

    async fn run(&mut self) {
        self.tick();
    }

    fn cancel(&mut self) {
        ChaseBehavior::cancel(self);
    }

    fn update(&self) -> BehaviorState {
        ChaseBehavior::update(self)
    }
}
