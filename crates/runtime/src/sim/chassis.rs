//! Recording chassis executor with a simple kinematic model.
use std::sync::Mutex;
use std::time::Duration;

use behavior_tree::BehaviorState;
use decision_core::{Point, Pose, Quaternion, Velocity};

use super::{SharedBlackboard, lock};
use crate::api::{Blackboard, ChassisExecutor};

/// A submission received by [`SimChassis`].
#[derive(Clone, Debug, PartialEq)]
pub enum ChassisCall {
    Goal(Pose),
    Velocity(Velocity),
    Cancel,
}

#[derive(Debug, Default)]
struct ChassisInner {
    state: BehaviorState,
    goal: Option<Pose>,
    velocity: Option<Velocity>,
    calls: Vec<ChassisCall>,
}

/// Executor that records every call and can drive the blackboard's robot
/// pose toward its active goal.
#[derive(Debug, Default)]
pub struct SimChassis {
    inner: Mutex<ChassisInner>,
}

impl SimChassis {
    /// Distance under which a goal counts as reached.
    pub const GOAL_TOLERANCE: f64 = 0.05;

    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the reported state, e.g. to stage a finished goal.
    pub fn set_state(&self, state: BehaviorState) {
        lock(&self.inner).state = state;
    }

    pub fn calls(&self) -> Vec<ChassisCall> {
        lock(&self.inner).calls.clone()
    }

    /// Goals submitted so far, oldest first.
    pub fn goals(&self) -> Vec<Pose> {
        lock(&self.inner)
            .calls
            .iter()
            .filter_map(|call| match call {
                ChassisCall::Goal(goal) => Some(goal.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn velocities(&self) -> Vec<Velocity> {
        lock(&self.inner)
            .calls
            .iter()
            .filter_map(|call| match call {
                ChassisCall::Velocity(velocity) => Some(*velocity),
                _ => None,
            })
            .collect()
    }

    pub fn cancel_count(&self) -> usize {
        lock(&self.inner)
            .calls
            .iter()
            .filter(|call| matches!(call, ChassisCall::Cancel))
            .count()
    }

    pub fn active_goal(&self) -> Option<Pose> {
        lock(&self.inner).goal.clone()
    }

    /// Moves the robot for `dt` at `speed` m/s toward the active goal, or
    /// spins it in place under an active velocity command.
    ///
    /// Reaching the goal adopts its heading and reports `Success`.
    pub fn advance(&self, blackboard: &SharedBlackboard, dt: Duration, speed: f64) {
        let mut inner = lock(&self.inner);
        let robot = blackboard.robot_map_pose();
        let seconds = dt.as_secs_f64();

        if let Some(goal) = inner.goal.clone() {
            let remaining = robot.position.planar_distance(&goal.position);
            let step = speed * seconds;

            if remaining <= step.max(Self::GOAL_TOLERANCE) {
                let arrived = Point::new(goal.x(), goal.y(), robot.position.z);
                blackboard.set_robot_pose(Pose::new(arrived, goal.orientation));
                inner.goal = None;
                inner.state = BehaviorState::Success;
            } else {
                let heading = robot.position.bearing_to(&goal.position);
                let next = Point::new(
                    robot.x() + step * heading.cos(),
                    robot.y() + step * heading.sin(),
                    robot.position.z,
                );
                blackboard.set_robot_pose(robot.with_position(next));
            }
        } else if let Some(velocity) = inner.velocity {
            let yaw = robot.yaw() + velocity.angular.z * seconds;
            let position = robot.position;
            blackboard.set_robot_pose(Pose::new(position, Quaternion::from_yaw(yaw)));
        }
    }
}

impl ChassisExecutor for SimChassis {
    fn execute_goal(&self, goal: Pose) {
        let mut inner = lock(&self.inner);
        inner.calls.push(ChassisCall::Goal(goal.clone()));
        inner.goal = Some(goal);
        inner.velocity = None;
        inner.state = BehaviorState::Running;
    }

    fn execute_velocity(&self, velocity: Velocity) {
        let mut inner = lock(&self.inner);
        inner.calls.push(ChassisCall::Velocity(velocity));
        inner.goal = None;
        inner.velocity = Some(velocity);
        inner.state = BehaviorState::Running;
    }

    fn cancel(&self) {
        let mut inner = lock(&self.inner);
        inner.calls.push(ChassisCall::Cancel);
        inner.goal = None;
        inner.velocity = None;
        inner.state = BehaviorState::Idle;
    }

    fn update(&self) -> BehaviorState {
        lock(&self.inner).state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decision_core::GridCostMap;

    fn blackboard_at(x: f64, y: f64) -> SharedBlackboard {
        let blackboard = SharedBlackboard::new(GridCostMap::free(10, 10, 1.0, 0.0, 0.0));
        blackboard.set_robot_pose(Pose::from_xy_yaw(x, y, 0.0));
        blackboard
    }

    #[test]
    fn goal_is_reached_after_enough_steps() {
        let blackboard = blackboard_at(0.0, 0.0);
        let chassis = SimChassis::new();
        chassis.execute_goal(Pose::from_xy_yaw(1.0, 0.0, 1.0));

        chassis.advance(&blackboard, Duration::from_millis(500), 1.0);
        assert_eq!(chassis.update(), BehaviorState::Running);
        assert!((blackboard.robot_map_pose().x() - 0.5).abs() < 1e-9);

        chassis.advance(&blackboard, Duration::from_millis(500), 1.0);
        assert_eq!(chassis.update(), BehaviorState::Success);
        let robot = blackboard.robot_map_pose();
        assert!((robot.x() - 1.0).abs() < 1e-9);
        assert!((robot.yaw() - 1.0).abs() < 1e-9);
        assert!(chassis.active_goal().is_none());
    }

    #[test]
    fn cancel_goes_idle_and_is_recorded() {
        let chassis = SimChassis::new();
        chassis.execute_velocity(Velocity::whirl(0.0, 0.0, 1.0));
        chassis.cancel();

        assert_eq!(chassis.update(), BehaviorState::Idle);
        assert_eq!(chassis.cancel_count(), 1);
        assert_eq!(chassis.velocities().len(), 1);
    }

    #[test]
    fn whirl_spins_in_place() {
        let blackboard = blackboard_at(2.0, 3.0);
        let chassis = SimChassis::new();
        chassis.execute_velocity(Velocity::whirl(0.0, 0.0, 1.0));

        chassis.advance(&blackboard, Duration::from_millis(500), 1.0);

        let robot = blackboard.robot_map_pose();
        assert_eq!((robot.x(), robot.y()), (2.0, 3.0));
        assert!((robot.yaw() - 0.5).abs() < 1e-9);
    }
}
