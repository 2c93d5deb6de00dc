//! Face the opponent and fire within the barrel heat budget.
use std::sync::Arc;

use async_trait::async_trait;
use behavior_tree::{BehaviorMode, BehaviorState};
use decision_core::{DecisionConfig, Point, Pose, Quaternion, RobotIdentity, Velocity};

use crate::api::{Behavior, Blackboard, ChassisExecutor, SimServices};
use crate::heat::BarrelHeat;

/// Heat added to the barrel by one shot.
pub const PROJECTILE_SPEED: i32 = 25;
/// Soft heat cap this behavior never crosses.
pub const BARREL_HEAT_LIMIT: i32 = 360;
/// Hard heat cap enforced by the referee.
pub const BARREL_HEAT_UPPERBOUND: i32 = 720;

pub struct ShootBehavior {
    executor: Arc<dyn ChassisExecutor>,
    blackboard: Arc<dyn Blackboard>,
    services: Arc<dyn SimServices>,
    identity: Option<RobotIdentity>,
    whirl_vel: Velocity,
    barrel_heat: BarrelHeat,
}

impl ShootBehavior {
    /// Without an identity the behavior logs a warning and refuses to act.
    pub fn new(
        executor: Arc<dyn ChassisExecutor>,
        blackboard: Arc<dyn Blackboard>,
        services: Arc<dyn SimServices>,
        identity: Option<RobotIdentity>,
        config: &DecisionConfig,
    ) -> Self {
        if identity.is_none() {
            tracing::warn!("shoot behavior built without a robot identity; it will not act");
        }

        Self {
            executor,
            blackboard,
            services,
            identity,
            whirl_vel: config.whirl_velocity(),
            barrel_heat: BarrelHeat::default(),
        }
    }

    /// Shares an existing heat cell, e.g. one already fed by [`crate::spawn_heat_listener`].
    pub fn with_barrel_heat(mut self, heat: BarrelHeat) -> Self {
        self.barrel_heat = heat;
        self
    }

    /// Handle for the heat stream to write into.
    pub fn barrel_heat(&self) -> BarrelHeat {
        self.barrel_heat.clone()
    }

    /// One control step: search, face, and fire if the heat budget allows.
    pub async fn tick(&mut self) {
        let Some(identity) = self.identity else {
            tracing::warn!("shoot: unknown robot identity, refusing to act");
            return;
        };

        if !self.blackboard.is_enemy_detected() {
            tracing::info!("shoot: no opponent detected, whirling to search");
            self.executor.execute_velocity(self.whirl_vel);
            return;
        }

        if !self.has_bullet(identity).await {
            tracing::warn!("shoot: no ammunition left, whirling");
            self.executor.execute_velocity(self.whirl_vel);
            return;
        }

        let enemy = self.blackboard.enemy();
        let robot = self.blackboard.robot_map_pose();
        let yaw = robot.position.bearing_to(&enemy.position);
        let facing = Pose::new(
            Point::new(robot.x(), robot.y(), 0.0),
            Quaternion::from_yaw(yaw),
        );
        self.executor.execute_goal(facing);

        let heat = self.barrel_heat.get();
        if heat >= BARREL_HEAT_LIMIT - PROJECTILE_SPEED {
            tracing::info!(
                "shoot: barrel heat {} leaves no room for another shot (limit {})",
                heat,
                BARREL_HEAT_LIMIT
            );
            return;
        }

        self.shoot_enemy(identity).await;
    }

    pub fn cancel(&mut self) {
        self.executor.cancel();
    }

    pub fn update(&self) -> BehaviorState {
        self.executor.update()
    }

    async fn has_bullet(&self, identity: RobotIdentity) -> bool {
        match self.services.check_bullet(identity.self_id).await {
            Ok(remaining) => remaining != 0,
            Err(e) => {
                tracing::error!("Failed to check bullets: {}", e);
                false
            }
        }
    }

    async fn shoot_enemy(&self, identity: RobotIdentity) {
        match self
            .services
            .shoot(identity.self_id, identity.enemy_id)
            .await
        {
            Ok(true) => tracing::info!(
                "Robot {} attempted to shoot Robot {}",
                identity.self_id,
                identity.enemy_id
            ),
            Ok(false) => tracing::info!(
                "Robot {} was not allowed to shoot Robot {}",
                identity.self_id,
                identity.enemy_id
            ),
            Err(e) => tracing::error!("Failed to shoot: {}", e),
        }
    }
}

#[async_trait]
impl Behavior for ShootBehavior {
    fn mode(&self) -> BehaviorMode {
        BehaviorMode::Shoot
    }

    async fn run(&mut self) {
        self.tick().await;
    }

    fn cancel(&mut self) {
        ShootBehavior::cancel(self);
    }

    fn update(&self) -> BehaviorState {
        ShootBehavior::update(self)
    }
}

