use std::sync::Arc;

use decision_core::{DecisionConfig, GridCostMap, Pose, RobotIdentity, Velocity, WhirlVelConfig};
use decision_runtime::{
    ArenaServices, BARREL_HEAT_LIMIT, Behavior, BehaviorMode, ChassisCall, PROJECTILE_SPEED,
    RobotHeat, SharedBlackboard, ShootBehavior, SimChassis, spawn_heat_listener,
};
use tokio::sync::mpsc;

const WHIRL: Velocity = Velocity::whirl(0.0, 0.0, 1.5);

struct Rig {
    chassis: Arc<SimChassis>,
    blackboard: Arc<SharedBlackboard>,
    services: Arc<ArenaServices>,
    shoot: ShootBehavior,
}

fn config() -> DecisionConfig {
    DecisionConfig {
        whirl_vel: WhirlVelConfig {
            angle_z_vel: 1.5,
            ..WhirlVelConfig::default()
        },
        ..DecisionConfig::default()
    }
}

fn rig(namespace: &str) -> Rig {
    let chassis = Arc::new(SimChassis::new());
    let blackboard = Arc::new(SharedBlackboard::new(GridCostMap::free(
        100, 100, 0.1, -5.0, -5.0,
    )));
    let services = Arc::new(ArenaServices::new(5));
    blackboard.set_robot_pose(Pose::from_xy_yaw(0.0, 0.0, 0.0));

    let identity = RobotIdentity::from_namespace(namespace).ok();
    let shoot = ShootBehavior::new(
        chassis.clone(),
        blackboard.clone(),
        services.clone(),
        identity,
        &config(),
    );

    Rig {
        chassis,
        blackboard,
        services,
        shoot,
    }
}

#[tokio::test]
async fn whirls_when_no_opponent_is_detected() {
    let mut rig = rig("r1");

    rig.shoot.tick().await;

    assert_eq!(rig.chassis.calls(), vec![ChassisCall::Velocity(WHIRL)]);
    assert!(rig.services.shots().is_empty());
}

#[tokio::test]
async fn faces_and_fires_at_a_visible_opponent() {
    let mut rig = rig("r1");
    rig.blackboard.set_enemy(Pose::from_xy_yaw(2.0, 2.0, 0.0));
    rig.shoot.barrel_heat().set(BARREL_HEAT_LIMIT - PROJECTILE_SPEED - 1);

    rig.shoot.tick().await;

    let goals = rig.chassis.goals();
    assert_eq!(goals.len(), 1);
    assert_eq!((goals[0].x(), goals[0].y()), (0.0, 0.0));
    assert!((goals[0].yaw() - std::f64::consts::FRAC_PI_4).abs() < 1e-9);
    assert_eq!(rig.services.shots(), vec![(1, 3)]);
    assert_eq!(rig.services.bullets(1), 4);
}

#[tokio::test]
async fn holds_fire_at_the_heat_cap() {
    let mut rig = rig("r1");
    rig.blackboard.set_enemy(Pose::from_xy_yaw(3.0, 0.0, 0.0));
    rig.services.set_bullets(1, 5);
    rig.shoot.barrel_heat().set(336);

    rig.shoot.tick().await;

    assert_eq!(rig.chassis.goals().len(), 1);
    assert!(rig.chassis.velocities().is_empty());
    assert!(rig.services.shots().is_empty());
}

#[tokio::test]
async fn whirls_without_ammunition() {
    let mut rig = rig("r1");
    rig.blackboard.set_enemy(Pose::from_xy_yaw(3.0, 0.0, 0.0));
    rig.services.set_bullets(1, 0);

    rig.shoot.tick().await;

    assert_eq!(rig.chassis.calls(), vec![ChassisCall::Velocity(WHIRL)]);
    assert!(rig.services.shots().is_empty());
}

#[tokio::test]
async fn unreachable_bullet_service_counts_as_empty() {
    let mut rig = rig("r3");
    rig.blackboard.set_enemy(Pose::from_xy_yaw(3.0, 0.0, 0.0));
    rig.services.set_online(false);

    rig.shoot.tick().await;

    assert_eq!(rig.chassis.calls(), vec![ChassisCall::Velocity(WHIRL)]);
    assert!(rig.services.shots().is_empty());
}

#[tokio::test]
async fn fires_at_most_once_per_tick() {
    let mut rig = rig("r3");
    rig.blackboard.set_enemy(Pose::from_xy_yaw(-1.0, 0.0, 0.0));

    for expected in 1..=3 {
        rig.shoot.tick().await;
        assert_eq!(rig.services.shots().len(), expected);
    }
    assert!(rig.services.shots().iter().all(|&shot| shot == (3, 1)));
}

#[tokio::test]
async fn heat_stream_gates_the_next_shot() {
    let mut rig = rig("r1");
    rig.blackboard.set_enemy(Pose::from_xy_yaw(3.0, 0.0, 0.0));

    let (tx, rx) = mpsc::channel(4);
    let listener = spawn_heat_listener(rx, rig.shoot.barrel_heat());
    tx.send(RobotHeat { shooter_heat: 100 }).await.unwrap();
    tx.send(RobotHeat { shooter_heat: 350 }).await.unwrap();
    drop(tx);
    listener.await.unwrap();

    rig.shoot.tick().await;
    assert!(rig.services.shots().is_empty());
}

#[tokio::test]
async fn unknown_identity_refuses_to_act() {
    let mut rig = rig("r7");
    rig.blackboard.set_enemy(Pose::from_xy_yaw(3.0, 0.0, 0.0));

    rig.shoot.run().await;

    assert!(rig.chassis.calls().is_empty());
    assert!(rig.services.shots().is_empty());
    assert_eq!(rig.shoot.mode(), BehaviorMode::Shoot);
}
