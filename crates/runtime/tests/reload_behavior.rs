use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use decision_content::ConfigLoader;
use decision_core::{DecisionConfig, GridCostMap, Pose, ReloadConfig, RobotIdentity, SpotConfig};
use decision_runtime::{
    ArenaServices, Behavior, BehaviorMode, BehaviorState, ChassisCall, ReloadBehavior,
    SharedBlackboard, SimChassis,
};

const SPOT: (f64, f64) = (0.5, 4.5);

struct Rig {
    chassis: Arc<SimChassis>,
    blackboard: Arc<SharedBlackboard>,
    services: Arc<ArenaServices>,
    reload: ReloadBehavior,
}

fn config() -> DecisionConfig {
    DecisionConfig {
        reload_spot_red: SpotConfig {
            x: SPOT.0,
            y: SPOT.1,
            ..SpotConfig::default()
        },
        reload: ReloadConfig {
            poll_period_ms: 10,
            arrival_tolerance_sq: 0.17,
        },
        ..DecisionConfig::default()
    }
}

fn rig_with(namespace: &str, services: ArenaServices, robot: (f64, f64)) -> Rig {
    let chassis = Arc::new(SimChassis::new());
    let blackboard = Arc::new(SharedBlackboard::new(GridCostMap::free(
        100, 100, 0.1, -1.0, -1.0,
    )));
    let services = Arc::new(services);
    blackboard.set_robot_pose(Pose::from_xy_yaw(robot.0, robot.1, 0.0));

    let reload = ReloadBehavior::new(
        chassis.clone(),
        blackboard.clone(),
        services.clone(),
        RobotIdentity::from_namespace(namespace).ok(),
        &config(),
    );

    Rig {
        chassis,
        blackboard,
        services,
        reload,
    }
}

fn rig(robot: (f64, f64)) -> Rig {
    rig_with("r1", ArenaServices::new(5), robot)
}

#[tokio::test]
async fn drives_to_the_spot_and_reloads_on_arrival() {
    let mut rig = rig((0.0, 0.0));
    rig.services.set_bullets(1, 0);
    let blackboard = rig.blackboard.clone();

    tokio::join!(rig.reload.tick(), async move {
        tokio::time::sleep(Duration::from_millis(35)).await;
        blackboard.set_robot_pose(Pose::from_xy_yaw(SPOT.0, SPOT.1 - 0.2, 0.0));
    });

    assert_eq!(rig.services.reload_requests(), vec![1]);
    assert_eq!(rig.services.bullets(1), 5);

    let goals = rig.chassis.goals();
    assert_eq!(goals.len(), 1);
    assert_eq!((goals[0].x(), goals[0].y()), SPOT);
    assert_eq!(goals[0].position.z, 1.0);
    assert!((goals[0].yaw() - SPOT.1.atan2(SPOT.0)).abs() < 1e-9);
    assert_eq!(rig.chassis.calls().last(), Some(&ChassisCall::Cancel));

    assert!(!rig.blackboard.is_reloading());
    assert_eq!(rig.blackboard.reload_raises(), 1);
    assert!(!rig.reload.cancel_pending());
    assert_eq!(rig.reload.update(), BehaviorState::Idle);
}

#[tokio::test]
async fn leaves_running_navigation_alone() {
    let mut rig = rig((0.0, 0.0));
    rig.chassis.set_state(BehaviorState::Running);

    rig.reload.tick().await;

    assert!(rig.chassis.calls().is_empty());
    assert!(rig.services.reload_requests().is_empty());
}

#[tokio::test]
async fn standing_on_the_spot_cancels_once() {
    let mut rig = rig(SPOT);

    rig.reload.tick().await;
    rig.reload.tick().await;

    assert_eq!(rig.chassis.calls(), vec![ChassisCall::Cancel]);
    assert!(rig.services.reload_requests().is_empty());
}

#[tokio::test]
async fn cancel_handle_stops_the_trip() {
    let mut rig = rig((0.0, 0.0));
    let handle = rig.reload.cancel_handle();

    tokio::join!(rig.reload.tick(), async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        handle.cancel();
    });

    assert!(matches!(
        rig.chassis.calls().as_slice(),
        [ChassisCall::Goal(_), ChassisCall::Cancel]
    ));
    assert!(rig.services.reload_requests().is_empty());
    assert_eq!(rig.blackboard.reload_raises(), 0);
}

#[tokio::test]
async fn cancel_during_a_slow_reload_clears_the_flag() {
    let services = ArenaServices::new(5).with_reload_latency(Duration::from_secs(10));
    let mut rig = rig_with("r1", services, (SPOT.0 + 0.1, SPOT.1));
    let handle = rig.reload.cancel_handle();
    let blackboard = rig.blackboard.clone();

    let trip = async {
        tokio::join!(rig.reload.tick(), async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            assert!(blackboard.is_reloading());
            handle.cancel();
        })
    };
    tokio::time::timeout(Duration::from_secs(2), trip)
        .await
        .expect("cancel should end the trip promptly");

    assert!(!rig.blackboard.is_reloading());
    assert_eq!(rig.blackboard.reload_raises(), 1);
    assert!(rig.services.reload_requests().is_empty());
    assert_eq!(rig.chassis.calls().last(), Some(&ChassisCall::Cancel));
}

#[tokio::test]
async fn failed_service_still_ends_the_trip() {
    let mut rig = rig((SPOT.0 + 0.1, SPOT.1));
    rig.services.set_online(false);

    rig.reload.run().await;

    assert!(!rig.blackboard.is_reloading());
    assert_eq!(rig.blackboard.reload_raises(), 1);
    assert_eq!(rig.chassis.calls().last(), Some(&ChassisCall::Cancel));
}

#[tokio::test]
async fn dropping_the_tick_clears_the_flag() {
    let services = ArenaServices::new(5).with_reload_latency(Duration::from_secs(10));
    let mut rig = rig_with("r1", services, (SPOT.0, SPOT.1 + 0.1));

    let outcome = tokio::time::timeout(Duration::from_millis(100), rig.reload.tick()).await;

    assert!(outcome.is_err());
    assert!(!rig.blackboard.is_reloading());
    assert_eq!(rig.blackboard.reload_raises(), 1);
    assert_eq!(rig.chassis.calls().last(), Some(&ChassisCall::Cancel));
    assert!(!rig.reload.cancel_pending());
}

#[tokio::test]
async fn dropping_the_tick_while_driving_stops_the_chassis() {
    let mut rig = rig((0.0, 0.0));

    let outcome = tokio::time::timeout(Duration::from_millis(50), rig.reload.tick()).await;

    assert!(outcome.is_err());
    assert!(matches!(
        rig.chassis.calls().as_slice(),
        [ChassisCall::Goal(_), ChassisCall::Cancel]
    ));
    assert_eq!(rig.reload.update(), BehaviorState::Idle);
    assert!(!rig.reload.cancel_pending());
    assert_eq!(rig.blackboard.reload_raises(), 0);
}

#[tokio::test]
async fn failed_navigation_keeps_polling_until_cancelled() {
    let mut rig = rig((0.0, 0.0));
    let handle = rig.reload.cancel_handle();
    let chassis = rig.chassis.clone();

    tokio::join!(rig.reload.tick(), async move {
        tokio::time::sleep(Duration::from_millis(15)).await;
        chassis.set_state(BehaviorState::Failure);
        tokio::time::sleep(Duration::from_millis(40)).await;
        handle.cancel();
    });

    assert!(rig.services.reload_requests().is_empty());
    assert_eq!(rig.chassis.calls().last(), Some(&ChassisCall::Cancel));
    assert_eq!(rig.reload.update(), BehaviorState::Idle);
}

#[tokio::test]
async fn unknown_identity_refuses_to_act() {
    let mut rig = rig_with("robot_9", ArenaServices::new(5), (0.0, 0.0));

    rig.reload.run().await;

    assert!(rig.chassis.calls().is_empty());
    assert_eq!(rig.reload.mode(), BehaviorMode::Reload);
}

#[tokio::test]
async fn blue_robots_use_the_blue_spot_from_the_bundled_config() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../decision/content/data/decision.toml");
    let config = ConfigLoader::load(&path).unwrap();

    let reload = ReloadBehavior::new(
        Arc::new(SimChassis::new()),
        Arc::new(SharedBlackboard::new(GridCostMap::free(10, 10, 1.0, 0.0, 0.0))),
        Arc::new(ArenaServices::new(5)),
        RobotIdentity::from_namespace("/r3").ok(),
        &config,
    );

    let spot = reload.reload_spot();
    assert_eq!((spot.x(), spot.y()), (7.5, 0.5));
}
