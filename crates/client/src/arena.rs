//! Simulated arena the node runs its behavior against.
use std::sync::Arc;
use std::time::Duration;

use decision_core::{
    GridCostMap, INSCRIBED_INFLATED_OBSTACLE, LETHAL_OBSTACLE, Pose, RobotIdentity, Team,
};
use decision_runtime::{
    ArenaServices, BarrelHeat, Blackboard, PROJECTILE_SPEED, RobotHeat, SharedBlackboard,
    SimChassis, spawn_heat_listener,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const WIDTH_M: f64 = 8.0;
const HEIGHT_M: f64 = 5.0;
const RESOLUTION: f64 = 0.05;

const PHYSICS_PERIOD: Duration = Duration::from_millis(50);
const HEAT_PERIOD: Duration = Duration::from_millis(100);
const CHASSIS_SPEED: f64 = 1.5;
const MAGAZINE: u32 = 40;
const RELOAD_LATENCY: Duration = Duration::from_millis(300);
/// Heat shed every heat period.
const COOLING: i32 = 8;

/// Enemy orbit around the arena centre.
const ORBIT_RADIUS: f64 = 1.8;
const ORBIT_RATE: f64 = 0.2;
const SIGHT_RANGE: f64 = 4.0;

/// Collaborators of one simulated robot plus the tasks that animate them.
pub struct Arena {
    pub blackboard: Arc<SharedBlackboard>,
    pub chassis: Arc<SimChassis>,
    pub services: Arc<ArenaServices>,
    pub barrel_heat: BarrelHeat,
    tasks: Vec<JoinHandle<()>>,
}

impl Arena {
    /// Builds the arena and spawns its physics and heat tasks.
    pub fn start(identity: Option<RobotIdentity>) -> Self {
        let blackboard = Arc::new(SharedBlackboard::new(arena_costmap()));
        let chassis = Arc::new(SimChassis::new());
        let services = Arc::new(ArenaServices::new(MAGAZINE).with_reload_latency(RELOAD_LATENCY));
        let barrel_heat = BarrelHeat::default();

        blackboard.set_robot_pose(start_pose(identity.map(|identity| identity.team)));

        let (heat_tx, heat_rx) = mpsc::channel(16);
        let tasks = vec![
            tokio::spawn(physics(blackboard.clone(), chassis.clone())),
            tokio::spawn(referee_heat(services.clone(), heat_tx)),
            spawn_heat_listener(heat_rx, barrel_heat.clone()),
        ];

        Self {
            blackboard,
            chassis,
            services,
            barrel_heat,
            tasks,
        }
    }

    pub fn shutdown(self) {
        for task in self.tasks {
            task.abort();
        }
    }
}

/// Open field with an inflated pillar in the middle.
fn arena_costmap() -> GridCostMap {
    let width = (WIDTH_M / RESOLUTION).round() as u32;
    let height = (HEIGHT_M / RESOLUTION).round() as u32;
    let mut costmap = GridCostMap::free(width, height, RESOLUTION, 0.0, 0.0);

    costmap.fill_world_rect(3.3, 1.8, 4.7, 3.2, INSCRIBED_INFLATED_OBSTACLE);
    costmap.fill_world_rect(3.5, 2.0, 4.5, 3.0, LETHAL_OBSTACLE);
    costmap
}

fn start_pose(team: Option<Team>) -> Pose {
    match team {
        Some(Team::Blue) => Pose::from_xy_yaw(7.0, 4.0, std::f64::consts::PI),
        _ => Pose::from_xy_yaw(1.0, 1.0, 0.0),
    }
}

fn enemy_pose(elapsed: f64) -> Pose {
    let phase = elapsed * ORBIT_RATE;
    Pose::from_xy_yaw(
        WIDTH_M / 2.0 + ORBIT_RADIUS * phase.cos(),
        HEIGHT_M / 2.0 + ORBIT_RADIUS * phase.sin(),
        phase + std::f64::consts::FRAC_PI_2,
    )
}

async fn physics(blackboard: Arc<SharedBlackboard>, chassis: Arc<SimChassis>) {
    let mut interval = tokio::time::interval(PHYSICS_PERIOD);
    let mut elapsed = 0.0;

    loop {
        interval.tick().await;
        chassis.advance(&blackboard, PHYSICS_PERIOD, CHASSIS_SPEED);
        elapsed += PHYSICS_PERIOD.as_secs_f64();

        let enemy = enemy_pose(elapsed);
        let robot = blackboard.robot_map_pose();
        if robot.position.planar_distance(&enemy.position) <= SIGHT_RANGE {
            blackboard.set_enemy(enemy);
        } else {
            blackboard.lose_enemy();
        }
    }
}

/// Publishes barrel heat the way the referee would: every accepted shot adds
/// its projectile speed and the barrel cools at a fixed rate.
async fn referee_heat(services: Arc<ArenaServices>, reports: mpsc::Sender<RobotHeat>) {
    let mut interval = tokio::time::interval(HEAT_PERIOD);
    let mut counted = 0;
    let mut heat = 0;

    loop {
        interval.tick().await;
        let shots = services.shots().len();
        let fired = (shots - counted) as i32;
        counted = shots;
        heat = (heat + fired * PROJECTILE_SPEED - COOLING).max(0);

        let report = RobotHeat { shooter_heat: heat };
        if reports.send(report).await.is_err() {
            tracing::debug!("heat listener gone, referee heat feed stopping");
            break;
        }
    }
}
