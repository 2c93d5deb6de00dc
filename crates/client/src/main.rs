//! Decision node binary.
//!
//! Composition root that wires one behavior of the decision layer to a
//! simulated arena and ticks it at a fixed rate.
//!
//! # Examples
//!
//! ```bash
//! ROBOT_NAMESPACE=r3 DECISION_BEHAVIOR=reload cargo run -p decision-node
//! ```
mod arena;
mod config;
mod logging;

use std::time::Duration;

use anyhow::Result;
use decision_content::load_or_default;
use decision_core::{DecisionConfig, RobotIdentity};
use decision_runtime::{Behavior, Blackboard, ChaseBehavior, ReloadBehavior, ShootBehavior};
use tokio::time::MissedTickBehavior;

use crate::arena::Arena;
use crate::config::{BehaviorKind, NodeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = NodeConfig::from_env();

    // 2. Setup logging
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting decision node");
    tracing::info!("Namespace: {}", config.namespace);
    tracing::info!("Behavior: {} at {} Hz", config.behavior, config.tick_hz);

    // 3. Decision parameters and identity
    let decision = load_or_default(&config.config_path);
    let identity = match RobotIdentity::from_namespace(&config.namespace) {
        Ok(identity) => {
            tracing::info!("Identity: {}", identity);
            Some(identity)
        }
        Err(e) => {
            tracing::warn!("{}; shoot and reload will stay idle", e);
            None
        }
    };

    // 4. Arena and behavior
    let arena = Arena::start(identity);
    let mut behavior = build_behavior(config.behavior, &arena, identity, &decision);

    // 5. Tick until done or interrupted
    let period = Duration::from_secs_f64(1.0 / f64::from(config.tick_hz));
    tokio::select! {
        _ = drive(behavior.as_mut(), period, config.max_ticks) => {
            tracing::info!("Reached {} ticks", config.max_ticks);
        }
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Interrupted");
        }
    }

    behavior.cancel();
    report(&arena);
    arena.shutdown();

    tracing::info!("Decision node shutdown complete");
    Ok(())
}

fn build_behavior(
    kind: BehaviorKind,
    arena: &Arena,
    identity: Option<RobotIdentity>,
    decision: &DecisionConfig,
) -> Box<dyn Behavior> {
    match kind {
        BehaviorKind::Chase => Box::new(ChaseBehavior::new(
            arena.chassis.clone(),
            arena.blackboard.clone(),
            decision.chase,
        )),
        BehaviorKind::Shoot => Box::new(
            ShootBehavior::new(
                arena.chassis.clone(),
                arena.blackboard.clone(),
                arena.services.clone(),
                identity,
                decision,
            )
            .with_barrel_heat(arena.barrel_heat.clone()),
        ),
        BehaviorKind::Reload => Box::new(ReloadBehavior::new(
            arena.chassis.clone(),
            arena.blackboard.clone(),
            arena.services.clone(),
            identity,
            decision,
        )),
    }
}

async fn drive(behavior: &mut dyn Behavior, period: Duration, max_ticks: u64) {
    let mut interval = tokio::time::interval(period);
    // A reload tick can outlast many periods.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    for tick in 0..max_ticks {
        interval.tick().await;
        behavior.run().await;
        tracing::debug!("tick {}: {} -> {}", tick, behavior.mode(), behavior.update());
    }
}

fn report(arena: &Arena) {
    tracing::info!("Final pose: {}", arena.blackboard.robot_map_pose());
    tracing::info!("Announced mode: {}", arena.blackboard.mode());
    tracing::info!("Shots fired: {}", arena.services.shots().len());
    tracing::info!("Reloads: {}", arena.services.reload_requests().len());
    tracing::info!("Barrel heat: {}", arena.barrel_heat.get());
}
