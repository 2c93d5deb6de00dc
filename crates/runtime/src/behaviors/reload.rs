//! Trip to the supply spot and reload.
//!
//! A tick dispatches one navigation goal and then supervises it in place:
//! the supervisor polls the robot pose, and once the robot is within
//! tolerance of the supply spot it calls the reload service, stops the
//! chassis and returns. The supervisor lives inside [`ReloadBehavior::run`],
//! so nothing outlives the tick that started it.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use behavior_tree::{BehaviorMode, BehaviorState};
use decision_core::{DecisionConfig, Point, Pose, Quaternion, ReloadConfig, RobotIdentity};
use tokio::sync::watch;

use super::GOAL_Z;
use crate::api::{Behavior, Blackboard, ChassisExecutor, SimServices};

/// Cloneable handle that stops an in-progress reload from another task.
#[derive(Clone, Debug)]
pub struct ReloadCancel {
    signal: Arc<watch::Sender<bool>>,
}

impl ReloadCancel {
    /// Asks the supervisor to stop. Has no effect if no reload is in progress.
    pub fn cancel(&self) {
        self.signal.send_replace(true);
    }
}

/// How a supervised reload trip ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TripEnd {
    Reloaded,
    ReloadRefused,
    ServiceFailed,
    Cancelled,
}

/// Raises the blackboard's reloading flag for as long as it is alive.
struct ReloadingFlag<'a> {
    blackboard: &'a dyn Blackboard,
}

impl<'a> ReloadingFlag<'a> {
    fn raise(blackboard: &'a dyn Blackboard) -> Self {
        blackboard.reloading();
        Self { blackboard }
    }
}

impl Drop for ReloadingFlag<'_> {
    fn drop(&mut self) {
        self.blackboard.un_reload();
    }
}

/// Owns the navigation goal of one trip: the executor is cancelled when the
/// trip ends, whether it returns normally or its future is dropped.
struct TripGuard<'a> {
    executor: &'a dyn ChassisExecutor,
    cancel_pending: &'a AtomicBool,
}

impl<'a> TripGuard<'a> {
    fn arm(executor: &'a dyn ChassisExecutor, cancel_pending: &'a AtomicBool) -> Self {
        cancel_pending.store(true, Ordering::Relaxed);
        Self {
            executor,
            cancel_pending,
        }
    }
}

impl Drop for TripGuard<'_> {
    fn drop(&mut self) {
        self.executor.cancel();
        self.cancel_pending.store(false, Ordering::Relaxed);
    }
}

pub struct ReloadBehavior {
    executor: Arc<dyn ChassisExecutor>,
    blackboard: Arc<dyn Blackboard>,
    services: Arc<dyn SimServices>,
    identity: Option<RobotIdentity>,
    reload_spot: Pose,
    params: ReloadConfig,
    cancel_pending: AtomicBool,
    cancel_signal: Arc<watch::Sender<bool>>,
}

impl ReloadBehavior {
    /// Builds the behavior for `identity`, picking the team's reload spot from `config`.
    ///
    /// Without an identity the behavior logs a warning and refuses to act.
    pub fn new(
        executor: Arc<dyn ChassisExecutor>,
        blackboard: Arc<dyn Blackboard>,
        services: Arc<dyn SimServices>,
        identity: Option<RobotIdentity>,
        config: &DecisionConfig,
    ) -> Self {
        let reload_spot = match identity {
            Some(identity) => config.reload_spot(identity.team),
            None => {
                tracing::warn!("reload behavior built without a robot identity; it will not act");
                Pose::default()
            }
        };
        let (cancel_signal, _) = watch::channel(false);

        Self {
            executor,
            blackboard,
            services,
            identity,
            reload_spot,
            params: config.reload,
            cancel_pending: AtomicBool::new(true),
            cancel_signal: Arc::new(cancel_signal),
        }
    }

    pub fn reload_spot(&self) -> &Pose {
        &self.reload_spot
    }

    /// Handle that can stop a reload trip while [`ReloadBehavior::run`] is awaiting it.
    pub fn cancel_handle(&self) -> ReloadCancel {
        ReloadCancel {
            signal: Arc::clone(&self.cancel_signal),
        }
    }

    pub fn cancel_pending(&self) -> bool {
        self.cancel_pending.load(Ordering::Relaxed)
    }

    /// One control step; may run for several seconds while the robot drives.
    pub async fn tick(&mut self) {
        let executor_state = self.executor.update();
        if executor_state.is_running() {
            tracing::trace!("reload: navigation still running");
            return;
        }

        let Some(identity) = self.identity else {
            tracing::warn!("reload: unknown robot identity, refusing to act");
            return;
        };

        let robot = self.blackboard.robot_map_pose();
        let dx = self.reload_spot.x() - robot.x();
        let dy = self.reload_spot.y() - robot.y();
        if dx == 0.0 && dy == 0.0 {
            if self.cancel_pending.swap(false, Ordering::Relaxed) {
                self.executor.cancel();
            }
            return;
        }

        let goal = Pose::new(
            Point::new(self.reload_spot.x(), self.reload_spot.y(), GOAL_Z),
            Quaternion::from_yaw(dy.atan2(dx)),
        );

        tracing::info!("{} heading to reload spot {}", identity, goal);
        self.cancel_signal.send_replace(false);
        self.executor.execute_goal(goal);

        let _trip = TripGuard::arm(self.executor.as_ref(), &self.cancel_pending);
        let end = self.supervise(identity).await;
        tracing::debug!("reload trip ended: {:?}", end);
    }

    /// Stops the chassis and any reload trip in progress.
    pub fn cancel(&mut self) {
        self.cancel_signal.send_replace(true);
        self.executor.cancel();
        self.cancel_pending.store(false, Ordering::Relaxed);
    }

    pub fn update(&self) -> BehaviorState {
        self.executor.update()
    }

    async fn supervise(&self, identity: RobotIdentity) -> TripEnd {
        let mut cancelled = self.cancel_signal.subscribe();
        let period = self.params.poll_period();
        let mut stall_reported = false;

        loop {
            tokio::select! {
                _ = tokio::time::sleep(period) => {}
                _ = cancel_requested(&mut cancelled) => {
                    tracing::info!("reload cancelled while driving");
                    return TripEnd::Cancelled;
                }
            }

            let robot = self.blackboard.robot_map_pose();
            let distance_sq = robot.position.planar_distance_sq(&self.reload_spot.position);
            if distance_sq > self.params.arrival_tolerance_sq {
                let executor_state = self.executor.update();
                if executor_state.is_terminal() && !stall_reported {
                    // Keeps polling: only arrival or a cancel ends the trip.
                    tracing::debug!(
                        "reload: navigation ended in {} {:.3} m^2 short of the spot",
                        executor_state,
                        distance_sq
                    );
                    stall_reported = true;
                }
                tracing::trace!("reload: {:.3} m^2 from reload spot", distance_sq);
                continue;
            }

            let _flag = ReloadingFlag::raise(self.blackboard.as_ref());
            let reply = tokio::select! {
                reply = self.services.reload(identity.self_id) => reply,
                _ = cancel_requested(&mut cancelled) => {
                    tracing::info!("reload cancelled while waiting for the service");
                    return TripEnd::Cancelled;
                }
            };

            return match reply {
                Ok(true) => {
                    tracing::info!("Reload succeeded");
                    TripEnd::Reloaded
                }
                Ok(false) => {
                    tracing::info!("Reload refused by referee");
                    TripEnd::ReloadRefused
                }
                Err(e) => {
                    tracing::warn!("Reload failed: {}", e);
                    TripEnd::ServiceFailed
                }
            };
        }
    }
}

/// Resolves once the cancel signal reads `true`.
async fn cancel_requested(signal: &mut watch::Receiver<bool>) {
    loop {
        let stop = *signal.borrow_and_update();
        if stop {
            return;
        }
        if signal.changed().await.is_err() {
            // Sender gone: no one can cancel any more.
            std::future::pending::<()>().await;
        }
    }
}

#[async_trait]
impl Behavior for ReloadBehavior {
    fn mode(&self) -> BehaviorMode {
        BehaviorMode::Reload
    }

    async fn run(&mut self) {
        self.tick().await;
    }

    fn cancel(&mut self) {
        ReloadBehavior::cancel(self);
    }

    fn update(&self) -> BehaviorState {
        ReloadBehavior::update(self)
    }
}
