//! Barrel heat fed from the robot's streaming heat reports.
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One heat report from the referee system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RobotHeat {
    pub shooter_heat: i32,
}

/// Latest reported barrel heat, shared between the stream listener and the shoot behavior.
#[derive(Clone, Debug, Default)]
pub struct BarrelHeat {
    value: Arc<AtomicI32>,
}

impl BarrelHeat {
    pub fn new(initial: i32) -> Self {
        Self {
            value: Arc::new(AtomicI32::new(initial)),
        }
    }

    pub fn get(&self) -> i32 {
        self.value.load(Ordering::Relaxed)
    }

    pub fn set(&self, heat: i32) {
        self.value.store(heat, Ordering::Relaxed);
    }
}

/// Spawns a task that copies every incoming heat report into `heat`.
///
/// The task ends when every sender of `reports` has been dropped.
pub fn spawn_heat_listener(
    mut reports: mpsc::Receiver<RobotHeat>,
    heat: BarrelHeat,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(report) = reports.recv().await {
            heat.set(report.shooter_heat);
            tracing::trace!("barrel heat now {}", report.shooter_heat);
        }
        tracing::debug!("robot heat stream closed");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_value() {
        let heat = BarrelHeat::new(10);
        let reader = heat.clone();
        heat.set(300);
        assert_eq!(reader.get(), 300);
    }

    #[tokio::test]
    async fn listener_tracks_latest_report_and_stops_on_close() {
        let heat = BarrelHeat::default();
        let (tx, rx) = mpsc::channel(8);
        let listener = spawn_heat_listener(rx, heat.clone());

        for value in [40, 120, 95] {
            tx.send(RobotHeat {
                shooter_heat: value,
            })
            .await
            .unwrap();
        }
        drop(tx);

        listener.await.unwrap();
        assert_eq!(heat.get(), 95);
    }
}
