//! In-memory referee services with bullet accounting.
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::lock;
use crate::api::{ServiceError, ServiceResult, SimServices};

#[derive(Debug)]
struct Ledger {
    magazine: u32,
    bullets: HashMap<u8, u32>,
    shots: Vec<(u8, u8)>,
    reloads: Vec<u8>,
    reload_latency: Duration,
}

impl Ledger {
    fn bullets_mut(&mut self, robot: u8) -> &mut u32 {
        let magazine = self.magazine;
        self.bullets.entry(robot).or_insert(magazine)
    }
}

/// Referee stand-in: every robot starts with a full magazine, each accepted
/// shot spends one projectile and a reload refills the magazine.
#[derive(Debug)]
pub struct ArenaServices {
    ledger: Mutex<Ledger>,
    online: AtomicBool,
}

impl ArenaServices {
    pub fn new(magazine: u32) -> Self {
        Self {
            ledger: Mutex::new(Ledger {
                magazine,
                bullets: HashMap::new(),
                shots: Vec::new(),
                reloads: Vec::new(),
                reload_latency: Duration::ZERO,
            }),
            online: AtomicBool::new(true),
        }
    }

    /// Delays every reload reply by `latency`.
    pub fn with_reload_latency(self, latency: Duration) -> Self {
        lock(&self.ledger).reload_latency = latency;
        self
    }

    pub fn set_bullets(&self, robot: u8, bullets: u32) {
        lock(&self.ledger).bullets.insert(robot, bullets);
    }

    pub fn bullets(&self, robot: u8) -> u32 {
        *lock(&self.ledger).bullets_mut(robot)
    }

    /// While offline every call fails with [`ServiceError::Unavailable`].
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }

    /// Accepted shots as (shooter, target) pairs.
    pub fn shots(&self) -> Vec<(u8, u8)> {
        lock(&self.ledger).shots.clone()
    }

    /// Robots that asked for a reload, in call order.
    pub fn reload_requests(&self) -> Vec<u8> {
        lock(&self.ledger).reloads.clone()
    }

    fn ensure_online(&self, service: &'static str) -> ServiceResult<()> {
        if self.online.load(Ordering::Relaxed) {
            Ok(())
        } else {
            Err(ServiceError::Unavailable { service })
        }
    }
}

#[async_trait]
impl SimServices for ArenaServices {
    async fn check_bullet(&self, robot_id: u8) -> ServiceResult<u32> {
        self.ensure_online("check_bullet")?;
        Ok(self.bullets(robot_id))
    }

    async fn shoot(&self, robot: u8, enemy: u8) -> ServiceResult<bool> {
        self.ensure_online("shoot")?;
        let mut ledger = lock(&self.ledger);
        let bullets = ledger.bullets_mut(robot);
        if *bullets == 0 {
            return Ok(false);
        }
        *bullets -= 1;
        ledger.shots.push((robot, enemy));
        Ok(true)
    }

    async fn reload(&self, robot: u8) -> ServiceResult<bool> {
        let latency = lock(&self.ledger).reload_latency;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        self.ensure_online("reload")?;
        let mut ledger = lock(&self.ledger);
        ledger.reloads.push(robot);
        let magazine = ledger.magazine;
        *ledger.bullets_mut(robot) = magazine;
        Ok(true)
    }
}
