//! Asynchronous abstraction over the simulator's referee services.
use async_trait::async_trait;

use super::errors::ServiceResult;

/// Remote services that account for ammunition and resolve shots.
///
/// Each call is a request/response round trip and may take as long as the
/// transport needs; callers await it inside their tick.
#[async_trait]
pub trait SimServices: Send + Sync {
    /// Remaining projectiles for `robot_id`.
    async fn check_bullet(&self, robot_id: u8) -> ServiceResult<u32>;

    /// Fires one projectile from `robot` at `enemy`. `Ok(false)` means the
    /// referee refused the shot.
    async fn shoot(&self, robot: u8, enemy: u8) -> ServiceResult<bool>;

    /// Refills `robot` at its supply spot.
    async fn reload(&self, robot: u8) -> ServiceResult<bool>;
}
