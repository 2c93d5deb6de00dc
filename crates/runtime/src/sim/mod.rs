//! In-memory collaborators for tests and local runs.
//!
//! These stand in for the perception stack, the chassis executor and the
//! referee services. They record what the behaviors asked of them so tests
//! can assert on it, and [`SimChassis::advance`] moves the robot so a local
//! run can close the loop without a real robot.

pub mod blackboard;
pub mod chassis;
pub mod services;

pub use blackboard::SharedBlackboard;
pub use chassis::{ChassisCall, SimChassis};
pub use services::ArenaServices;

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// The guarded values are plain data, so a panic elsewhere cannot leave them
// half-updated in a way that matters here.
fn read<T: ?Sized>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T: ?Sized>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
