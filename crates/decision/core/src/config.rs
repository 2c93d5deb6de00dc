//! Decision configuration schema and tunable defaults.

use std::time::Duration;

use crate::geometry::{Point, Pose, Quaternion, Velocity};
use crate::identity::Team;

/// Parameters shared by the tactical behaviors.
///
/// Every section falls back to its `Default` when absent from the source
/// file, so an empty document yields zero whirl velocity and reload spots at
/// the map origin.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecisionConfig {
    pub whirl_vel: WhirlVelConfig,
    pub reload_spot_red: SpotConfig,
    pub reload_spot_blue: SpotConfig,
    pub chase: ChaseConfig,
    pub reload: ReloadConfig,
}

impl DecisionConfig {
    /// In-place rotation used as a search pattern.
    pub fn whirl_velocity(&self) -> Velocity {
        Velocity::whirl(
            self.whirl_vel.angle_x_vel,
            self.whirl_vel.angle_y_vel,
            self.whirl_vel.angle_z_vel,
        )
    }

    /// Supply spot for `team`, in the map frame.
    pub fn reload_spot(&self, team: Team) -> Pose {
        match team {
            Team::Red => self.reload_spot_red.to_pose(),
            Team::Blue => self.reload_spot_blue.to_pose(),
        }
    }
}

/// Angular rates (rad/s) of the whirl command.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WhirlVelConfig {
    pub angle_x_vel: f64,
    pub angle_y_vel: f64,
    pub angle_z_vel: f64,
}

/// A pose given as position plus roll/pitch/yaw.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpotConfig {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl SpotConfig {
    pub fn to_pose(&self) -> Pose {
        Pose::new(
            Point::new(self.x, self.y, self.z),
            Quaternion::from_rpy(self.roll, self.pitch, self.yaw),
        )
    }
}

/// Chase geometry, in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChaseConfig {
    /// Inner edge of the hold-position band.
    pub standoff_min: f64,
    /// Outer edge of the hold-position band.
    pub standoff_max: f64,
    /// How far short of the opponent the projected goal is placed.
    pub offset: f64,
}

impl ChaseConfig {
    pub const DEFAULT_STANDOFF_MIN: f64 = 0.8;
    pub const DEFAULT_STANDOFF_MAX: f64 = 1.2;
    pub const DEFAULT_OFFSET: f64 = 0.4;

    /// `true` if `distance` lies inside the closed standoff band.
    pub fn within_standoff(&self, distance: f64) -> bool {
        distance >= self.standoff_min && distance <= self.standoff_max
    }
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            standoff_min: Self::DEFAULT_STANDOFF_MIN,
            standoff_max: Self::DEFAULT_STANDOFF_MAX,
            offset: Self::DEFAULT_OFFSET,
        }
    }
}

/// Reload supervisor timing and arrival tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReloadConfig {
    /// Delay between arrival checks.
    pub poll_period_ms: u64,
    /// Squared planar distance (m^2) under which the robot counts as arrived.
    pub arrival_tolerance_sq: f64,
}

impl ReloadConfig {
    pub const DEFAULT_POLL_PERIOD_MS: u64 = 1000;
    pub const DEFAULT_ARRIVAL_TOLERANCE_SQ: f64 = 0.17;

    pub fn poll_period(&self) -> Duration {
        Duration::from_millis(self.poll_period_ms)
    }
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            poll_period_ms: Self::DEFAULT_POLL_PERIOD_MS,
            arrival_tolerance_sq: Self::DEFAULT_ARRIVAL_TOLERANCE_SQ,
        }
    }
}
