//! Poses, orientations and velocity commands in the arena frame.

use std::fmt;

/// Frame identifier used for every world goal.
pub const MAP_FRAME: &str = "map";

/// Position in meters.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Planar distance to `other`, ignoring z.
    pub fn planar_distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Squared planar distance to `other`, ignoring z.
    pub fn planar_distance_sq(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Heading of the planar vector from `self` to `other`.
    pub fn bearing_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

/// Unit quaternion orientation (x, y, z, w).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Rotation about the z axis only.
    pub fn from_yaw(yaw: f64) -> Self {
        Self::from_rpy(0.0, 0.0, yaw)
    }

    /// Builds an orientation from fixed-axis roll, pitch and yaw (radians).
    pub fn from_rpy(roll: f64, pitch: f64, yaw: f64) -> Self {
        let (sr, cr) = (roll * 0.5).sin_cos();
        let (sp, cp) = (pitch * 0.5).sin_cos();
        let (sy, cy) = (yaw * 0.5).sin_cos();

        Self {
            x: sr * cp * cy - cr * sp * sy,
            y: cr * sp * cy + sr * cp * sy,
            z: cr * cp * sy - sr * sp * cy,
            w: cr * cp * cy + sr * sp * sy,
        }
    }

    /// Heading about the z axis, in `(-pi, pi]`.
    pub fn yaw(&self) -> f64 {
        let siny_cosp = 2.0 * (self.w * self.z + self.x * self.y);
        let cosy_cosp = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        siny_cosp.atan2(cosy_cosp)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A position and orientation expressed in a named frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Pose {
    pub frame_id: String,
    pub position: Point,
    pub orientation: Quaternion,
}

impl Pose {
    /// Pose in the map frame.
    pub fn new(position: Point, orientation: Quaternion) -> Self {
        Self {
            frame_id: MAP_FRAME.to_string(),
            position,
            orientation,
        }
    }

    /// Planar pose in the map frame with the given heading.
    pub fn from_xy_yaw(x: f64, y: f64, yaw: f64) -> Self {
        Self::new(Point::new(x, y, 0.0), Quaternion::from_yaw(yaw))
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn yaw(&self) -> f64 {
        self.orientation.yaw()
    }

    /// Returns a copy of this pose with the position replaced.
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Point::ORIGIN, Quaternion::IDENTITY)
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.3}, {:.3}, yaw {:.3}) [{}]",
            self.position.x,
            self.position.y,
            self.yaw(),
            self.frame_id
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Direct velocity command: linear (m/s) and angular (rad/s) components.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity {
    pub linear: Vector3,
    pub angular: Vector3,
}

impl Velocity {
    /// In-place rotation: zero linear velocity, the given angular rates.
    pub const fn whirl(x: f64, y: f64, z: f64) -> Self {
        Self {
            linear: Vector3::ZERO,
            angular: Vector3::new(x, y, z),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.linear == Vector3::ZERO && self.angular == Vector3::ZERO
    }
}
