//! Pure data types and algorithms for the robot decision layer.
//!
//! `decision-core` defines the geometry (poses, velocities), the read-only
//! costmap abstraction, the integer line rasterizer used to search the
//! costmap, robot identity, and the decision configuration schema. Nothing
//! here performs I/O; the runtime crate wires these types to the blackboard,
//! the chassis executor and the simulator services.
pub mod config;
pub mod costmap;
pub mod geometry;
pub mod identity;
pub mod raster;

pub use config::{ChaseConfig, DecisionConfig, ReloadConfig, SpotConfig, WhirlVelConfig};
pub use costmap::{
    Cell, CostMap, FREE_SPACE, GridCostMap, INSCRIBED_INFLATED_OBSTACLE, LETHAL_OBSTACLE,
    NO_INFORMATION, is_forbidden,
};
pub use geometry::{MAP_FRAME, Point, Pose, Quaternion, Vector3, Velocity};
pub use identity::{IdentityError, RobotIdentity, Team};
pub use raster::LineRaster;
