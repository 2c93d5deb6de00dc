//! Robot identity derived from the process namespace.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("unknown robot namespace {namespace:?}; expected one of r1, r2, r3, r4")]
    UnknownNamespace { namespace: String },
}

/// Side a robot plays for. Selects which reload spot it uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Team {
    Red,
    Blue,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Team::Red => "red",
            Team::Blue => "blue",
        };
        write!(f, "{}", label)
    }
}

/// Numeric ids of this robot and the opponent it engages, as understood by
/// the simulator services.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RobotIdentity {
    pub self_id: u8,
    pub enemy_id: u8,
    pub team: Team,
}

impl RobotIdentity {
    /// Derives the identity from a namespace such as `r1`, `/r3` or `//r4`.
    ///
    /// `r1`/`r2` play red and `r3`/`r4` play blue; each robot is paired with
    /// the robot in the same slot on the other team (r1 with r3, r2 with r4).
    pub fn from_namespace(namespace: &str) -> Result<Self, IdentityError> {
        let identity = match namespace.trim_matches('/') {
            "r1" => Self::new(1, 3, Team::Red),
            "r2" => Self::new(2, 4, Team::Red),
            "r3" => Self::new(3, 1, Team::Blue),
            "r4" => Self::new(4, 2, Team::Blue),
            _ => {
                return Err(IdentityError::UnknownNamespace {
                    namespace: namespace.to_string(),
                });
            }
        };
        Ok(identity)
    }

    const fn new(self_id: u8, enemy_id: u8, team: Team) -> Self {
        Self {
            self_id,
            enemy_id,
            team,
        }
    }
}

impl fmt::Display for RobotIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{} ({}, vs r{})", self.self_id, self.team, self.enemy_id)
    }
}
