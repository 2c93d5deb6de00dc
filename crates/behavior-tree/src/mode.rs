//! Tactical mode announced on the blackboard.

/// The tactical behavior currently driving the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BehaviorMode {
    /// No behavior has claimed the robot yet.
    #[default]
    Idle,
    /// Pursuing the detected opponent.
    Chase,
    /// Facing and firing at the opponent.
    Shoot,
    /// Travelling to the supply spot to reload.
    Reload,
}

impl BehaviorMode {
    /// Short lowercase label used in log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            BehaviorMode::Idle => "idle",
            BehaviorMode::Chase => "chase",
            BehaviorMode::Shoot => "shoot",
            BehaviorMode::Reload => "reload",
        }
    }
}

impl core::fmt::Display for BehaviorMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
