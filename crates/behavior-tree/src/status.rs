//! Lifecycle state reported by an executor.

/// The state of the goal currently held by an asynchronous executor.
///
/// # Asynchronous Semantics
///
/// Unlike a turn-based action, a motion goal spans many control periods:
/// - `Idle` means no goal has been submitted (or the last one was cancelled)
/// - `Running` means a goal is in flight and should be left alone
/// - `Success` / `Failure` mean the last goal finished and a new one may be issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BehaviorState {
    /// No goal is held by the executor.
    #[default]
    Idle,

    /// A goal is being executed.
    Running,

    /// The last goal was reached.
    Success,

    /// The last goal was aborted or could not be reached.
    Failure,
}

impl BehaviorState {
    /// Returns `true` if this state is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, BehaviorState::Running)
    }

    /// Returns `true` if this state is `Idle`.
    #[inline]
    pub fn is_idle(self) -> bool {
        matches!(self, BehaviorState::Idle)
    }

    /// Returns `true` once the last goal has finished, whether it succeeded or not.
    ///
    /// Behaviors re-plan only from a terminal state.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, BehaviorState::Success | BehaviorState::Failure)
    }

    /// Short lowercase label used in log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            BehaviorState::Idle => "idle",
            BehaviorState::Running => "running",
            BehaviorState::Success => "success",
            BehaviorState::Failure => "failure",
        }
    }
}

impl core::fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_are_success_and_failure() {
        assert!(BehaviorState::Success.is_terminal());
        assert!(BehaviorState::Failure.is_terminal());
        assert!(!BehaviorState::Idle.is_terminal());
        assert!(!BehaviorState::Running.is_terminal());
    }

    #[test]
    fn default_state_is_idle() {
        assert_eq!(BehaviorState::default(), BehaviorState::Idle);
        assert!(BehaviorState::default().is_idle());
    }

    #[test]
    fn display_uses_lowercase_label() {
        assert_eq!(BehaviorState::Running.to_string(), "running");
    }
}
