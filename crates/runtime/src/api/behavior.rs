//! Core behavior trait.
use async_trait::async_trait;
use behavior_tree::{BehaviorMode, BehaviorState};

/// A tactical behavior ticked by the external behavior tree.
///
/// `run` is total: collaborator failures are logged and end the step, they
/// never surface to the caller.
#[async_trait]
pub trait Behavior: Send {
    /// The mode this behavior implements.
    fn mode(&self) -> BehaviorMode;

    /// Performs one control step.
    async fn run(&mut self);

    /// Stops whatever this behavior asked the executor to do.
    fn cancel(&mut self);

    /// Executor state as seen by this behavior.
    fn update(&self) -> BehaviorState;
}
