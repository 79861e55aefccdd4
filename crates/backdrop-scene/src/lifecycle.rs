//! Renderer lifecycle states

use std::fmt;

/// Lifecycle of the background renderer.
///
/// Allowed transitions:
/// - `Uninitialized -> Running` when initialization succeeds
/// - `Uninitialized -> Failed` when the graphics backend cannot be created
/// - `Running -> Failed` when the device is lost mid-loop
/// - `Running -> Stopped` on explicit teardown
///
/// `Failed` and `Stopped` are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Running,
    Failed,
    Stopped,
}

impl LifecycleState {
    /// Get the string ID for this state
    pub fn id(&self) -> &'static str {
        match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Running => "running",
            LifecycleState::Failed => "failed",
            LifecycleState::Stopped => "stopped",
        }
    }

    /// Check whether `self -> next` is an allowed transition
    pub fn can_transition_to(&self, next: LifecycleState) -> bool {
        use LifecycleState::*;
        matches!(
            (self, next),
            (Uninitialized, Running) | (Uninitialized, Failed) | (Running, Failed) | (Running, Stopped)
        )
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
