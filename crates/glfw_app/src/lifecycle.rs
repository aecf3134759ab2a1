//! Lifecycle states of a [`WindowedApp`](crate::WindowedApp)

use std::fmt;

/// Where an application is in its life
///
/// ```text
/// Constructed -> Creating -> Running -> ShuttingDown -> Destroyed
///                    \           \
///                     +-----------+--> Aborted
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Backend initialized, no window yet
    Constructed,
    /// Window being created and its context activated
    Creating,
    /// Frame loop is running
    Running,
    /// Loop left normally, graphics resources released
    ShuttingDown,
    /// Window and backend released
    Destroyed,
    /// Setup or the loop failed; graphics resources were released if they
    /// had been set up
    Aborted,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Constructed => "constructed",
            Self::Creating => "creating",
            Self::Running => "running",
            Self::ShuttingDown => "shutting down",
            Self::Destroyed => "destroyed",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}
