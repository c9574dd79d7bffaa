//! Published session phases.

use std::fmt;

/// Exhaustive set of states a session publishes.
///
/// Exactly one phase is current at a time; presentation layers render one
/// surface per phase. `Expired` and `Failed` are terminal until the user
/// restarts the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// No bootstrap has run yet.
    Idle,
    /// Deploying the access contract (cold start).
    DeployingIdentity,
    /// Verifying a persisted identity against the registrar.
    CheckingIdentity,
    /// Constructing the vault for a deployed contract.
    ConstructingVault,
    /// Reading the todo directory and item files.
    Loading,
    /// Item list loaded; mutations accepted.
    Ready,
    /// The registrar reported the identity terminated; persisted state was
    /// discarded. The flow must restart from cold start.
    Expired,
    /// A fatal bootstrap failure.
    Failed { message: String },
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Expired | Self::Failed { .. })
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::DeployingIdentity => write!(f, "deploying identity"),
            Self::CheckingIdentity => write!(f, "checking identity"),
            Self::ConstructingVault => write!(f, "constructing vault"),
            Self::Loading => write!(f, "loading"),
            Self::Ready => write!(f, "ready"),
            Self::Expired => write!(f, "expired"),
            Self::Failed { message } => write!(f, "failed: {message}"),
        }
    }
}
