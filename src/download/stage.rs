//! Pipeline stage tracking.

use std::fmt;

/// Stages of a fetch, in the order they are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Stage {
    #[default]
    Start,
    ConfigValidated,
    Authenticated,
    FileResolved,
    Downloaded,
    Success,
}

impl Stage {
    /// Description of the step that runs after this stage, used when that step fails.
    pub fn next_step(&self) -> &'static str {
        match self {
            Stage::Start => "validating configuration",
            Stage::ConfigValidated => "authenticating",
            Stage::Authenticated => "resolving the remote file",
            Stage::FileResolved => "downloading",
            Stage::Downloaded => "reporting",
            Stage::Success => "finishing",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Start => write!(f, "START"),
            Stage::ConfigValidated => write!(f, "CONFIG_VALIDATED"),
            Stage::Authenticated => write!(f, "AUTHENTICATED"),
            Stage::FileResolved => write!(f, "FILE_RESOLVED"),
            Stage::Downloaded => write!(f, "DOWNLOADED"),
            Stage::Success => write!(f, "SUCCESS"),
        }
    }
}

/// Records the furthest stage a fetch has reached.
#[derive(Debug, Default)]
pub struct StageTracker {
    stage: Stage,
}

impl StageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Move to the next stage. Stages only move forward.
    pub fn advance(&mut self, next: Stage) {
        debug_assert!(next > self.stage, "stage {} after {}", next, self.stage);
        tracing::debug!("{} -> {}", self.stage, next);
        self.stage = next;
    }
}
