//! Motion phases.
//!
//! A motion alternates between holding still and traversing, until its tick
//! budget runs out and it settles in the terminal phase.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a motion state machine.
///
/// `Waiting` and `Moving` alternate on a timer. `Completed` is terminal:
/// the clock no longer advances it, only a stop (which re-initializes the
/// machine) leaves it.
///
/// # Example
///
/// ```rust
/// use shuttle::core::Phase;
///
/// assert_eq!(Phase::Waiting.toggled(), Phase::Moving);
/// assert_eq!(Phase::Moving.toggled(), Phase::Waiting);
/// assert!(Phase::Completed.is_final());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Waiting,
    Moving,
    Completed,
}

impl Phase {
    /// Phase name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Waiting => "Waiting",
            Self::Moving => "Moving",
            Self::Completed => "Completed",
        }
    }

    /// Check if this is the terminal phase.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// The phase a timed step leads to.
    ///
    /// `Completed` maps to itself.
    pub fn toggled(&self) -> Phase {
        match self {
            Self::Waiting => Self::Moving,
            Self::Moving => Self::Waiting,
            Self::Completed => Self::Completed,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
