//! Crate error type
//!
//! Only setup problems are fatal. Rejected operator commands come back as
//! `InvalidTransition` so the caller can log and move on.

use thiserror::Error;

use crate::sim::{Action, MatchState};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("board {width}x{height} cannot hold a paddle and the ball")]
    InvalidBoard { width: f32, height: f32 },

    #[error("render surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("cannot {action:?} while {state:?}")]
    InvalidTransition { action: Action, state: MatchState },
}

impl GameError {
    /// Whether the game can keep running after this error
    pub fn is_fatal(&self) -> bool {
        match self {
            GameError::InvalidBoard { .. } => true,
            GameError::SurfaceUnavailable(_) => true,
            GameError::InvalidTransition { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_errors_are_not_fatal() {
        let err = GameError::InvalidTransition {
            action: Action::Pause,
            state: MatchState::Welcome,
        };
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "cannot Pause while Welcome");
    }

    #[test]
    fn test_setup_errors_are_fatal() {
        assert!(GameError::SurfaceUnavailable("no canvas".into()).is_fatal());
        assert!(
            GameError::InvalidBoard {
                width: 0.0,
                height: 400.0
            }
            .is_fatal()
        );
    }
}
