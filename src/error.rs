use thiserror::Error;

pub type Result<T, E = TimerError> = std::result::Result<T, E>;

/// Errors returned by [`Timer`](crate::Timer) and the registry queries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("Timer is running. Use .stop() to stop it")]
    AlreadyRunning,

    #[error("Timer is not running. Use .start() to start it")]
    NotRunning,

    #[error("Unknown timer: '{0}'")]
    UnknownTimer(String),
}

impl TimerError {
    /// True for misuse of the start/stop state machine
    #[must_use]
    pub fn is_state_error(&self) -> bool {
        matches!(self, Self::AlreadyRunning | Self::NotRunning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            TimerError::AlreadyRunning.to_string(),
            "Timer is running. Use .stop() to stop it"
        );
        assert_eq!(
            TimerError::UnknownTimer("load".to_string()).to_string(),
            "Unknown timer: 'load'"
        );
    }

    #[test]
    fn test_is_state_error() {
        assert!(TimerError::AlreadyRunning.is_state_error());
        assert!(TimerError::NotRunning.is_state_error());
        assert!(!TimerError::UnknownTimer("x".to_string()).is_state_error());
    }
}
