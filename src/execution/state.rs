//! Per-invocation run state machine.

/// Lifecycle of a single command invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Nothing has been spawned yet.
    #[default]
    NotStarted,
    /// The shell process exists.
    Spawned,
    /// Output is being drained from the child.
    Streaming,
    /// The invocation finished with the given exit code.
    Terminated(i32),
}

impl RunState {
    /// Check if transition to target state is valid.
    ///
    /// Valid transitions:
    /// - NotStarted -> Spawned
    /// - NotStarted -> Terminated (absent command or spawn failure)
    /// - Spawned -> Streaming
    /// - Spawned -> Terminated
    /// - Streaming -> Terminated
    pub fn can_transition_to(&self, target: RunState) -> bool {
        use RunState::*;
        matches!(
            (*self, target),
            (NotStarted, Spawned)
                | (NotStarted, Terminated(_))
                | (Spawned, Streaming)
                | (Spawned, Terminated(_))
                | (Streaming, Terminated(_))
        )
    }

    /// Attempt to transition to a new state.
    pub fn transition_to(&mut self, target: RunState) -> crate::Result<()> {
        if self.can_transition_to(target) {
            *self = target;
            Ok(())
        } else {
            Err(crate::error::ToolboxError::InvalidStateTransition {
                from: *self,
                to: target,
            })
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Terminated(_))
    }

    /// Exit code, once terminated.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RunState::Terminated(code) => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_async_path() {
        let mut state = RunState::NotStarted;
        assert!(state.transition_to(RunState::Spawned).is_ok());
        assert!(state.transition_to(RunState::Streaming).is_ok());
        assert!(state.transition_to(RunState::Terminated(0)).is_ok());
        assert_eq!(state.exit_code(), Some(0));
    }

    #[test]
    fn test_direct_termination_without_command() {
        let mut state = RunState::NotStarted;
        assert!(state.transition_to(RunState::Terminated(127)).is_ok());
        assert!(state.is_terminal());
    }

    #[test]
    fn test_no_backward_transitions() {
        let mut state = RunState::Streaming;
        assert!(state.transition_to(RunState::Spawned).is_err());
        assert!(state.transition_to(RunState::NotStarted).is_err());
        assert_eq!(state, RunState::Streaming);
    }

    #[test]
    fn test_terminated_is_final() {
        let mut state = RunState::Terminated(1);
        assert!(state.transition_to(RunState::Terminated(0)).is_err());
        assert!(state.transition_to(RunState::Spawned).is_err());
        assert_eq!(state.exit_code(), Some(1));
    }

    #[test]
    fn test_default() {
        assert_eq!(RunState::default(), RunState::NotStarted);
        assert_eq!(RunState::default().exit_code(), None);
    }
}
