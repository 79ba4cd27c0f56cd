use crate::errors::TeardownError;

/// Failure reported by a collaborator for a single call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("Failed to execute '{program}': {message}")]
    CommandSpawnFailed { program: String, message: String },

    #[error("'{program} {operation}' failed: {message}")]
    CommandFailed {
        program: String,
        operation: String,
        message: String,
    },

    #[error("Stack '{stack}' not found")]
    StackNotFound { stack: String },

    #[error("Stack '{stack}' failed to delete: {status}")]
    StackDeleteFailed { stack: String, status: String },

    #[error("Timed out after {timeout_secs}s waiting for stack '{stack}' to be deleted")]
    WaitTimedOut { stack: String, timeout_secs: u64 },

    #[error("Unexpected output from '{operation}': {message}")]
    InvalidOutput { operation: String, message: String },

    #[error("Invalid {label}: {message}")]
    InvalidArgument { label: String, message: String },
}

impl TeardownError for BackendError {
    fn error_code(&self) -> &'static str {
        match self {
            BackendError::CommandSpawnFailed { .. } => "BACKEND_SPAWN_FAILED",
            BackendError::CommandFailed { .. } => "BACKEND_COMMAND_FAILED",
            BackendError::StackNotFound { .. } => "STACK_NOT_FOUND",
            BackendError::StackDeleteFailed { .. } => "STACK_DELETE_FAILED",
            BackendError::WaitTimedOut { .. } => "STACK_WAIT_TIMED_OUT",
            BackendError::InvalidOutput { .. } => "BACKEND_INVALID_OUTPUT",
            BackendError::InvalidArgument { .. } => "BACKEND_INVALID_ARGUMENT",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, BackendError::InvalidArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_display() {
        let error = BackendError::CommandFailed {
            program: "aws".to_string(),
            operation: "cloudformation delete-stack".to_string(),
            message: "Stack with id foo does not exist".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "'aws cloudformation delete-stack' failed: Stack with id foo does not exist"
        );
        assert_eq!(error.error_code(), "BACKEND_COMMAND_FAILED");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_wait_timed_out_display() {
        let error = BackendError::WaitTimedOut {
            stack: "eksctl-prod-1-cluster".to_string(),
            timeout_secs: 1500,
        };
        assert_eq!(
            error.to_string(),
            "Timed out after 1500s waiting for stack 'eksctl-prod-1-cluster' to be deleted"
        );
        assert_eq!(error.error_code(), "STACK_WAIT_TIMED_OUT");
    }
}
