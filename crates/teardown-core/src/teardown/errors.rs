use crate::errors::TeardownError;
use crate::provider::BackendError;

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error("{source}")]
    AuthenticationFailed { source: BackendError },

    #[error(
        "failed to delete nodegroup(s): {count} error(s) occurred: {}",
        join_causes(causes)
    )]
    NodeGroupDeletionFailed {
        count: usize,
        causes: Vec<BackendError>,
    },
}

fn join_causes(causes: &[BackendError]) -> String {
    causes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl TeardownError for DeleteError {
    fn error_code(&self) -> &'static str {
        match self {
            DeleteError::AuthenticationFailed { .. } => "AUTHENTICATION_FAILED",
            DeleteError::NodeGroupDeletionFailed { .. } => "NODEGROUP_DELETION_FAILED",
        }
    }
}
