use crate::errors::TeardownError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error(
        "--name={flag} and argument {arg} cannot be used at the same time, supply only one of them"
    )]
    ConflictingNameSource { flag: String, arg: String },

    #[error("--name must be set")]
    MissingName,
}

impl TeardownError for IdentityError {
    fn error_code(&self) -> &'static str {
        match self {
            IdentityError::ConflictingNameSource { .. } => "CONFLICTING_NAME_SOURCE",
            IdentityError::MissingName => "MISSING_CLUSTER_NAME",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
