pub mod errors;
pub mod handler;
pub mod operations;
pub mod types;

pub use errors::DeleteError;
pub use types::{DeleteClusterRequest, DeletionStep, PipelineOutcome, StepClass, TeardownResult};
