use tracing::{debug, info};

use crate::aws::cli::AwsRunner;
use crate::provider::{AuthChecker, BackendError};

/// Checks credentials with `aws sts get-caller-identity`.
pub struct AwsAuthChecker<R: AwsRunner> {
    runner: R,
}

impl<R: AwsRunner> AwsAuthChecker<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: AwsRunner> AuthChecker for AwsAuthChecker<R> {
    fn check_auth(&self) -> Result<(), BackendError> {
        let stdout = self
            .runner
            .run(&["sts".to_string(), "get-caller-identity".to_string()])?;

        let identity: serde_json::Value =
            serde_json::from_str(&stdout).map_err(|e| BackendError::InvalidOutput {
                operation: "sts get-caller-identity".to_string(),
                message: e.to_string(),
            })?;

        match identity.get("Arn").and_then(|arn| arn.as_str()) {
            Some(arn) => {
                info!(event = "core.aws.auth_verified", arn = arn);
                Ok(())
            }
            None => {
                debug!(event = "core.aws.auth_missing_arn", output = %stdout.trim());
                Err(BackendError::InvalidOutput {
                    operation: "sts get-caller-identity".to_string(),
                    message: "response has no Arn".to_string(),
                })
            }
        }
    }
}
