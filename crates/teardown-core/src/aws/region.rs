//! Effective region lookup for callers that need the region spelled out.
//!
//! Follows the aws CLI's own precedence: `AWS_REGION`, then
//! `AWS_DEFAULT_REGION`, then the region of the active profile.

use tracing::debug;

use crate::aws::cli::{AwsRunner, validate_aws_arg};
use crate::provider::{BackendError, RegionResolver};

const REGION_ENV_VARS: [&str; 2] = ["AWS_REGION", "AWS_DEFAULT_REGION"];

/// Resolves the region the aws CLI would use when `--region` is not given.
pub struct AwsRegionLookup<R: AwsRunner> {
    runner: R,
    env: fn(&str) -> Option<String>,
}

impl<R: AwsRunner> AwsRegionLookup<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            env: |key| std::env::var(key).ok(),
        }
    }

    /// Replace the environment reader.
    pub fn with_env(mut self, env: fn(&str) -> Option<String>) -> Self {
        self.env = env;
        self
    }
}

impl<R: AwsRunner> RegionResolver for AwsRegionLookup<R> {
    fn region(&self) -> Result<String, BackendError> {
        for key in REGION_ENV_VARS {
            if let Some(region) = (self.env)(key)
                && !region.trim().is_empty()
            {
                debug!(event = "core.aws.region_resolved", source = key);
                return Ok(region.trim().to_string());
            }
        }

        let stdout = match self.runner.run(&[
            "configure".to_string(),
            "get".to_string(),
            "region".to_string(),
        ]) {
            Ok(stdout) => stdout,
            // Exits non-zero when the profile has no region.
            Err(BackendError::CommandFailed { .. }) => String::new(),
            Err(e) => return Err(e),
        };

        let region = stdout.trim();
        if region.is_empty() {
            return Err(BackendError::InvalidArgument {
                label: "region".to_string(),
                message: "no region configured; pass --region or set provider.region".to_string(),
            });
        }
        validate_aws_arg(region, "region")?;

        debug!(event = "core.aws.region_resolved", source = "profile");
        Ok(region.to_string())
    }
}
