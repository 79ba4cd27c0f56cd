//! Thin wrapper around the `aws` executable.
//!
//! Each call validates its arguments, logs structured events, and maps
//! failures to [`BackendError`] consistently.

use std::process::Command;

use tracing::{debug, warn};

use crate::provider::BackendError;

/// Runs one aws CLI operation and returns its stdout.
pub trait AwsRunner: Send + Sync {
    fn run(&self, args: &[String]) -> Result<String, BackendError>;
}

/// Validate a value passed as a CLI argument.
///
/// Rejects empty values, values that start with `-` (option injection), and
/// control characters.
pub fn validate_aws_arg(value: &str, label: &str) -> Result<(), BackendError> {
    if value.is_empty() {
        return Err(BackendError::InvalidArgument {
            label: label.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if value.starts_with('-') {
        return Err(BackendError::InvalidArgument {
            label: label.to_string(),
            message: format!("'{value}' must not start with '-'"),
        });
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(BackendError::InvalidArgument {
            label: label.to_string(),
            message: "contains control characters".to_string(),
        });
    }
    Ok(())
}

/// The aws executable plus the region and profile every call is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsCli {
    pub program: String,
    pub region: Option<String>,
    pub profile: Option<String>,
}

impl AwsCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            region: None,
            profile: None,
        }
    }

    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    /// Full argument list for an operation, including scope and output format.
    pub fn command_args(&self, args: &[String]) -> Vec<String> {
        let mut full: Vec<String> = args.to_vec();
        full.extend(["--output".to_string(), "json".to_string()]);
        if let Some(ref region) = self.region {
            full.extend(["--region".to_string(), region.clone()]);
        }
        if let Some(ref profile) = self.profile {
            full.extend(["--profile".to_string(), profile.clone()]);
        }
        full
    }
}

/// `service operation` for log and error messages, e.g. `cloudformation delete-stack`.
pub fn operation_name(args: &[String]) -> String {
    args.iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

impl AwsRunner for AwsCli {
    fn run(&self, args: &[String]) -> Result<String, BackendError> {
        let operation = operation_name(args);

        debug!(
            event = "core.aws.command_started",
            program = self.program,
            operation = operation,
            region = self.region.as_deref().unwrap_or("default")
        );

        let output = Command::new(&self.program)
            .args(self.command_args(args))
            .output()
            .map_err(|e| BackendError::CommandSpawnFailed {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if output.status.success() {
            debug!(event = "core.aws.command_completed", operation = operation);
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                event = "core.aws.command_failed",
                operation = operation,
                exit_code = output.status.code(),
                stderr = %stderr.trim()
            );
            Err(BackendError::CommandFailed {
                program: self.program.clone(),
                operation,
                message: stderr.trim().to_string(),
            })
        }
    }
}
