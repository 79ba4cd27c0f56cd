//! CloudFormation-backed [`StackBackend`].
//!
//! Current layout: `<prefix>-<cluster>-cluster` for the control plane and
//! `<prefix>-<cluster>-nodegroup-<name>` per nodegroup. Clusters created by the
//! deprecated scheme use `EKS-<cluster>-<Suffix>` stacks and a control plane
//! created directly through the EKS API.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::aws::cli::{AwsRunner, validate_aws_arg};
use crate::aws::types::{DescribeStacksOutput, StackSummary};
use crate::identity::ClusterIdentity;
use crate::provider::{BackendError, StackBackend};

const DEPRECATED_STACK_PREFIX: &str = "EKS";

/// Stack names belonging to one cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackNames {
    prefix: String,
    cluster: String,
}

impl StackNames {
    pub fn new(prefix: impl Into<String>, cluster: &ClusterIdentity) -> Self {
        Self {
            prefix: prefix.into(),
            cluster: cluster.name().to_string(),
        }
    }

    pub fn cluster_stack(&self) -> String {
        format!("{}-{}-cluster", self.prefix, self.cluster)
    }

    pub fn nodegroup_stack_prefix(&self) -> String {
        format!("{}-{}-nodegroup-", self.prefix, self.cluster)
    }

    pub fn deprecated_stack(&self, suffix: &str) -> String {
        format!("{}-{}-{}", DEPRECATED_STACK_PREFIX, self.cluster, suffix)
    }

    pub fn is_nodegroup_stack(&self, stack_name: &str) -> bool {
        stack_name.starts_with(&self.nodegroup_stack_prefix())
    }
}

/// How long to wait on a stack deletion and how often to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl WaitPolicy {
    pub fn from_secs(timeout_secs: u64, poll_interval_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
            poll_interval: Duration::from_secs(poll_interval_secs),
        }
    }
}

pub struct CloudFormationBackend<R: AwsRunner> {
    runner: R,
    names: StackNames,
    role_arn: Option<String>,
    wait_policy: WaitPolicy,
}

impl<R: AwsRunner> CloudFormationBackend<R> {
    pub fn new(runner: R, names: StackNames, wait_policy: WaitPolicy) -> Self {
        Self {
            runner,
            names,
            role_arn: None,
            wait_policy,
        }
    }

    /// Service role CloudFormation assumes for `delete-stack`.
    pub fn with_role_arn(mut self, role_arn: Option<String>) -> Self {
        self.role_arn = role_arn;
        self
    }

    fn run(&self, args: &[&str]) -> Result<String, BackendError> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        self.runner.run(&args)
    }

    /// Look up a stack by name. A stack that does not exist is `Ok(None)`.
    pub fn describe_stack(&self, stack: &str) -> Result<Option<StackSummary>, BackendError> {
        validate_aws_arg(stack, "stack name")?;

        let stdout = match self.run(&["cloudformation", "describe-stacks", "--stack-name", stack])
        {
            Ok(stdout) => stdout,
            Err(BackendError::CommandFailed { ref message, .. })
                if message.contains("does not exist") =>
            {
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let parsed = parse_describe_stacks(&stdout)?;
        Ok(parsed.stacks.into_iter().find(|s| s.stack_name == stack))
    }

    /// All nodegroup stacks of the cluster that are not yet deleted.
    pub fn list_nodegroup_stacks(&self) -> Result<Vec<String>, BackendError> {
        let stdout = self.run(&["cloudformation", "describe-stacks"])?;
        let parsed = parse_describe_stacks(&stdout)?;

        Ok(parsed
            .stacks
            .into_iter()
            .filter(|s| self.names.is_nodegroup_stack(&s.stack_name) && !s.is_deleted())
            .map(|s| s.stack_name)
            .collect())
    }

    /// Issue `delete-stack` for an existing stack.
    ///
    /// A missing stack is reported as [`BackendError::StackNotFound`], since
    /// CloudFormation itself silently accepts deleting one.
    pub fn delete_stack(&self, stack: &str) -> Result<(), BackendError> {
        match self.describe_stack(stack)? {
            Some(summary) if !summary.is_deleted() => {}
            _ => {
                return Err(BackendError::StackNotFound {
                    stack: stack.to_string(),
                });
            }
        }

        info!(event = "core.stack.delete_started", stack = stack);

        let mut args = vec!["cloudformation", "delete-stack", "--stack-name", stack];
        if let Some(ref role_arn) = self.role_arn {
            validate_aws_arg(role_arn, "role ARN")?;
            args.extend(["--role-arn", role_arn.as_str()]);
        }
        self.run(&args)?;

        info!(event = "core.stack.delete_requested", stack = stack);
        Ok(())
    }

    /// Poll until the stack is gone, its deletion fails, or the timeout passes.
    pub fn wait_for_delete(&self, stack: &str) -> Result<(), BackendError> {
        let started = Instant::now();

        loop {
            match self.describe_stack(stack)? {
                None => break,
                Some(summary) if summary.is_deleted() => break,
                Some(summary) if summary.is_delete_failed() => {
                    warn!(
                        event = "core.stack.delete_failed",
                        stack = stack,
                        reason = summary.stack_status_reason.as_deref().unwrap_or("")
                    );
                    return Err(BackendError::StackDeleteFailed {
                        stack: stack.to_string(),
                        status: summary
                            .stack_status_reason
                            .unwrap_or(summary.stack_status),
                    });
                }
                Some(summary) => {
                    debug!(
                        event = "core.stack.delete_waiting",
                        stack = stack,
                        status = summary.stack_status,
                        elapsed_secs = started.elapsed().as_secs()
                    );
                }
            }

            if started.elapsed() >= self.wait_policy.timeout {
                return Err(BackendError::WaitTimedOut {
                    stack: stack.to_string(),
                    timeout_secs: self.wait_policy.timeout.as_secs(),
                });
            }
            thread::sleep(self.wait_policy.poll_interval);
        }

        info!(
            event = "core.stack.delete_completed",
            stack = stack,
            elapsed_secs = started.elapsed().as_secs()
        );
        Ok(())
    }

    fn delete_stack_and_maybe_wait(&self, stack: &str, wait: bool) -> Result<(), BackendError> {
        self.delete_stack(stack)?;
        if wait {
            self.wait_for_delete(stack)?;
        }
        Ok(())
    }

    fn delete_deprecated_stack(&self, suffix: &str, wait: bool) -> Result<(), BackendError> {
        self.delete_stack_and_maybe_wait(&self.names.deprecated_stack(suffix), wait)
    }
}

fn parse_describe_stacks(stdout: &str) -> Result<DescribeStacksOutput, BackendError> {
    if stdout.trim().is_empty() {
        return Ok(DescribeStacksOutput::default());
    }
    serde_json::from_str(stdout).map_err(|e| BackendError::InvalidOutput {
        operation: "cloudformation describe-stacks".to_string(),
        message: e.to_string(),
    })
}

impl<R: AwsRunner> StackBackend for CloudFormationBackend<R> {
    fn delete_all_nodegroups(&self, wait: bool) -> Vec<BackendError> {
        let stacks = match self.list_nodegroup_stacks() {
            Ok(stacks) => stacks,
            Err(e) => return vec![e],
        };

        info!(
            event = "core.stack.nodegroups_found",
            count = stacks.len(),
            wait = wait
        );

        let mut errors = Vec::new();
        let mut requested = Vec::new();
        for stack in stacks {
            match self.delete_stack(&stack) {
                Ok(()) => requested.push(stack),
                // Removed between listing and deleting.
                Err(BackendError::StackNotFound { .. }) => {}
                Err(e) => errors.push(e),
            }
        }

        if wait && !requested.is_empty() {
            let wait_errors: Vec<BackendError> = thread::scope(|scope| {
                let handles: Vec<_> = requested
                    .iter()
                    .map(|stack| scope.spawn(move || self.wait_for_delete(stack)))
                    .collect();

                handles
                    .into_iter()
                    .zip(&requested)
                    .filter_map(|(handle, stack)| match handle.join() {
                        Ok(Ok(())) => None,
                        Ok(Err(e)) => Some(e),
                        Err(_) => Some(BackendError::StackDeleteFailed {
                            stack: stack.clone(),
                            status: "wait thread panicked".to_string(),
                        }),
                    })
                    .collect()
            });
            errors.extend(wait_errors);
        }

        errors
    }

    fn delete_cluster(&self, wait: bool) -> Result<(), BackendError> {
        self.delete_stack_and_maybe_wait(&self.names.cluster_stack(), wait)
    }

    fn delete_deprecated_control_plane(
        &self,
        identity: &ClusterIdentity,
    ) -> Result<(), BackendError> {
        validate_aws_arg(identity.name(), "cluster name")?;
        self.run(&["eks", "delete-cluster", "--name", identity.name()])?;
        info!(
            event = "core.stack.deprecated_control_plane_deleted",
            cluster = identity.name()
        );
        Ok(())
    }

    fn delete_deprecated_control_plane_stack(&self, wait: bool) -> Result<(), BackendError> {
        self.delete_deprecated_stack("ControlPlane", wait)
    }

    fn delete_deprecated_service_role_stack(&self, wait: bool) -> Result<(), BackendError> {
        self.delete_deprecated_stack("ServiceRole", wait)
    }

    fn delete_deprecated_vpc_stack(&self, wait: bool) -> Result<(), BackendError> {
        self.delete_deprecated_stack("VPC", wait)
    }

    fn delete_deprecated_default_nodegroup_stack(
        &self,
        wait: bool,
    ) -> Result<(), BackendError> {
        self.delete_deprecated_stack("DefaultNodeGroup", wait)
    }
}
