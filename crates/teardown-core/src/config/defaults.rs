//! Built-in default values for optional configuration fields.

use crate::config::types::{DeleteConfig, KubeconfigConfig, ProviderConfig, StacksConfig};

pub const DEFAULT_AWS_CLI: &str = "aws";
pub const DEFAULT_KUBECTL: &str = "kubectl";
pub const DEFAULT_STACK_PREFIX: &str = "eksctl";
pub const DEFAULT_KUBECONFIG_DOMAIN: &str = "eksctl.io";

/// Stack deletions of large clusters routinely take 15-20 minutes.
pub const DEFAULT_TIMEOUT_SECS: u64 = 1500;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 20;

impl ProviderConfig {
    pub fn aws_cli(&self) -> &str {
        self.aws_cli.as_deref().unwrap_or(DEFAULT_AWS_CLI)
    }
}

impl DeleteConfig {
    /// Returns whether to block on deletion, defaulting to false.
    pub fn wait(&self) -> bool {
        self.wait.unwrap_or(false)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn poll_interval_secs(&self) -> u64 {
        self.poll_interval_secs.unwrap_or(DEFAULT_POLL_INTERVAL_SECS)
    }
}

impl StacksConfig {
    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_STACK_PREFIX)
    }
}

impl KubeconfigConfig {
    pub fn domain(&self) -> &str {
        self.domain.as_deref().unwrap_or(DEFAULT_KUBECONFIG_DOMAIN)
    }

    pub fn kubectl(&self) -> &str {
        self.kubectl.as_deref().unwrap_or(DEFAULT_KUBECTL)
    }
}
