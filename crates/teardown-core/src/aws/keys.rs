use tracing::{debug, info};

use crate::aws::cli::{AwsRunner, validate_aws_arg};
use crate::aws::types::DescribeKeyPairsOutput;
use crate::identity::ClusterIdentity;
use crate::provider::{BackendError, PublicKeyCleaner};

/// Deletes EC2 key pairs imported for the cluster's nodegroups, named
/// `<prefix>-<cluster>-nodegroup-<nodegroup>-<fingerprint>`.
pub struct AwsPublicKeyCleaner<R: AwsRunner> {
    runner: R,
    prefix: String,
}

impl<R: AwsRunner> AwsPublicKeyCleaner<R> {
    pub fn new(runner: R, prefix: impl Into<String>) -> Self {
        Self {
            runner,
            prefix: prefix.into(),
        }
    }

    /// Leading part shared by every key of the cluster's nodegroups.
    pub fn key_name_prefix(&self, identity: &ClusterIdentity) -> String {
        format!("{}-{}-nodegroup-", self.prefix, identity.name())
    }

    pub fn key_name_pattern(&self, identity: &ClusterIdentity) -> String {
        format!("{}*", self.key_name_prefix(identity))
    }

    fn find_key_names(&self, identity: &ClusterIdentity) -> Result<Vec<String>, BackendError> {
        let filter = format!("Name=key-name,Values={}", self.key_name_pattern(identity));
        let stdout = self.runner.run(&[
            "ec2".to_string(),
            "describe-key-pairs".to_string(),
            "--filters".to_string(),
            filter,
        ])?;

        let parsed: DescribeKeyPairsOutput = if stdout.trim().is_empty() {
            DescribeKeyPairsOutput::default()
        } else {
            serde_json::from_str(&stdout).map_err(|e| BackendError::InvalidOutput {
                operation: "ec2 describe-key-pairs".to_string(),
                message: e.to_string(),
            })?
        };

        // EC2 wildcards are loose; ownership is re-checked on the name.
        let prefix = self.key_name_prefix(identity);
        Ok(parsed
            .key_pairs
            .into_iter()
            .map(|k| k.key_name)
            .filter(|name| {
                let owned = name.starts_with(&prefix);
                if !owned {
                    debug!(event = "core.keys.foreign_key_skipped", key_name = name.as_str());
                }
                owned
            })
            .collect())
    }
}

impl<R: AwsRunner> PublicKeyCleaner for AwsPublicKeyCleaner<R> {
    fn delete_public_key(&self, identity: &ClusterIdentity) -> Result<(), BackendError> {
        let key_names = self.find_key_names(identity)?;
        if key_names.is_empty() {
            debug!(
                event = "core.keys.none_found",
                cluster = identity.name(),
                pattern = %self.key_name_pattern(identity)
            );
            return Ok(());
        }

        for key_name in key_names {
            validate_aws_arg(&key_name, "key pair name")?;
            self.runner.run(&[
                "ec2".to_string(),
                "delete-key-pair".to_string(),
                "--key-name".to_string(),
                key_name.clone(),
            ])?;
            info!(
                event = "core.keys.deleted",
                cluster = identity.name(),
                key_name = key_name
            );
        }
        Ok(())
    }
}
