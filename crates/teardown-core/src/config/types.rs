//! Configuration type definitions.
//!
//! These types are serialized/deserialized from TOML config files. Every
//! field is optional so that a project config only overrides what it sets;
//! accessors in [`super::defaults`] fill in built-in values.
//!
//! # Example Configuration
//!
//! ```toml
//! [provider]
//! region = "us-west-2"
//! cfn_role_arn = "arn:aws:iam::123456789012:role/cfn-delete"
//!
//! [delete]
//! wait = true
//! poll_interval_secs = 10
//!
//! [kubeconfig]
//! domain = "eksctl.io"
//! ```

use serde::{Deserialize, Serialize};

/// Main configuration loaded from TOML config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TeardownConfig {
    /// Provider selection and credentials.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Deletion behavior.
    #[serde(default)]
    pub delete: DeleteConfig,

    /// Stack naming.
    #[serde(default)]
    pub stacks: StacksConfig,

    /// Local kubeconfig cleanup.
    #[serde(default)]
    pub kubeconfig: KubeconfigConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProviderConfig {
    /// Region the cluster lives in. Falls back to the aws CLI's own default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Named credentials profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Service role CloudFormation assumes to delete stacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfn_role_arn: Option<String>,

    /// Path or name of the aws CLI executable.
    /// Default: `aws`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_cli: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DeleteConfig {
    /// Block until nodegroups and the control plane are confirmed deleted.
    /// Default: false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait: Option<bool>,

    /// Maximum time to wait for one stack deletion.
    /// Default: 1500 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Interval between stack status polls while waiting.
    /// Default: 20 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StacksConfig {
    /// Prefix of current-layout stack names, `<prefix>-<cluster>-cluster`.
    /// Default: `eksctl`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct KubeconfigConfig {
    /// Domain suffix of kubeconfig cluster entries, `<cluster>.<region>.<domain>`.
    /// Default: `eksctl.io`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Path or name of the kubectl executable.
    /// Default: `kubectl`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubectl: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teardown_config_serialization() {
        let mut config = TeardownConfig::default();
        config.provider.region = Some("eu-west-1".to_string());
        config.delete.wait = Some(true);

        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("region = \"eu-west-1\""));
        assert!(toml_str.contains("wait = true"));

        let parsed: TeardownConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_sections_deserialize() {
        let config: TeardownConfig = toml::from_str(
            r#"
[stacks]
prefix = "acme"
"#,
        )
        .unwrap();
        assert_eq!(config.stacks.prefix.as_deref(), Some("acme"));
        assert!(config.provider.region.is_none());
        assert!(config.delete.wait.is_none());
    }
}
