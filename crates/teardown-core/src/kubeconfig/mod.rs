//! Removes a deleted cluster's entries from the user's kubeconfig.
//!
//! Entries are written by the provisioner as:
//! - cluster `<cluster>.<region>.<domain>`
//! - context and user `<iam-user>@<cluster>.<region>.<domain>`
//!
//! Editing goes through `kubectl config` so that `KUBECONFIG` merging and
//! file locking stay kubectl's concern.

use std::process::Command;

use tracing::{debug, info};

use crate::identity::ClusterIdentity;
use crate::provider::{BackendError, LocalConfigCleaner, RegionResolver};

/// Runs `kubectl config` subcommands.
pub trait KubectlRunner: Send + Sync {
    /// Whether the executable can be found at all.
    fn is_available(&self) -> bool;

    fn config(&self, args: &[&str]) -> Result<String, BackendError>;
}

/// The `kubectl` executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kubectl {
    program: String,
}

impl Kubectl {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl KubectlRunner for Kubectl {
    fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    fn config(&self, args: &[&str]) -> Result<String, BackendError> {
        let output = Command::new(&self.program)
            .arg("config")
            .args(args)
            .output()
            .map_err(|e| BackendError::CommandSpawnFailed {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(BackendError::CommandFailed {
                program: self.program.clone(),
                operation: format!("config {}", args.first().copied().unwrap_or_default()),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

pub struct KubectlConfigCleaner<K: KubectlRunner> {
    kubectl: K,
    region: Box<dyn RegionResolver>,
    domain: String,
}

impl<K: KubectlRunner> KubectlConfigCleaner<K> {
    pub fn new(kubectl: K, region: Box<dyn RegionResolver>, domain: impl Into<String>) -> Self {
        Self {
            kubectl,
            region,
            domain: domain.into(),
        }
    }

    /// Name of the kubeconfig cluster entry for `identity`.
    pub fn cluster_entry(&self, identity: &ClusterIdentity) -> Result<String, BackendError> {
        let region = self.region.region()?;
        Ok(format!("{}.{}.{}", identity.name(), region, self.domain))
    }
}

/// Contexts from `kubectl config get-contexts -o name` that point at `cluster_entry`.
pub fn matching_contexts(contexts_output: &str, cluster_entry: &str) -> Vec<String> {
    let suffix = format!("@{cluster_entry}");
    contexts_output
        .lines()
        .map(str::trim)
        .filter(|name| name.ends_with(&suffix))
        .map(str::to_string)
        .collect()
}

impl<K: KubectlRunner> LocalConfigCleaner for KubectlConfigCleaner<K> {
    fn delete_config_entry(&self, identity: &ClusterIdentity) -> Result<(), BackendError> {
        if !self.kubectl.is_available() {
            debug!(event = "core.kubeconfig.kubectl_not_found");
            return Ok(());
        }

        let cluster_entry = self.cluster_entry(identity)?;
        let contexts = self.kubectl.config(&["get-contexts", "-o", "name"])?;
        let matching = matching_contexts(&contexts, &cluster_entry);

        if matching.is_empty() {
            debug!(
                event = "core.kubeconfig.no_entries",
                cluster_entry = cluster_entry
            );
            return Ok(());
        }

        for context in &matching {
            self.kubectl.config(&["delete-context", context.as_str()])?;
            self.kubectl.config(&["delete-user", context.as_str()])?;
        }
        self.kubectl
            .config(&["delete-cluster", cluster_entry.as_str()])?;

        info!(
            event = "core.kubeconfig.entries_removed",
            cluster_entry = cluster_entry,
            contexts = matching.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::aws::{AwsRegionLookup, AwsRunner};
    use crate::identity::resolve_identity;

    /// Records `kubectl config` calls and answers `get-contexts` from a fixed list.
    struct FakeKubectl {
        contexts: &'static str,
        calls: Mutex<Vec<String>>,
    }

    impl FakeKubectl {
        fn new(contexts: &'static str) -> Self {
            Self {
                contexts,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl KubectlRunner for &FakeKubectl {
        fn is_available(&self) -> bool {
            true
        }

        fn config(&self, args: &[&str]) -> Result<String, BackendError> {
            self.calls.lock().unwrap().push(args.join(" "));
            if args[0] == "get-contexts" {
                Ok(self.contexts.to_string())
            } else {
                Ok(String::new())
            }
        }
    }

    struct ProfileRegion(&'static str);

    impl AwsRunner for ProfileRegion {
        fn run(&self, args: &[String]) -> Result<String, BackendError> {
            assert_eq!(args.join(" "), "configure get region");
            Ok(format!("{}\n", self.0))
        }
    }

    fn identity() -> ClusterIdentity {
        resolve_identity(Some("prod-1"), None).unwrap()
    }

    const CONTEXTS: &str = "\
ops@prod-1.us-west-2.eksctl.io
ops@prod-10.us-west-2.eksctl.io
minikube
";

    #[test]
    fn test_cluster_entry_name() {
        let kubectl = FakeKubectl::new("");
        let cleaner =
            KubectlConfigCleaner::new(&kubectl, Box::new("us-west-2".to_string()), "eksctl.io");
        assert_eq!(
            cleaner.cluster_entry(&identity()).unwrap(),
            "prod-1.us-west-2.eksctl.io"
        );
    }

    #[test]
    fn test_removes_matching_entries() {
        let kubectl = FakeKubectl::new(CONTEXTS);
        let cleaner =
            KubectlConfigCleaner::new(&kubectl, Box::new("us-west-2".to_string()), "eksctl.io");

        assert!(cleaner.delete_config_entry(&identity()).is_ok());
        assert_eq!(
            *kubectl.calls.lock().unwrap(),
            vec![
                "get-contexts -o name",
                "delete-context ops@prod-1.us-west-2.eksctl.io",
                "delete-user ops@prod-1.us-west-2.eksctl.io",
                "delete-cluster prod-1.us-west-2.eksctl.io",
            ]
        );
    }

    #[test]
    fn test_unconfigured_region_is_looked_up() {
        let kubectl = FakeKubectl::new(CONTEXTS);
        let region = AwsRegionLookup::new(ProfileRegion("us-west-2")).with_env(|_| None);
        let cleaner = KubectlConfigCleaner::new(&kubectl, Box::new(region), "eksctl.io");

        assert!(cleaner.delete_config_entry(&identity()).is_ok());
        assert_eq!(
            kubectl.calls.lock().unwrap().last().map(String::as_str),
            Some("delete-cluster prod-1.us-west-2.eksctl.io")
        );
    }

    #[test]
    fn test_no_matching_contexts_leaves_config_alone() {
        let kubectl = FakeKubectl::new("minikube\n");
        let cleaner =
            KubectlConfigCleaner::new(&kubectl, Box::new("us-west-2".to_string()), "eksctl.io");

        assert!(cleaner.delete_config_entry(&identity()).is_ok());
        assert_eq!(kubectl.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_matching_contexts() {
        let output = "\
ops@prod-1.us-west-2.eksctl.io
ops@prod-10.us-west-2.eksctl.io
minikube
ci-bot@prod-1.us-west-2.eksctl.io
";
        assert_eq!(
            matching_contexts(output, "prod-1.us-west-2.eksctl.io"),
            vec![
                "ops@prod-1.us-west-2.eksctl.io".to_string(),
                "ci-bot@prod-1.us-west-2.eksctl.io".to_string()
            ]
        );
    }

    #[test]
    fn test_missing_kubectl_is_skipped() {
        let cleaner = KubectlConfigCleaner::new(
            Kubectl::new("/nonexistent/teardown-test/kubectl"),
            Box::new("us-west-2".to_string()),
            "eksctl.io",
        );
        assert!(cleaner.delete_config_entry(&identity()).is_ok());
    }
}
