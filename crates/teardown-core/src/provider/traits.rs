//! Collaborator trait definitions.

use crate::identity::ClusterIdentity;
use crate::provider::errors::BackendError;

/// Verifies the caller's credentials before anything destructive happens.
pub trait AuthChecker: Send + Sync {
    fn check_auth(&self) -> Result<(), BackendError>;
}

/// Deletes the stacks and managed resources that make up one cluster.
///
/// Every method is bound to the cluster the backend was built for. `wait`
/// selects whether the call blocks until the deletion is confirmed.
pub trait StackBackend: Send + Sync {
    /// Delete every nodegroup of the cluster. Returns one failure per
    /// nodegroup that could not be deleted; an empty list means success.
    fn delete_all_nodegroups(&self, wait: bool) -> Vec<BackendError>;

    /// Delete the control plane through the current stack layout.
    fn delete_cluster(&self, wait: bool) -> Result<(), BackendError>;

    /// Delete a control plane that was created without a stack.
    fn delete_deprecated_control_plane(
        &self,
        identity: &ClusterIdentity,
    ) -> Result<(), BackendError>;

    fn delete_deprecated_control_plane_stack(&self, wait: bool) -> Result<(), BackendError>;

    fn delete_deprecated_service_role_stack(&self, wait: bool) -> Result<(), BackendError>;

    fn delete_deprecated_vpc_stack(&self, wait: bool) -> Result<(), BackendError>;

    fn delete_deprecated_default_nodegroup_stack(&self, wait: bool)
    -> Result<(), BackendError>;
}

/// Removes key material provisioned for the cluster's nodes.
pub trait PublicKeyCleaner: Send + Sync {
    fn delete_public_key(&self, identity: &ClusterIdentity) -> Result<(), BackendError>;
}

/// Removes the cluster's entry from the local client configuration.
pub trait LocalConfigCleaner: Send + Sync {
    fn delete_config_entry(&self, identity: &ClusterIdentity) -> Result<(), BackendError>;
}

/// Supplies the region the cluster lives in when none was configured.
pub trait RegionResolver: Send + Sync {
    fn region(&self) -> Result<String, BackendError>;
}

impl RegionResolver for String {
    fn region(&self) -> Result<String, BackendError> {
        Ok(self.clone())
    }
}
