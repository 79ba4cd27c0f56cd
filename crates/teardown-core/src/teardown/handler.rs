use tracing::{debug, error, info, warn};

use crate::identity::ClusterIdentity;
use crate::provider::Collaborators;
use crate::teardown::errors::DeleteError;
use crate::teardown::operations::{run_all_best_effort, run_fallback_chain, run_swallowed};
use crate::teardown::types::*;

/// Deletes a cluster and everything provisioned alongside it.
///
/// Order of work:
/// 1. Credentials are checked. Failure aborts before anything is deleted.
/// 2. All nodegroups are deleted. Any failure aborts the run.
/// 3. The control plane is deleted through the current layout, falling back
///    to the deprecated control plane and then the deprecated control plane
///    stack. The first success ends the chain; exhausting it is not fatal.
/// 4. The deprecated service role, VPC and default nodegroup stacks are each
///    attempted regardless of what happened before.
/// 5. The public key and the local config entry are removed. Their failures
///    are never reported.
///
/// An empty [`TeardownResult`] is a successful run in which nothing was found.
pub fn delete_cluster(
    request: &DeleteClusterRequest,
    collaborators: &Collaborators,
) -> Result<TeardownResult, DeleteError> {
    let cluster = request.identity.name();

    info!(
        event = "core.teardown.delete_started",
        cluster = cluster,
        wait = request.wait
    );

    if let Err(e) = collaborators.auth.check_auth() {
        error!(
            event = "core.teardown.auth_failed",
            cluster = cluster,
            error = %e
        );
        return Err(DeleteError::AuthenticationFailed { source: e });
    }

    match run_pipeline(&request.identity, request.wait, collaborators) {
        PipelineOutcome::Aborted { causes } => {
            for cause in &causes {
                error!(
                    event = "core.teardown.nodegroup_delete_failed",
                    cluster = cluster,
                    error = %cause
                );
            }
            Err(DeleteError::NodeGroupDeletionFailed {
                count: causes.len(),
                causes,
            })
        }
        PipelineOutcome::Completed(result) => {
            if result.is_not_found() {
                warn!(
                    event = "core.teardown.delete_not_found",
                    cluster = cluster,
                    "no cluster resources were found"
                );
            } else {
                info!(
                    event = "core.teardown.delete_completed",
                    cluster = cluster,
                    deleted = %result.deleted_resources.join(", "),
                    count = result.deleted_resources.len()
                );
            }
            Ok(result)
        }
    }
}

/// Runs the deletion stages after the auth gate has passed.
pub fn run_pipeline(
    identity: &ClusterIdentity,
    wait: bool,
    collaborators: &Collaborators,
) -> PipelineOutcome {
    let stacks = collaborators.stacks.as_ref();
    let mut result = TeardownResult::new(identity.clone());

    // Stage A: nodegroups must be gone before the control plane goes.
    let causes = stacks.delete_all_nodegroups(wait);
    if !causes.is_empty() {
        info!(
            event = "core.teardown.nodegroups_failed",
            cluster = identity.name(),
            class = ?StepClass::FatalGated,
            count = causes.len()
        );
        return PipelineOutcome::Aborted { causes };
    }
    debug!(
        event = "core.teardown.nodegroups_deleted",
        cluster = identity.name()
    );

    // Stage B: newest control plane layout first.
    let deleted_by = run_fallback_chain(
        vec![
            DeletionStep::fallback(LABEL_CLUSTER, || stacks.delete_cluster(wait)),
            DeletionStep::fallback(LABEL_CONTROL_PLANE, || {
                stacks.delete_deprecated_control_plane(identity)
            }),
            DeletionStep::fallback(LABEL_STACK_CONTROL_PLANE, || {
                stacks.delete_deprecated_control_plane_stack(true)
            }),
        ],
        &mut result,
    );
    debug!(
        event = "core.teardown.control_plane_attempted",
        cluster = identity.name(),
        deleted_by = deleted_by.unwrap_or("none")
    );

    // Stage C: deprecated stacks have no reliable non-blocking delete.
    run_all_best_effort(
        vec![
            DeletionStep::best_effort(LABEL_SERVICE_ROLE, || {
                stacks.delete_deprecated_service_role_stack(true)
            }),
            DeletionStep::best_effort(LABEL_VPC, || stacks.delete_deprecated_vpc_stack(true)),
            DeletionStep::best_effort(LABEL_DEFAULT_NODEGROUP, || {
                stacks.delete_deprecated_default_nodegroup_stack(true)
            }),
        ],
        &mut result,
    );

    // Stage D: not tracked as resources.
    run_swallowed("public key", || {
        collaborators.public_keys.delete_public_key(identity)
    });
    run_swallowed("local config entry", || {
        collaborators.local_config.delete_config_entry(identity)
    });

    result.finish();
    PipelineOutcome::Completed(result)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::identity::resolve_identity;
    use crate::provider::{
        AuthChecker, BackendError, LocalConfigCleaner, PublicKeyCleaner, StackBackend,
    };

    type CallLog = Arc<Mutex<Vec<String>>>;

    /// Fake collaborators that record every call and fail on request.
    #[derive(Clone, Default)]
    struct Script {
        calls: CallLog,
        failing: Arc<HashSet<&'static str>>,
        nodegroup_failures: usize,
    }

    impl Script {
        fn failing(ops: &[&'static str]) -> Self {
            Self {
                failing: Arc::new(ops.iter().copied().collect()),
                ..Default::default()
            }
        }

        fn with_nodegroup_failures(mut self, count: usize) -> Self {
            self.nodegroup_failures = count;
            self
        }

        fn call(&self, op: &'static str, wait: Option<bool>) -> Result<(), BackendError> {
            let entry = match wait {
                Some(wait) => format!("{op}(wait={wait})"),
                None => op.to_string(),
            };
            self.calls.lock().unwrap().push(entry);
            if self.failing.contains(op) {
                Err(BackendError::CommandFailed {
                    program: "fake".to_string(),
                    operation: op.to_string(),
                    message: "not found".to_string(),
                })
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn collaborators(&self) -> Collaborators {
            Collaborators {
                auth: Box::new(self.clone()),
                stacks: Box::new(self.clone()),
                public_keys: Box::new(self.clone()),
                local_config: Box::new(self.clone()),
            }
        }
    }

    impl AuthChecker for Script {
        fn check_auth(&self) -> Result<(), BackendError> {
            self.call("check_auth", None)
        }
    }

    impl StackBackend for Script {
        fn delete_all_nodegroups(&self, wait: bool) -> Vec<BackendError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("delete_all_nodegroups(wait={wait})"));
            (0..self.nodegroup_failures)
                .map(|i| BackendError::StackDeleteFailed {
                    stack: format!("ng-{i}"),
                    status: "DELETE_FAILED".to_string(),
                })
                .collect()
        }

        fn delete_cluster(&self, wait: bool) -> Result<(), BackendError> {
            self.call("delete_cluster", Some(wait))
        }

        fn delete_deprecated_control_plane(
            &self,
            _identity: &ClusterIdentity,
        ) -> Result<(), BackendError> {
            self.call("delete_deprecated_control_plane", None)
        }

        fn delete_deprecated_control_plane_stack(&self, wait: bool) -> Result<(), BackendError> {
            self.call("delete_deprecated_control_plane_stack", Some(wait))
        }

        fn delete_deprecated_service_role_stack(&self, wait: bool) -> Result<(), BackendError> {
            self.call("delete_deprecated_service_role_stack", Some(wait))
        }

        fn delete_deprecated_vpc_stack(&self, wait: bool) -> Result<(), BackendError> {
            self.call("delete_deprecated_vpc_stack", Some(wait))
        }

        fn delete_deprecated_default_nodegroup_stack(
            &self,
            wait: bool,
        ) -> Result<(), BackendError> {
            self.call("delete_deprecated_default_nodegroup_stack", Some(wait))
        }
    }

    impl PublicKeyCleaner for Script {
        fn delete_public_key(&self, _identity: &ClusterIdentity) -> Result<(), BackendError> {
            self.call("delete_public_key", None)
        }
    }

    impl LocalConfigCleaner for Script {
        fn delete_config_entry(&self, _identity: &ClusterIdentity) -> Result<(), BackendError> {
            self.call("delete_config_entry", None)
        }
    }

    const ALL_DEPRECATED: [&str; 5] = [
        "delete_deprecated_control_plane",
        "delete_deprecated_control_plane_stack",
        "delete_deprecated_service_role_stack",
        "delete_deprecated_vpc_stack",
        "delete_deprecated_default_nodegroup_stack",
    ];

    fn request(name: &str, wait: bool) -> DeleteClusterRequest {
        DeleteClusterRequest::new(resolve_identity(Some(name), None).unwrap(), wait)
    }

    #[test]
    fn test_auth_failure_runs_no_steps() {
        let script = Script::failing(&["check_auth"]);

        let err = delete_cluster(&request("prod-1", false), &script.collaborators()).unwrap_err();

        assert!(matches!(err, DeleteError::AuthenticationFailed { .. }));
        assert_eq!(script.calls(), vec!["check_auth"]);
    }

    #[test]
    fn test_nodegroup_failures_abort_before_any_later_stage() {
        let script = Script::default().with_nodegroup_failures(2);

        let err = delete_cluster(&request("prod-1", true), &script.collaborators()).unwrap_err();

        match &err {
            DeleteError::NodeGroupDeletionFailed { count, causes } => {
                assert_eq!(*count, 2);
                assert_eq!(causes.len(), 2);
            }
            other => panic!("expected NodeGroupDeletionFailed, got {other:?}"),
        }
        assert!(err.to_string().contains("ng-0"));
        assert!(err.to_string().contains("ng-1"));
        assert_eq!(
            script.calls(),
            vec!["check_auth", "delete_all_nodegroups(wait=true)"]
        );
    }

    #[test]
    fn test_nodegroup_abort_outcome() {
        let script = Script::default().with_nodegroup_failures(1);
        let identity = resolve_identity(None, Some("prod-1")).unwrap();

        let outcome = run_pipeline(&identity, false, &script.collaborators());

        assert!(matches!(outcome, PipelineOutcome::Aborted { ref causes } if causes.len() == 1));
    }

    #[test]
    fn test_current_control_plane_success_skips_deprecated_chain() {
        let script = Script::default();

        let result = delete_cluster(&request("prod-1", false), &script.collaborators()).unwrap();

        assert_eq!(
            result.deleted_resources,
            vec![
                LABEL_CLUSTER,
                LABEL_SERVICE_ROLE,
                LABEL_VPC,
                LABEL_DEFAULT_NODEGROUP
            ]
        );
        let calls = script.calls();
        assert!(!calls.iter().any(|c| c == "delete_deprecated_control_plane"));
        assert!(
            !calls
                .iter()
                .any(|c| c.starts_with("delete_deprecated_control_plane_stack"))
        );
    }

    #[test]
    fn test_full_call_order_and_wait_policy() {
        let script = Script::failing(&["delete_cluster", "delete_deprecated_control_plane"]);

        delete_cluster(&request("prod-1", false), &script.collaborators()).unwrap();

        assert_eq!(
            script.calls(),
            vec![
                "check_auth",
                "delete_all_nodegroups(wait=false)",
                "delete_cluster(wait=false)",
                "delete_deprecated_control_plane",
                "delete_deprecated_control_plane_stack(wait=true)",
                "delete_deprecated_service_role_stack(wait=true)",
                "delete_deprecated_vpc_stack(wait=true)",
                "delete_deprecated_default_nodegroup_stack(wait=true)",
                "delete_public_key",
                "delete_config_entry",
            ]
        );
    }

    #[test]
    fn test_last_chain_member_success_still_runs_independent_stages() {
        let script = Script::failing(&[
            "delete_cluster",
            "delete_deprecated_control_plane",
            "delete_deprecated_vpc_stack",
        ]);

        let result = delete_cluster(&request("prod-1", true), &script.collaborators()).unwrap();

        assert_eq!(
            result.deleted_resources,
            vec![
                LABEL_STACK_CONTROL_PLANE,
                LABEL_SERVICE_ROLE,
                LABEL_DEFAULT_NODEGROUP
            ]
        );
        let calls = script.calls();
        assert!(calls.contains(&"delete_deprecated_service_role_stack(wait=true)".to_string()));
        assert!(calls.contains(&"delete_deprecated_vpc_stack(wait=true)".to_string()));
        assert!(
            calls.contains(&"delete_deprecated_default_nodegroup_stack(wait=true)".to_string())
        );
    }

    #[test]
    fn test_everything_after_nodegroups_failing_is_not_found() {
        let mut failing = vec!["delete_cluster", "delete_public_key", "delete_config_entry"];
        failing.extend(ALL_DEPRECATED);
        let script = Script::failing(&failing);

        let result = delete_cluster(&request("prod-1", false), &script.collaborators()).unwrap();

        assert!(result.is_not_found());
        assert!(result.finished_at.is_some());
        assert_eq!(script.calls().len(), 10);
    }

    #[test]
    fn test_deprecated_control_plane_recorded_when_current_path_fails() {
        let script = Script::failing(&["delete_cluster"]);

        let result = delete_cluster(&request("prod-1", true), &script.collaborators()).unwrap();

        assert_eq!(result.cluster.name(), "prod-1");
        assert_eq!(result.deleted_resources[0], LABEL_CONTROL_PLANE);
        assert!(!result.deleted_resources.iter().any(|r| r == LABEL_CLUSTER));
        assert!(result.summary_message().contains("control plane"));
        assert!(
            !script
                .calls()
                .iter()
                .any(|c| c.starts_with("delete_deprecated_control_plane_stack"))
        );
        assert!(script.calls().contains(&"delete_cluster(wait=true)".to_string()));
    }

    #[test]
    fn test_side_cleanup_failures_are_not_recorded() {
        let script = Script::failing(&["delete_public_key", "delete_config_entry"]);

        let result = delete_cluster(&request("prod-1", false), &script.collaborators()).unwrap();

        assert_eq!(result.deleted_resources.len(), 4);
        assert!(!result.deleted_resources.iter().any(|r| r.contains("key")));
    }
}
