use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::ClusterIdentity;
use crate::provider::BackendError;

pub const LABEL_CLUSTER: &str = "cluster";
pub const LABEL_CONTROL_PLANE: &str = "control plane";
pub const LABEL_STACK_CONTROL_PLANE: &str = "stack control plane (deprecated)";
pub const LABEL_SERVICE_ROLE: &str = "service group (deprecated)";
pub const LABEL_VPC: &str = "stack VPC (deprecated)";
pub const LABEL_DEFAULT_NODEGROUP: &str = "default nodegroup (deprecated)";

/// How a step's failure affects the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepClass {
    /// Failure aborts the run.
    FatalGated,
    /// Tried in order until one member succeeds.
    FallbackChainMember,
    /// Always attempted; failure is logged and skipped.
    IndependentBestEffort,
}

pub type StepAction<'a> = Box<dyn FnOnce() -> Result<(), BackendError> + 'a>;

/// A labelled unit of deletion work.
pub struct DeletionStep<'a> {
    pub label: &'static str,
    pub class: StepClass,
    action: StepAction<'a>,
}

impl<'a> DeletionStep<'a> {
    pub fn new(
        label: &'static str,
        class: StepClass,
        action: impl FnOnce() -> Result<(), BackendError> + 'a,
    ) -> Self {
        Self {
            label,
            class,
            action: Box::new(action),
        }
    }

    pub fn fallback(
        label: &'static str,
        action: impl FnOnce() -> Result<(), BackendError> + 'a,
    ) -> Self {
        Self::new(label, StepClass::FallbackChainMember, action)
    }

    pub fn best_effort(
        label: &'static str,
        action: impl FnOnce() -> Result<(), BackendError> + 'a,
    ) -> Self {
        Self::new(label, StepClass::IndependentBestEffort, action)
    }

    pub fn run(self) -> Result<(), BackendError> {
        (self.action)()
    }
}

impl fmt::Debug for DeletionStep<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeletionStep")
            .field("label", &self.label)
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteClusterRequest {
    pub identity: ClusterIdentity,
    /// Block on nodegroup and control plane deletion until confirmed.
    pub wait: bool,
}

impl DeleteClusterRequest {
    pub fn new(identity: ClusterIdentity, wait: bool) -> Self {
        Self { identity, wait }
    }
}

/// Resources deleted during one run, in the order they were deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeardownResult {
    pub cluster: ClusterIdentity,
    pub deleted_resources: Vec<String>,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl TeardownResult {
    pub fn new(cluster: ClusterIdentity) -> Self {
        Self {
            cluster,
            deleted_resources: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn record(&mut self, label: &str) {
        self.deleted_resources.push(label.to_string());
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// True when nothing was deleted: the cluster never existed or is already gone.
    pub fn is_not_found(&self) -> bool {
        self.deleted_resources.is_empty()
    }

    pub fn summary_message(&self) -> String {
        if self.is_not_found() {
            format!("no cluster resources were found for {:?}", self.cluster.name())
        } else {
            format!(
                "the following cluster resource(s) for {:?} will be deleted: {}. \
                 If in doubt, check CloudFormation console",
                self.cluster.name(),
                self.deleted_resources.join(", ")
            )
        }
    }
}

/// Terminal state of a pipeline run.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// Nodegroup deletion failed; nothing after it ran.
    Aborted { causes: Vec<BackendError> },
    Completed(TeardownResult),
}
