//! teardown-core: ordered, partially fault-tolerant cluster deletion
//!
//! This library removes a managed cluster together with every stack that
//! was provisioned alongside it, including stacks left behind by the
//! deprecated provisioning layout. It is used by the `teardown` CLI.
//!
//! # Main Entry Points
//!
//! - [`identity`] - Resolve the cluster name from flag or argument
//! - [`teardown`] - The deletion pipeline
//! - [`provider`] - Collaborator traits the pipeline calls through
//! - [`aws`] / [`kubeconfig`] - Default collaborators
//! - [`config`] - Configuration management

pub mod aws;
pub mod collaborators;
pub mod config;
pub mod errors;
pub mod events;
pub mod identity;
pub mod kubeconfig;
pub mod logging;
pub mod provider;
pub mod teardown;

// Re-export commonly used types at crate root for convenience
pub use collaborators::default_collaborators;
pub use config::TeardownConfig;
pub use errors::TeardownError;
pub use identity::{ClusterIdentity, IdentityError, resolve_identity};
pub use provider::{BackendError, Collaborators};
pub use teardown::{DeleteClusterRequest, DeleteError, PipelineOutcome, TeardownResult};

// Re-export handler module as the primary API
pub use teardown::handler as teardown_ops;

// Re-export logging initialization
pub use logging::init_logging;
