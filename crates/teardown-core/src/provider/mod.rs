//! Collaborator contracts consumed by the teardown orchestrator.
//!
//! The orchestrator never talks to the infrastructure provider itself. It
//! calls through these traits, and the CLI wires in the implementations from
//! [`crate::aws`] and [`crate::kubeconfig`].

pub mod errors;
pub mod traits;

pub use errors::BackendError;
pub use traits::{
    AuthChecker, LocalConfigCleaner, PublicKeyCleaner, RegionResolver, StackBackend,
};

/// The four capabilities a teardown run depends on.
pub struct Collaborators {
    pub auth: Box<dyn AuthChecker>,
    pub stacks: Box<dyn StackBackend>,
    pub public_keys: Box<dyn PublicKeyCleaner>,
    pub local_config: Box<dyn LocalConfigCleaner>,
}
