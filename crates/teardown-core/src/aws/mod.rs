//! Default collaborators backed by the `aws` CLI.
//!
//! The CLI inherits the user's credential chain (environment, shared config,
//! SSO, instance metadata) without any auth code here.

pub mod auth;
pub mod cli;
pub mod keys;
pub mod region;
pub mod stacks;
pub mod types;

pub use auth::AwsAuthChecker;
pub use cli::{AwsCli, AwsRunner};
pub use keys::AwsPublicKeyCleaner;
pub use region::AwsRegionLookup;
pub use stacks::{CloudFormationBackend, StackNames, WaitPolicy};
