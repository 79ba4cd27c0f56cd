pub mod errors;
pub mod operations;
pub mod types;

pub use errors::IdentityError;
pub use operations::resolve_identity;
pub use types::ClusterIdentity;
