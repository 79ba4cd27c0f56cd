use tracing::debug;

use crate::identity::{errors::IdentityError, types::ClusterIdentity};

/// Resolve the cluster name from the `--name` flag or the positional argument.
///
/// Exactly one of the two must be non-empty. This never touches the network
/// and must run before any collaborator is called.
pub fn resolve_identity(
    name_flag: Option<&str>,
    name_arg: Option<&str>,
) -> Result<ClusterIdentity, IdentityError> {
    let flag = name_flag.filter(|s| !s.is_empty());
    let arg = name_arg.filter(|s| !s.is_empty());

    let name = match (flag, arg) {
        (Some(flag), Some(arg)) => {
            return Err(IdentityError::ConflictingNameSource {
                flag: flag.to_string(),
                arg: arg.to_string(),
            });
        }
        (None, Some(arg)) => arg,
        (Some(flag), None) => flag,
        (None, None) => return Err(IdentityError::MissingName),
    };

    debug!(
        event = "core.identity.resolved",
        cluster = name,
        from_flag = flag.is_some()
    );

    Ok(ClusterIdentity::new(name))
}
