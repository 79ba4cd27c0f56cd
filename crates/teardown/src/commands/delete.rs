use clap::ArgMatches;
use serde::Serialize;
use tracing::{error, info, warn};

use teardown_core::config::TeardownConfig;
use teardown_core::{
    DeleteClusterRequest, DeleteError, TeardownError, TeardownResult, default_collaborators,
    events, resolve_identity, teardown_ops,
};

#[derive(Serialize)]
struct DeleteClusterOutput<'a> {
    found: bool,
    #[serde(flatten)]
    result: &'a TeardownResult,
}

pub(crate) fn handle_delete_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("cluster", sub_matches)) => handle_delete_cluster_command(sub_matches),
        _ => {
            error!(event = "cli.delete_unknown_resource");
            Err("Unknown resource to delete".into())
        }
    }
}

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
fn load_config_with_warning() -> TeardownConfig {
    match TeardownConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.teardown/config.toml and ./.teardown/config.toml for errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            TeardownConfig::default()
        }
    }
}

/// Apply command-line flags on top of the loaded configuration.
fn apply_cli_overrides(config: &mut TeardownConfig, matches: &ArgMatches) {
    if let Some(region) = matches.get_one::<String>("region") {
        config.provider.region = Some(region.clone());
    }
    if let Some(profile) = matches.get_one::<String>("profile") {
        config.provider.profile = Some(profile.clone());
    }
    if let Some(role_arn) = matches.get_one::<String>("cfn-role-arn") {
        config.provider.cfn_role_arn = Some(role_arn.clone());
    }
    if let Some(aws_cli) = matches.get_one::<String>("aws-cli") {
        config.provider.aws_cli = Some(aws_cli.clone());
    }
    if matches.get_flag("wait") {
        config.delete.wait = Some(true);
    }
    if let Some(&timeout) = matches.get_one::<u64>("timeout") {
        config.delete.timeout_secs = Some(timeout);
        // A short --timeout also shortens the poll interval.
        if config.delete.poll_interval_secs() > timeout {
            config.delete.poll_interval_secs = Some(timeout);
        }
    }
}

fn handle_delete_cluster_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let name_flag = matches.get_one::<String>("name").map(String::as_str);
    let name_arg = matches.get_one::<String>("name-arg").map(String::as_str);

    let identity = match resolve_identity(name_flag, name_arg) {
        Ok(identity) => identity,
        Err(e) => {
            eprintln!("❌ {}", e);
            error!(
                event = "cli.delete_cluster_invalid_name",
                error = %e,
                error_code = e.error_code()
            );
            return Err(e.into());
        }
    };

    let mut config = load_config_with_warning();
    apply_cli_overrides(&mut config, matches);
    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e);
        error!(
            event = "cli.delete_cluster_invalid_config",
            error = %e,
            error_code = e.error_code()
        );
        return Err(e.into());
    }

    let json_output = matches.get_flag("json");
    let request = DeleteClusterRequest::new(identity.clone(), config.delete.wait());

    info!(
        event = "cli.delete_cluster_started",
        cluster = identity.name(),
        wait = request.wait,
        region = config.provider.region.as_deref().unwrap_or("default")
    );

    let collaborators = default_collaborators(&config, &identity);

    match teardown_ops::delete_cluster(&request, &collaborators) {
        Ok(result) => {
            if json_output {
                let output = DeleteClusterOutput {
                    found: !result.is_not_found(),
                    result: &result,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else if result.is_not_found() {
                println!("⚠️  {}", result.summary_message());
            } else {
                println!("✅ {}", result.summary_message());
            }

            info!(
                event = "cli.delete_cluster_completed",
                cluster = identity.name(),
                deleted_count = result.deleted_resources.len()
            );

            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to delete cluster '{}': {}", identity, e);
            if let DeleteError::NodeGroupDeletionFailed { causes, .. } = &e {
                for cause in causes {
                    eprintln!("   - {}", cause);
                }
            }

            error!(
                event = "cli.delete_cluster_failed",
                cluster = identity.name(),
                error = %e,
                error_code = e.error_code()
            );

            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
