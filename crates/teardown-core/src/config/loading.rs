//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.teardown/config.toml` (global user preferences)
//! 3. **Project config** - `./.teardown/config.toml` (project-specific overrides)
//! 4. **CLI arguments** - Command-line flags (highest priority)

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::{
    DeleteConfig, KubeconfigConfig, ProviderConfig, StacksConfig, TeardownConfig,
};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

const CONFIG_DIR: &str = ".teardown";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a config file cannot be parsed or validation fails.
/// Missing config files are not errors.
pub fn load_hierarchy() -> Result<TeardownConfig, ConfigError> {
    let user_path = user_config_path();
    let project_path = std::env::current_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
    load_from_paths(user_path.as_deref(), &project_path)
}

/// Load and merge the user and project config files at explicit paths.
pub fn load_from_paths(
    user_path: Option<&Path>,
    project_path: &Path,
) -> Result<TeardownConfig, ConfigError> {
    let mut config = TeardownConfig::default();

    if let Some(user_path) = user_path
        && let Some(user_config) = load_optional_file(user_path)?
    {
        config = merge_configs(config, user_config);
    }

    if let Some(project_config) = load_optional_file(project_path)? {
        config = merge_configs(config, project_config);
    }

    validate_config(&config)?;

    Ok(config)
}

/// Load a config file, treating a missing file as `None`.
fn load_optional_file(path: &Path) -> Result<Option<TeardownConfig>, ConfigError> {
    match load_config_file(path) {
        Ok(config) => {
            debug!(event = "core.config.file_loaded", path = %path.display());
            Ok(Some(config))
        }
        Err(ConfigError::ConfigNotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Load a configuration file from the given path.
pub fn load_config_file(path: &Path) -> Result<TeardownConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            }
        } else {
            ConfigError::IoError { source: e }
        }
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Path of the user config file, if a home directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Merge two configurations, with override_config taking precedence.
///
/// Values set in the override replace base values; unset values keep the base.
pub fn merge_configs(base: TeardownConfig, override_config: TeardownConfig) -> TeardownConfig {
    TeardownConfig {
        provider: ProviderConfig {
            region: override_config.provider.region.or(base.provider.region),
            profile: override_config.provider.profile.or(base.provider.profile),
            cfn_role_arn: override_config
                .provider
                .cfn_role_arn
                .or(base.provider.cfn_role_arn),
            aws_cli: override_config.provider.aws_cli.or(base.provider.aws_cli),
        },
        delete: DeleteConfig {
            wait: override_config.delete.wait.or(base.delete.wait),
            timeout_secs: override_config
                .delete
                .timeout_secs
                .or(base.delete.timeout_secs),
            poll_interval_secs: override_config
                .delete
                .poll_interval_secs
                .or(base.delete.poll_interval_secs),
        },
        stacks: StacksConfig {
            prefix: override_config.stacks.prefix.or(base.stacks.prefix),
        },
        kubeconfig: KubeconfigConfig {
            domain: override_config.kubeconfig.domain.or(base.kubeconfig.domain),
            kubectl: override_config
                .kubeconfig
                .kubectl
                .or(base.kubeconfig.kubectl),
        },
    }
}
