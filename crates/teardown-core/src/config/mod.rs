//! # Configuration System
//!
//! Hierarchical TOML configuration for the teardown CLI.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.teardown/config.toml` (global user preferences)
//! 3. **Project config** - `./.teardown/config.toml` (project-specific overrides)
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.teardown/config.toml
//! [provider]
//! region = "eu-west-1"
//! profile = "ops"
//!
//! [delete]
//! wait = true
//! timeout_secs = 1800
//!
//! [stacks]
//! prefix = "eksctl"
//! ```
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use teardown_core::config::TeardownConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TeardownConfig::load_hierarchy()?;
//!     let wait = config.delete.wait();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{DeleteConfig, KubeconfigConfig, ProviderConfig, StacksConfig, TeardownConfig};
pub use validation::validate_config;

impl TeardownConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
