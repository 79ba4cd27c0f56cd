//! Wires the default aws/kubectl collaborators from configuration.

use crate::aws::{
    AwsAuthChecker, AwsCli, AwsPublicKeyCleaner, AwsRegionLookup, CloudFormationBackend,
    StackNames, WaitPolicy,
};
use crate::config::TeardownConfig;
use crate::identity::ClusterIdentity;
use crate::kubeconfig::{Kubectl, KubectlConfigCleaner};
use crate::provider::{Collaborators, RegionResolver};

/// Build the collaborators for one cluster from the effective configuration.
pub fn default_collaborators(config: &TeardownConfig, identity: &ClusterIdentity) -> Collaborators {
    let cli = AwsCli::new(config.provider.aws_cli())
        .with_region(config.provider.region.clone())
        .with_profile(config.provider.profile.clone());

    let stacks = CloudFormationBackend::new(
        cli.clone(),
        StackNames::new(config.stacks.prefix(), identity),
        WaitPolicy::from_secs(
            config.delete.timeout_secs(),
            config.delete.poll_interval_secs(),
        ),
    )
    .with_role_arn(config.provider.cfn_role_arn.clone());

    // Without an explicit region the aws CLI falls back to its own default,
    // which the kubeconfig entry name has to match.
    let region: Box<dyn RegionResolver> = match config.provider.region.clone() {
        Some(region) => Box::new(region),
        None => Box::new(AwsRegionLookup::new(cli.clone())),
    };

    Collaborators {
        auth: Box::new(AwsAuthChecker::new(cli.clone())),
        stacks: Box::new(stacks),
        public_keys: Box::new(AwsPublicKeyCleaner::new(cli, config.stacks.prefix())),
        local_config: Box::new(KubectlConfigCleaner::new(
            Kubectl::new(config.kubeconfig.kubectl()),
            region,
            config.kubeconfig.domain(),
        )),
    }
}
