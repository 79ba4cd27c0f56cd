use clap::{Arg, ArgAction, Command};
use clap_complete::Shell;

pub fn build_cli() -> Command {
    Command::new("teardown")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Delete a managed cluster and every stack provisioned with it")
        .long_about("teardown removes a cluster's nodegroups, control plane and supporting stacks in a fixed order. Clusters created by the deprecated provisioning layout are detected and cleaned up through their own deletion path, so the caller does not need to know which layout a cluster uses.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("delete")
                .about("Delete resource(s)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("cluster")
                        .about("Delete a cluster")
                        .arg(
                            Arg::new("name-arg")
                                .value_name("NAME")
                                .help("Cluster name (alternative to --name)")
                                .index(1)
                        )
                        .arg(
                            Arg::new("name")
                                .long("name")
                                .short('n')
                                .help("Cluster name (required)")
                        )
                        .arg(
                            Arg::new("region")
                                .long("region")
                                .short('r')
                                .help("Region the cluster lives in (overrides config)")
                        )
                        .arg(
                            Arg::new("profile")
                                .long("profile")
                                .short('p')
                                .help("Named credentials profile (overrides config)")
                        )
                        .arg(
                            Arg::new("cfn-role-arn")
                                .long("cfn-role-arn")
                                .help("IAM role CloudFormation assumes to delete stacks")
                        )
                        .arg(
                            Arg::new("aws-cli")
                                .long("aws-cli")
                                .help("Path to the aws CLI executable (default: aws)")
                        )
                        .arg(
                            Arg::new("wait")
                                .long("wait")
                                .short('w')
                                .help("Wait for nodegroup and control plane deletion to complete")
                                .action(ArgAction::SetTrue)
                        )
                        .arg(
                            Arg::new("timeout")
                                .long("timeout")
                                .help("Maximum seconds to wait for each stack deletion (also caps the poll interval)")
                                .value_parser(clap::value_parser!(u64))
                        )
                        .arg(
                            Arg::new("json")
                                .long("json")
                                .help("Output the result in JSON format")
                                .action(ArgAction::SetTrue)
                        )
                )
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .help("Shell to generate completions for")
                        .required(true)
                        .value_parser(clap::value_parser!(Shell))
                )
        )
}
