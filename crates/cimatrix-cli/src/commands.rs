//! CLI command definitions.

use clap::{ArgAction, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a matrix of jobs
    GenerateMatrix {
        /// Kind of output to generate
        #[arg(long, value_parser = ["integration-test", "unit-test", "all-test"])]
        kind: String,

        /// Exclude slow tests
        #[arg(long)]
        fast: bool,

        /// Partition the tests in a single module, by module directory
        #[arg(
            long,
            num_args = 2,
            value_names = ["MODULE_DIR", "PARTITIONS"],
            action = ArgAction::Append,
            allow_negative_numbers = true
        )]
        partition_module: Vec<String>,

        /// Partition the tests in a single package, instead of by package.
        /// Tests added are automatically excluded from modules.
        #[arg(
            long,
            num_args = 3,
            value_names = ["GO_PACKAGE", "PACKAGE_DIR", "PARTITIONS"],
            action = ArgAction::Append,
            allow_negative_numbers = true
        )]
        partition_package: Vec<String>,

        /// Platforms to test (defaults to every configured platform)
        #[arg(long, num_args = 1..)]
        platform: Vec<String>,

        #[command(flatten)]
        versions: VersionArgs,
    },

    /// Generate a version set only
    GenerateVersionSet {
        #[command(flatten)]
        versions: VersionArgs,
    },

    /// Combine one or more matrices, computing all combinations of each and
    /// generating a list of includes
    CombineMatrices {
        /// JSON objects mapping axis names to value lists
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        matrices: Vec<String>,
    },

    /// Print the JSON schema of the generated matrix
    Schema,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct VersionArgs {
    /// Named set of versions to use: minimum, current.
    /// Defaults to minimum when no --versions are given.
    #[arg(long, num_args = 1..)]
    pub version_set: Vec<String>,

    /// Set of language versions, in the form lang=version,lang=version.
    /// Spaces separate distinct sets. Languages not included in a set use
    /// the minimum supported version.
    #[arg(long, num_args = 1..)]
    pub versions: Vec<String>,
}

impl VersionArgs {
    /// Named sets to resolve, applying the `minimum` default.
    pub fn named_sets(&self) -> Vec<String> {
        if self.version_set.is_empty() && self.versions.is_empty() {
            vec!["minimum".to_string()]
        } else {
            self.version_set.clone()
        }
    }
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,
}
