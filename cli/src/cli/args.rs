//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::client::{WorkspaceOperation, WorkspaceOptions, WorkspaceParams};
use crate::config::ConfigLoader;
use crate::error::Result;
use crate::profile::flags::non_empty;
use crate::profile::ProfileFlags;

/// Terraform Cloud command-line client.
///
/// Manage credential profiles locally and run workspace operations against
/// Terraform Cloud or Terraform Enterprise.
#[derive(Parser, Debug)]
#[command(name = "tecli")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Credential profile to use.
    #[arg(short, long, global = true, default_value = "default")]
    pub profile: String,

    /// Configuration directory (defaults to the platform config directory).
    #[arg(short, long, global = true, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage credential profiles.
    ///
    /// Interactive mode asks for each field, showing the current value.
    /// Non-interactive mode takes everything from flags.
    Configure {
        /// What to do with the selected profile.
        #[arg(value_enum)]
        action: ConfigureAction,

        /// How to collect profile fields.
        #[arg(long, value_enum, default_value = "interactive")]
        mode: Mode,

        #[command(flatten)]
        flags: ProfileFlags,
    },

    /// Run an operation against Terraform Cloud workspaces.
    ///
    /// Authenticates with the selected profile's team token.
    Workspace {
        /// Operation to run.
        #[arg(value_enum)]
        operation: WorkspaceOperation,

        #[command(flatten)]
        args: WorkspaceArgs,
    },

    /// Generate shell completion scripts.
    ///
    /// Outputs completion script for the specified shell.
    /// Follow shell-specific instructions to install.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: ShellType,
    },
}

/// Profile actions for `tecli configure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigureAction {
    /// List all profiles.
    List,
    /// Create the selected profile.
    Create,
    /// Show the selected profile with masked tokens.
    Read,
    /// Update the selected profile.
    Update,
    /// Delete the selected profile.
    Delete,
    /// Delete the whole configuration directory.
    Purge,
}

/// How `configure` collects profile fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Ask for each field on the terminal.
    Interactive,
    /// Take every field from flags.
    NonInteractive,
}

/// Supported shell types for completions.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
}

/// Flags for `tecli workspace`.
#[derive(Args, Debug, Clone, Default)]
pub struct WorkspaceArgs {
    /// Organization that owns the workspace.
    #[arg(short, long)]
    pub organization: Option<String>,

    /// Workspace name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Workspace ID (ws-...).
    #[arg(long)]
    pub id: Option<String>,

    /// New workspace name (update operations).
    #[arg(long)]
    pub new_name: Option<String>,

    /// Workspace description.
    #[arg(long)]
    pub description: Option<String>,

    /// Terraform version the workspace runs.
    #[arg(long)]
    pub terraform_version: Option<String>,

    /// Directory, relative to the repository root, Terraform runs in.
    #[arg(long)]
    pub working_directory: Option<String>,

    /// Apply plans automatically.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub auto_apply: Option<bool>,

    /// Reason recorded when locking.
    #[arg(long)]
    pub reason: Option<String>,

    /// SSH key ID to assign.
    #[arg(long)]
    pub ssh_key_id: Option<String>,

    /// Read default options from the template `tecli/<NAME>.yaml`.
    #[arg(long, value_name = "NAME")]
    pub template: Option<String>,
}

impl WorkspaceArgs {
    /// Builds operation parameters; flags override template values.
    pub fn to_params(&self) -> Result<WorkspaceParams> {
        let base = match self.template.as_deref() {
            Some(name) => ConfigLoader::load_template(name)?.deserialize::<WorkspaceOptions>()?,
            None => WorkspaceOptions::default(),
        };

        Ok(self.overlay(base))
    }

    fn overlay(&self, base: WorkspaceOptions) -> WorkspaceParams {
        let pick = |flag: &Option<String>, fallback: Option<String>| {
            non_empty(flag.as_deref()).or(fallback)
        };

        WorkspaceParams {
            organization: non_empty(self.organization.as_deref()),
            name: non_empty(self.name.as_deref()),
            id: non_empty(self.id.as_deref()),
            options: WorkspaceOptions {
                new_name: pick(&self.new_name, base.new_name),
                description: pick(&self.description, base.description),
                terraform_version: pick(&self.terraform_version, base.terraform_version),
                working_directory: pick(&self.working_directory, base.working_directory),
                auto_apply: self.auto_apply.or(base.auto_apply),
                reason: pick(&self.reason, base.reason),
                ssh_key_id: pick(&self.ssh_key_id, base.ssh_key_id),
            },
        }
    }
}
