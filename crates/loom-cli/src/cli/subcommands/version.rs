use clap::Subcommand;

/// Version ledger commands.
#[derive(Clone, Debug, Subcommand)]
pub enum VersionCommands {
    /// Record a version from a JSON object of path -> content.
    Create {
        project_id: String,
        version: String,
        #[arg(long)]
        files: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Record a version from the project's current files.
    Snapshot {
        project_id: String,
        version: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List a project's versions, newest first.
    List { project_id: String },
    /// Show a version.
    Show { id: String },
    /// List a version's files.
    Files { id: String },
}
