use clap::Subcommand;

/// Share registry commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ShareCommands {
    /// Grant (or change) a user's permission on a project.
    Add {
        project_id: String,
        user_id: String,
        /// read, write or admin
        #[arg(long, default_value = "read")]
        permission: String,
    },
    /// Remove a user's grant.
    Remove { project_id: String, user_id: String },
    /// List a project's grants.
    List { project_id: String },
    /// List projects shared with the current user.
    Mine,
}
