use clap::Subcommand;

/// Project store commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Show a project with its files.
    Show { id: String },
    /// List projects, newest first.
    List {
        /// Only projects of this type.
        #[arg(long = "type")]
        project_type: Option<String>,
        /// Only projects owned by the current user.
        #[arg(long)]
        owned: bool,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Search project descriptions.
    Search { query: String },
    /// Update a project's description or type.
    Update {
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "type")]
        project_type: Option<String>,
    },
    /// Delete a project and everything attached to it.
    Delete { id: String },
    /// List a project's current files.
    Files { id: String },
    /// Replace a project's whole file set from a JSON object of path -> content.
    ReplaceFiles {
        id: String,
        #[arg(long)]
        files: String,
    },
    /// Export a project with every file.
    Export {
        id: String,
        /// Write the export to this path instead of stdout.
        #[arg(long)]
        out: Option<String>,
    },
}
