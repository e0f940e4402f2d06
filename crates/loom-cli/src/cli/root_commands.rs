use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    CommentCommands, ProjectCommands, RefineCommands, ShareCommands, UserCommands, VersionCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Register and inspect users.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Analyze a description, generate its files, and store the project.
    Generate(GenerateArgs),
    /// Ask a model to optimize code or write tests for it.
    Refine {
        #[command(subcommand)]
        action: RefineCommands,
    },
    /// Stored projects and their files.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Share grants.
    Share {
        #[command(subcommand)]
        action: ShareCommands,
    },
    /// Version snapshots.
    Version {
        #[command(subcommand)]
        action: VersionCommands,
    },
    /// Comments and replies.
    Comment {
        #[command(subcommand)]
        action: CommentCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct GenerateArgs {
    /// Natural-language description of the project.
    pub description: String,

    /// Free-form project type label.
    #[arg(long = "type", default_value = "web")]
    pub project_type: String,

    /// Model to use instead of the configured default.
    #[arg(long)]
    pub model: Option<String>,
}
