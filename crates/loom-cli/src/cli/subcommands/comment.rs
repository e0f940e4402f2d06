use clap::Subcommand;

/// Collaboration log commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CommentCommands {
    /// Comment on a project, optionally anchored to a file and line.
    Add {
        project_id: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        file: Option<String>,
        #[arg(long)]
        line: Option<u32>,
    },
    /// Reply to a comment.
    Reply {
        comment_id: String,
        #[arg(long)]
        content: String,
    },
    /// Edit a comment's content.
    Edit {
        comment_id: String,
        #[arg(long)]
        content: String,
    },
    /// List a project's comments with their replies.
    List {
        project_id: String,
        /// Only comments on this file.
        #[arg(long)]
        file: Option<String>,
    },
}
