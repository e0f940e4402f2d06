use clap::Subcommand;

/// User directory commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Register a user.
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        handle: String,
        /// Opaque credential hash produced by the auth service.
        #[arg(long, default_value = "")]
        password_hash: String,
        /// Global role: user or admin.
        #[arg(long, default_value = "user")]
        role: String,
    },
    /// Show a user by ID, or the current user.
    Show { id: Option<String> },
    /// Look up a user by email.
    Find {
        #[arg(long)]
        email: String,
    },
}
