use clap::Subcommand;

/// Code refinement commands. Answers are printed as returned by the model.
#[derive(Clone, Debug, Subcommand)]
pub enum RefineCommands {
    /// Optimize the code in a file.
    Optimize {
        /// Path of the source file.
        path: String,
        #[arg(long)]
        language: String,
        #[arg(long)]
        model: Option<String>,
    },
    /// Generate tests for the code in a file.
    Tests {
        /// Path of the source file.
        path: String,
        #[arg(long)]
        language: String,
        #[arg(long)]
        model: Option<String>,
    },
}
