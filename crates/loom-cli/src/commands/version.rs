mod create;
mod files;
mod list;
mod show;
mod snapshot;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::VersionCommands;
use crate::context::AppContext;

/// Handle `loom version`.
pub async fn handle(
    action: &VersionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        VersionCommands::Create {
            project_id,
            version,
            files,
            description,
        } => create::run(project_id, version, files, description.as_deref(), ctx, flags).await,
        VersionCommands::Snapshot {
            project_id,
            version,
            description,
        } => snapshot::run(project_id, version, description.as_deref(), ctx, flags).await,
        VersionCommands::List { project_id } => list::run(project_id, ctx, flags).await,
        VersionCommands::Show { id } => show::run(id, ctx, flags).await,
        VersionCommands::Files { id } => files::run(id, ctx, flags).await,
    }
}
