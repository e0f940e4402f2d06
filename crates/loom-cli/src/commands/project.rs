mod delete;
mod export;
mod files;
mod list;
mod replace_files;
mod search;
mod show;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::context::AppContext;

/// Handle `loom project`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Show { id } => show::run(id, ctx, flags).await,
        ProjectCommands::List {
            project_type,
            owned,
            offset,
        } => list::run(project_type.as_deref(), *owned, *offset, ctx, flags).await,
        ProjectCommands::Search { query } => search::run(query, ctx, flags).await,
        ProjectCommands::Update {
            id,
            description,
            project_type,
        } => update::run(id, description.as_deref(), project_type.as_deref(), ctx, flags).await,
        ProjectCommands::Delete { id } => delete::run(id, ctx, flags).await,
        ProjectCommands::Files { id } => files::run(id, ctx, flags).await,
        ProjectCommands::ReplaceFiles { id, files } => {
            replace_files::run(id, files, ctx, flags).await
        }
        ProjectCommands::Export { id, out } => export::run(id, out.as_deref(), ctx, flags).await,
    }
}
