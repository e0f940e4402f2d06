mod add;
mod list;
mod mine;
mod remove;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ShareCommands;
use crate::context::AppContext;

/// Handle `loom share`. Every share command acts as the current user.
pub async fn handle(action: &ShareCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ShareCommands::Add {
            project_id,
            user_id,
            permission,
        } => add::run(project_id, user_id, permission, ctx, flags).await,
        ShareCommands::Remove {
            project_id,
            user_id,
        } => remove::run(project_id, user_id, ctx, flags).await,
        ShareCommands::List { project_id } => list::run(project_id, ctx, flags).await,
        ShareCommands::Mine => mine::run(ctx, flags).await,
    }
}
