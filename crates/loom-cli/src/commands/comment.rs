mod add;
mod edit;
mod list;
mod reply;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CommentCommands;
use crate::context::AppContext;

/// Handle `loom comment`.
pub async fn handle(
    action: &CommentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = ctx.require_actor()?;
    match action {
        CommentCommands::Add {
            project_id,
            content,
            file,
            line,
        } => add::run(project_id, content, file.as_deref(), *line, actor, ctx, flags).await,
        CommentCommands::Reply {
            comment_id,
            content,
        } => reply::run(comment_id, content, actor, ctx, flags).await,
        CommentCommands::Edit {
            comment_id,
            content,
        } => edit::run(comment_id, content, actor, ctx, flags).await,
        CommentCommands::List { project_id, file } => {
            list::run(project_id, file.as_deref(), actor, ctx, flags).await
        }
    }
}
