use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct RemoveResponse<'a> {
    project_id: &'a str,
    user_id: &'a str,
    removed: bool,
}

pub async fn run(
    project_id: &str,
    user_id: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = ctx.require_actor()?;
    let removed = ctx.service.remove_share(project_id, user_id, actor).await?;
    output(
        &RemoveResponse {
            project_id,
            user_id,
            removed,
        },
        flags.format,
    )
}
