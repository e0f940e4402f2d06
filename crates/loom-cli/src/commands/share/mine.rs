use loom_db::repos::share::SharedProject;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SharedWithMeResponse {
    projects: Vec<SharedProject>,
}

pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = ctx.require_actor()?;
    let projects = ctx.service.list_shared_projects_for(&actor.user_id).await?;
    output(&SharedWithMeResponse { projects }, flags.format)
}
