use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DeleteResponse<'a> {
    id: &'a str,
    deleted: bool,
}

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = ctx.require_actor()?;
    let deleted = ctx.service.delete_project_as(id, actor).await?;
    output(&DeleteResponse { id, deleted }, flags.format)
}
