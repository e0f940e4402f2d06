use loom_core::entities::ShareGrant;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ShareListResponse {
    shares: Vec<ShareGrant>,
}

pub async fn run(project_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = ctx.require_actor()?;
    let shares = ctx.service.list_shares(project_id, actor).await?;
    output(&ShareListResponse { shares }, flags.format)
}
