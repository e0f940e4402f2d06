use loom_core::entities::Version;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct VersionListResponse {
    versions: Vec<Version>,
}

pub async fn run(project_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = ctx.require_actor()?;
    let versions = ctx.service.list_versions(project_id, actor).await?;
    output(&VersionListResponse { versions }, flags.format)
}
