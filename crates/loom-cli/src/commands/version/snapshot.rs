use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    project_id: &str,
    version: &str,
    description: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = ctx.require_actor()?;
    let version = ctx
        .service
        .snapshot_version(project_id, version, description, actor)
        .await?;
    output(&version, flags.format)
}
