use loom_core::entities::VersionFile;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct VersionFilesResponse<'a> {
    version_id: &'a str,
    files: Vec<VersionFile>,
}

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = ctx.require_actor()?;
    let files = ctx.service.get_version_files(id, actor).await?;
    output(
        &VersionFilesResponse {
            version_id: id,
            files,
        },
        flags.format,
    )
}
