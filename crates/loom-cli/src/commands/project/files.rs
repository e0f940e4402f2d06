use loom_core::entities::ProjectFile;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct FilesResponse {
    files: Vec<ProjectFile>,
}

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let files = ctx.service.get_project(id, ctx.actor.as_ref()).await?.files;
    output(&FilesResponse { files }, flags.format)
}
