use loom_core::entities::ProjectFile;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::files::read_file_set;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct FilesResponse {
    files: Vec<ProjectFile>,
}

pub async fn run(
    id: &str,
    files_path: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = ctx.require_actor()?;
    let files = read_file_set(files_path)?;
    let files = ctx.service.replace_project_files_as(id, &files, actor).await?;
    output(&FilesResponse { files }, flags.format)
}
