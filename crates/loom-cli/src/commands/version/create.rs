use crate::cli::GlobalFlags;
use crate::commands::shared::files::read_file_set;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    project_id: &str,
    version: &str,
    files_path: &str,
    description: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = ctx.require_actor()?;
    let files = read_file_set(files_path)?;
    let version = ctx
        .service
        .create_version(project_id, version, description, actor, &files)
        .await?;
    output(&version, flags.format)
}
