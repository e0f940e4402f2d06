use loom_core::identity::Actor;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    project_id: &str,
    content: &str,
    file_path: Option<&str>,
    line_number: Option<u32>,
    actor: &Actor,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if line_number.is_some() && file_path.is_none() {
        anyhow::bail!("--line requires --file");
    }
    let comment = ctx
        .service
        .add_comment(project_id, actor, content, file_path, line_number)
        .await?;
    output(&comment, flags.format)
}
