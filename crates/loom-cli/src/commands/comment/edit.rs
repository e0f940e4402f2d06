use loom_core::identity::Actor;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    comment_id: &str,
    content: &str,
    actor: &Actor,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let comment = ctx.service.edit_comment(comment_id, content, actor).await?;
    output(&comment, flags.format)
}
