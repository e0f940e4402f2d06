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
    let reply = ctx.service.add_reply(comment_id, actor, content).await?;
    output(&reply, flags.format)
}
