use loom_core::enums::Permission;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    project_id: &str,
    user_id: &str,
    permission: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = ctx.require_actor()?;
    let permission: Permission = parse_enum(permission, "permission")?;
    let grant = ctx
        .service
        .share_project(project_id, user_id, permission, actor)
        .await?;
    output(&grant, flags.format)
}
