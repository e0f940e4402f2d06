use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: Option<&str>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let id = match id {
        Some(id) => id,
        None => ctx.require_actor()?.user_id.as_str(),
    };
    let user = ctx.service.get_user(id).await?;
    output(&user, flags.format)
}
