use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(email: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some(user) = ctx.service.find_user_by_email(email).await? else {
        anyhow::bail!("no user registered with email {email}");
    };
    output(&user, flags.format)
}
