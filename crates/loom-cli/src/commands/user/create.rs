use loom_core::enums::Role;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    email: &str,
    handle: &str,
    password_hash: &str,
    role: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let role: Role = parse_enum(role, "role")?;
    let user = ctx
        .service
        .create_user(email, handle, password_hash, role)
        .await?;
    output(&user, flags.format)
}
