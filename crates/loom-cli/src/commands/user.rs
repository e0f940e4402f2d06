mod create;
mod find;
mod show;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::context::AppContext;

/// Handle `loom user`.
pub async fn handle(action: &UserCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        UserCommands::Create {
            email,
            handle,
            password_hash,
            role,
        } => create::run(email, handle, password_hash, role, ctx, flags).await,
        UserCommands::Show { id } => show::run(id.as_deref(), ctx, flags).await,
        UserCommands::Find { email } => find::run(email, ctx, flags).await,
    }
}
