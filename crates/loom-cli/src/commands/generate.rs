use crate::cli::GlobalFlags;
use crate::cli::root_commands::GenerateArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::pipeline::{GenerateRequest, generate_project};

/// Handle `loom generate`.
pub async fn handle(args: &GenerateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let owner = ctx.require_actor()?;
    if args.description.trim().is_empty() {
        anyhow::bail!("description must not be empty");
    }
    ctx.require_route(args.model.as_deref())?;

    let request = GenerateRequest {
        description: &args.description,
        project_type: &args.project_type,
        model: args.model.as_deref(),
    };
    let detail = generate_project(&ctx.pipeline, &ctx.service, &request, owner).await?;
    output(&detail, flags.format)
}
