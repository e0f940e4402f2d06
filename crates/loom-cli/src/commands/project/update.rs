use loom_db::updates::project::ProjectUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    description: Option<&str>,
    project_type: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if description.is_none() && project_type.is_none() {
        anyhow::bail!("At least one of --description or --type must be provided");
    }

    let actor = ctx.require_actor()?;
    let mut builder = ProjectUpdateBuilder::new();
    if let Some(description) = description {
        builder = builder.description(description);
    }
    if let Some(project_type) = project_type {
        builder = builder.project_type(project_type);
    }

    let project = ctx.service.update_project_as(id, builder.build(), actor).await?;
    output(&project, flags.format)
}
