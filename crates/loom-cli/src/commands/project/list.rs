use loom_core::entities::Project;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ProjectListResponse {
    projects: Vec<Project>,
}

pub async fn run(
    project_type: Option<&str>,
    owned: bool,
    offset: u32,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = flags.limit.unwrap_or(ctx.config.general.default_limit);

    let projects = if owned {
        let owner = ctx.require_actor()?;
        let mut projects = ctx.service.list_owned_projects(&owner.user_id).await?;
        if let Some(project_type) = project_type {
            projects.retain(|p| p.project_type == project_type);
        }
        projects
            .into_iter()
            .skip(usize::try_from(offset)?)
            .take(usize::try_from(limit)?)
            .collect()
    } else {
        ctx.service.list_projects(offset, limit, project_type).await?
    };

    output(&ProjectListResponse { projects }, flags.format)
}
