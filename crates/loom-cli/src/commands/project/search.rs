use loom_core::entities::Project;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ProjectSearchResponse {
    query: String,
    projects: Vec<Project>,
}

pub async fn run(
    query: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = flags.limit.unwrap_or(ctx.config.general.default_limit);
    let projects = ctx.service.search_projects(query, limit).await?;
    output(
        &ProjectSearchResponse {
            query: query.to_string(),
            projects,
        },
        flags.format,
    )
}
