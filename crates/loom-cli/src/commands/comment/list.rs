use loom_core::entities::Comment;
use loom_core::identity::Actor;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CommentListResponse {
    comments: Vec<Comment>,
}

pub async fn run(
    project_id: &str,
    file_path: Option<&str>,
    actor: &Actor,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let comments = ctx
        .service
        .list_comments(project_id, file_path, actor)
        .await?;
    output(&CommentListResponse { comments }, flags.format)
}
