//! Generate-and-persist: analysis, then materialization, then one store write.
//!
//! Nothing is written unless both model stages succeed, so a failed run leaves
//! no partial project behind.

use anyhow::Context;
use loom_core::entities::ProjectDetail;
use loom_core::identity::Actor;
use loom_db::service::LoomService;
use loom_llm::{CompletionClient, GenerationPipeline};

/// What the caller asked to generate.
#[derive(Debug, Clone)]
pub struct GenerateRequest<'a> {
    pub description: &'a str,
    pub project_type: &'a str,
    pub model: Option<&'a str>,
}

pub async fn generate_project<C: CompletionClient>(
    pipeline: &GenerationPipeline<C>,
    service: &LoomService,
    request: &GenerateRequest<'_>,
    owner: &Actor,
) -> anyhow::Result<ProjectDetail> {
    let model = pipeline.router().route(request.model).model;

    let plan = pipeline
        .analyze(request.description, Some(&model))
        .await
        .context("requirement analysis failed")?;

    let files = pipeline
        .materialize(&plan, Some(&model))
        .await
        .context("file generation failed")?;

    tracing::debug!(file_count = files.len(), %model, "generation complete, persisting");

    let detail = service
        .create_project(
            request.description,
            request.project_type,
            &plan,
            &files,
            &owner.user_id,
            Some(&model),
        )
        .await?;
    Ok(detail)
}
