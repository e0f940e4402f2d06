use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RefineCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct RefineResponse {
    path: String,
    language: String,
    model: String,
    content: String,
}

/// Handle `loom refine`.
pub async fn handle(action: &RefineCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (path, language, model, tests) = match action {
        RefineCommands::Optimize {
            path,
            language,
            model,
        } => (path, language, model, false),
        RefineCommands::Tests {
            path,
            language,
            model,
        } => (path, language, model, true),
    };

    let code = std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    let route = ctx.require_route(model.as_deref())?;

    let content = if tests {
        ctx.pipeline
            .generate_tests(&code, language, Some(&route.model))
            .await?
    } else {
        ctx.pipeline
            .optimize_code(&code, language, Some(&route.model))
            .await?
    };

    let response = RefineResponse {
        path: path.clone(),
        language: language.clone(),
        model: route.model,
        content,
    };
    output(&response, flags.format)
}
