use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ExportWritten<'a> {
    id: &'a str,
    path: &'a str,
    file_count: usize,
}

pub async fn run(
    id: &str,
    out: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let export = ctx.service.export_project(id, ctx.actor.as_ref()).await?;

    let Some(path) = out else {
        return output(&export, flags.format);
    };

    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(path, json).with_context(|| format!("failed to write export to {path}"))?;
    tracing::info!(project_id = %id, %path, "project exported");

    output(
        &ExportWritten {
            id,
            path,
            file_count: export.files.len(),
        },
        flags.format,
    )
}
