use std::path::Path;

use anyhow::Context;
use loom_config::{ConfigError, LoomConfig};
use loom_core::identity::Actor;
use loom_db::service::LoomService;
use loom_llm::{ChatClient, GenerationPipeline, ProviderRoute};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: LoomService,
    pub config: LoomConfig,
    pub pipeline: GenerationPipeline<ChatClient>,
    /// The user named by `--as` / `LOOM_USER`, resolved against the directory.
    pub actor: Option<Actor>,
}

impl AppContext {
    /// Open the database, build the provider client, and resolve the acting user.
    pub async fn init(config: LoomConfig, actor_id: Option<&str>) -> anyhow::Result<Self> {
        let db_path = &config.database.path;
        if !config.database.is_in_memory() {
            if let Some(parent) = Path::new(db_path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create database directory {}", parent.display())
                    })?;
                }
            }
        }

        let service = LoomService::new_local(db_path)
            .await
            .context("failed to initialize loom-db service")?;

        let client = ChatClient::new(config.llm.request_timeout_secs)
            .context("failed to build completion client")?;
        let pipeline = GenerationPipeline::new(client, &config.llm);

        let actor = match actor_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Some(
                service
                    .actor_for(id)
                    .await
                    .with_context(|| format!("cannot act as '{id}'"))?,
            ),
            None => None,
        };

        tracing::debug!(
            db = %db_path,
            actor = actor.as_ref().map_or("-", |a| a.user_id.as_str()),
            "application context ready"
        );

        Ok(Self {
            service,
            config,
            pipeline,
            actor,
        })
    }

    /// The acting user, required by every gated command.
    pub fn require_actor(&self) -> anyhow::Result<&Actor> {
        self.actor
            .as_ref()
            .context("no current user: pass --as <user-id> or set LOOM_USER")
    }

    /// Resolve the route for `model` and fail early when its vendor has no credentials.
    pub fn require_route(&self, model: Option<&str>) -> anyhow::Result<ProviderRoute> {
        let route = self.pipeline.router().route(model);
        if !route.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: route.vendor.config_section().to_string(),
            }
            .into());
        }
        Ok(route)
    }
}
