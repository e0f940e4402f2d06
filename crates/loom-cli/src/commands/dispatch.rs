use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::User { action } => commands::user::handle(&action, ctx, flags).await,
        Commands::Generate(args) => commands::generate::handle(&args, ctx, flags).await,
        Commands::Refine { action } => commands::refine::handle(&action, ctx, flags).await,
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
        Commands::Share { action } => commands::share::handle(&action, ctx, flags).await,
        Commands::Version { action } => commands::version::handle(&action, ctx, flags).await,
        Commands::Comment { action } => commands::comment::handle(&action, ctx, flags).await,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use loom_config::LoomConfig;
    use loom_core::entities::FileSet;
    use loom_core::enums::{Permission, Role};
    use loom_core::identity::Actor;
    use loom_core::plan::Plan;
    use loom_db::error::DatabaseError;

    use super::dispatch;
    use crate::cli::subcommands::{
        CommentCommands, ProjectCommands, ShareCommands, VersionCommands,
    };
    use crate::cli::{Commands, GlobalFlags, OutputFormat};
    use crate::context::AppContext;

    fn flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Raw,
            limit: None,
            quiet: true,
            verbose: false,
            actor: None,
        }
    }

    async fn context() -> AppContext {
        let mut config = LoomConfig::default();
        config.database.path = ":memory:".to_string();
        AppContext::init(config, None).await.unwrap()
    }

    async fn user(ctx: &AppContext, handle: &str) -> Actor {
        ctx.service
            .create_user(&format!("{handle}@example.com"), handle, "hash", Role::User)
            .await
            .unwrap()
            .to_actor()
    }

    async fn project(ctx: &AppContext, owner: &Actor) -> String {
        let files = FileSet::from([("backend/main.py".to_string(), "v1".to_string())]);
        ctx.service
            .create_project(
                "Create a todo app",
                "web",
                &Plan::parse(r#"{"backend": {}}"#).unwrap(),
                &files,
                &owner.user_id,
                None,
            )
            .await
            .unwrap()
            .project
            .id
    }

    fn db_error(err: &anyhow::Error) -> Option<&DatabaseError> {
        err.downcast_ref::<DatabaseError>()
    }

    #[tokio::test]
    async fn gated_commands_need_an_actor() {
        let ctx = context().await;
        let err = dispatch(
            Commands::Share {
                action: ShareCommands::Mine,
            },
            &ctx,
            &flags(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("no current user"));
    }

    #[tokio::test]
    async fn owner_shares_and_reader_is_limited() {
        let mut ctx = context().await;
        let owner = user(&ctx, "owner").await;
        let reader = user(&ctx, "reader").await;
        let project_id = project(&ctx, &owner).await;

        ctx.actor = Some(owner.clone());
        dispatch(
            Commands::Share {
                action: ShareCommands::Add {
                    project_id: project_id.clone(),
                    user_id: reader.user_id.clone(),
                    permission: "read".to_string(),
                },
            },
            &ctx,
            &flags(),
        )
        .await
        .unwrap();

        ctx.actor = Some(reader.clone());
        let shared = ctx
            .service
            .list_shared_projects_for(&reader.user_id)
            .await
            .unwrap();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].permission, Permission::Read);

        // Reading works, writing and deleting do not.
        dispatch(
            Commands::Project {
                action: ProjectCommands::Files {
                    id: project_id.clone(),
                },
            },
            &ctx,
            &flags(),
        )
        .await
        .unwrap();

        let err = dispatch(
            Commands::Project {
                action: ProjectCommands::Update {
                    id: project_id.clone(),
                    description: Some("hijacked".to_string()),
                    project_type: None,
                },
            },
            &ctx,
            &flags(),
        )
        .await
        .unwrap_err();
        assert!(matches!(db_error(&err), Some(DatabaseError::Forbidden(_))));

        let err = dispatch(
            Commands::Project {
                action: ProjectCommands::Delete {
                    id: project_id.clone(),
                },
            },
            &ctx,
            &flags(),
        )
        .await
        .unwrap_err();
        assert!(matches!(db_error(&err), Some(DatabaseError::Forbidden(_))));
        assert_eq!(ctx.service.list_projects(0, 10, None).await.unwrap().len(), 1);

        dispatch(
            Commands::Comment {
                action: CommentCommands::Add {
                    project_id: project_id.clone(),
                    content: "nice".to_string(),
                    file: Some("backend/main.py".to_string()),
                    line: Some(1),
                },
            },
            &ctx,
            &flags(),
        )
        .await
        .unwrap();
        let comments = ctx
            .service
            .list_comments(&project_id, None, &reader)
            .await
            .unwrap();
        assert_eq!(comments.len(), 1);
    }

    #[tokio::test]
    async fn replace_files_then_version_from_file() {
        let mut ctx = context().await;
        let owner = user(&ctx, "owner").await;
        let project_id = project(&ctx, &owner).await;
        ctx.actor = Some(owner.clone());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"backend/main.py": "v2", "frontend/src/utils/api.ts": "x"}}"#).unwrap();
        let files_path = file.path().to_string_lossy().into_owned();

        dispatch(
            Commands::Project {
                action: ProjectCommands::ReplaceFiles {
                    id: project_id.clone(),
                    files: files_path.clone(),
                },
            },
            &ctx,
            &flags(),
        )
        .await
        .unwrap();
        assert_eq!(ctx.service.get_project_files(&project_id).await.unwrap().len(), 2);

        dispatch(
            Commands::Version {
                action: VersionCommands::Snapshot {
                    project_id: project_id.clone(),
                    version: "1.0.0".to_string(),
                    description: None,
                },
            },
            &ctx,
            &flags(),
        )
        .await
        .unwrap();

        let err = dispatch(
            Commands::Version {
                action: VersionCommands::Create {
                    project_id: project_id.clone(),
                    version: "1.0.0".to_string(),
                    files: files_path,
                    description: None,
                },
            },
            &ctx,
            &flags(),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            db_error(&err),
            Some(DatabaseError::DuplicateVersion { .. })
        ));

        let versions = ctx.service.list_versions(&project_id, &owner).await.unwrap();
        assert_eq!(versions.len(), 1);
    }

    #[tokio::test]
    async fn export_writes_file() {
        let mut ctx = context().await;
        let owner = user(&ctx, "owner").await;
        let project_id = project(&ctx, &owner).await;
        ctx.actor = Some(owner);

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("export.json");
        dispatch(
            Commands::Project {
                action: ProjectCommands::Export {
                    id: project_id.clone(),
                    out: Some(out.to_string_lossy().into_owned()),
                },
            },
            &ctx,
            &flags(),
        )
        .await
        .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["id"], project_id);
        assert_eq!(written["files"].as_array().unwrap().len(), 1);
    }
}
