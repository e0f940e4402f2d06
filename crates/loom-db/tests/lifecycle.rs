//! End-to-end storage scenarios across every repository.

use loom_core::entities::FileSet;
use loom_core::enums::{FileKind, Permission, Role};
use loom_core::identity::Actor;
use loom_core::plan::{BACKEND_FILES, FRONTEND_FILES, Plan};
use loom_db::error::DatabaseError;
use loom_db::service::LoomService;
use pretty_assertions::assert_eq;
use rstest::rstest;

async fn service() -> LoomService {
    LoomService::new_local(":memory:").await.unwrap()
}

async fn actor(svc: &LoomService, handle: &str, role: Role) -> Actor {
    svc.create_user(&format!("{handle}@example.com"), handle, "hash", role)
        .await
        .unwrap()
        .to_actor()
}

fn todo_plan() -> Plan {
    Plan::parse(
        r#"{
            "architecture": "SPA + REST API",
            "frontend": {"framework": "Next.js"},
            "backend": {"framework": "FastAPI"},
            "database": {"engine": "PostgreSQL"}
        }"#,
    )
    .unwrap()
}

fn generated_files(plan: &Plan) -> FileSet {
    plan.file_paths()
        .into_iter()
        .map(|path| (path.to_string(), format!("// generated {path}")))
        .collect()
}

async fn count(svc: &LoomService, table: &str) -> i64 {
    let mut rows = svc
        .db()
        .conn()
        .query(&format!("SELECT COUNT(*) FROM {table}"), ())
        .await
        .unwrap();
    rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
}

#[tokio::test]
async fn todo_app_persists_eight_files() {
    let svc = service().await;
    let owner = actor(&svc, "owner", Role::User).await;
    let plan = todo_plan();
    let files = generated_files(&plan);
    assert_eq!(files.len(), 8);

    let created = svc
        .create_project(
            "Create a todo app",
            "web",
            &plan,
            &files,
            &owner.user_id,
            Some("deepseek-coder-33b-instruct"),
        )
        .await
        .unwrap();
    assert!(created.project.id.starts_with("prj-"));

    let stored = svc.get_project_files(&created.project.id).await.unwrap();
    assert_eq!(stored.len(), 8);

    let frontend: Vec<_> = stored
        .iter()
        .filter(|f| f.kind == FileKind::Frontend)
        .map(|f| f.path.as_str())
        .collect();
    let backend: Vec<_> = stored
        .iter()
        .filter(|f| f.kind == FileKind::Backend)
        .map(|f| f.path.as_str())
        .collect();
    let mut expected_frontend = FRONTEND_FILES.to_vec();
    expected_frontend.sort_unstable();
    let mut expected_backend = BACKEND_FILES.to_vec();
    expected_backend.sort_unstable();
    assert_eq!(frontend, expected_frontend);
    assert_eq!(backend, expected_backend);

    let detail = svc
        .get_project(&created.project.id, Some(&owner))
        .await
        .unwrap();
    assert_eq!(detail.project.structure, plan);
}

#[tokio::test]
async fn deleting_project_leaves_no_orphans() {
    let svc = service().await;
    let owner = actor(&svc, "owner", Role::User).await;
    let guest = actor(&svc, "guest", Role::User).await;
    let plan = todo_plan();
    let project = svc
        .create_project("todo", "web", &plan, &generated_files(&plan), &owner.user_id, None)
        .await
        .unwrap()
        .project;

    svc.share_project(&project.id, &guest.user_id, Permission::Write, &owner)
        .await
        .unwrap();
    svc.snapshot_version(&project.id, "1.0.0", Some("initial"), &owner)
        .await
        .unwrap();
    let comment = svc
        .add_comment(&project.id, &guest, "looks good", None, None)
        .await
        .unwrap();
    svc.add_reply(&comment.id, &owner, "thanks").await.unwrap();

    assert!(svc.delete_project(&project.id).await.unwrap());

    for table in [
        "projects",
        "project_files",
        "project_shares",
        "project_versions",
        "version_files",
        "comments",
        "comment_replies",
    ] {
        assert_eq!(count(&svc, table).await, 0, "rows left in {table}");
    }

    assert!(matches!(
        svc.list_shares(&project.id, &owner).await,
        Err(DatabaseError::NotFound { .. })
    ));
    assert!(matches!(
        svc.list_versions(&project.id, &owner).await,
        Err(DatabaseError::NotFound { .. })
    ));
    assert!(matches!(
        svc.list_comments(&project.id, None, &owner).await,
        Err(DatabaseError::NotFound { .. })
    ));
    assert!(svc.list_shared_projects_for(&guest.user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_duplicate_versions_exactly_one_wins() {
    let svc = service().await;
    let owner = actor(&svc, "owner", Role::User).await;
    let plan = todo_plan();
    let project = svc
        .create_project("todo", "web", &plan, &generated_files(&plan), &owner.user_id, None)
        .await
        .unwrap()
        .project;

    let left = FileSet::from([("a.txt".to_string(), "left".to_string())]);
    let right = FileSet::from([("b.txt".to_string(), "right".to_string())]);

    let (a, b) = tokio::join!(
        svc.create_version(&project.id, "1.0.0", None, &owner, &left),
        svc.create_version(&project.id, "1.0.0", None, &owner, &right),
    );

    let outcomes = [a, b];
    let winners: Vec<_> = outcomes.iter().filter_map(|r| r.as_ref().ok()).collect();
    let duplicates = outcomes
        .iter()
        .filter(|r| matches!(r, Err(DatabaseError::DuplicateVersion { .. })))
        .count();
    assert_eq!(winners.len(), 1);
    assert_eq!(duplicates, 1);

    let versions = svc.list_versions(&project.id, &owner).await.unwrap();
    assert_eq!(versions.len(), 1);

    // The loser's file must not have leaked into the winner's snapshot.
    let files = svc.get_version_files(&winners[0].id, &owner).await.unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(count(&svc, "version_files").await, 1);
}

#[tokio::test]
async fn reader_cannot_remove_other_grants() {
    let svc = service().await;
    let owner = actor(&svc, "owner", Role::User).await;
    let reader = actor(&svc, "reader", Role::User).await;
    let other = actor(&svc, "other", Role::User).await;
    let plan = todo_plan();
    let project = svc
        .create_project("todo", "web", &plan, &FileSet::new(), &owner.user_id, None)
        .await
        .unwrap()
        .project;

    svc.share_project(&project.id, &reader.user_id, Permission::Read, &owner)
        .await
        .unwrap();
    svc.share_project(&project.id, &other.user_id, Permission::Write, &owner)
        .await
        .unwrap();

    let err = svc
        .remove_share(&project.id, &other.user_id, &reader)
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Forbidden(_)));
    assert_eq!(svc.list_shares(&project.id, &owner).await.unwrap().len(), 2);
}

#[tokio::test]
async fn write_grant_ladder() {
    let svc = service().await;
    let owner = actor(&svc, "owner", Role::User).await;
    let writer = actor(&svc, "writer", Role::User).await;
    let plan = todo_plan();
    let project = svc
        .create_project("todo", "web", &plan, &FileSet::new(), &owner.user_id, None)
        .await
        .unwrap()
        .project;

    assert!(!svc.can_access(&project, &writer, Permission::Read).await.unwrap());
    svc.share_project(&project.id, &writer.user_id, Permission::Write, &owner)
        .await
        .unwrap();
    assert!(svc.can_access(&project, &writer, Permission::Read).await.unwrap());
    assert!(svc.can_access(&project, &writer, Permission::Write).await.unwrap());
    assert!(!svc.can_access(&project, &writer, Permission::Admin).await.unwrap());
}

#[tokio::test]
async fn replace_with_empty_set_clears_files() {
    let svc = service().await;
    let owner = actor(&svc, "owner", Role::User).await;
    let plan = todo_plan();
    let project = svc
        .create_project("todo", "web", &plan, &generated_files(&plan), &owner.user_id, None)
        .await
        .unwrap()
        .project;

    let saved = svc
        .replace_project_files(&project.id, &FileSet::new())
        .await
        .unwrap();
    assert!(saved.is_empty());
    assert!(svc.get_project_files(&project.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn reads_never_see_a_half_replaced_file_set() {
    let svc = service().await;
    let owner = actor(&svc, "owner", Role::User).await;
    let plan = todo_plan();
    let files = generated_files(&plan);
    let project = svc
        .create_project("todo", "web", &plan, &files, &owner.user_id, None)
        .await
        .unwrap()
        .project;

    let replacement: FileSet = files
        .keys()
        .map(|path| (path.clone(), "// rewritten".to_string()))
        .collect();

    let (replaced, observed) = tokio::join!(
        svc.replace_project_files(&project.id, &replacement),
        svc.get_project_files(&project.id),
    );
    assert_eq!(replaced.unwrap().len(), 8);
    assert_eq!(observed.unwrap().len(), 8);
}

#[rstest]
#[case("1.0")]
#[case("latest")]
#[case("")]
#[tokio::test]
async fn malformed_versions_write_nothing(#[case] version: &str) {
    let svc = service().await;
    let owner = actor(&svc, "owner", Role::User).await;
    let plan = todo_plan();
    let project = svc
        .create_project("todo", "web", &plan, &generated_files(&plan), &owner.user_id, None)
        .await
        .unwrap()
        .project;

    let err = svc
        .create_version(&project.id, version, None, &owner, &generated_files(&plan))
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::InvalidVersionFormat { .. }));
    assert_eq!(count(&svc, "project_versions").await, 0);
    assert_eq!(count(&svc, "version_files").await, 0);
}

#[tokio::test]
async fn repeated_version_keeps_first_files() {
    let svc = service().await;
    let owner = actor(&svc, "owner", Role::User).await;
    let plan = todo_plan();
    let project = svc
        .create_project("todo", "web", &plan, &FileSet::new(), &owner.user_id, None)
        .await
        .unwrap()
        .project;
    let first = FileSet::from([("main.py".to_string(), "v1".to_string())]);

    let version = svc
        .create_version(&project.id, "0.1.0-alpha", None, &owner, &first)
        .await
        .unwrap();
    let err = svc
        .create_version(&project.id, "0.1.0-alpha", None, &owner, &FileSet::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::DuplicateVersion { .. }));

    let files = svc.get_version_files(&version.id, &owner).await.unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].content, "v1");
}

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loom.db");
    let path = path.to_str().unwrap();

    let project_id = {
        let svc = LoomService::new_local(path).await.unwrap();
        let owner = actor(&svc, "owner", Role::User).await;
        let plan = todo_plan();
        svc.create_project("todo", "web", &plan, &generated_files(&plan), &owner.user_id, None)
            .await
            .unwrap()
            .project
            .id
    };

    let svc = LoomService::new_local(path).await.unwrap();
    let detail = svc.get_project(&project_id, None).await.unwrap();
    assert_eq!(detail.files.len(), 8);
}
