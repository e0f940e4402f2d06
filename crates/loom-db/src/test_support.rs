//! Shared test utilities for loom-db unit tests.

pub(crate) mod helpers {
    use loom_core::entities::{FileSet, Project};
    use loom_core::enums::Role;
    use loom_core::identity::Actor;
    use loom_core::plan::Plan;

    use crate::service::LoomService;

    /// Create an in-memory LoomService.
    pub async fn test_service() -> LoomService {
        LoomService::new_local(":memory:").await.unwrap()
    }

    /// Register a user and return their actor identity.
    pub async fn make_actor(svc: &LoomService, handle: &str, role: Role) -> Actor {
        svc.create_user(&format!("{handle}@example.com"), handle, "hash", role)
            .await
            .unwrap()
            .to_actor()
    }

    pub fn full_stack_plan() -> Plan {
        Plan::from_value(serde_json::json!({
            "architecture": "client-server",
            "frontend": {"framework": "next"},
            "backend": {"framework": "fastapi"}
        }))
        .unwrap()
    }

    pub fn files(entries: &[(&str, &str)]) -> FileSet {
        entries
            .iter()
            .map(|(path, content)| ((*path).to_string(), (*content).to_string()))
            .collect()
    }

    /// Create a project with two files owned by `owner`.
    pub async fn make_project(svc: &LoomService, owner: &Actor) -> Project {
        svc.create_project(
            "Create a todo app",
            "web",
            &full_stack_plan(),
            &files(&[
                ("frontend/src/pages/index.tsx", "export default function Home() {}"),
                ("backend/main.py", "app = FastAPI()"),
            ]),
            &owner.user_id,
            Some("deepseek-coder-33b-instruct"),
        )
        .await
        .unwrap()
        .project
    }
}
