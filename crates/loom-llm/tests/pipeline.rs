//! Generation pipeline behaviour against a scripted completion client.

use std::collections::VecDeque;
use std::sync::Mutex;

use loom_config::LlmConfig;
use loom_core::plan::{BACKEND_FILES, FRONTEND_FILES, Plan};
use loom_llm::{
    ChatRole, CompletionClient, CompletionRequest, GenerationPipeline, LlmError, ProviderRoute,
    Vendor,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Replays queued answers in order and records every call.
#[derive(Default)]
struct ScriptedClient {
    answers: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<(ProviderRoute, CompletionRequest)>>,
}

impl ScriptedClient {
    fn new(answers: Vec<Result<String, LlmError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            calls: Mutex::default(),
        }
    }

    fn calls(&self) -> Vec<(ProviderRoute, CompletionRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CompletionClient for ScriptedClient {
    async fn complete(
        &self,
        route: &ProviderRoute,
        request: &CompletionRequest,
    ) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((route.clone(), request.clone()));
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyCompletion))
    }
}

fn pipeline(answers: Vec<Result<String, LlmError>>) -> GenerationPipeline<ScriptedClient> {
    GenerationPipeline::new(ScriptedClient::new(answers), &LlmConfig::default())
}

fn client_of(pipeline: &GenerationPipeline<ScriptedClient>) -> Vec<(ProviderRoute, CompletionRequest)> {
    pipeline.client().calls()
}

const TODO_PLAN: &str = r#"{
    "architecture": "SPA + REST API",
    "frontend": {"framework": "Next.js"},
    "backend": {"framework": "FastAPI"}
}"#;

#[tokio::test]
async fn todo_app_end_to_end_generates_eight_files() {
    let mut answers = vec![Ok(TODO_PLAN.to_string())];
    answers.extend((0..8).map(|i| Ok(format!("// file {i}"))));
    let pipeline = pipeline(answers);

    let plan = pipeline.analyze("Create a todo app", None).await.unwrap();
    assert!(plan.has_section("frontend"));
    assert!(plan.has_section("backend"));

    let files = pipeline.materialize(&plan, None).await.unwrap();
    assert_eq!(files.len(), 8);
    for path in FRONTEND_FILES.iter().chain(BACKEND_FILES) {
        assert!(files.contains_key(*path), "missing {path}");
    }

    let calls = client_of(&pipeline);
    assert_eq!(calls.len(), 9);
    let (route, analysis) = &calls[0];
    assert_eq!(route.vendor, Vendor::DeepSeek);
    assert!(analysis.json_output);
    assert_eq!(analysis.messages[0].role, ChatRole::System);
    assert_eq!(analysis.messages[0].content, "You are a professional software architect.");
    assert!(analysis.messages[1].content.contains("Create a todo app"));

    // One request per file, in plan order, each carrying the plan and its path.
    for ((_, request), path) in calls[1..].iter().zip(FRONTEND_FILES.iter().chain(BACKEND_FILES)) {
        assert!(!request.json_output);
        assert_eq!(request.messages[0].content, "You are a professional software developer.");
        assert!(request.messages[1].content.contains(path));
        assert!(request.messages[1].content.contains("Next.js"));
    }
}

#[tokio::test]
async fn completion_text_is_stored_verbatim() {
    let raw = "```python\nprint('hi')\n```\n";
    let pipeline = pipeline(vec![
        Ok(raw.to_string()),
        Ok(String::new()),
        Ok(String::new()),
        Ok(String::new()),
    ]);
    let plan = Plan::parse(r#"{"backend": {}}"#).unwrap();

    let files = pipeline.materialize(&plan, None).await.unwrap();
    assert_eq!(files.len(), 4);
    assert_eq!(files["backend/main.py"], raw);
}

#[rstest]
#[case("not json at all")]
#[case("[1, 2, 3]")]
#[case("\"just a string\"")]
#[tokio::test]
async fn unparseable_analysis_is_invalid_result(#[case] answer: &str) {
    let pipeline = pipeline(vec![Ok(answer.to_string())]);
    let err = pipeline.analyze("anything", None).await.unwrap_err();
    assert!(matches!(err, LlmError::InvalidAnalysisResult(_)), "got {err:?}");
}

#[tokio::test]
async fn provider_failure_in_analysis_propagates_without_retry() {
    let pipeline = pipeline(vec![
        Err(LlmError::Api {
            status: 503,
            message: "overloaded".into(),
        }),
        Ok(TODO_PLAN.to_string()),
    ]);

    let err = pipeline.analyze("anything", None).await.unwrap_err();
    assert!(matches!(err, LlmError::Api { status: 503, .. }));
    assert_eq!(client_of(&pipeline).len(), 1);
}

#[tokio::test]
async fn materialize_is_all_or_nothing() {
    let pipeline = pipeline(vec![
        Ok("ok".to_string()),
        Ok("ok".to_string()),
        Err(LlmError::Timeout { secs: 120 }),
    ]);
    let plan = Plan::parse(TODO_PLAN).unwrap();

    let err = pipeline.materialize(&plan, None).await.unwrap_err();
    assert!(matches!(err, LlmError::Timeout { secs: 120 }));
    // Stops at the failing file; nothing after it is requested.
    assert_eq!(client_of(&pipeline).len(), 3);
}

#[tokio::test]
async fn plan_without_known_sections_makes_no_calls() {
    let pipeline = pipeline(vec![]);
    let plan = Plan::parse(r#"{"mobile": {"framework": "Flutter"}}"#).unwrap();

    let files = pipeline.materialize(&plan, None).await.unwrap();
    assert!(files.is_empty());
    assert!(client_of(&pipeline).is_empty());
}

#[tokio::test]
async fn model_override_routes_to_primary_vendor() {
    let pipeline = pipeline(vec![Ok("{}".to_string())]);
    pipeline.analyze("anything", Some("gpt-4-turbo-preview")).await.unwrap();

    let calls = client_of(&pipeline);
    assert_eq!(calls[0].0.vendor, Vendor::OpenAi);
    assert_eq!(calls[0].0.model, "gpt-4-turbo-preview");
}

#[tokio::test]
async fn refine_helpers_use_low_temperature() {
    let pipeline = pipeline(vec![Ok("fast code".to_string()), Ok("tests".to_string())]);

    let optimized = pipeline
        .optimize_code("fn slow() {}", "Rust", None)
        .await
        .unwrap();
    let tests = pipeline
        .generate_tests("fn slow() {}", "Rust", None)
        .await
        .unwrap();
    assert_eq!(optimized, "fast code");
    assert_eq!(tests, "tests");

    let calls = client_of(&pipeline);
    assert_eq!(calls[0].1.messages[0].content, "You are a code optimization expert.");
    assert_eq!(calls[1].1.messages[0].content, "You are a testing expert.");
    for (_, request) in &calls {
        assert!((request.temperature - 0.3).abs() < f32::EPSILON);
        assert!(request.messages[1].content.contains("Rust"));
    }
}
