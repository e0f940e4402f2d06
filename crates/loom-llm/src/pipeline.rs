//! The two-stage generation pipeline and its refine helpers.
//!
//! `analyze` turns a description into a [`Plan`]; `materialize` turns a plan
//! into file contents, one completion per file. Stages are independent; the
//! caller chains them and decides what to persist.

use loom_config::LlmConfig;
use loom_core::entities::FileSet;
use loom_core::plan::Plan;

use crate::client::{ChatMessage, CompletionClient, CompletionRequest};
use crate::error::LlmError;
use crate::router::ProviderRouter;

const ARCHITECT_PROMPT: &str = "You are a professional software architect.";
const DEVELOPER_PROMPT: &str = "You are a professional software developer.";
const OPTIMIZER_PROMPT: &str = "You are a code optimization expert.";
const TESTER_PROMPT: &str = "You are a testing expert.";

/// Sampling temperature for the refine helpers.
const REFINE_TEMPERATURE: f32 = 0.3;

pub struct GenerationPipeline<C> {
    client: C,
    router: ProviderRouter,
    temperature: f32,
    max_tokens: u32,
}

impl<C: CompletionClient> GenerationPipeline<C> {
    #[must_use]
    pub fn new(client: C, config: &LlmConfig) -> Self {
        Self {
            client,
            router: ProviderRouter::new(config),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    #[must_use]
    pub const fn router(&self) -> &ProviderRouter {
        &self.router
    }

    /// Ask the model for a structured plan of the described project.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::InvalidAnalysisResult` if the completion is not a
    /// JSON object, or a provider error if the call fails. Nothing is retried.
    pub async fn analyze(&self, description: &str, model: Option<&str>) -> Result<Plan, LlmError> {
        let route = self.router.route(model);
        let request = CompletionRequest {
            messages: vec![
                ChatMessage::system(ARCHITECT_PROMPT),
                ChatMessage::user(analysis_prompt(description)),
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            json_output: true,
        };

        let text = self.client.complete(&route, &request).await?;
        let plan = Plan::parse(&text).map_err(|e| LlmError::InvalidAnalysisResult(e.to_string()))?;

        tracing::debug!(
            model = %route.model,
            file_count = plan.file_paths().len(),
            "analysis complete"
        );
        Ok(plan)
    }

    /// Generate every file the plan calls for.
    ///
    /// Files are requested one at a time, in plan order. The first failure
    /// aborts the batch and discards whatever was already generated.
    ///
    /// # Errors
    ///
    /// Returns the provider error of the first failing file.
    pub async fn materialize(&self, plan: &Plan, model: Option<&str>) -> Result<FileSet, LlmError> {
        let route = self.router.route(model);
        let context = plan.to_pretty_json();
        let mut files = FileSet::new();

        for path in plan.file_paths() {
            tracing::debug!(%path, model = %route.model, "generating file");
            let request = CompletionRequest {
                messages: vec![
                    ChatMessage::system(DEVELOPER_PROMPT),
                    ChatMessage::user(file_prompt(path, &context)),
                ],
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                json_output: false,
            };
            let content = self.client.complete(&route, &request).await?;
            files.insert(path.to_string(), content);
        }
        Ok(files)
    }

    /// Ask the model to improve a piece of code. The answer is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns a provider error if the call fails.
    pub async fn optimize_code(
        &self,
        code: &str,
        language: &str,
        model: Option<&str>,
    ) -> Result<String, LlmError> {
        let prompt = format!(
            "Optimize the following {language} code so that it:\n\
             1. follows best practices\n\
             2. performs well\n\
             3. handles security concerns\n\
             4. is easy to maintain\n\n\
             Code:\n{code}"
        );
        self.refine(OPTIMIZER_PROMPT, prompt, model).await
    }

    /// Ask the model for tests covering a piece of code. The answer is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns a provider error if the call fails.
    pub async fn generate_tests(
        &self,
        code: &str,
        language: &str,
        model: Option<&str>,
    ) -> Result<String, LlmError> {
        let prompt = format!(
            "Write a complete test suite for the following {language} code, covering:\n\
             1. unit tests\n\
             2. integration tests\n\
             3. boundary conditions\n\n\
             Code:\n{code}"
        );
        self.refine(TESTER_PROMPT, prompt, model).await
    }

    async fn refine(
        &self,
        system: &str,
        prompt: String,
        model: Option<&str>,
    ) -> Result<String, LlmError> {
        let route = self.router.route(model);
        let request = CompletionRequest {
            messages: vec![ChatMessage::system(system), ChatMessage::user(prompt)],
            temperature: REFINE_TEMPERATURE,
            max_tokens: self.max_tokens,
            json_output: false,
        };
        self.client.complete(&route, &request).await
    }
}

fn analysis_prompt(description: &str) -> String {
    format!(
        "Analyze the following project requirements and produce a detailed project plan.\n\n\
         Requirements:\n{description}\n\n\
         Include:\n\
         1. architecture\n\
         2. technology stack\n\
         3. file structure\n\
         4. main modules\n\
         5. API design\n\
         6. data model\n\n\
         Use top-level \"frontend\" and \"backend\" keys for the parts the project needs.\n\
         Respond with a single JSON object."
    )
}

fn file_prompt(path: &str, plan_json: &str) -> String {
    format!(
        "Generate the complete code for {path} based on this project plan:\n\n\
         {plan_json}\n\n\
         Follow best practices, keep it maintainable, and include the necessary \
         comments and docstrings."
    )
}
