use loom_config::LoomConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &LoomConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &LoomConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.llm.openai.is_configured() && has_env_prefix(&env_keys, "LOOM_LLM_OPENAI") {
        warnings.push(
            "OpenAI config appears default while LOOM_LLM_OPENAI* env vars exist. Use double underscores (example: LOOM_LLM__OPENAI__API_KEY)."
                .to_string(),
        );
    }

    if !config.llm.deepseek.is_configured() && has_env_prefix(&env_keys, "LOOM_LLM_DEEPSEEK") {
        warnings.push(
            "DeepSeek config appears default while LOOM_LLM_DEEPSEEK* env vars exist. Use double underscores (example: LOOM_LLM__DEEPSEEK__API_KEY)."
                .to_string(),
        );
    }

    if has_env_prefix(&env_keys, "LOOM_DATABASE_")
        && !has_env_prefix(&env_keys, "LOOM_DATABASE__")
    {
        warnings.push(
            "LOOM_DATABASE_* env vars are ignored. Use double underscores (example: LOOM_DATABASE__PATH)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
