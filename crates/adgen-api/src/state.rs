//! Application state.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use adgen_cache::{build_store, CacheConfig, CacheKeyGenerator, CacheManager};
use adgen_llm::{LlmConfig, ProviderOrchestrator, ProviderRegistry};
use adgen_pipeline::{PipelineConfig, PromptParser};

use crate::config::ApiConfig;

/// Shared application state.
///
/// Built once at startup; every handler sees the same cache, registry and
/// pipeline instances.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub cache: Arc<CacheManager>,
    pub providers: Arc<ProviderRegistry>,
    pub parser: Arc<PromptParser>,
}

impl AppState {
    /// Create application state from environment configuration.
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let cache_config = CacheConfig::from_env();
        let llm_config = LlmConfig::from_env();
        let mut pipeline_config = PipelineConfig::from_env();
        pipeline_config.default_provider =
            llm_config.preferred_provider(&pipeline_config.default_provider);

        let store = build_store(&cache_config).context("failed to build cache store")?;
        let cache = Arc::new(CacheManager::new(store, cache_config.ttl));

        let providers = Arc::new(
            ProviderRegistry::from_config(&llm_config)
                .context("failed to build LLM provider registry")?,
        );

        let keys = CacheKeyGenerator::new(
            cache_config.namespace.clone(),
            cache_config.version.clone(),
            pipeline_config.default_provider.clone(),
        );

        Ok(Self::from_parts(
            config,
            pipeline_config,
            cache,
            keys,
            providers,
            llm_config.timeout,
        ))
    }

    /// Assemble state from already-built collaborators.
    pub fn from_parts(
        config: ApiConfig,
        pipeline_config: PipelineConfig,
        cache: Arc<CacheManager>,
        keys: CacheKeyGenerator,
        providers: Arc<ProviderRegistry>,
        provider_timeout: Duration,
    ) -> Self {
        let orchestrator = ProviderOrchestrator::new(
            Arc::clone(&providers),
            pipeline_config.default_provider.clone(),
            provider_timeout,
        );
        let parser = PromptParser::new(pipeline_config, Arc::clone(&cache), keys, orchestrator);

        Self {
            config,
            cache,
            providers,
            parser: Arc::new(parser),
        }
    }

    /// Default pattern for an administrative cache clear.
    pub fn cache_prefix(&self) -> String {
        self.parser.keys().prefix()
    }
}
