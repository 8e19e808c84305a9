//! Name-keyed provider registry.
//!
//! Built once at startup and shared read-only across requests. Several
//! names may point at the same provider instance; candidate ordering
//! deduplicates by instance, not by name.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{LlmConfig, MOCK_PROVIDER};
use crate::error::LlmResult;
use crate::provider::LlmProvider;
use crate::providers::{AnthropicProvider, GeminiProvider, MockProvider, OpenAiProvider};

/// Ordered registry of LLM providers.
pub struct ProviderRegistry {
    entries: Vec<(String, Arc<dyn LlmProvider>)>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build the registry from configuration.
    ///
    /// With `use_mock` the mock provider is registered first. Every provider
    /// with credentials follows in openai, anthropic, gemini order. If nothing
    /// else is registered the mock is the only entry.
    pub fn from_config(config: &LlmConfig) -> LlmResult<Self> {
        let mut registry = Self::new();

        if config.use_mock {
            info!("USE_MOCK_LLM set, registering mock provider first");
            registry.register(MOCK_PROVIDER, Arc::new(MockProvider::new()));
        }

        if let Some(key) = &config.openai_api_key {
            registry.register(
                "openai",
                Arc::new(OpenAiProvider::new(
                    key.clone(),
                    config.openai_model.clone(),
                    config.openai_base_url.clone(),
                    config.timeout,
                )?),
            );
        }

        if let Some(key) = &config.anthropic_api_key {
            let provider: Arc<dyn LlmProvider> = Arc::new(AnthropicProvider::new(
                key.clone(),
                config.anthropic_model.clone(),
                config.anthropic_base_url.clone(),
                config.timeout,
            )?);
            registry.register("anthropic", provider.clone());
            registry.register("claude", provider);
        }

        if let Some(key) = &config.gemini_api_key {
            registry.register(
                "gemini",
                Arc::new(GeminiProvider::new(
                    key.clone(),
                    config.gemini_model.clone(),
                    config.gemini_base_url.clone(),
                    config.timeout,
                )?),
            );
        }

        if registry.is_empty() {
            warn!("No LLM credentials configured, falling back to mock provider");
            registry.register(MOCK_PROVIDER, Arc::new(MockProvider::new()));
        }

        info!(providers = ?registry.names(), "Provider registry initialized");
        Ok(registry)
    }

    /// Register a provider under `name`. Re-registering a name replaces the
    /// entry in place, keeping its position.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn LlmProvider>) {
        let name = name.into().to_lowercase();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = provider,
            None => self.entries.push((name, provider)),
        }
    }

    /// Builder-style registration.
    pub fn with(mut self, name: impl Into<String>, provider: Arc<dyn LlmProvider>) -> Self {
        self.register(name, provider);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn LlmProvider>> {
        let name = name.to_lowercase();
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, p)| Arc::clone(p))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn LlmProvider>)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ordered candidate list for one request.
    ///
    /// The requested provider (or `default` when none was requested) comes
    /// first if registered, then every other registered provider in
    /// registration order. Each instance appears once.
    pub fn candidates(
        &self,
        requested: Option<&str>,
        default: &str,
    ) -> Vec<(String, Arc<dyn LlmProvider>)> {
        let mut ordered: Vec<(String, Arc<dyn LlmProvider>)> = Vec::with_capacity(self.len());

        let preferred = requested.unwrap_or(default);
        if let Some(provider) = self.get(preferred) {
            ordered.push((preferred.to_lowercase(), provider));
        }

        for (name, provider) in &self.entries {
            let seen = ordered
                .iter()
                .any(|(_, placed)| same_instance(placed, provider));
            if !seen {
                ordered.push((name.clone(), Arc::clone(provider)));
            }
        }

        ordered
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn same_instance(a: &Arc<dyn LlmProvider>, b: &Arc<dyn LlmProvider>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
