//! The creative-direction pipeline.
//!
//! safety gate → cache lookup → extraction + defaults → input analysis →
//! prompt build → provider fallback → defaults fill → scene resolution →
//! confidence → cache write → cost estimate.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, info_span, warn, Instrument};

use adgen_cache::{CacheKeyGenerator, CacheManager};
use adgen_llm::{strip_code_fences, ProviderOrchestrator, ResponseFormat};
use adgen_models::{
    Category, CreativeDirection, ExtractedParameters, ParseRequest, ParseResponse,
    ReferenceSummary, ResponseMetadata,
};

use crate::analyzer::{InputAnalyzer, ReferenceAnalyzer};
use crate::config::PipelineConfig;
use crate::confidence;
use crate::cost;
use crate::defaults::{fill_missing, SmartDefaults};
use crate::error::{PipelineError, PipelineResult};
use crate::extractor::ParameterExtractor;
use crate::metrics;
use crate::prompt::{build_user_prompt, system_prompt, PromptParts};
use crate::safety::{ContentSafetyGate, KeywordSafetyGate};
use crate::scenes::resolve_scenes;

/// Parse a provider completion into a creative direction.
///
/// Anything but a JSON object is rejected so the orchestrator moves on to
/// the next provider.
pub fn parse_completion(text: &str) -> Result<CreativeDirection, String> {
    let value: Value = serde_json::from_str(strip_code_fences(text))
        .map_err(|e| format!("completion is not valid JSON: {}", e))?;
    CreativeDirection::from_value(value)
        .ok_or_else(|| "completion is not a JSON object".to_string())
}

/// Turns parse requests into creative directions.
///
/// Holds only shared, read-only collaborators; one instance serves all
/// concurrent requests.
pub struct PromptParser {
    config: PipelineConfig,
    cache: Arc<CacheManager>,
    keys: CacheKeyGenerator,
    orchestrator: ProviderOrchestrator,
    extractor: ParameterExtractor,
    defaults: SmartDefaults,
    analyzer: Arc<dyn InputAnalyzer>,
    safety: Arc<dyn ContentSafetyGate>,
}

impl PromptParser {
    /// Create a parser with the default analyzer and safety gate.
    pub fn new(
        config: PipelineConfig,
        cache: Arc<CacheManager>,
        keys: CacheKeyGenerator,
        orchestrator: ProviderOrchestrator,
    ) -> Self {
        Self {
            config,
            cache,
            keys,
            orchestrator,
            extractor: ParameterExtractor::new(),
            defaults: SmartDefaults::new(),
            analyzer: Arc::new(ReferenceAnalyzer::new()),
            safety: Arc::new(KeywordSafetyGate::default()),
        }
    }

    pub fn with_analyzer(mut self, analyzer: Arc<dyn InputAnalyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn with_safety_gate(mut self, safety: Arc<dyn ContentSafetyGate>) -> Self {
        self.safety = safety;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<CacheManager> {
        &self.cache
    }

    pub fn keys(&self) -> &CacheKeyGenerator {
        &self.keys
    }

    pub fn orchestrator(&self) -> &ProviderOrchestrator {
        &self.orchestrator
    }

    /// Cache key for a request.
    pub fn cache_key(&self, request: &ParseRequest) -> PipelineResult<String> {
        let payload = serde_json::to_value(request)?;
        Ok(self.keys.generate(&payload))
    }

    /// Run the full pipeline for one request.
    pub async fn parse(&self, request: &ParseRequest) -> PipelineResult<ParseResponse> {
        let start = Instant::now();
        let span = info_span!(
            "parse",
            provider = request.options.llm_provider.as_deref().unwrap_or("default")
        );

        let result = self.run(request).instrument(span).await;

        let outcome = match &result {
            Ok(response) if response.metadata.cache_hit => "cache_hit",
            Ok(_) => "success",
            Err(PipelineError::InvalidInput(_)) => "invalid_input",
            Err(PipelineError::ContentRejected { .. }) => "content_rejected",
            Err(PipelineError::ProvidersExhausted { .. }) => "providers_exhausted",
            Err(PipelineError::Serialization(_)) => "error",
        };
        metrics::record_parse(outcome, start.elapsed().as_secs_f64());

        result
    }

    async fn run(&self, request: &ParseRequest) -> PipelineResult<ParseResponse> {
        request.validate(self.config.max_prompt_length)?;

        let text = request.prompt.text();
        if let Err(violation) = self.safety.check(text.unwrap_or_default()) {
            metrics::record_content_rejection();
            warn!(reason = %violation.reason, "Prompt rejected by safety gate");
            return Err(PipelineError::content_rejected(violation.reason));
        }

        let key = self.cache_key(request)?;
        if let Some(mut cached) = self.cache.get_json::<ParseResponse>(&key).await {
            info!(cache_key = %key, "Serving creative direction from cache");
            cached.metadata.cache_hit = true;
            self.attach_cost(request, &mut cached)?;
            return Ok(cached);
        }

        let mut warnings: Vec<String> = Vec::new();

        let params = self.extractor.extract(text.unwrap_or_default());
        let explicit_category = self.explicit_category(request, &mut warnings);
        let defaults = self.defaults.compute(&params, explicit_category);
        debug!(
            params = ?params,
            category = ?defaults.category,
            "Extracted parameters"
        );

        let references = self.analyze(request, &params, &mut warnings).await;

        let user_prompt = build_user_prompt(PromptParts {
            text,
            params: &params,
            defaults: &defaults,
            visual: Some(&references),
            previous: request.previous_config(),
        });

        let completion = self
            .orchestrator
            .complete(
                request.options.llm_provider.as_deref(),
                &user_prompt,
                system_prompt(),
                ResponseFormat::Json,
                parse_completion,
            )
            .await?;

        let mut direction = completion.value;
        let filled = fill_missing(&mut direction, &defaults);
        debug!(filled = ?filled, "Filled unset fields from defaults");
        let defaults_used = defaults.defaulted_fields.clone();
        direction.set_style_source(references.style_source);

        let resolution = resolve_scenes(&mut direction, &defaults);
        if let Some(warning) = resolution.warning {
            warnings.push(warning.to_string());
        }

        let confidence = confidence::score(&params, warnings.len());

        let mut response = ParseResponse {
            status: ParseResponse::STATUS_SUCCESS.to_string(),
            creative_direction: direction,
            scenes: resolution.scenes,
            metadata: ResponseMetadata {
                cache_hit: false,
                defaults_used,
                warnings,
                confidence_score: confidence.score,
                confidence_breakdown: confidence.breakdown,
                provider_used: Some(completion.provider.clone()),
            },
            cost_estimate: None,
            extracted_references: references.has_references().then_some(references),
        };

        // Cost depends on per-request options outside the key, so it is
        // attached after the write.
        self.cache.set_json(&key, &response).await;

        info!(
            cache_key = %key,
            provider = %completion.provider,
            attempts = completion.attempts.len(),
            scenes = response.scenes.len(),
            confidence = response.metadata.confidence_score,
            "Creative direction generated"
        );

        self.attach_cost(request, &mut response)?;
        Ok(response)
    }

    fn explicit_category(
        &self,
        request: &ParseRequest,
        warnings: &mut Vec<String>,
    ) -> Option<Category> {
        let raw = request
            .target_category
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?;
        match raw.parse() {
            Ok(category) => Some(category),
            Err(e) => {
                warn!(target_category = %raw, "Ignoring unrecognised target category");
                warnings.push(format!("{}; category inferred from prompt", e));
                None
            }
        }
    }

    async fn analyze(
        &self,
        request: &ParseRequest,
        params: &ExtractedParameters,
        warnings: &mut Vec<String>,
    ) -> ReferenceSummary {
        match self.analyzer.analyze(&request.prompt, params).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "Reference analysis failed, using text-only style");
                warnings.push(format!("reference analysis failed: {}", e));
                ReferenceSummary::text_only()
            }
        }
    }

    /// Caller-supplied estimate wins; otherwise the fallback estimator runs
    /// when enabled. Nothing is attached unless the request asks for it.
    fn attach_cost(&self, request: &ParseRequest, response: &mut ParseResponse) -> PipelineResult<()> {
        response.cost_estimate = None;
        if !request.options.include_cost_estimate {
            return Ok(());
        }

        if let Some(supplied) = &request.cost_estimate {
            response.cost_estimate = Some(supplied.clone());
        } else if request.options.cost_fallback_enabled {
            let estimate = cost::estimate(
                response.scenes.len(),
                response.creative_direction.includes_audio(),
                &self.config,
            );
            response.cost_estimate = Some(serde_json::to_value(estimate)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_completion_accepts_fenced_object() {
        let direction = parse_completion("```json\n{\"product\": {\"name\": \"Sneakers\"}}\n```")
            .unwrap();
        assert_eq!(direction.product_name(), Some("Sneakers"));
    }

    #[test]
    fn test_parse_completion_rejects_non_objects() {
        assert!(parse_completion("[1, 2, 3]").is_err());
        assert!(parse_completion("Sure! Here is your ad.").is_err());
    }
}
