//! LLM provider layer.
//!
//! This crate provides:
//! - The `LlmProvider` capability contract
//! - OpenAI, Anthropic and Gemini HTTP providers plus a deterministic mock
//! - A name-keyed, process-lifetime `ProviderRegistry`
//! - `ProviderOrchestrator`, which tries providers in order until one succeeds

pub mod config;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod provider;
pub mod providers;
pub mod registry;

pub use config::{LlmConfig, MOCK_PROVIDER};
pub use error::{LlmError, LlmResult};
pub use orchestrator::{AttemptOutcome, Completion, ProviderAttempt, ProviderOrchestrator};
pub use provider::{strip_code_fences, LlmProvider, ResponseFormat};
pub use providers::{AnthropicProvider, GeminiProvider, MockProvider, OpenAiProvider};
pub use registry::ProviderRegistry;
