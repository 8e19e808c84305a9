//! Creative-direction generation pipeline.
//!
//! This crate provides:
//! - Rule-based parameter extraction and smart defaults
//! - Reference analysis and the pre-flight content safety gate
//! - Prompt assembly, scene validation and deterministic scene generation
//! - Confidence scoring and fallback cost estimation
//! - `PromptParser`, which ties these to the cache and provider fallback

pub mod analyzer;
pub mod config;
pub mod confidence;
pub mod cost;
pub mod defaults;
pub mod error;
pub mod extractor;
pub mod metrics;
pub mod parser;
pub mod prompt;
pub mod safety;
pub mod scenes;

pub use analyzer::{AnalysisError, InputAnalyzer, ReferenceAnalyzer};
pub use config::PipelineConfig;
pub use confidence::Confidence;
pub use defaults::{fill_missing, SmartDefaults};
pub use error::{PipelineError, PipelineResult};
pub use extractor::ParameterExtractor;
pub use parser::{parse_completion, PromptParser};
pub use safety::{ContentSafetyGate, KeywordSafetyGate, SafetyViolation};
pub use scenes::{generate_scenes, validate_scene, validate_scenes, SceneVerdict};
