//! Shared data models for the creative-direction pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Parse requests (prompt input, options, edit context)
//! - Parameters extracted from free text and the defaults derived from them
//! - The creative-direction document and its scene sequence
//! - Response metadata, confidence breakdown and cost estimates

pub mod defaults;
pub mod direction;
pub mod extraction;
pub mod prompt;
pub mod reference;
pub mod response;
pub mod scene;

// Re-export common types
pub use defaults::{AudioDefaults, Defaults, PacingDefaults, TechnicalDefaults, VisualDefaults};
pub use direction::{CreativeDirection, StyleSource};
pub use extraction::{Category, ExtractedParameters, Platform};
pub use prompt::{
    ParseContext, ParseOptions, ParseRequest, PromptInput, PromptValidationError,
    DEFAULT_MAX_PROMPT_LENGTH,
};
pub use reference::{MediaReference, ReferenceKind, ReferenceSummary};
pub use response::{ConfidenceBreakdown, CostBreakdown, CostEstimate, ParseResponse, ResponseMetadata};
pub use scene::{Scene, ScenePurpose};
