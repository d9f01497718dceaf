//! promptforge - Domain-Aware Prompt Generator
//!
//! Turns a plain-language objective into a structured prompt: the objective
//! is classified into a domain, scored for complexity, matched to the best
//! template, populated with domain-specific content and optionally enhanced
//! with prompt-engineering techniques.
//!
//! ## Pipeline
//!
//! 1. [`classifier`]: keyword-based domain classification with confidence
//! 2. [`complexity`]: 1-5 complexity level from terms, components and dependencies
//! 3. [`templates`]: template library and scoring factory
//! 4. [`domains`]: role detection and per-domain section content
//! 5. [`techniques`]: technique library, selection and application
//! 6. [`evaluator`]: heuristic quality scoring, optional response sampling
//!
//! [`refiner`] works the other way round: it analyzes an existing prompt and
//! appends the sections it is missing.
//!
//! ## Quick Start
//!
//! ```ignore
//! use promptforge::{GenerationRequest, PromptGenerator};
//!
//! let generator = PromptGenerator::with_builtin()?.with_auto_techniques(true);
//! let result = generator.generate(GenerationRequest::new("Design a REST API for orders"))?;
//! println!("{}", result.prompt);
//! ```

pub mod classifier;
pub mod cli;
pub mod complexity;
pub mod config;
pub mod constants;
pub mod domains;
pub mod evaluator;
pub mod extract;
pub mod generator;
pub mod history;
pub mod refiner;
pub mod techniques;
pub mod templates;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{PromptError, Result, ResultExt};

// Shared Types
pub use types::{Domain, GenerationContext};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use classifier::{ClassificationResult, DomainClassifier};
pub use complexity::{ComplexityAnalysis, ComplexityAnalyzer};
pub use domains::{DomainService, DomainStrategy, RoleMatch};
pub use extract::ContextExtractor;
pub use generator::{GeneratedPrompt, GenerationRequest, PromptGenerator};
pub use techniques::{PromptTechnique, TechniqueLibrary, TechniqueSelector};
pub use templates::{PromptTemplate, TemplateFactory, TemplateLibrary};

// =============================================================================
// Evaluation Re-exports
// =============================================================================

pub use evaluator::{
    CommandClient, Comparison, DomainSpecificEvaluator, Evaluation, LlmClient, PromptEvaluator,
};
pub use history::{HistoryEntry, HistoryStore};
pub use refiner::{Improvement, PromptRefiner, Refinement};
