//! Global Constants
//!
//! Centralized constants for scoring and tuning.
//! All magic numbers should be defined here with documentation.

/// Domain classifier constants
pub mod classifier {
    /// Weight of the keyword count relative to total words
    pub const BASE_WEIGHT: f64 = 0.7;

    /// Weight of the keyword count relative to the best domain's count
    pub const RELATIVE_WEIGHT: f64 = 0.3;

    /// Amplification applied before clamping to 1.0
    pub const SCORE_SCALE: f64 = 4.0;

    /// Best score below this falls back to general
    pub const MIN_CONFIDENCE: f64 = 0.15;

    /// Confidence reported for the low-signal general fallback
    pub const GENERAL_FALLBACK_CONFIDENCE: f64 = 0.1;

    /// Candidates within this fraction of the best score are considered
    pub const CANDIDATE_THRESHOLD: f64 = 0.8;

    /// Runner-up within this fraction of the leader triggers the tie-break ladder
    pub const TIE_RATIO: f64 = 0.85;
}

/// Complexity analyzer constants
pub mod complexity {
    pub const BASE_SCORE: f64 = 1.0;
    pub const TERM_WEIGHT: f64 = 0.4;
    pub const COMPONENT_WEIGHT: f64 = 0.4;
    pub const DEPENDENCY_WEIGHT: f64 = 0.3;

    /// Each additional indicator is discounted by this factor per rank
    pub const INDICATOR_DECAY: f64 = 0.8;

    /// Bonus when more than two dependencies are found
    pub const MANY_DEPENDENCIES_BONUS: f64 = 0.3;

    /// Word count above which objectives count as long
    pub const LONG_OBJECTIVE_WORDS: usize = 30;
    pub const LONG_HIGH_COMPLEXITY_BONUS: f64 = 0.5;
    pub const LONG_OBJECTIVE_BONUS: f64 = 0.2;

    /// Score ceiling when a simplicity indicator is present (level 2)
    pub const SIMPLE_CAP: f64 = 1.8;

    /// Upper score bound for levels 1..=4; anything above is level 5
    pub const LEVEL_THRESHOLDS: [f64; 4] = [1.5, 2.2, 3.0, 4.0];

    /// Inputs with at most this many words are degenerate
    pub const MIN_WORDS: usize = 2;
}

/// Template factory scoring weights
pub mod factory {
    pub const DOMAIN_MATCH: f64 = 1.0;
    pub const DOMAIN_FALLBACK: f64 = 0.5;
    pub const COMPLEXITY_MATCH: f64 = 0.8;
    pub const COMPONENT_MATCH: f64 = 0.6;
    pub const TAG_MATCH: f64 = 0.3;

    /// Penalty per unit distance from the range midpoint
    pub const OUT_OF_RANGE_PENALTY: f64 = 0.1;

    /// General templates compete at this fraction of their raw score
    pub const GENERAL_DISCOUNT: f64 = 0.9;
}

/// Generation defaults
pub mod generation {
    /// Complexity assumed by section renderers when none is known
    pub const DEFAULT_COMPLEXITY: u8 = 3;

    /// Maximum techniques chosen by the selector
    pub const MAX_TECHNIQUES: usize = 3;

    /// Selector bonus for techniques mapped to the detected task
    pub const TASK_BONUS: f64 = 0.5;

    /// Selector bonus for techniques suited to the complexity level
    pub const COMPLEXITY_BONUS: f64 = 0.3;
}

/// Prompt evaluator constants
pub mod evaluation {
    /// Combined score weights (general, domain)
    pub const GENERAL_SHARE: f64 = 0.6;
    pub const DOMAIN_SHARE: f64 = 0.4;

    /// Minimum words before sampling an LLM client
    pub const MIN_WORDS_FOR_LLM: usize = 10;

    /// Default number of LLM samples
    pub const LLM_SAMPLES: usize = 3;

    /// Sample text beyond this many characters is truncated
    pub const MAX_SAMPLE_CHARS: usize = 500;

    /// Prompts shorter than this get an expansion suggestion
    pub const SHORT_PROMPT_WORDS: usize = 30;

    /// Prompts longer than this get a focus suggestion
    pub const LONG_PROMPT_WORDS: usize = 500;

    /// Factor gap reported as a major difference in comparisons
    pub const MAJOR_DIFFERENCE: f64 = 0.3;

    /// Default timeout for one command client call
    pub const COMMAND_TIMEOUT_SECS: u64 = 30;

    /// Default attempts per command client call
    pub const COMMAND_MAX_RETRIES: u32 = 3;

    /// First retry delay, doubled on each further attempt
    pub const RETRY_BASE_DELAY_MS: u64 = 250;
}

/// Prompt refiner constants
pub mod refiner {
    /// Quality deducted per detected issue
    pub const ISSUE_PENALTY: f64 = 0.1;

    /// Prompts below this many words have vague instructions
    pub const VAGUE_WORDS: usize = 50;

    /// Length penalties: below VAGUE_WORDS, below MODERATE_WORDS, above LONG_WORDS
    pub const SHORT_PENALTY: f64 = 0.2;
    pub const MODERATE_WORDS: usize = 100;
    pub const MODERATE_PENALTY: f64 = 0.1;
    pub const LONG_WORDS: usize = 500;
    pub const LONG_PENALTY: f64 = 0.1;

    /// Section penalties: a single section, fewer than MIN_SECTIONS
    pub const SINGLE_SECTION_PENALTY: f64 = 0.2;
    pub const FEW_SECTIONS_PENALTY: f64 = 0.1;
    pub const MIN_SECTIONS: usize = 3;

    /// (max words, max sections) for complexity levels 1..=4; anything larger is 5
    pub const COMPLEXITY_STEPS: [(usize, usize); 4] = [(50, 1), (100, 2), (200, 3), (350, 4)];
}

/// History persistence constants
pub mod history {
    /// History file name inside the cache directory
    pub const FILE_NAME: &str = "prompt_history.json";

    /// Default number of retained entries
    pub const DEFAULT_MAX_ITEMS: usize = 100;
}
