//! Property tests for classifier, complexity and evaluator bounds

use promptforge::{ComplexityAnalyzer, Domain, DomainClassifier, PromptEvaluator};
use proptest::prelude::*;

const VOCABULARY: &[&str] = &[
    "api", "database", "python", "marketing", "blog", "audience", "revenue", "strategy",
    "dashboard", "analytics", "patterns", "story", "course", "students", "microservices",
    "distributed", "scalable", "cloud-native", "simple", "the", "and", "with", "for", "a",
    "build", "write", "analyze", "document", "plan", "button",
];

fn objective() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..40).prop_map(|w| w.join(" "))
}

fn domain() -> impl Strategy<Value = Domain> {
    prop::sample::select(Domain::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_confidence_is_bounded(text in objective()) {
        let result = DomainClassifier::new().classify(&text);
        prop_assert!((0.0..=1.0).contains(&result.confidence));
    }

    #[test]
    fn prop_classification_is_deterministic(text in objective()) {
        let classifier = DomainClassifier::new();
        prop_assert_eq!(classifier.classify(&text), classifier.classify(&text));
    }

    #[test]
    fn prop_complexity_level_in_range(text in objective(), domain in domain()) {
        let level = ComplexityAnalyzer::new().analyze(&text, domain).level;
        prop_assert!((1..=5).contains(&level));
    }

    #[test]
    fn prop_microservices_distributed_is_at_least_four(text in objective()) {
        let objective = format!("{} microservices distributed system", text);
        let level = ComplexityAnalyzer::new().analyze(&objective, Domain::Software).level;
        prop_assert!(level >= 4);
    }

    #[test]
    fn prop_evaluation_scores_are_bounded(text in "[a-zA-Z0-9 ,.:#\\-\\n]{0,300}") {
        let evaluation = PromptEvaluator::new().evaluate(&text);
        prop_assert!((0.0..=1.0).contains(&evaluation.quality_score));
        for (_, score) in evaluation.factor_scores.named() {
            prop_assert!((0.0..=1.0).contains(&score));
        }
    }
}
