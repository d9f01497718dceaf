//! End-to-end generation pipeline tests

use promptforge::history::HistoryConfig;
use promptforge::templates::TemplateSection;
use promptforge::{
    ComplexityAnalyzer, ConfigLoader, Domain, DomainClassifier, DomainService,
    GenerationRequest, HistoryEntry, HistoryStore, PromptError, PromptEvaluator,
    PromptGenerator, PromptTemplate, TemplateFactory, TemplateLibrary,
};
use tempfile::TempDir;

fn generator() -> PromptGenerator {
    PromptGenerator::with_builtin().expect("builtin templates load")
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_classify_rest_api_as_software() {
    let result =
        DomainClassifier::new().classify("Create a Python REST API with JWT authentication");
    assert_eq!(result.domain, Domain::Software);
    assert!(result.confidence > 0.5);
}

#[test]
fn test_classify_empty_is_general() {
    let result = DomainClassifier::new().classify("");
    assert_eq!(result.domain, Domain::General);
    assert_eq!(result.confidence, 0.0);
}

#[test]
fn test_simple_objective_is_level_one() {
    let analysis = ComplexityAnalyzer::new().analyze("Add a button", Domain::Software);
    assert_eq!(analysis.level, 1);
}

#[test]
fn test_cloud_native_scalable_is_level_five() {
    let analysis = ComplexityAnalyzer::new().analyze(
        "Design a distributed microservices architecture with scalable cloud-native deployment",
        Domain::Software,
    );
    assert_eq!(analysis.level, 5);
}

#[test]
fn test_role_prefix_resolves_domain() {
    let (domain, objective) =
        DomainService::new().extract_role_from_objective("As a data analyst, find churn patterns");
    assert_eq!(domain, Domain::DataAnalysis);
    assert_eq!(objective, "find churn patterns");
}

#[test]
fn test_general_template_fills_complexity_gap() {
    let section = || TemplateSection::new("Task", 1, "{objective}");
    let mut library = TemplateLibrary::new();
    library.register(
        PromptTemplate::new("software_advanced", Domain::Software, (3, 5)).with_section(section()),
    );
    library.register(
        PromptTemplate::new("general_task", Domain::General, (1, 5)).with_section(section()),
    );

    let template = TemplateFactory::new(library)
        .create_template(Domain::Software, 2, &[], &[])
        .unwrap();
    assert_eq!(template.name, "general_task");
}

// =============================================================================
// Generation
// =============================================================================

#[test]
fn test_generate_software_prompt() {
    let result = generator()
        .generate(GenerationRequest::new(
            "Create a Python REST API with JWT authentication",
        ))
        .unwrap();

    assert_eq!(result.domain, Domain::Software);
    assert!(result.template_name.starts_with("software"));
    assert!((1..=5).contains(&result.complexity));
    assert!(result.confidence.is_some());
    assert!(!result.prompt.trim().is_empty());
}

#[test]
fn test_generation_is_deterministic() {
    let generator = generator();
    let request = GenerationRequest::new("Write a blog post about remote work for managers")
        .technique("chain_of_thought");

    let first = generator.generate(request.clone()).unwrap();
    let second = generator.generate(request).unwrap();
    assert_eq!(first.prompt, second.prompt);
    assert_eq!(first.template_name, second.template_name);
}

#[test]
fn test_role_objective_pins_domain_and_strips_prefix() {
    let result = generator()
        .generate(GenerationRequest::new("As a data analyst, find churn patterns"))
        .unwrap();

    assert_eq!(result.domain, Domain::DataAnalysis);
    assert!(result.role.is_some());
    assert_eq!(result.context.objective, "find churn patterns");
    assert!(result.confidence.is_none());
}

#[test]
fn test_requested_technique_is_applied() {
    let result = generator()
        .generate(
            GenerationRequest::new("Build a caching layer for our API")
                .domain(Domain::Software)
                .complexity(3)
                .technique("chain_of_thought"),
        )
        .unwrap();
    assert_eq!(result.techniques_applied, vec!["chain_of_thought".to_string()]);
}

#[test]
fn test_unknown_template_is_an_error() {
    let err = generator()
        .generate(GenerationRequest::new("Anything at all").template("no_such_template"))
        .unwrap_err();
    assert!(matches!(err, PromptError::UnknownTemplate(name) if name == "no_such_template"));
}

#[test]
fn test_user_template_directory_overrides_builtin() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("general.yaml"),
        r#"
name: general_task
domain: general
complexity_range: [1, 5]
sections:
  - name: Goal
    position: 1
    content_template: "Goal: {objective}"
"#,
    )
    .unwrap();

    let mut generator = generator();
    generator.factory_mut().library_mut().load_dir(dir.path()).unwrap();

    let result = generator
        .generate(
            GenerationRequest::new("Plan a birthday party")
                .domain(Domain::General)
                .template("general_task"),
        )
        .unwrap();
    assert!(result.prompt.contains("Goal: Plan a birthday party"));
}

// =============================================================================
// Evaluation and History
// =============================================================================

#[test]
fn test_generated_prompt_outranks_vague_prompt() {
    let generated = generator()
        .generate(GenerationRequest::new(
            "Create a Python REST API with JWT authentication",
        ))
        .unwrap();

    let comparison = PromptEvaluator::new()
        .compare_prompts(&["Do it.", generated.prompt.as_str()])
        .unwrap();
    assert_eq!(comparison.best_prompt_index, 1);
}

#[test]
fn test_history_survives_reopen_and_trims() {
    let dir = TempDir::new().unwrap();
    let config = HistoryConfig {
        cache_dir: dir.path().to_path_buf(),
        max_items: 2,
        persist: true,
    };

    let mut store = HistoryStore::open(config.clone());
    for (i, domain) in [Domain::Software, Domain::Content, Domain::Business]
        .into_iter()
        .enumerate()
    {
        let entry = HistoryEntry::new(format!("objective {}", i), "prompt", domain)
            .with_quality(0.5 + i as f64 * 0.1);
        store.record(entry).unwrap();
    }

    let reopened = HistoryStore::open(config);
    assert_eq!(reopened.len(), 2);
    let objectives: Vec<&str> = reopened
        .entries(None, None, None)
        .iter()
        .map(|e| e.objective.as_str())
        .collect();
    assert_eq!(objectives, vec!["objective 1", "objective 2"]);
}

#[test]
fn test_config_file_drives_generation_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[generation]
max_techniques = 2
auto_techniques = true
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.generation.max_techniques, 2);
    assert!(config.generation.auto_techniques);
    assert_eq!(config.cache.max_history_items, 100);
}
