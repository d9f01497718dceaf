//! Software development strategy: language-aware requirements, structure,
//! practices and testing guidance.

use super::{DomainStrategy, SectionHandler, dispatch};
use crate::constants::generation::DEFAULT_COMPLEXITY;
use crate::templates::TemplateSection;
use crate::types::{Domain, GenerationContext};

// =============================================================================
// Knowledge Base
// =============================================================================

struct Practice {
    name: &'static str,
    description: &'static str,
    min_complexity: u8,
    max_complexity: u8,
}

const BEST_PRACTICES: &[Practice] = &[
    Practice {
        name: "SOLID Principles",
        description: "Follow Single Responsibility, Open-Closed, Liskov Substitution, Interface Segregation, and Dependency Inversion principles",
        min_complexity: 3,
        max_complexity: 5,
    },
    Practice {
        name: "DRY (Don't Repeat Yourself)",
        description: "Avoid code duplication by abstracting common functionality",
        min_complexity: 1,
        max_complexity: 5,
    },
    Practice {
        name: "KISS (Keep It Simple, Stupid)",
        description: "Prefer simple solutions over complex ones",
        min_complexity: 1,
        max_complexity: 5,
    },
    Practice {
        name: "YAGNI (You Aren't Gonna Need It)",
        description: "Don't add functionality until it's necessary",
        min_complexity: 2,
        max_complexity: 5,
    },
    Practice {
        name: "Use Version Control",
        description: "Track changes with Git or another VCS",
        min_complexity: 1,
        max_complexity: 5,
    },
    Practice {
        name: "Defensive Programming",
        description: "Anticipate and handle potential errors",
        min_complexity: 2,
        max_complexity: 5,
    },
    Practice {
        name: "Code Reviews",
        description: "Have others review your code for quality and correctness",
        min_complexity: 3,
        max_complexity: 5,
    },
    Practice {
        name: "Continuous Integration",
        description: "Regularly merge and test code changes",
        min_complexity: 3,
        max_complexity: 5,
    },
    Practice {
        name: "Test-Driven Development",
        description: "Write tests before implementing features",
        min_complexity: 3,
        max_complexity: 5,
    },
];

struct LanguageProfile {
    name: &'static str,
    description: &'static str,
    best_practices: &'static [&'static str],
    structure: &'static [&'static str],
}

const LANGUAGES: &[LanguageProfile] = &[
    LanguageProfile {
        name: "python",
        description: "a high-level, interpreted language known for readability and versatility",
        best_practices: &[
            "Follow the PEP 8 style guide",
            "Use virtual environments for dependency management",
            "Leverage Python's rich standard library",
            "Write docstrings for modules, classes, and functions",
            "Use list comprehensions and generators for efficient data processing",
        ],
        structure: &[
            "Organize code into modules and packages",
            "Use classes when appropriate, but don't force OOP",
            "Prefer explicit imports over implicit ones",
            "Follow the principle of 'Explicit is better than implicit'",
        ],
    },
    LanguageProfile {
        name: "javascript",
        description: "a versatile language for web development, both frontend and backend",
        best_practices: &[
            "Use modern ES6+ features where supported",
            "Understand asynchronous programming (Promises, async/await)",
            "Employ strict equality (===) for comparisons",
            "Use linting tools like ESLint",
            "Manage state carefully in applications",
        ],
        structure: &[
            "Organize code into modules using import/export",
            "Use appropriate design patterns (Module, Factory, Observer)",
            "Consider functional programming approaches",
            "Separate concerns between components",
        ],
    },
    LanguageProfile {
        name: "java",
        description: "a robust, object-oriented language with strong typing",
        best_practices: &[
            "Follow standard Java naming conventions",
            "Utilize Java's object-oriented features appropriately",
            "Implement proper exception handling",
            "Use interfaces to define contracts",
            "Leverage Java's type system for compile-time safety",
        ],
        structure: &[
            "Organize code into packages and classes",
            "Follow the principle of encapsulation",
            "Design with inheritance and polymorphism where appropriate",
            "Use design patterns to solve common problems",
        ],
    },
    LanguageProfile {
        name: "c#",
        description: "a modern, object-oriented language with strong typing and extensive libraries",
        best_practices: &[
            "Follow C# naming conventions and style guidelines",
            "Use LINQ for data manipulation",
            "Leverage C#'s strong typing and generics",
            "Implement proper exception handling",
            "Utilize async/await for asynchronous operations",
        ],
        structure: &[
            "Organize code into namespaces, classes, and methods",
            "Use interfaces to define contracts",
            "Implement appropriate design patterns",
            "Consider dependency injection for loosely coupled components",
        ],
    },
];

struct ArchitecturePattern {
    name: &'static str,
    description: &'static str,
    complexity: u8,
    keywords: &'static [&'static str],
    components: &'static [&'static str],
}

/// Pattern used when no other pattern matches the objective
const FALLBACK_PATTERN: &str = "Modular Design";

const ARCHITECTURE_PATTERNS: &[ArchitecturePattern] = &[
    ArchitecturePattern {
        name: "MVC (Model-View-Controller)",
        description: "Separates application into three components for improved maintainability",
        complexity: 3,
        keywords: &["web", "ui", "interface", "application"],
        components: &[
            "Model: Data and business logic",
            "View: User interface elements",
            "Controller: Handles user input and updates model/view",
        ],
    },
    ArchitecturePattern {
        name: "Microservices",
        description: "Distributes application as independent, deployable services",
        complexity: 5,
        keywords: &["scalable", "distributed", "service", "cloud"],
        components: &[
            "Independent services with focused functionality",
            "API Gateway for client communication",
            "Service Discovery mechanism",
            "Messaging system for service communication",
        ],
    },
    ArchitecturePattern {
        name: "Repository Pattern",
        description: "Abstracts data access logic from business logic",
        complexity: 3,
        keywords: &["database", "data", "storage", "crud"],
        components: &[
            "Repository interfaces defining data operations",
            "Repository implementations for specific data sources",
            "Domain models representing business entities",
            "Service layer utilizing repositories",
        ],
    },
    ArchitecturePattern {
        name: "CQRS (Command Query Responsibility Segregation)",
        description: "Separates read and write operations for complex domains",
        complexity: 4,
        keywords: &["performance", "scalability", "database", "complex"],
        components: &[
            "Command model for write operations",
            "Query model for read operations",
            "Command handlers for business logic",
            "Query handlers for data retrieval",
        ],
    },
    ArchitecturePattern {
        name: "Event-Driven Architecture",
        description: "Components communicate through events for loose coupling",
        complexity: 4,
        keywords: &["events", "realtime", "responsive", "messaging"],
        components: &[
            "Event producers that generate events",
            "Event consumers that react to events",
            "Event bus/message broker for distribution",
            "Event store for persistence (if needed)",
        ],
    },
    ArchitecturePattern {
        name: FALLBACK_PATTERN,
        description: "Organizes code into cohesive, loosely coupled modules",
        complexity: 2,
        keywords: &["maintainable", "organized", "reusable"],
        components: &[
            "Core functionality module",
            "Utility/helper modules",
            "Feature-specific modules",
            "Clear interfaces between modules",
        ],
    },
];

struct TestingStrategy {
    name: &'static str,
    description: &'static str,
    min_complexity: u8,
    /// `None` applies to every language
    languages: Option<&'static [&'static str]>,
    tools: &'static [(&'static str, &'static str)],
}

const TESTING_STRATEGIES: &[TestingStrategy] = &[
    TestingStrategy {
        name: "Unit Testing",
        description: "Testing individual components in isolation",
        min_complexity: 1,
        languages: None,
        tools: &[
            ("python", "pytest, unittest"),
            ("javascript", "Jest, Mocha"),
            ("java", "JUnit, TestNG"),
            ("c#", "MSTest, NUnit, xUnit"),
        ],
    },
    TestingStrategy {
        name: "Integration Testing",
        description: "Testing interactions between components",
        min_complexity: 2,
        languages: None,
        tools: &[
            ("python", "pytest"),
            ("javascript", "Jest, Supertest"),
            ("java", "Spring Test, Testcontainers"),
            ("c#", "xUnit, Testcontainers"),
        ],
    },
    TestingStrategy {
        name: "End-to-End Testing",
        description: "Testing complete application flows",
        min_complexity: 3,
        languages: None,
        tools: &[
            ("python", "Selenium, Playwright"),
            ("javascript", "Cypress, Playwright"),
            ("java", "Selenium, Playwright"),
            ("c#", "Selenium, Playwright"),
        ],
    },
    TestingStrategy {
        name: "Property-Based Testing",
        description: "Testing with automatically generated inputs",
        min_complexity: 4,
        languages: Some(&["python", "javascript", "java"]),
        tools: &[
            ("python", "Hypothesis"),
            ("javascript", "fast-check"),
            ("java", "jqwik"),
        ],
    },
    TestingStrategy {
        name: "Performance Testing",
        description: "Testing application performance characteristics",
        min_complexity: 4,
        languages: None,
        tools: &[
            ("python", "locust, pytest-benchmark"),
            ("javascript", "k6, Artillery"),
            ("java", "JMeter, Gatling"),
            ("c#", "NBench, BenchmarkDotNet"),
        ],
    },
];

const MAX_GENERAL_PRACTICES: usize = 5;
const MAX_LANGUAGE_PRACTICES: usize = 3;
const MAX_TESTING_STRATEGIES: usize = 3;

fn language_profile(language: &str) -> Option<&'static LanguageProfile> {
    LANGUAGES.iter().find(|l| l.name == language)
}

fn indented(items: &[impl AsRef<str>]) -> String {
    crate::types::bullet_list(items, "   ")
}

// =============================================================================
// Section Generators
// =============================================================================

fn context_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let language = ctx.extra_or("language", "unspecified programming language");
    let description = language_profile(&language.to_lowercase())
        .map(|l| l.description)
        .unwrap_or("a versatile programming language");

    format!(
        "You are a senior software developer tasked with the following programming challenge:\n\n\
         {}\n\n\
         Technical Environment:\n\
         - Language/Platform: {} - {}\n\
         - Project Type: {}\n\
         - Complexity Level: {}/5",
        ctx.objective,
        language,
        description,
        ctx.extra_or("project_type", "Software Application"),
        ctx.complexity_or(DEFAULT_COMPLEXITY)
    )
}

fn requirements_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let objective = ctx.objective_lower();
    let mut functional = vec!["Implement core functionality described in the objective"];
    if objective.contains("database") || objective.contains("data") {
        functional.push("Implement data storage and retrieval capabilities");
    }
    if objective.contains("api") || objective.contains("interface") {
        functional.push("Create well-defined API endpoints/interfaces");
    }
    if objective.contains("user") || objective.contains("ui") || objective.contains("interface") {
        functional.push("Develop user interface components");
    }

    let technical: &[&str] = language_profile(&ctx.extra_lower("language", "general"))
        .map(|l| l.best_practices)
        .unwrap_or(&[
            "Write clean, maintainable code",
            "Follow standard conventions",
            "Include appropriate error handling",
            "Add comments for complex logic",
        ]);

    format!(
        "Requirements:\n\n\
         1. Functional Requirements:\n{}\n\n\
         2. Technical Requirements:\n{}\n{}",
        indented(&functional),
        indented(technical),
        ctx.extra_or("additional_requirements", "")
    )
}

fn structure_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let complexity = ctx.complexity_or(DEFAULT_COMPLEXITY);
    let objective = ctx.objective_lower();

    let pattern = ARCHITECTURE_PATTERNS
        .iter()
        .find(|p| p.complexity <= complexity && p.keywords.iter().any(|k| objective.contains(k)))
        .or_else(|| ARCHITECTURE_PATTERNS.iter().find(|p| p.name == FALLBACK_PATTERN));

    let structure: &[&str] = language_profile(&ctx.extra_lower("language", ""))
        .map(|l| l.structure)
        .unwrap_or(&[
            "Organize code into logical modules/files",
            "Separate concerns appropriately",
            "Use consistent naming conventions",
        ]);

    let (name, reason, components): (&str, &str, &[&str]) = match pattern {
        Some(p) => (p.name, p.description, p.components),
        None => (
            FALLBACK_PATTERN,
            "it provides a clean separation of concerns",
            &["Main component"][..],
        ),
    };

    format!(
        "Code Structure:\n\n\
         1. Architecture Approach:\n   \
         Consider using {} for this task.\n   \
         This approach is appropriate because {}.\n\n\
         2. Component Organization:\n{}\n\n\
         3. Key Implementation Considerations:\n{}",
        name,
        reason,
        indented(components),
        indented(structure)
    )
}

fn best_practices_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let complexity = ctx.complexity_or(DEFAULT_COMPLEXITY);

    let language: Vec<&str> = language_profile(&ctx.extra_lower("language", ""))
        .map(|l| l.best_practices.iter().take(MAX_LANGUAGE_PRACTICES).copied().collect())
        .unwrap_or_else(|| vec!["Follow the idiomatic conventions of the chosen language"]);

    let mut general: Vec<String> = BEST_PRACTICES
        .iter()
        .filter(|p| (p.min_complexity..=p.max_complexity).contains(&complexity))
        .take(MAX_GENERAL_PRACTICES)
        .map(|p| format!("{}: {}", p.name, p.description))
        .collect();

    if general.is_empty() {
        general.push("Clean Code: Keep functions small, focused and well named".to_string());
    }

    format!(
        "Best Practices:\n\n\
         1. Language-Specific Practices:\n{}\n\n\
         2. General Software Development Practices:\n{}\n\n\
         3. Code Quality Considerations:\n   \
         - Write readable code with clear naming\n   \
         - Include appropriate documentation\n   \
         - Consider edge cases and error scenarios",
        indented(&language),
        indented(&general)
    )
}

fn testing_section(_: &TemplateSection, ctx: &GenerationContext) -> String {
    let complexity = ctx.complexity_or(DEFAULT_COMPLEXITY);
    let language = ctx.extra_lower("language", "");

    let mut approaches: Vec<(&str, &str, &str)> = TESTING_STRATEGIES
        .iter()
        .filter(|s| {
            s.min_complexity <= complexity
                && s.languages.is_none_or(|langs| langs.contains(&language.as_str()))
        })
        .take(MAX_TESTING_STRATEGIES)
        .map(|s| {
            let tools = s
                .tools
                .iter()
                .find(|(lang, _)| *lang == language)
                .map(|(_, tools)| *tools)
                .unwrap_or("appropriate testing tools");
            (s.name, s.description, tools)
        })
        .collect();

    if approaches.is_empty() {
        approaches.push((
            "Unit Testing",
            "Testing individual components in isolation",
            "standard testing framework",
        ));
    }

    let strategies: String = approaches
        .iter()
        .enumerate()
        .map(|(i, (name, description, tools))| {
            format!("   {}. {}: {}\n      Tools: {}\n", i + 1, name, description, tools)
        })
        .collect();

    format!(
        "Testing Approach:\n\n\
         1. Recommended Testing Strategies:\n{}\n\
         2. Test Coverage Considerations:\n   \
         - Aim for comprehensive coverage of core functionality\n   \
         - Include edge cases and error conditions\n   \
         - Test both expected and unexpected inputs\n\n\
         3. Test Implementation:\n   \
         - Write tests alongside or before code implementation\n   \
         - Automate tests where possible\n   \
         - Document test cases and expected results",
        strategies
    )
}

const HANDLERS: &[SectionHandler] = &[
    SectionHandler {
        synonyms: &["context", "background", "introduction"],
        generate: context_section,
    },
    SectionHandler {
        synonyms: &["requirements", "specifications", "technicalrequirements"],
        generate: requirements_section,
    },
    SectionHandler {
        synonyms: &["codestructure", "structure", "architecture"],
        generate: structure_section,
    },
    SectionHandler {
        synonyms: &["bestpractices", "guidelines", "standards"],
        generate: best_practices_section,
    },
    SectionHandler {
        synonyms: &["testing", "validation", "qualityassurance"],
        generate: testing_section,
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareStrategy;

impl DomainStrategy for SoftwareStrategy {
    fn domain(&self) -> Domain {
        Domain::Software
    }

    fn populate(&self, section: &TemplateSection, ctx: &GenerationContext) -> String {
        dispatch(HANDLERS, section, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populate(name: &str, ctx: &GenerationContext) -> String {
        SoftwareStrategy.populate(&TemplateSection::new(name, 1, "literal {objective}"), ctx)
    }

    #[test]
    fn test_context_uses_language_profile() {
        let ctx = GenerationContext::new("Build a CLI")
            .with_complexity(2)
            .with_extra("language", "Python");
        let out = populate("Context", &ctx);
        assert!(out.starts_with("You are a senior software developer"));
        assert!(out.contains("- Language/Platform: Python - a high-level, interpreted language"));
        assert!(out.contains("- Complexity Level: 2/5"));
    }

    #[test]
    fn test_context_defaults() {
        let out = populate("Background", &GenerationContext::new("Build a CLI"));
        assert!(out.contains("unspecified programming language - a versatile programming language"));
        assert!(out.contains("- Project Type: Software Application"));
        assert!(out.contains("- Complexity Level: 3/5"));
    }

    #[test]
    fn test_requirements_follow_objective() {
        let ctx = GenerationContext::new("Create a REST API backed by a database");
        let out = populate("Requirements", &ctx);
        assert!(out.contains("   - Implement data storage and retrieval capabilities"));
        assert!(out.contains("   - Create well-defined API endpoints/interfaces"));
        assert!(out.contains("   - Write clean, maintainable code"));
    }

    #[test]
    fn test_structure_picks_matching_pattern() {
        let ctx = GenerationContext::new("Build a web application").with_complexity(3);
        let out = populate("Code Structure", &ctx);
        assert!(out.contains("Consider using MVC (Model-View-Controller) for this task."));

        let simple = GenerationContext::new("Sort a list").with_complexity(1);
        assert!(populate("Architecture", &simple).contains("Consider using Modular Design"));
    }

    #[test]
    fn test_best_practices_limits() {
        let ctx = GenerationContext::new("x")
            .with_complexity(5)
            .with_extra("language", "java");
        let out = populate("Best Practices", &ctx);
        assert!(out.contains("   - Follow standard Java naming conventions"));
        assert!(!out.contains("Use interfaces to define contracts"));
        assert!(out.contains("SOLID Principles"));
        assert!(!out.contains("Defensive Programming"));
    }

    #[test]
    fn test_best_practices_out_of_range_complexity() {
        for complexity in [0, 6, u8::MAX] {
            let mut ctx = GenerationContext::new("x");
            ctx.complexity = Some(complexity);
            let out = populate("Best Practices", &ctx);
            let general = out
                .split("2. General Software Development Practices:\n")
                .nth(1)
                .and_then(|rest| rest.split("\n\n").next())
                .unwrap();
            assert!(general.trim_start().starts_with('-'), "empty practices for {}", complexity);
        }
    }

    #[test]
    fn test_testing_language_tools() {
        let ctx = GenerationContext::new("x")
            .with_complexity(4)
            .with_extra("language", "python");
        let out = populate("Testing", &ctx);
        assert!(out.contains("   1. Unit Testing: Testing individual components in isolation\n      Tools: pytest, unittest"));
        assert!(out.contains("   3. End-to-End Testing"));

        let csharp = GenerationContext::new("x").with_complexity(1);
        let out = populate("Quality Assurance", &csharp);
        assert!(out.contains("Tools: appropriate testing tools"));
        assert!(!out.contains("Integration Testing"));
    }

    #[test]
    fn test_unknown_section_literal() {
        let out = populate("Deployment", &GenerationContext::new("the app"));
        assert_eq!(out, "literal the app");
    }
}
