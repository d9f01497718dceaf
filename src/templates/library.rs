//! Template Library
//!
//! Name-keyed registry of templates, iterated in registration order.
//! Built-in templates are embedded at compile time; additional YAML files can
//! be loaded from a directory, with later registrations overriding earlier
//! ones of the same name in place.

use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use super::PromptTemplate;
use crate::types::{Domain, PromptError, Result};

/// Embedded template sources (file name, YAML)
const BUILTIN_SOURCES: &[(&str, &str)] = &[
    ("general.yaml", include_str!("builtin/general.yaml")),
    ("software.yaml", include_str!("builtin/software.yaml")),
    ("content.yaml", include_str!("builtin/content.yaml")),
    ("business.yaml", include_str!("builtin/business.yaml")),
    ("data_analysis.yaml", include_str!("builtin/data_analysis.yaml")),
];

#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: IndexMap<String, PromptTemplate>,
}

impl TemplateLibrary {
    /// Empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Library preloaded with the embedded templates
    pub fn with_builtin() -> Result<Self> {
        let mut library = Self::new();
        for (name, source) in BUILTIN_SOURCES {
            for template in parse_templates(source, name)? {
                library.register(template);
            }
        }
        debug!("Loaded {} built-in templates", library.len());
        Ok(library)
    }

    /// Register a template. A template with the same name is replaced but
    /// keeps its original position.
    pub fn register(&mut self, template: PromptTemplate) {
        if self.templates.contains_key(&template.name) {
            debug!("Overriding template '{}'", template.name);
        }
        self.templates.insert(template.name.clone(), template);
    }

    pub fn get(&self, name: &str) -> Option<&PromptTemplate> {
        self.templates.get(name)
    }

    pub fn require(&self, name: &str) -> Result<&PromptTemplate> {
        self.get(name)
            .ok_or_else(|| PromptError::UnknownTemplate(name.to_string()))
    }

    /// Template names in registration order
    pub fn list(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PromptTemplate> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Templates whose domain matches exactly and whose range covers
    /// `complexity`, in registration order
    pub fn find_templates(&self, domain: Domain, complexity: u8) -> Vec<&PromptTemplate> {
        self.templates
            .values()
            .filter(|t| t.is_suitable(domain, complexity))
            .collect()
    }

    /// Load every `.yaml`/`.yml` file in `dir`.
    ///
    /// A file holding a list registers each entry; a mapping registers one
    /// template. Files that fail to parse or validate are logged and skipped.
    /// Returns the number of templates registered.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.is_file()
                    && p.extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e == "yaml" || e == "yml")
            })
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match self.load_file(&path) {
                Ok(count) => loaded += count,
                Err(e) => warn!("Skipping template file: {}", e),
            }
        }
        info!("Loaded {} templates from {}", loaded, dir.display());
        Ok(loaded)
    }

    /// Load one YAML file; nothing is registered if any entry is invalid
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let display = path.display().to_string();
        let source = std::fs::read_to_string(path)
            .map_err(|e| PromptError::template_load(&display, e.to_string()))?;
        let templates = parse_templates(&source, &display)?;
        let count = templates.len();
        for template in templates {
            self.register(template);
        }
        Ok(count)
    }
}

fn parse_templates(source: &str, origin: &str) -> Result<Vec<PromptTemplate>> {
    let value: serde_yaml::Value = serde_yaml::from_str(source)
        .map_err(|e| PromptError::template_load(origin, e.to_string()))?;

    let entries = match value {
        serde_yaml::Value::Sequence(items) => items,
        serde_yaml::Value::Mapping(_) => vec![value],
        _ => {
            return Err(PromptError::template_load(
                origin,
                "expected a template mapping or a list of templates",
            ));
        }
    };

    entries
        .into_iter()
        .map(|entry| {
            let template: PromptTemplate = serde_yaml::from_value(entry)
                .map_err(|e| PromptError::template_load(origin, e.to_string()))?;
            template.validate()?;
            Ok(template)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_templates_cover_core_domains() {
        let library = TemplateLibrary::with_builtin().unwrap();
        for domain in [
            Domain::Software,
            Domain::Content,
            Domain::Business,
            Domain::DataAnalysis,
            Domain::General,
        ] {
            for complexity in 1..=5 {
                assert!(
                    !library.find_templates(domain, complexity).is_empty(),
                    "no built-in template for {} at {}",
                    domain,
                    complexity
                );
            }
        }
    }

    #[test]
    fn test_register_overrides_by_name() {
        let mut library = TemplateLibrary::new();
        library.register(PromptTemplate::new("t", Domain::Software, (1, 3)));
        library.register(PromptTemplate::new("t", Domain::Content, (1, 3)));
        assert_eq!(library.len(), 1);
        assert_eq!(library.get("t").unwrap().domain, Domain::Content);
    }

    #[test]
    fn test_registration_order_is_kept() {
        let mut library = TemplateLibrary::new();
        library.register(PromptTemplate::new("zeta", Domain::Software, (1, 3)));
        library.register(PromptTemplate::new("alpha", Domain::Software, (1, 3)));
        library.register(PromptTemplate::new("zeta", Domain::Software, (1, 5)));

        assert_eq!(library.list(), vec!["zeta", "alpha"]);
        let found: Vec<&str> = library
            .find_templates(Domain::Software, 2)
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(found, vec!["zeta", "alpha"]);
        assert_eq!(library.get("zeta").unwrap().complexity_range, (1, 5));
    }

    #[test]
    fn test_require_unknown() {
        let library = TemplateLibrary::new();
        assert!(matches!(
            library.require("missing"),
            Err(PromptError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_load_dir_list_and_mapping() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("many.yaml"),
            "- name: one\n  domain: software\n- name: two\n  domain: content\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("single.yml"),
            "name: three\ndomain: business\ncomplexity_range: [2, 4]\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut library = TemplateLibrary::new();
        let loaded = library.load_dir(dir.path()).unwrap();

        assert_eq!(loaded, 3);
        assert_eq!(library.list(), vec!["one", "two", "three"]);
        assert_eq!(library.get("three").unwrap().complexity_range, (2, 4));
    }

    #[test]
    fn test_load_dir_skips_invalid_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.yaml"), "name: [unclosed").unwrap();
        std::fs::write(
            dir.path().join("range.yaml"),
            "name: inverted\ncomplexity_range: [5, 1]\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("good.yaml"), "name: good\n").unwrap();

        let mut library = TemplateLibrary::new();
        assert_eq!(library.load_dir(dir.path()).unwrap(), 1);
        assert!(library.get("good").is_some());
        assert!(library.get("inverted").is_none());
    }

    #[test]
    fn test_find_templates_exact_domain() {
        let mut library = TemplateLibrary::new();
        library.register(PromptTemplate::new("a", Domain::Software, (1, 3)));
        library.register(PromptTemplate::new("b", Domain::General, (1, 5)));

        let found = library.find_templates(Domain::Software, 2);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "a");
        assert!(library.find_templates(Domain::Software, 4).is_empty());
    }
}
