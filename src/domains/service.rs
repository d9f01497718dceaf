//! Domain Service
//!
//! Resolves a leading role phrase ("As a data analyst, ...", "Copywriter: ...")
//! to a domain and routes section population to the registered strategy.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

use super::{DomainStrategy, builtin_strategies};
use crate::templates::TemplateSection;
use crate::types::{Domain, GenerationContext};

static AS_A_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*as\s+an?\s+([^,.:;]+)(?:[,.:;]|\s+i\s+)").expect("valid role regex")
});

/// Job titles and the domain they imply, in match order
const ROLE_TABLE: &[(&str, Domain)] = &[
    // Software
    ("software developer", Domain::Software),
    ("developer", Domain::Software),
    ("programmer", Domain::Software),
    ("software engineer", Domain::Software),
    ("web developer", Domain::Software),
    ("mobile developer", Domain::Software),
    ("full stack developer", Domain::Software),
    ("backend developer", Domain::Software),
    ("frontend developer", Domain::Software),
    ("devops engineer", Domain::Software),
    // Digital marketing
    ("digital marketer", Domain::Content),
    ("marketing specialist", Domain::Content),
    ("seo specialist", Domain::Content),
    ("social media manager", Domain::Content),
    ("digital marketing manager", Domain::Content),
    ("ppc specialist", Domain::Content),
    ("email marketer", Domain::Content),
    ("marketing analyst", Domain::Business),
    ("growth hacker", Domain::Business),
    // Content creation
    ("content creator", Domain::Content),
    ("content writer", Domain::Content),
    ("copywriter", Domain::Content),
    ("blogger", Domain::Content),
    ("journalist", Domain::Content),
    ("editor", Domain::Content),
    ("content strategist", Domain::Content),
    ("technical writer", Domain::Content),
    // Video
    ("video editor", Domain::Content),
    ("videographer", Domain::Content),
    ("film editor", Domain::Content),
    ("motion graphics designer", Domain::Content),
    ("video producer", Domain::Content),
    // Data analysis
    ("data analyst", Domain::DataAnalysis),
    ("data scientist", Domain::DataAnalysis),
    ("business analyst", Domain::DataAnalysis),
    ("statistician", Domain::DataAnalysis),
    ("data engineer", Domain::DataAnalysis),
    ("researcher", Domain::DataAnalysis),
    ("analyst", Domain::DataAnalysis),
    ("bi analyst", Domain::DataAnalysis),
    ("business intelligence analyst", Domain::DataAnalysis),
];

/// A role phrase found at the start of an objective
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleMatch {
    pub role: String,
    pub domain: Domain,
    /// Objective with the role phrase removed
    pub objective: String,
}

/// Strip `<role>` followed by an optional `:`, `,` or `-` and whitespace.
fn strip_role_prefix<'a>(text: &'a str, role: &str) -> Option<&'a str> {
    let head = text.get(..role.len())?;
    if !head.eq_ignore_ascii_case(role) {
        return None;
    }
    let rest = &text[role.len()..];
    let after_ws = rest.trim_start();
    let mut chars = after_ws.chars();
    if let Some(sep) = chars.next()
        && matches!(sep, ':' | ',' | '-')
        && chars.as_str().starts_with(char::is_whitespace)
    {
        return Some(chars.as_str().trim_start());
    }
    (after_ws.len() < rest.len()).then_some(after_ws)
}

pub struct DomainService {
    roles: Vec<(String, Domain)>,
    strategies: BTreeMap<Domain, Box<dyn DomainStrategy>>,
}

impl Default for DomainService {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainService {
    /// Service with the built-in role table and strategies
    pub fn new() -> Self {
        let mut service = Self::empty();
        service.roles = ROLE_TABLE
            .iter()
            .map(|(role, domain)| (role.to_string(), *domain))
            .collect();
        for strategy in builtin_strategies() {
            service.strategies.insert(strategy.domain(), strategy);
        }
        service
    }

    /// Service with no roles and no strategies
    pub fn empty() -> Self {
        Self {
            roles: Vec::new(),
            strategies: BTreeMap::new(),
        }
    }

    /// Detect a leading role phrase. "As a <role>" is tried first, then a
    /// bare `<role>` prefix.
    pub fn detect_role(&self, objective: &str) -> Option<RoleMatch> {
        let text = objective.trim();

        if let Some(caps) = AS_A_RE.captures(text) {
            let role_text = caps
                .get(1)
                .map(|m| m.as_str().trim().to_lowercase())
                .unwrap_or_default();
            let end = caps.get(0).map(|m| m.end()).unwrap_or(0);
            if let Some((_, domain)) = self
                .roles
                .iter()
                .find(|(role, _)| role_text.contains(role.as_str()) || role.contains(&role_text))
            {
                info!(
                    "Detected 'As a' role pattern '{}', mapped to domain '{}'",
                    role_text, domain
                );
                return Some(RoleMatch {
                    role: role_text,
                    domain: *domain,
                    objective: text[end..].trim().to_string(),
                });
            }
        }

        self.roles.iter().find_map(|(role, domain)| {
            let rest = strip_role_prefix(text, role)?;
            info!("Detected role '{}', mapped to domain '{}'", role, domain);
            Some(RoleMatch {
                role: role.clone(),
                domain: *domain,
                objective: rest.trim().to_string(),
            })
        })
    }

    /// Domain implied by a role phrase plus the stripped objective, or
    /// `(General, objective)` unchanged when no role is present
    pub fn extract_role_from_objective(&self, objective: &str) -> (Domain, String) {
        match self.detect_role(objective) {
            Some(found) => (found.domain, found.objective),
            None => (Domain::General, objective.to_string()),
        }
    }

    /// Rewrite the context when its objective starts with a role phrase:
    /// the domain is overridden and the original objective preserved.
    pub fn apply_role(&self, ctx: &mut GenerationContext) -> Option<RoleMatch> {
        let found = self.detect_role(&ctx.objective)?;
        if ctx.original_objective.is_none() {
            ctx.original_objective = Some(ctx.objective.clone());
        }
        ctx.objective = found.objective.clone();
        ctx.domain = Some(found.domain);
        Some(found)
    }

    /// Fill one section using the strategy for the context's domain
    pub fn populate(&self, section: &TemplateSection, ctx: &GenerationContext) -> String {
        let domain = ctx.domain.unwrap_or_default();
        match self.strategies.get(&domain) {
            Some(strategy) => {
                debug!(
                    "Using {} domain strategy to populate section {}",
                    domain, section.name
                );
                strategy.populate(section, ctx)
            }
            None => {
                warn!(
                    "No strategy found for domain '{}', using basic template substitution",
                    domain
                );
                ctx.render(&section.content_template)
            }
        }
    }

    /// Role detection followed by dispatch. A detected role rewrites the
    /// context in place before the section is filled.
    pub fn populate_section(&self, section: &TemplateSection, ctx: &mut GenerationContext) -> String {
        self.apply_role(ctx);
        self.populate(section, ctx)
    }

    pub fn register_domain_strategy(&mut self, strategy: Box<dyn DomainStrategy>) {
        let domain = strategy.domain();
        self.strategies.insert(domain, strategy);
        info!("Registered new domain strategy for '{}'", domain);
    }

    /// Map a role to a domain. Existing roles are remapped in place so
    /// match order is kept.
    pub fn register_role_mapping(&mut self, role: &str, domain: Domain) {
        if !self.strategies.contains_key(&domain) {
            warn!("Mapping role '{}' to unknown domain '{}'", role, domain);
        }
        let role = role.trim().to_lowercase();
        match self.roles.iter_mut().find(|(existing, _)| *existing == role) {
            Some(entry) => entry.1 = domain,
            None => self.roles.push((role.clone(), domain)),
        }
        info!("Registered new role mapping: '{}' -> '{}'", role, domain);
    }

    pub fn available_domains(&self) -> Vec<Domain> {
        self.strategies.keys().copied().collect()
    }

    pub fn supported_roles(&self) -> Vec<&str> {
        self.roles.iter().map(|(role, _)| role.as_str()).collect()
    }

    pub fn has_strategy(&self, domain: Domain) -> bool {
        self.strategies.contains_key(&domain)
    }
}
