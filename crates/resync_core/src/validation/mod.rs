//! Structural checks over a built document graph.
//!
//! These are advisory: setters never reject, projection never consults
//! the engine. They cover the model's own invariants, not sitemap-protocol
//! conformance against an XML schema.

use serde::Serialize;

use crate::models::document::Document;

pub mod rules;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

// The structure of a failure
#[derive(Clone, Debug, Serialize)]
pub struct Finding {
    pub rule: String,
    pub severity: Severity,
    pub message: String,
    // Which node failed: an entry loc or a link href, when one exists.
    pub target: Option<String>,
}

// The contract every rule must fulfill
pub trait ValidationRule {
    fn rule_id(&self) -> &str;
    fn check(&self, document: &Document) -> Vec<Finding>;
}

// The engine that holds the registry of rules
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule<R: ValidationRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn run(&self, document: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();
        for rule in &self.rules {
            let mut rule_findings = rule.check(document);
            findings.append(&mut rule_findings);
        }
        findings
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}
