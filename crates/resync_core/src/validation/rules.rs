use crate::models::document::Document;
use crate::models::link::Ln;
use crate::validation::{Finding, Severity, ValidationRule};
use crate::vocab;

// =========================================================================
// RULE: ln-href-required
// "Every link must name a target URL"
// =========================================================================
pub struct LnHrefRequired;

impl ValidationRule for LnHrefRequired {
    fn rule_id(&self) -> &str {
        "ln-href-required"
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();

        let mut check_ln = |ln: &Ln, scope: &str| {
            if ln.href().map_or(true, str::is_empty) {
                findings.push(Finding {
                    rule: self.rule_id().to_string(),
                    severity: Severity::Error,
                    message: format!("{scope} link has no href"),
                    target: ln.rel().map(str::to_owned),
                });
            }
        };

        for ln in document.lns() {
            check_ln(ln, "document-level");
        }
        for entry in document.entries() {
            for ln in entry.lns() {
                check_ln(ln, "entry-level");
            }
        }
        findings
    }
}

// =========================================================================
// RULE: entry-loc-required
// "Every entry must have a non-empty loc"
// =========================================================================
pub struct EntryLocRequired;

impl ValidationRule for EntryLocRequired {
    fn rule_id(&self) -> &str {
        "entry-loc-required"
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (index, entry) in document.entries().iter().enumerate() {
            if entry.loc().map_or(true, str::is_empty) {
                findings.push(Finding {
                    rule: self.rule_id().to_string(),
                    severity: Severity::Error,
                    message: format!("entry {index} has an empty loc"),
                    target: None,
                });
            }
        }
        findings
    }
}

// =========================================================================
// RULE: hash-algorithm-known
// "Hash algorithm identifiers should come from the well-known set"
// =========================================================================
pub struct KnownHashAlgorithm;

impl ValidationRule for KnownHashAlgorithm {
    fn rule_id(&self) -> &str {
        "hash-algorithm-known"
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();

        let mut check_hashes = |algorithms: Vec<&String>, target: Option<&str>| {
            for algorithm in algorithms {
                if !vocab::KNOWN_HASH_ALGORITHMS.contains(&algorithm.as_str()) {
                    findings.push(Finding {
                        rule: self.rule_id().to_string(),
                        severity: Severity::Warning,
                        message: format!("unrecognised hash algorithm '{algorithm}'"),
                        target: target.map(str::to_owned),
                    });
                }
            }
        };

        for ln in document.lns() {
            check_hashes(ln.hashes().keys().collect(), ln.href());
        }
        for entry in document.entries() {
            check_hashes(entry.hashes().keys().collect(), entry.loc());
            for ln in entry.lns() {
                check_hashes(ln.hashes().keys().collect(), ln.href());
            }
        }
        findings
    }
}

// =========================================================================
// RULE: until-without-change-capability
// "until only carries meaning for change-oriented capabilities"
// =========================================================================
pub struct UntilWithoutChangeCapability;

impl ValidationRule for UntilWithoutChangeCapability {
    fn rule_id(&self) -> &str {
        "until-without-change-capability"
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();
        if document.until_time().is_some() && !vocab::is_change_capability(document.capability()) {
            findings.push(Finding {
                rule: self.rule_id().to_string(),
                severity: Severity::Warning,
                message: format!(
                    "until is set on a '{}' document, which is not change-oriented",
                    document.capability()
                ),
                target: None,
            });
        }
        findings
    }
}

// =========================================================================
// RULE: window-order
// "A validity window must not end before it starts"
// =========================================================================
pub struct WindowOrder;

impl ValidationRule for WindowOrder {
    fn rule_id(&self) -> &str {
        "window-order"
    }

    fn check(&self, document: &Document) -> Vec<Finding> {
        let mut findings = Vec::new();
        if let (Some(from), Some(until)) = (document.from_time(), document.until_time()) {
            if until < from {
                findings.push(Finding {
                    rule: self.rule_id().to_string(),
                    severity: Severity::Warning,
                    message: format!(
                        "until ({}) is earlier than from ({})",
                        vocab::format_timestamp(until),
                        vocab::format_timestamp(from)
                    ),
                    target: None,
                });
            }
        }
        findings
    }
}
