//! Text-level exhaustiveness audit of generated artifacts.
//!
//! Works on the rendered source, not the IR, so it can vet files on disk
//! (`voxelgen check`) that may have been produced by an older generator.
use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::registry::Registry;

static IMPL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^impl(?:<[^>]*>)? (.+?) \{$").unwrap());
static FN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(?:pub )?fn (\w+)\b").unwrap());
static ARM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\([\w:]+::(\w+)\(\w+\), &?[\w:]+::(\w+)\(\w+\)\) =>").unwrap()
});
static FALLBACK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\(a, b\) => Err\(").unwrap());

/// What one generated function contains.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FnReport {
    pub arms: Vec<(String, String)>,
    pub fallbacks: usize,
}

impl FnReport {
    pub fn is_dispatch(&self) -> bool {
        !self.arms.is_empty() || self.fallbacks > 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Finding {
    MissingPairs { function: String, missing: usize },
    DuplicateArm { function: String, left: String, right: String },
    UnknownVariant { function: String, variant: String },
    FallbackCount { function: String, found: usize },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPairs { function, missing } => write!(f, "{function}: {missing} representation pair(s) without an arm"),
            Self::DuplicateArm { function, left, right } => write!(f, "{function}: more than one arm for ({left}, {right})"),
            Self::UnknownVariant { function, variant } => write!(f, "{function}: arm names unregistered variant `{variant}`"),
            Self::FallbackCount { function, found } => write!(f, "{function}: expected one fallback arm, found {found}"),
        }
    }
}

/// Functions keyed by `<impl header>::<fn name>`, in source order.
pub fn scan(source: &str) -> IndexMap<String, FnReport> {
    let mut out = IndexMap::<String, FnReport>::new();
    let mut current_impl = String::new();
    let mut current_fn: Option<String> = None;
    for line in source.lines() {
        if let Some(c) = IMPL_RE.captures(line) {
            current_impl = c[1].to_string();
            current_fn = None;
        } else if let Some(c) = FN_RE.captures(line) {
            let key = format!("{current_impl}::{}", &c[1]);
            out.entry(key.clone()).or_default();
            current_fn = Some(key);
        } else if let Some(key) = &current_fn {
            if let Some(c) = ARM_RE.captures(line) {
                if let Some(r) = out.get_mut(key) {
                    r.arms.push((c[1].to_string(), c[2].to_string()));
                }
            } else if FALLBACK_RE.is_match(line) {
                if let Some(r) = out.get_mut(key) {
                    r.fallbacks += 1;
                }
            }
        }
    }
    out
}

/// Every dispatching function must cover the registry's full pair space
/// exactly once and end in exactly one fallback.
pub fn check(source: &str, registry: &Registry) -> Vec<Finding> {
    let variants: BTreeSet<&str> = registry.representations().iter().map(|r| r.variant).collect();
    let expected = variants.len() * variants.len();
    let mut findings = Vec::new();
    for (function, report) in scan(source) {
        if !report.is_dispatch() {
            continue;
        }
        let mut seen = BTreeSet::new();
        for (l, r) in &report.arms {
            for v in [l, r] {
                if !variants.contains(v.as_str()) {
                    findings.push(Finding::UnknownVariant { function: function.clone(), variant: v.clone() });
                }
            }
            if !seen.insert((l.clone(), r.clone())) {
                findings.push(Finding::DuplicateArm { function: function.clone(), left: l.clone(), right: r.clone() });
            }
        }
        let covered = seen
            .iter()
            .filter(|(l, r)| variants.contains(l.as_str()) && variants.contains(r.as_str()))
            .count();
        if covered < expected {
            findings.push(Finding::MissingPairs { function: function.clone(), missing: expected - covered });
        }
        if report.fallbacks != 1 {
            findings.push(Finding::FallbackCount { function, found: report.fallbacks });
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{generate_arithmetic_extensions, generate_logical_extensions};

    #[test]
    fn generated_logical_artifact_is_clean() {
        let reg = Registry::builtin().unwrap();
        let src = generate_logical_extensions(&reg, "RAI", "RandomAccessibleIntervalLogicalExtensions", "crate").unwrap();
        assert_eq!(check(&src, &reg), Vec::new());
        let report = scan(&src);
        let dispatching = report.values().filter(|r| r.is_dispatch()).count();
        assert_eq!(dispatching, 10); // 5 comparisons × (container, scalar)
        let delegating = report.values().filter(|r| !r.is_dispatch()).count();
        // reverse scalar (5) + 6 primitives × 2 directions × 5 + choose, choose_constants
        assert_eq!(delegating, 5 + 6 * 2 * 5 + 2);
    }

    #[test]
    fn generated_arithmetic_artifact_is_clean() {
        let reg = Registry::builtin().unwrap();
        for c in ["RA", "RAI", "RRA", "RRARI"] {
            let src = generate_arithmetic_extensions(&reg, c, "A", "crate").unwrap();
            assert_eq!(check(&src, &reg), Vec::new(), "{c}");
        }
    }

    #[test]
    fn dropped_arm_is_reported() {
        let reg = Registry::builtin().unwrap();
        let src = generate_logical_extensions(&reg, "RA", "L", "crate").unwrap();
        let needle = "(Self::I32(a), Self::U32(b)) =>";
        let tampered: String = src
            .lines()
            .filter(|l| !(l.contains(needle) && l.contains(">=")))
            .map(|l| format!("{l}\n"))
            .collect();
        let findings = check(&tampered, &reg);
        assert_eq!(findings.len(), 1, "{findings:?}");
        assert!(matches!(&findings[0], Finding::MissingPairs { function, missing: 1 } if function.ends_with("::ge")));
    }

    #[test]
    fn duplicate_unknown_and_fallback_findings() {
        let reg = Registry::builtin().unwrap();
        let src = "impl<'a> X for Y {\n    fn ge(&self, that: &'a Y) -> Self::Output {\n        match (self, that) {\n            (Self::I8(a), Self::I8(b)) => x,\n            (Self::I8(a), Self::I8(b)) => x,\n            (Self::Q9(a), Self::I8(b)) => x,\n        }\n    }\n}\n";
        let findings = check(src, &reg);
        assert!(findings.iter().any(|f| matches!(f, Finding::DuplicateArm { .. })));
        assert!(findings.iter().any(|f| matches!(f, Finding::UnknownVariant { variant, .. } if variant == "Q9")));
        assert!(findings.iter().any(|f| matches!(f, Finding::FallbackCount { found: 0, .. })));
        assert!(findings.iter().any(|f| matches!(f, Finding::MissingPairs { missing: 143, .. })));
    }
}
