//! Authorization - pure evaluation of a change set against a rule set
//!
//! Fail-fast: evaluation stops at the first file the submitter cannot
//! approve, so later files are never examined.

use crate::policy::parser::{Rule, RuleSet};
use tracing::debug;

/// Why a change set was not authorized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// No rule matches the file
    Uncovered {
        /// The uncovered file
        file: String,
    },
    /// The deciding rule does not list the submitter
    NotOwner {
        /// The file being checked
        file: String,
        /// Pattern of the deciding rule
        pattern: String,
        /// Line of the deciding rule
        line: usize,
    },
}

impl Denial {
    /// The file that stopped evaluation
    pub fn file(&self) -> &str {
        match self {
            Self::Uncovered { file } | Self::NotOwner { file, .. } => file,
        }
    }
}

impl std::fmt::Display for Denial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uncovered { file } => write!(f, "'{file}' is not covered by any rule"),
            Self::NotOwner {
                file,
                pattern,
                line,
            } => write!(
                f,
                "'{file}' is owned by rule '{pattern}' (line {line}), which does not list the submitter"
            ),
        }
    }
}

/// Outcome of an evaluation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decision {
    denial: Option<Denial>,
}

impl Decision {
    /// Every file is approvable by the submitter
    pub const fn allow() -> Self {
        Self { denial: None }
    }

    /// Evaluation stopped on `denial`
    pub const fn deny(denial: Denial) -> Self {
        Self {
            denial: Some(denial),
        }
    }

    /// The boolean gate
    pub const fn is_authorized(&self) -> bool {
        self.denial.is_none()
    }

    /// Reason for denial, if denied
    pub const fn denial(&self) -> Option<&Denial> {
        self.denial.as_ref()
    }
}

/// Evaluate `changes` in order, reporting why the first unauthorized file fails.
///
/// An empty change set is authorized.
pub fn evaluate<I, S>(submitter: &str, rules: &RuleSet, changes: I) -> Decision
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for file in changes {
        let file = file.as_ref();

        let Some(rule) = find_rule(rules, file) else {
            debug!(file, "no rule matches");
            return Decision::deny(Denial::Uncovered {
                file: file.to_string(),
            });
        };

        if !lists_owner(rule, submitter) {
            return Decision::deny(Denial::NotOwner {
                file: file.to_string(),
                pattern: rule.pattern.clone(),
                line: rule.line,
            });
        }
    }

    Decision::allow()
}

/// Whether `submitter` may approve every file in `changes`
pub fn authorize<I, S>(submitter: &str, rules: &RuleSet, changes: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    evaluate(submitter, rules, changes).is_authorized()
}

fn find_rule<'a>(rules: &'a RuleSet, file: &str) -> Option<&'a Rule> {
    for rule in rules {
        debug!(file, pattern = %rule.pattern, "matching file against rule");
        if rule.matches(file) {
            debug!(file, pattern = %rule.pattern, line = rule.line, "glob match");
            return Some(rule);
        }
    }
    None
}

fn lists_owner(rule: &Rule, submitter: &str) -> bool {
    for owner in &rule.owners {
        let owner = owner.strip_prefix('@').unwrap_or(owner);
        debug!(owner, submitter, "matching owner");
        if owner == submitter {
            return true;
        }
    }
    false
}
