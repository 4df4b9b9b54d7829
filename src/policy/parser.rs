//! CODEOWNERS parsing
//!
//! Lines are `<pattern> <owner>...`; full-line `#` comments and blank lines
//! are skipped. A line whose pattern fails to compile is dropped and reported
//! as a warning rather than failing the whole file.

use crate::error::{Error, Result};
use crate::policy::pattern::Pattern;
use tracing::{debug, warn};

/// One `(pattern, owners)` entry from the policy file
#[derive(Debug, Clone)]
pub struct Rule {
    /// Pattern text as written
    pub pattern: String,
    /// Owner tokens as written, `@` prefix included when present
    pub owners: Vec<String>,
    /// 1-based line number in the policy file
    pub line: usize,
    matcher: Pattern,
}

impl Rule {
    /// Build a rule, compiling its pattern
    pub fn new(pattern: &str, owners: Vec<String>, line: usize) -> Result<Self> {
        Ok(Self {
            matcher: Pattern::compile(pattern)?,
            pattern: pattern.to_string(),
            owners,
            line,
        })
    }

    /// Whether this rule's pattern covers `path`
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }
}

/// Rules in evaluation order: last declared first
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build from rules in declaration (file) order
    pub fn from_declared(mut rules: Vec<Rule>) -> Self {
        rules.reverse();
        Self { rules }
    }

    /// Rules in evaluation order
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rule that decides `path`: the first match in evaluation order
    pub fn first_match(&self, path: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A policy line that was dropped because its pattern did not compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternWarning {
    /// 1-based line number
    pub line: usize,
    /// The pattern text
    pub pattern: String,
    /// Compiler message
    pub reason: String,
}

impl std::fmt::Display for PatternWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: ignoring pattern '{}': {}",
            self.line, self.pattern, self.reason
        )
    }
}

/// Output of [`parse`]
#[derive(Debug, Clone, Default)]
pub struct ParsedPolicy {
    /// Usable rules
    pub rules: RuleSet,
    /// Lines dropped for invalid patterns
    pub warnings: Vec<PatternWarning>,
}

/// Parse policy text into a rule set
pub fn parse(text: &str) -> ParsedPolicy {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rules = Vec::new();
    let mut warnings = Vec::new();

    for (idx, line) in split_lines(text).enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        let Some(pattern) = tokens.next() else {
            continue;
        };
        let owners: Vec<String> = tokens.map(String::from).collect();

        match Rule::new(pattern, owners, line_no) {
            Ok(rule) => rules.push(rule),
            Err(Error::PatternInvalid { pattern, reason }) => {
                let warning = PatternWarning {
                    line: line_no,
                    pattern,
                    reason,
                };
                warn!("{warning}");
                warnings.push(warning);
            }
            Err(e) => {
                warn!(line = line_no, error = %e, "ignoring policy line");
            }
        }
    }

    let rules = RuleSet::from_declared(rules);
    debug!(
        rules = rules.len(),
        warnings = warnings.len(),
        "parsed ownership policy"
    );
    ParsedPolicy { rules, warnings }
}

/// Parse raw policy bytes; fails only when they are not UTF-8
pub fn parse_bytes(bytes: &[u8]) -> Result<ParsedPolicy> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::ConfigMalformed(format!("policy is not valid UTF-8: {e}")))?;
    Ok(parse(text))
}

/// Split on `\r\n`, `\n` or a lone `\r`
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').flat_map(|line| {
        let line = line.strip_suffix('\r').unwrap_or(line);
        line.split('\r')
    })
}
