//! Ownership policy: pattern matching, CODEOWNERS parsing, authorization
//!
//! Everything in this module is synchronous and free of I/O. An evaluation is
//! a pure function of the policy text, the changed files, and the submitter:
//! 1. Parse - `parse` turns policy text into a `RuleSet` (last rule first)
//! 2. Evaluate - `authorize` / `evaluate` reduce the change set to a decision

mod evaluate;
mod parser;
mod pattern;

pub use evaluate::{Decision, Denial, authorize, evaluate};
pub use parser::{ParsedPolicy, PatternWarning, Rule, RuleSet, parse, parse_bytes};
pub use pattern::{Pattern, matches};
