//! Shared test fixtures

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::{MergePrCall, MockPlatformService};

use owner_merge::event::EventContext;
use owner_merge::policy::{RuleSet, parse};
use owner_merge::types::PlatformConfig;

/// Policy used by the end-to-end scenarios
pub const SCENARIO_POLICY: &str = "*.js @alice\ndocs/ @bob @carol\n";

/// Config for `octo/widgets` on github.com
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "octo".to_string(),
        repo: "widgets".to_string(),
        host: None,
    }
}

/// Event for PR `pr_number` opened by `submitter`, head SHA known
pub fn pr_event(pr_number: u64, submitter: &str) -> EventContext {
    EventContext {
        repo: github_config(),
        pr_number,
        head_sha: Some(format!("head_sha_{pr_number}")),
        submitter: submitter.to_string(),
    }
}

/// Parse `text`, asserting every line compiled
pub fn rules(text: &str) -> RuleSet {
    let parsed = parse(text);
    assert!(parsed.warnings.is_empty(), "unexpected warnings: {:?}", parsed.warnings);
    parsed.rules
}
