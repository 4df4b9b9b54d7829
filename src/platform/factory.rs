//! Platform service construction

use crate::error::Result;
use crate::platform::{GitHubService, PlatformService};
use crate::types::PlatformConfig;

/// Create a GitHub service for `config`.
///
/// `api_url` overrides the API base (as `GITHUB_API_URL` does in Actions);
/// otherwise it is derived from `config.host`.
pub fn create_platform_service(
    config: &PlatformConfig,
    token: &str,
    api_url: Option<&str>,
) -> Result<Box<dyn PlatformService>> {
    let service = match api_url.filter(|u| !u.trim().is_empty()) {
        Some(url) => GitHubService::with_api_base(token, config.clone(), url)?,
        None => GitHubService::new(
            token,
            config.owner.clone(),
            config.repo.clone(),
            config.host.clone(),
        )?,
    };
    Ok(Box::new(service))
}
