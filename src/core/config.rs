use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Token for the GitHub search API. When absent, GitHub sources
    /// are skipped entirely.
    pub github_token: Option<String>,
    /// Token for the GitLab events API. When absent, GitLab sources
    /// are skipped entirely.
    pub gitlab_token: Option<String>,
    pub github_api_url: String,
    pub gitlab_api_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let github_token = env::var("COMMITMAP_GITHUB_TOKEN").ok();
        let gitlab_token = env::var("COMMITMAP_GITLAB_TOKEN").ok();
        let github_api_url = env::var("COMMITMAP_GITHUB_API_URL")
            .unwrap_or_else(|_| "https://api.github.com".to_string());
        let gitlab_api_url = env::var("COMMITMAP_GITLAB_API_URL")
            .unwrap_or_else(|_| "https://gitlab.com/api/v4".to_string());

        Self {
            github_token,
            gitlab_token,
            github_api_url,
            gitlab_api_url,
        }
    }
}
