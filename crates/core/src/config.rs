use std::path::PathBuf;

pub const DEFAULT_SOURCE_URL: &str = "https://remoteok.io/api";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_OUTPUT_FILE: &str = "cleaned_jobs.csv";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";
pub const DEFAULT_TOP_N: usize = 10;

/// Where and how to fetch the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub url: String,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Settings for serving the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub input: PathBuf,
    pub bind: String,
    pub top_n: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_OUTPUT_FILE),
            bind: DEFAULT_BIND_ADDR.to_string(),
            top_n: DEFAULT_TOP_N,
        }
    }
}
