#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub job: String,
    pub api_base: String,
    pub page_limit: i64,
    pub page_offset: i64,
    pub country: String,
    pub refresh_strategy: RefreshStrategy,
    pub search: Option<SearchConfig>,
    pub migrate_on_startup: bool,
}

/// Search store credentials. Present iff SEARCH_HOST is set; indexing is
/// skipped entirely when absent.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub host: String,
    pub username: String,
    pub password: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshStrategy {
    Timestamp,
    Api,
}

impl RefreshStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshStrategy::Timestamp => "timestamp",
            RefreshStrategy::Api => "api",
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => database_url_from_parts()?,
        };

        let job = env_nonempty("JOBFEED_JOB").unwrap_or_else(|| "ingest".to_string());

        let api_base = env_nonempty("JOBFEED_API_BASE")
            .unwrap_or_else(|| "https://www.wanted.co.kr/api/v4/jobs".to_string());

        let page_limit = env_nonempty("JOBFEED_PAGE_LIMIT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        let page_offset = env_nonempty("JOBFEED_PAGE_OFFSET")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);

        let country = env_nonempty("JOBFEED_COUNTRY").unwrap_or_else(|| "kr".to_string());

        let refresh_strategy = match env_nonempty("JOBFEED_REFRESH_STRATEGY").as_deref() {
            None | Some("timestamp") => RefreshStrategy::Timestamp,
            Some("api") => RefreshStrategy::Api,
            Some(other) => {
                anyhow::bail!("JOBFEED_REFRESH_STRATEGY must be 'timestamp' or 'api', got '{other}'")
            }
        };

        let search = match env_nonempty("SEARCH_HOST") {
            Some(host) => {
                let username = env_nonempty("SEARCH_USER")
                    .ok_or_else(|| anyhow::anyhow!("SEARCH_USER is missing (SEARCH_HOST is set)"))?;
                let password = env_nonempty("SEARCH_PASSWORD").ok_or_else(|| {
                    anyhow::anyhow!("SEARCH_PASSWORD is missing (SEARCH_HOST is set)")
                })?;
                Some(SearchConfig {
                    host,
                    username,
                    password,
                })
            }
            None => None,
        };

        let migrate_on_startup = env_bool("JOBFEED_MIGRATE_ON_STARTUP").unwrap_or(false);

        Ok(Self {
            database_url,
            job,
            api_base,
            page_limit,
            page_offset,
            country,
            refresh_strategy,
            search,
            migrate_on_startup,
        })
    }
}

// The original deployment configured the database as separate host/name/user/
// password variables with a fixed port, so both spellings are accepted.
fn database_url_from_parts() -> anyhow::Result<String> {
    let host = require_env("DB_HOST")?;
    let name = require_env("DB_NAME")?;
    let user = require_env("DB_USER")?;
    let password = require_env("DB_PASSWORD")?;
    Ok(format!("postgres://{user}:{password}@{host}:5432/{name}"))
}

fn require_env(key: &str) -> anyhow::Result<String> {
    env_nonempty(key).ok_or_else(|| anyhow::anyhow!("{key} is missing (and DATABASE_URL is unset)"))
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}
