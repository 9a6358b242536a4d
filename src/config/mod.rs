use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Postgres connection URL. Without it every collection lives in memory only.
    pub database_url: Option<String>,
    /// Address the HTTP API binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Base URL of the agency's public REST service
    #[serde(default = "default_remote_api_url")]
    pub remote_api_url: String,
    /// Bearer token required by mutating API routes
    pub admin_token: Option<String>,
    /// Password accepted by the back-office login screen
    pub admin_password: Option<String>,
    /// Where the back-office writes its log, since stdout belongs to the terminal UI
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_remote_api_url() -> String {
    "https://api.ardentsoft.uz".to_string()
}

fn default_log_file() -> String {
    "ardent-admin.log".to_string()
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = Self::from_pairs(std::env::vars())?;

        Ok(config)
    }

    /// Build a configuration from explicit key/value pairs instead of the process environment
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter::<_, Config>(pairs)?)
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn admin_token(&self) -> Option<&str> {
        self.admin_token.as_deref().filter(|token| !token.is_empty())
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    dotenv().ok();

    let config = Config::load()?;

    Ok(config)
}
