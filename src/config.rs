use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub frontend_url: String,
    pub judge0_url: String,
    pub judge0_api_key: Option<String>,
    pub judge0_api_host: Option<String>,
    pub openai_api_key: Option<String>,
    pub public_rps: u32,
    pub interviewer_rps: u32,
    pub sweeper_interval_secs: u64,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let frontend_url = get_env("FRONTEND_URL")?;
        url::Url::parse(&frontend_url)
            .map_err(|e| Error::Config(format!("Invalid FRONTEND_URL: {}", e)))?;

        let judge0_url = get_env("JUDGE0_URL")?;
        url::Url::parse(&judge0_url)
            .map_err(|e| Error::Config(format!("Invalid JUDGE0_URL: {}", e)))?;

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            frontend_url,
            judge0_url,
            judge0_api_key: env::var("JUDGE0_API_KEY").ok(),
            judge0_api_host: env::var("JUDGE0_API_HOST").ok(),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            public_rps: get_env_parse("PUBLIC_RPS")?,
            interviewer_rps: get_env_parse("INTERVIEWER_RPS")?,
            sweeper_interval_secs: get_env_parse_or("SWEEPER_INTERVAL_SECS", 600)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
