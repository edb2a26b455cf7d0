use crate::db::{Result, ResultExt};
use dotenv::{dotenv, from_filename};
use std::env;

pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Database settings read from the environment.
///
/// `.env.<NEWS_ENV>` (default `development`) is loaded before `.env`, and
/// neither overrides variables that are already set.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub pool_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        let profile = env::var("NEWS_ENV").unwrap_or_else(|_| String::from("development"));
        from_filename(format!(".env.{}", profile)).ok();
        dotenv().ok();
        Config::from_vars(env::var("DATABASE_URL").ok(), env::var("DATABASE_POOL_SIZE").ok())
    }

    fn from_vars(database_url: Option<String>, pool_size: Option<String>) -> Result<Config> {
        let database_url = database_url.ok_or(env::VarError::NotPresent)?;
        let pool_size = match pool_size {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .chain_err(|| format!("invalid DATABASE_POOL_SIZE: {:?}", raw))?,
            None => DEFAULT_POOL_SIZE,
        };
        Ok(Config {
            database_url,
            pool_size,
        })
    }
}
