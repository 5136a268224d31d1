use crate::error::{Error, Result};

/// Load environment variables from a .env file in the current directory, if present.
pub fn load_env() {
    let _ = dotenvy::dotenv();
}

/// Runtime configuration, resolved once at startup and passed by parameter.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
}

impl Config {
    /// Read the YouTube Data API key from the environment.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("YOUTUBE_API_KEY").map_err(|_| Error::ApiKeyMissing)?;
        if api_key.is_empty() {
            return Err(Error::ApiKeyMissing);
        }
        Ok(Self { api_key })
    }
}
