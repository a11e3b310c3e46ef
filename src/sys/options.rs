use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_default::DefaultFromSerde;
use serde_inline_default::serde_inline_default;

use super::{Config, ConfigError};

pub const TOKEN_ENV: &str = "PEACEKEEPER_TOKEN";
const PLACEHOLDER_TOKEN: &str = "CHANGE ME";

#[serde_inline_default]
#[derive(Serialize, Deserialize, DefaultFromSerde, Debug)]
pub struct BotOptions {
    #[serde_inline_default(PLACEHOLDER_TOKEN.to_string())]
    pub token: String,
}

impl Config for BotOptions {
    const NAME: &'static str = "peacekeeper";
    const NOTE: &'static str =
        "Peacekeeper bot options\nThe token can also be supplied through PEACEKEEPER_TOKEN";
}

impl BotOptions {
    pub fn resolve() -> Result<Self, ConfigError> {
        Self::resolve_from(&Self::path()?, std::env::var(TOKEN_ENV).ok())
    }

    /// Loads the options at `path`; a non-blank `env_token` overrides the file.
    pub fn resolve_from(path: &Path, env_token: Option<String>) -> Result<Self, ConfigError> {
        let mut options = Self::load_from(path)?;

        if let Some(token) = env_token.filter(|token| !token.trim().is_empty()) {
            options.token = token;
        }

        options.token = options.token.trim().to_string();

        if options.token.is_empty() || options.token == PLACEHOLDER_TOKEN {
            return Err(ConfigError::TokenUnset(path.to_path_buf()));
        }

        Ok(options)
    }
}
