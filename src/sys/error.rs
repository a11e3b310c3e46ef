use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure reported by a call out to the chat platform.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform does not know the user the call referred to.
    #[error("Unknown User")]
    UnknownUser,

    #[error("{0}")]
    Request(String),
}

/// Ways the global ban can fail, each with one fixed reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BanError {
    #[error("executor lacks the ban members permission")]
    PermissionDenied,

    #[error("target does not resolve to a user")]
    UnknownTarget,

    #[error("ban failed: {0}")]
    GenericBanFailure(PlatformError),
}

impl BanError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "You don't have permission to use this, buddy.",
            Self::UnknownTarget => "Are you gonna supply an ACTUAL user id?",
            Self::GenericBanFailure(_) => "SOMETHING went wrong when banning...",
        }
    }
}

/// Error returned by a command run, turned into a follow-up by the dispatcher.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Ban(#[from] BanError),
}

impl CommandError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Ban(e) => e.user_message(),
        }
    }
}

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("failed to overwrite global commands: {0}")]
    Overwrite(#[from] serenity::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not locate a config directory for this platform")]
    NoConfigDir,

    #[error("config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),

    /// No usable bot token in the config file or the environment.
    #[error("bot token is not set, edit {0} or set PEACEKEEPER_TOKEN")]
    TokenUnset(PathBuf),
}

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("failed to read console input: {0}")]
    Read(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum StartError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("discord client error: {0}")]
    Client(#[from] serenity::Error),
}
