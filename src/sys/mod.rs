mod command;
mod config;
pub mod console;
mod discord;
mod error;
mod handler;
mod module;
mod options;
mod platform;

#[cfg(test)]
pub(crate) mod testing;

pub use command::*;
pub use config::Config;
pub use discord::{DiscordPlatform, InteractionReply};
pub use error::*;
pub use handler::{refresh_commands, CommandHandler, Registration, StartupRegistration};
pub use module::Module;
pub use options::*;
pub use platform::*;
