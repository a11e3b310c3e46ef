use std::collections::HashMap;

use serenity::{
    all::{CreateCommand, CreateCommandOption},
    async_trait,
};

use super::{CommandError, Executor, Platform};

/// One inbound slash command invocation, stripped down to what commands read.
#[derive(Clone, Debug, Default)]
pub struct Invocation {
    pub name: String,
    /// `None` when invoked outside a guild.
    pub executor: Option<Executor>,
    pub options: HashMap<String, String>,
}

impl Invocation {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn executor(mut self, executor: Executor) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn option(mut self, name: &str, value: &str) -> Self {
        self.options.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }
}

#[async_trait]
pub trait Command: Sync + Send {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    fn options(&self) -> Vec<CreateCommandOption> {
        Vec::new()
    }

    fn create(&self) -> CreateCommand {
        CreateCommand::new(self.name())
            .description(self.description())
            .set_options(self.options())
    }

    /// Runs the command after the interaction has been acknowledged and
    /// returns the content of the follow-up.
    async fn run(&self, invocation: &Invocation, platform: &dyn Platform)
        -> Result<String, CommandError>;
}
