use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use serenity::{
    all::{Command as GlobalCommand, CreateCommand, Http},
    async_trait,
};
use tracing::{debug, error, info, warn};

use super::{Invocation, Module, Platform, RegistrationError, Registrar, Reply};

/// Registry of every loaded module, routing invocations to commands by name.
pub struct CommandHandler {
    pub modules: HashMap<String, Box<dyn Module>>,
    /// command name -> owning module name
    pub routes: HashMap<String, String>,
}

impl CommandHandler {
    fn new() -> CommandHandler {
        Self {
            modules: Default::default(),
            routes: Default::default(),
        }
    }

    pub fn add_module<M: Module + 'static>(&mut self, module: M) {
        for command in module.commands().keys() {
            if let Some(previous) = self
                .routes
                .insert(command.to_string(), module.name().to_string())
            {
                warn!(
                    "command {command} of module {previous} is shadowed by {}",
                    module.name()
                );
            }
        }

        debug!("loaded module {} ({})", module.name(), module.description());
        self.modules
            .insert(module.name().to_string(), Box::new(module));
    }

    pub fn load() -> CommandHandler {
        let mut handler = Self::new();
        handler.register();
        handler
    }

    /// Routes one invocation. Unknown commands are ignored; everything else
    /// is acknowledged and gets exactly one follow-up.
    pub async fn dispatch(
        &self,
        invocation: &Invocation,
        reply: &dyn Reply,
        platform: &dyn Platform,
    ) {
        let commands = match self
            .routes
            .get(&invocation.name)
            .and_then(|module| self.modules.get(module))
        {
            Some(module) => module.commands(),
            None => {
                debug!("ignoring unknown command {}", invocation.name);
                return;
            }
        };

        let command = match commands.get(&invocation.name) {
            Some(command) => command,
            None => return,
        };

        if let Err(e) = reply.acknowledge().await {
            error!("failed to acknowledge /{}: {e}", invocation.name);
            return;
        }

        let content = match command.run(invocation, platform).await {
            Ok(content) => content,
            Err(e) => {
                warn!("/{} failed: {e}", invocation.name);
                e.user_message().to_string()
            }
        };

        if let Err(e) = reply.follow_up(&content).await {
            error!("failed to send follow-up for /{}: {e}", invocation.name);
        }
    }

    /// Slash command definitions of every loaded command, sorted by name.
    pub fn create_commands(&self) -> Vec<CreateCommand> {
        let mut names = self.routes.keys().collect::<Vec<_>>();
        names.sort();

        names
            .into_iter()
            .filter_map(|name| {
                self.modules
                    .get(self.routes.get(name)?)?
                    .commands()
                    .get(name)
                    .map(|command| command.create())
            })
            .collect()
    }
}

/// Bulk-overwrites the global command set over HTTP.
pub struct Registration {
    http: Arc<Http>,
    handler: Arc<CommandHandler>,
}

impl Registration {
    pub fn new(http: Arc<Http>, handler: Arc<CommandHandler>) -> Self {
        Self { http, handler }
    }
}

#[async_trait]
impl Registrar for Registration {
    async fn register_commands(&self) -> Result<Vec<String>, RegistrationError> {
        let registered =
            GlobalCommand::set_global_commands(&self.http, self.handler.create_commands()).await?;

        Ok(registered.into_iter().map(|command| command.name).collect())
    }
}

/// Registers commands, logging the outcome. Failure is never fatal.
pub async fn refresh_commands(registrar: &dyn Registrar) {
    match registrar.register_commands().await {
        Ok(names) => info!("Commands initialized: {names:?}"),
        Err(e) => error!("Something happened registering commands: {e}"),
    }
}

/// Registers commands on the first `ready` only; reconnects and further
/// shards leave the command set alone.
#[derive(Default)]
pub struct StartupRegistration(AtomicBool);

impl StartupRegistration {
    /// Returns whether this call performed the registration.
    pub async fn run(&self, registrar: &dyn Registrar) -> bool {
        if self.0.swap(true, Ordering::SeqCst) {
            debug!("commands already registered this process");
            return false;
        }

        refresh_commands(registrar).await;
        true
    }
}
