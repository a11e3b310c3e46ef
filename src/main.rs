use std::sync::Arc;

use peacekeeper::{
    console::{self, ConsoleExit},
    BotOptions, CommandHandler, ConsoleError, DiscordPlatform, InteractionReply, Invocation,
    Registration, StartError, StartupRegistration,
};
use serenity::{all::*, async_trait, Client};
use tokio::io::BufReader;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

struct Handler {
    commands: Arc<CommandHandler>,
    startup: StartupRegistration,
}

#[async_trait]
impl EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let command = match interaction {
            Interaction::Command(command) => command,
            _ => return,
        };

        let invocation = Invocation::from(&command);
        let reply = InteractionReply::new(&ctx.http, &command);
        let platform = DiscordPlatform::new(&ctx);

        self.commands
            .dispatch(&invocation, &reply, &platform)
            .await;
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            "{} is connected! (shard #{})",
            ready.user.tag(),
            ctx.shard_id
        );

        ctx.http.set_application_id(ready.application.id);
        self.startup
            .run(&Registration::new(ctx.http.clone(), self.commands.clone()))
            .await;
    }
}

/// Runs the operator console until `stop`, then shuts every shard down.
async fn console_task(
    registration: Registration,
    shard_manager: Arc<ShardManager>,
) -> Result<(), ConsoleError> {
    match console::run(BufReader::new(tokio::io::stdin()), &registration).await? {
        ConsoleExit::Stop => {
            shard_manager.shutdown_all().await;
            Ok(())
        }
        ConsoleExit::Closed => {
            warn!("console input closed, the bot keeps running without it");
            std::future::pending().await
        }
    }
}

async fn start() -> Result<i32, StartError> {
    let options = BotOptions::resolve()?;
    let commands = Arc::new(CommandHandler::load());

    let mut client = Client::builder(&options.token, GatewayIntents::GUILDS)
        .event_handler(Handler {
            commands: commands.clone(),
            startup: StartupRegistration::default(),
        })
        .await?;

    let console = tokio::spawn(console_task(
        Registration::new(client.http.clone(), commands),
        client.shard_manager.clone(),
    ));

    tokio::select! {
        started = client.start() => {
            started?;
            Ok(0)
        }
        joined = console => match joined {
            Ok(Ok(())) => Ok(0),
            Ok(Err(e)) => {
                error!("Something happened while listening to console: {e}");
                Ok(1)
            }
            Err(e) => {
                error!("console task died: {e}");
                Ok(1)
            }
        },
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let code = match start().await {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            1
        }
    };

    // a pending stdin read would otherwise hold up runtime shutdown
    std::process::exit(code);
}
