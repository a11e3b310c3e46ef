use std::sync::Arc;

use serenity::{
    all::{
        Cache, ChannelId, Colour, CommandInteraction, Context, CreateEmbed, CreateEmbedAuthor,
        CreateInteractionResponseFollowup, CreateMessage, GuildId, Http, Permissions, User,
        UserId,
    },
    async_trait,
    http::HttpError,
};

use super::{BanNotice, Executor, Invocation, Platform, PlatformError, Reply, TargetUser};

/// Discord's JSON error code for "Unknown User".
const UNKNOWN_USER: isize = 10013;

impl From<serenity::Error> for PlatformError {
    fn from(e: serenity::Error) -> Self {
        match &e {
            serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
                if response.error.code == UNKNOWN_USER
                    || response.error.message == "Unknown User" =>
            {
                PlatformError::UnknownUser
            }
            _ => PlatformError::Request(e.to_string()),
        }
    }
}

impl From<&User> for TargetUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            tag: user.tag(),
            avatar_url: user.face(),
        }
    }
}

impl From<&CommandInteraction> for Invocation {
    fn from(command: &CommandInteraction) -> Self {
        Self {
            name: command.data.name.clone(),
            executor: command.member.as_deref().map(|member| Executor {
                id: member.user.id,
                name: member.user.name.clone(),
                avatar_url: member.user.face(),
                permissions: member.permissions.unwrap_or_else(Permissions::empty),
            }),
            options: command
                .data
                .options
                .iter()
                .filter_map(|option| {
                    option
                        .value
                        .as_str()
                        .map(|value| (option.name.clone(), value.to_string()))
                })
                .collect(),
        }
    }
}

impl BanNotice {
    pub fn embed(&self) -> CreateEmbed {
        CreateEmbed::new()
            .author(CreateEmbedAuthor::new(&self.executor_name).icon_url(&self.executor_avatar))
            .title(self.title())
            .thumbnail(&self.target_avatar)
            .description(self.description())
            .colour(Colour::RED)
            .timestamp(self.timestamp)
    }
}

/// Live platform backed by the gateway cache and the REST client.
pub struct DiscordPlatform {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl DiscordPlatform {
    pub fn new(ctx: &Context) -> Self {
        Self {
            http: ctx.http.clone(),
            cache: ctx.cache.clone(),
        }
    }
}

#[async_trait]
impl Platform for DiscordPlatform {
    async fn fetch_user(&self, id: UserId) -> Result<TargetUser, PlatformError> {
        let user = self.http.get_user(id).await?;
        Ok(TargetUser::from(&user))
    }

    async fn guilds(&self) -> Vec<GuildId> {
        self.cache.guilds()
    }

    async fn ban(&self, guild: GuildId, user: UserId, reason: &str) -> Result<(), PlatformError> {
        guild
            .ban_with_reason(&*self.http, user, 0, reason)
            .await
            .map_err(PlatformError::from)
    }

    async fn public_updates_channel(&self, guild: GuildId) -> Option<ChannelId> {
        if let Some(cached) = self.cache.guild(guild) {
            return cached.public_updates_channel_id;
        }

        self.http
            .get_guild(guild)
            .await
            .ok()
            .and_then(|partial| partial.public_updates_channel_id)
    }

    async fn notify(&self, channel: ChannelId, notice: &BanNotice) -> Result<(), PlatformError> {
        channel
            .send_message(&*self.http, CreateMessage::new().embed(notice.embed()))
            .await?;
        Ok(())
    }
}

/// Reply handle for one command interaction.
pub struct InteractionReply<'a> {
    http: &'a Http,
    interaction: &'a CommandInteraction,
}

impl<'a> InteractionReply<'a> {
    pub fn new(http: &'a Http, interaction: &'a CommandInteraction) -> Self {
        Self { http, interaction }
    }
}

#[async_trait]
impl Reply for InteractionReply<'_> {
    async fn acknowledge(&self) -> Result<(), PlatformError> {
        self.interaction.defer(self.http).await?;
        Ok(())
    }

    async fn follow_up(&self, content: &str) -> Result<(), PlatformError> {
        self.interaction
            .create_followup(
                self.http,
                CreateInteractionResponseFollowup::new().content(content),
            )
            .await?;
        Ok(())
    }
}
