use serenity::{
    all::{ChannelId, GuildId, Permissions, Timestamp, UserId},
    async_trait,
};

use super::{PlatformError, RegistrationError};

/// The member who invoked a command, as seen from the guild it was invoked in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Executor {
    pub id: UserId,
    pub name: String,
    pub avatar_url: String,
    pub permissions: Permissions,
}

impl Executor {
    pub fn can_ban(&self) -> bool {
        self.permissions
            .intersects(Permissions::BAN_MEMBERS | Permissions::ADMINISTRATOR)
    }
}

/// A resolved user record for a ban target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetUser {
    pub id: UserId,
    pub tag: String,
    pub avatar_url: String,
}

/// Notice posted to a guild's public updates channel after a ban.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BanNotice {
    pub executor_name: String,
    pub executor_avatar: String,
    pub target_tag: String,
    pub target_id: UserId,
    pub target_avatar: String,
    pub reason: String,
    pub timestamp: Timestamp,
}

impl BanNotice {
    pub fn title(&self) -> String {
        format!(
            "User `{}` (ID: `{}`) has been banned across all servers",
            self.target_tag, self.target_id
        )
    }

    pub fn description(&self) -> String {
        format!("**Reason:** {}", self.reason)
    }
}

/// Outbound calls the moderation commands make against the chat platform.
#[async_trait]
pub trait Platform: Sync + Send {
    async fn fetch_user(&self, id: UserId) -> Result<TargetUser, PlatformError>;

    /// Guilds the bot is currently a member of, in no particular order.
    async fn guilds(&self) -> Vec<GuildId>;

    async fn ban(&self, guild: GuildId, user: UserId, reason: &str) -> Result<(), PlatformError>;

    async fn public_updates_channel(&self, guild: GuildId) -> Option<ChannelId>;

    async fn notify(&self, channel: ChannelId, notice: &BanNotice) -> Result<(), PlatformError>;
}

/// Response handle of a single interaction.
#[async_trait]
pub trait Reply: Sync + Send {
    async fn acknowledge(&self) -> Result<(), PlatformError>;

    async fn follow_up(&self, content: &str) -> Result<(), PlatformError>;
}

/// Pushes the command set to the platform, replacing whatever was there.
#[async_trait]
pub trait Registrar: Sync + Send {
    async fn register_commands(&self) -> Result<Vec<String>, RegistrationError>;
}
