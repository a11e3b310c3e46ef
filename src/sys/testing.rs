//! In-memory stand-ins for the platform seams, shared by unit tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use serenity::{
    all::{ChannelId, GuildId, Permissions, UserId},
    async_trait,
};

use super::{
    BanNotice, Executor, Platform, PlatformError, RegistrationError, Registrar, Reply, TargetUser,
};

pub fn executor(permissions: Permissions) -> Executor {
    Executor {
        id: UserId::new(7),
        name: "moderator".to_string(),
        avatar_url: "https://cdn.example/moderator.png".to_string(),
        permissions,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    FetchUser(UserId),
    Guilds,
    Ban(GuildId, UserId, String),
    UpdatesChannel(GuildId),
    Notify(ChannelId, BanNotice),
}

pub struct FakeGuild {
    pub id: GuildId,
    pub updates_channel: Option<ChannelId>,
    pub ban_error: Option<PlatformError>,
    pub notify_error: Option<PlatformError>,
}

impl FakeGuild {
    pub fn new(id: GuildId) -> Self {
        Self {
            id,
            updates_channel: None,
            ban_error: None,
            notify_error: None,
        }
    }
}

#[derive(Default)]
pub struct FakePlatform {
    pub users: HashMap<UserId, TargetUser>,
    pub guilds: Vec<FakeGuild>,
    pub fetch_error: Option<PlatformError>,
    calls: Mutex<Vec<Call>>,
}

impl FakePlatform {
    pub fn with_guilds(ids: impl IntoIterator<Item = GuildId>) -> Self {
        Self {
            guilds: ids.into_iter().map(FakeGuild::new).collect(),
            ..Default::default()
        }
    }

    pub fn add_user(&mut self, id: UserId, tag: &str) {
        self.users.insert(
            id,
            TargetUser {
                id,
                tag: tag.to_string(),
                avatar_url: format!("https://cdn.example/{id}.png"),
            },
        );
    }

    pub fn guild_mut(&mut self, id: GuildId) -> &mut FakeGuild {
        self.guilds
            .iter_mut()
            .find(|guild| guild.id == id)
            .expect("no such fake guild")
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn bans(&self) -> Vec<GuildId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Ban(guild, _, _) => Some(guild),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<ChannelId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Notify(channel, _) => Some(channel),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn guild(&self, id: GuildId) -> Option<&FakeGuild> {
        self.guilds.iter().find(|guild| guild.id == id)
    }
}

#[async_trait]
impl Platform for FakePlatform {
    async fn fetch_user(&self, id: UserId) -> Result<TargetUser, PlatformError> {
        self.record(Call::FetchUser(id));
        if let Some(e) = self.fetch_error.clone() {
            return Err(e);
        }
        self.users.get(&id).cloned().ok_or(PlatformError::UnknownUser)
    }

    async fn guilds(&self) -> Vec<GuildId> {
        self.record(Call::Guilds);
        self.guilds.iter().map(|guild| guild.id).collect()
    }

    async fn ban(&self, guild: GuildId, user: UserId, reason: &str) -> Result<(), PlatformError> {
        self.record(Call::Ban(guild, user, reason.to_string()));
        match self.guild(guild).and_then(|guild| guild.ban_error.clone()) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn public_updates_channel(&self, guild: GuildId) -> Option<ChannelId> {
        self.record(Call::UpdatesChannel(guild));
        self.guild(guild).and_then(|guild| guild.updates_channel)
    }

    async fn notify(&self, channel: ChannelId, notice: &BanNotice) -> Result<(), PlatformError> {
        self.record(Call::Notify(channel, notice.clone()));
        match self
            .guilds
            .iter()
            .find(|guild| guild.updates_channel == Some(channel))
            .and_then(|guild| guild.notify_error.clone())
        {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sent {
    Acknowledge,
    FollowUp(String),
}

#[derive(Default)]
pub struct FakeReply {
    fail_acknowledge: bool,
    sent: Mutex<Vec<Sent>>,
}

impl FakeReply {
    pub fn failing_acknowledge() -> Self {
        Self {
            fail_acknowledge: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn follow_ups(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::FollowUp(content) => Some(content),
                Sent::Acknowledge => None,
            })
            .collect()
    }
}

#[async_trait]
impl Reply for FakeReply {
    async fn acknowledge(&self) -> Result<(), PlatformError> {
        if self.fail_acknowledge {
            return Err(PlatformError::Request("Unknown interaction".to_string()));
        }

        self.sent.lock().unwrap().push(Sent::Acknowledge);
        Ok(())
    }

    async fn follow_up(&self, content: &str) -> Result<(), PlatformError> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::FollowUp(content.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeRegistrar {
    fail: bool,
    calls: AtomicUsize,
}

impl FakeRegistrar {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Registrar for FakeRegistrar {
    async fn register_commands(&self) -> Result<Vec<String>, RegistrationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(serenity::Error::Other("registration rejected").into());
        }

        Ok(vec!["globalban".to_string(), "ping".to_string()])
    }
}
