//! Cross-guild ban fan-out.
//!
//! A [`BanRequest`] only exists once the executor has passed the permission
//! gate. [`execute_ban`] then resolves the target and applies the ban in every
//! guild the bot can see. Each guild's ban is the primary effect; posting a
//! notice to the guild's public updates channel is a secondary effect whose
//! failure is logged and recorded in [`NoticeOutcome`], never returned.

use serenity::{
    all::{ChannelId, GuildId, Timestamp, UserId},
    futures::future::join_all,
};
use tracing::{info, warn};

use crate::{BanError, BanNotice, Executor, Platform, PlatformError, TargetUser};

pub const DEFAULT_REASON: &str = "<No Reason Specified>";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BanRequest {
    pub target: UserId,
    pub reason: String,
    pub executor: Executor,
}

impl BanRequest {
    /// Checks the executor's permission, then parses the target id.
    pub fn authorize(
        executor: Option<&Executor>,
        userid: Option<&str>,
        reason: Option<&str>,
    ) -> Result<Self, BanError> {
        let executor = executor
            .filter(|executor| executor.can_ban())
            .ok_or(BanError::PermissionDenied)?;

        let target = userid
            .and_then(parse_user_id)
            .ok_or(BanError::UnknownTarget)?;

        Ok(Self {
            target,
            reason: reason
                .map(str::trim)
                .filter(|reason| !reason.is_empty())
                .unwrap_or(DEFAULT_REASON)
                .to_string(),
            executor: executor.clone(),
        })
    }
}

fn parse_user_id(raw: &str) -> Option<UserId> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(UserId::new)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoticeOutcome {
    /// The ban failed, so nothing was announced.
    Skipped,
    NoChannel,
    Posted(ChannelId),
    Failed(ChannelId, PlatformError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BanOutcome {
    pub guild: GuildId,
    pub ban: Result<(), PlatformError>,
    pub notice: NoticeOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BanSummary {
    pub target: TargetUser,
    pub reason: String,
    pub outcomes: Vec<BanOutcome>,
}

impl BanSummary {
    pub fn message(&self) -> String {
        format!(
            "User `{}` (ID: `{}`) has been banned across all servers for: \"{}\"",
            self.target.tag, self.target.id, self.reason
        )
    }

    pub fn notices_posted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.notice, NoticeOutcome::Posted(_)))
            .count()
    }

    /// Guilds that were banned from but whose notice could not be posted.
    pub fn notices_failed(&self) -> Vec<GuildId> {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.notice, NoticeOutcome::Failed(..)))
            .map(|outcome| outcome.guild)
            .collect()
    }
}

pub async fn execute_ban(
    platform: &dyn Platform,
    request: &BanRequest,
) -> Result<BanSummary, BanError> {
    let target = platform
        .fetch_user(request.target)
        .await
        .map_err(|e| match e {
            PlatformError::UnknownUser => BanError::UnknownTarget,
            e => BanError::GenericBanFailure(e),
        })?;

    let notice = BanNotice {
        executor_name: request.executor.name.clone(),
        executor_avatar: request.executor.avatar_url.clone(),
        target_tag: target.tag.clone(),
        target_id: target.id,
        target_avatar: target.avatar_url.clone(),
        reason: request.reason.clone(),
        timestamp: Timestamp::now(),
    };

    let guilds = platform.guilds().await;
    info!(
        "{} ({}) is banning {} ({}) from {} guilds",
        request.executor.name,
        request.executor.id,
        target.tag,
        target.id,
        guilds.len()
    );

    let outcomes = join_all(
        guilds
            .into_iter()
            .map(|guild| ban_in(platform, guild, request, &notice)),
    )
    .await;

    if outcomes
        .iter()
        .any(|outcome| matches!(outcome.ban, Err(PlatformError::UnknownUser)))
    {
        return Err(BanError::UnknownTarget);
    }

    if let Some(e) = outcomes.iter().find_map(|outcome| outcome.ban.clone().err()) {
        return Err(BanError::GenericBanFailure(e));
    }

    let summary = BanSummary {
        target,
        reason: request.reason.clone(),
        outcomes,
    };

    let failed = summary.notices_failed();
    info!(
        "banned {} in {} guilds, {} notices posted, {} failed {failed:?}",
        summary.target.id,
        summary.outcomes.len(),
        summary.notices_posted(),
        failed.len()
    );

    Ok(summary)
}

async fn ban_in(
    platform: &dyn Platform,
    guild: GuildId,
    request: &BanRequest,
    notice: &BanNotice,
) -> BanOutcome {
    let ban = platform.ban(guild, request.target, &request.reason).await;

    let notice = match &ban {
        Ok(()) => announce(platform, guild, notice).await,
        Err(e) => {
            warn!("failed to ban {} in guild {guild}: {e}", request.target);
            NoticeOutcome::Skipped
        }
    };

    BanOutcome { guild, ban, notice }
}

async fn announce(platform: &dyn Platform, guild: GuildId, notice: &BanNotice) -> NoticeOutcome {
    let channel = match platform.public_updates_channel(guild).await {
        Some(channel) => channel,
        None => return NoticeOutcome::NoChannel,
    };

    match platform.notify(channel, notice).await {
        Ok(()) => NoticeOutcome::Posted(channel),
        Err(e) => {
            warn!("could not post ban notice to channel {channel} in guild {guild}: {e}");
            NoticeOutcome::Failed(channel, e)
        }
    }
}
