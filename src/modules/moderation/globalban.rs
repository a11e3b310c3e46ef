use serenity::{
    all::{CommandOptionType, CreateCommandOption},
    async_trait,
};

use crate::{sys::Command, CommandError, Invocation, Platform};

use super::fanout::{execute_ban, BanRequest};

pub struct CmdGlobalBan;

#[async_trait]
impl Command for CmdGlobalBan {
    fn name(&self) -> &str {
        "globalban"
    }

    fn description(&self) -> &str {
        "Ban a user across multiple servers."
    }

    fn options(&self) -> Vec<CreateCommandOption> {
        vec![
            CreateCommandOption::new(
                CommandOptionType::String,
                "userid",
                "The 18-digit unique identifier of the user",
            )
            .required(true),
            CreateCommandOption::new(CommandOptionType::String, "reason", "A reason for the ban")
                .required(false),
        ]
    }

    async fn run(
        &self,
        invocation: &Invocation,
        platform: &dyn Platform,
    ) -> Result<String, CommandError> {
        let request = BanRequest::authorize(
            invocation.executor.as_ref(),
            invocation.get("userid"),
            invocation.get("reason"),
        )?;

        Ok(execute_ban(platform, &request).await?.message())
    }
}

#[cfg(test)]
mod tests {
    use serenity::all::{GuildId, Permissions, UserId};

    use super::*;
    use crate::sys::testing::{executor, FakePlatform};

    async fn reply(invocation: Invocation, platform: &FakePlatform) -> String {
        match CmdGlobalBan.run(&invocation, platform).await {
            Ok(content) => content,
            Err(e) => e.user_message().to_string(),
        }
    }

    #[tokio::test]
    async fn bans_in_all_three_guilds() {
        let mut platform =
            FakePlatform::with_guilds([GuildId::new(1), GuildId::new(2), GuildId::new(3)]);
        platform.add_user(UserId::new(81726354), "U");

        let invocation = Invocation::new("globalban")
            .executor(executor(Permissions::BAN_MEMBERS))
            .option("userid", "81726354")
            .option("reason", "alt account");

        assert_eq!(
            reply(invocation, &platform).await,
            "User `U` (ID: `81726354`) has been banned across all servers for: \"alt account\""
        );
        assert_eq!(platform.bans().len(), 3);
        assert!(platform.notices().is_empty());
    }

    #[tokio::test]
    async fn unresolvable_id_asks_for_a_real_one() {
        let platform = FakePlatform::with_guilds([GuildId::new(1)]);

        let invocation = Invocation::new("globalban")
            .executor(executor(Permissions::BAN_MEMBERS))
            .option("userid", "999999999999999999");

        assert_eq!(
            reply(invocation, &platform).await,
            "Are you gonna supply an ACTUAL user id?"
        );
        assert!(platform.bans().is_empty());
    }

    #[tokio::test]
    async fn bare_user_is_refused() {
        let mut platform = FakePlatform::with_guilds([GuildId::new(1)]);
        platform.add_user(UserId::new(5), "U");

        let invocation = Invocation::new("globalban").option("userid", "5");

        assert_eq!(
            reply(invocation, &platform).await,
            "You don't have permission to use this, buddy."
        );
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_reason_falls_back_to_placeholder() {
        let mut platform = FakePlatform::with_guilds([GuildId::new(1)]);
        platform.add_user(UserId::new(5), "U");

        let invocation = Invocation::new("globalban")
            .executor(executor(Permissions::ADMINISTRATOR))
            .option("userid", "5");

        assert_eq!(
            reply(invocation, &platform).await,
            "User `U` (ID: `5`) has been banned across all servers for: \"<No Reason Specified>\""
        );
    }

    #[tokio::test]
    async fn platform_failure_reads_as_generic() {
        let mut platform = FakePlatform::with_guilds([GuildId::new(1)]);
        platform.add_user(UserId::new(5), "U");
        platform.guild_mut(GuildId::new(1)).ban_error =
            Some(crate::PlatformError::Request("Missing Permissions".to_string()));

        let invocation = Invocation::new("globalban")
            .executor(executor(Permissions::BAN_MEMBERS))
            .option("userid", "5");

        assert_eq!(
            reply(invocation, &platform).await,
            "SOMETHING went wrong when banning..."
        );
    }
}
