use serenity::async_trait;

use crate::{sys::Command, CommandError, Invocation, Platform};

pub struct CmdPing;

#[async_trait]
impl Command for CmdPing {
    fn name(&self) -> &str {
        "ping"
    }

    fn description(&self) -> &str {
        "pong!"
    }

    async fn run(
        &self,
        _invocation: &Invocation,
        _platform: &dyn Platform,
    ) -> Result<String, CommandError> {
        Ok("Pong!".to_string())
    }
}
